// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The address-space store and its transactional access façade.
//!
//! [`store::AddressSpace`] owns the node map, reference lists and type
//! tree; [`access::AddressSpaceAccess`] is the only way callers read or
//! mutate it, translating every request into the node-level API and
//! mapping failures onto [`opcua_types::StatusCode`].

mod access;
mod errors;
mod limits;
mod operation_log;
mod store;
mod type_tree;

pub use access::{
    AddNodeItem, AddressSpaceAccess, BrowseDirection, RelativePathElement, TimestampWrite,
};
pub use errors::EngineError;
pub use limits::EngineLimits;
pub use operation_log::{OperationLog, OperationLogEntry, WriteValueRecord};
pub use store::AddressSpace;
pub use type_tree::{DefaultTypeTree, TypeTree};
