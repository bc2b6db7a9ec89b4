// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Node representation for the OPC UA address-space engine: the eight
//! `NodeClass` structs, the shared `Base` fields and `Node`/`NodeBase`
//! traits they implement, a generic chained `NodeBuilder`, and the
//! `NodeAttributes` bag carried by `AddNode` requests.

mod access_level;
mod attributes;
mod base;
mod builder;
mod data_type;
mod errors;
mod method;
mod node;
mod object;
mod object_type;
mod reference;
mod reference_type;
mod variable;
mod variable_type;
mod view;

pub use access_level::{AccessLevel, EventNotifier, WriteMask};
pub use attributes::{
    AttributesMask, MethodAttributes, NodeAttributes, ObjectAttributes, VariableAttributes,
};
pub use base::{parent_reference, Base};
pub use builder::{NodeBuilder, WithIdentity};
pub use data_type::{DataType, DataTypeBuilder};
pub use errors::FromAttributesError;
pub use method::{Method, MethodBuilder};
pub use node::{Node, NodeBase, NodeType};
pub use object::{Object, ObjectBuilder};
pub use object_type::{ObjectType, ObjectTypeBuilder};
pub use reference::{Reference, ReferenceDescription, ReferenceDirection};
pub use reference_type::{ReferenceType, ReferenceTypeBuilder};
pub use variable::{TimestampsToReturn, Variable, VariableBuilder};
pub use variable_type::{VariableType, VariableTypeBuilder};
pub use view::{View, ViewBuilder};
