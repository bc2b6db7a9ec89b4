// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `NodeAttributes`, the per-node-class attribute bag carried by `AddNode`
//! requests, and the `SpecifiedAttributes` bitmask that says which fields
//! the caller actually populated.

use bitflags::bitflags;
use opcua_types::{LocalizedText, NodeId, Variant};

bitflags! {
    /// Which optional fields of a `NodeAttributes` struct the caller
    /// populated (Part 3 Table 70 bit assignment).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttributesMask: u32 {
        const ACCESS_LEVEL = 1;
        const ARRAY_DIMENSIONS = 2;
        const BROWSE_NAME = 4;
        const CONTAINS_NO_LOOPS = 8;
        const DATA_TYPE = 16;
        const DESCRIPTION = 32;
        const DISPLAY_NAME = 64;
        const EVENT_NOTIFIER = 128;
        const EXECUTABLE = 256;
        const HISTORIZING = 512;
        const INVERSE_NAME = 1024;
        const IS_ABSTRACT = 2048;
        const MINIMUM_SAMPLING_INTERVAL = 4096;
        const NODE_CLASS = 8192;
        const NODE_ID = 16384;
        const SYMMETRIC = 32768;
        const USER_ACCESS_LEVEL = 65536;
        const USER_EXECUTABLE = 131072;
        const USER_WRITE_MASK = 262144;
        const VALUE_RANK = 524288;
        const WRITE_MASK = 1048576;
        const VALUE = 2097152;
        const DATA_TYPE_DEFINITION = 4194304;
    }
}

/// Attributes for an `AddNode` call targeting a `Variable`.
#[derive(Debug, Clone, Default)]
pub struct VariableAttributes {
    pub specified_attributes: AttributesMask,
    pub display_name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub write_mask: u32,
    pub user_write_mask: u32,
    pub value: Option<Variant>,
    pub data_type: Option<NodeId>,
    pub value_rank: Option<i32>,
    pub array_dimensions: Option<Vec<u32>>,
    pub access_level: Option<u8>,
    pub user_access_level: Option<u8>,
    pub minimum_sampling_interval: Option<f64>,
    pub historizing: Option<bool>,
}

/// Attributes for an `AddNode` call targeting an `Object`.
#[derive(Debug, Clone, Default)]
pub struct ObjectAttributes {
    pub specified_attributes: AttributesMask,
    pub display_name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub write_mask: u32,
    pub user_write_mask: u32,
    pub event_notifier: Option<u8>,
}

/// Attributes for an `AddNode` call targeting a `Method`.
#[derive(Debug, Clone, Default)]
pub struct MethodAttributes {
    pub specified_attributes: AttributesMask,
    pub display_name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub write_mask: u32,
    pub user_write_mask: u32,
    pub executable: Option<bool>,
    pub user_executable: Option<bool>,
}

/// The class-tagged attribute bag an `AddNode` item carries.
#[derive(Debug, Clone)]
pub enum NodeAttributes {
    Object(ObjectAttributes),
    Variable(VariableAttributes),
    Method(MethodAttributes),
}
