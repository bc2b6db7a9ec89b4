// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `ObjectType` and `ObjectTypeBuilder`.

use opcua_types::{AttributeId, DataValue, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant};

use crate::{
    base::Base,
    builder::{NodeBuilder, WithIdentity},
    node::{node_base_impl, Node},
};

pub type ObjectTypeBuilder = NodeBuilder<ObjectType>;

impl ObjectTypeBuilder {
    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.node.set_is_abstract(is_abstract);
        self
    }
}

/// An `ObjectType` is a type of node within the `AddressSpace`.
#[derive(Debug)]
pub struct ObjectType {
    base: Base,
    is_abstract: bool,
}

impl Default for ObjectType {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::ObjectType, &NodeId::null(), "", ""),
            is_abstract: false,
        }
    }
}

impl WithIdentity for ObjectType {
    fn set_identity(&mut self, node_id: &NodeId, browse_name: QualifiedName, display_name: LocalizedText) {
        self.base = Base::new(NodeClass::ObjectType, node_id, browse_name, display_name);
    }
}

node_base_impl!(ObjectType);

impl Node for ObjectType {
    fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue> {
        match attribute_id {
            AttributeId::IsAbstract => Some(DataValue::new(self.is_abstract)),
            _ => self.base.get_attribute(attribute_id, index_range),
        }
    }

    fn set_attribute(&mut self, attribute_id: AttributeId, value: Variant) -> Result<(), StatusCode> {
        match attribute_id {
            AttributeId::IsAbstract => match value {
                Variant::Boolean(v) => {
                    self.is_abstract = v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            _ => self.base.set_attribute(attribute_id, value),
        }
    }
}

impl ObjectType {
    pub fn new(node_id: &NodeId, browse_name: impl Into<QualifiedName>, display_name: impl Into<LocalizedText>, is_abstract: bool) -> Self {
        ObjectTypeBuilder::new(node_id, browse_name, display_name).is_abstract(is_abstract).build()
    }

    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }
    pub fn set_is_abstract(&mut self, v: bool) {
        self.is_abstract = v;
    }
}
