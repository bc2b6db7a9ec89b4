// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `ReferenceType` and `ReferenceTypeBuilder`.

use opcua_types::{AttributeId, DataValue, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant};

use crate::{
    base::Base,
    builder::{NodeBuilder, WithIdentity},
    node::{node_base_impl, Node},
};

pub type ReferenceTypeBuilder = NodeBuilder<ReferenceType>;

impl ReferenceTypeBuilder {
    pub fn symmetric(mut self, symmetric: bool) -> Self {
        self.node.symmetric = symmetric;
        self
    }
    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.node.is_abstract = is_abstract;
        self
    }
    pub fn inverse_name(mut self, name: impl Into<LocalizedText>) -> Self {
        self.node.inverse_name = Some(name.into());
        self
    }
}

/// A `ReferenceType` is a type of node within the `AddressSpace`.
#[derive(Debug)]
pub struct ReferenceType {
    base: Base,
    symmetric: bool,
    is_abstract: bool,
    inverse_name: Option<LocalizedText>,
}

impl Default for ReferenceType {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::ReferenceType, &NodeId::null(), "", ""),
            symmetric: false,
            is_abstract: false,
            inverse_name: None,
        }
    }
}

impl WithIdentity for ReferenceType {
    fn set_identity(&mut self, node_id: &NodeId, browse_name: QualifiedName, display_name: LocalizedText) {
        self.base = Base::new(NodeClass::ReferenceType, node_id, browse_name, display_name);
    }
}

node_base_impl!(ReferenceType);

impl Node for ReferenceType {
    fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue> {
        match attribute_id {
            AttributeId::Symmetric => Some(DataValue::new(self.symmetric)),
            AttributeId::IsAbstract => Some(DataValue::new(self.is_abstract)),
            AttributeId::InverseName => self.inverse_name.clone().map(DataValue::new),
            _ => self.base.get_attribute(attribute_id, index_range),
        }
    }

    fn set_attribute(&mut self, attribute_id: AttributeId, value: Variant) -> Result<(), StatusCode> {
        match attribute_id {
            AttributeId::Symmetric => match value {
                Variant::Boolean(v) => {
                    self.symmetric = v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::IsAbstract => match value {
                Variant::Boolean(v) => {
                    self.is_abstract = v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::InverseName => match value {
                Variant::LocalizedText(v) => {
                    self.inverse_name = Some(*v);
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            _ => self.base.set_attribute(attribute_id, value),
        }
    }
}

impl ReferenceType {
    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }
    pub fn symmetric(&self) -> bool {
        self.symmetric
    }
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }
}
