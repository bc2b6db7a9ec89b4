// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `VariableType` and `VariableTypeBuilder`.

use opcua_types::{AttributeId, DataValue, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant};

use crate::{
    base::Base,
    builder::{NodeBuilder, WithIdentity},
    node::{node_base_impl, Node},
};

pub type VariableTypeBuilder = NodeBuilder<VariableType>;

impl VariableTypeBuilder {
    pub fn value(mut self, value: impl Into<Variant>) -> Self {
        self.node.value = Some(value.into());
        self
    }
    pub fn data_type(mut self, data_type: impl Into<NodeId>) -> Self {
        self.node.data_type = data_type.into();
        self
    }
    pub fn value_rank(mut self, value_rank: i32) -> Self {
        self.node.value_rank = value_rank;
        self
    }
    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.node.is_abstract = is_abstract;
        self
    }
}

/// A `VariableType` is a type of node within the `AddressSpace`. Its
/// `Value` is an optional default for instances.
#[derive(Debug)]
pub struct VariableType {
    base: Base,
    data_type: NodeId,
    value_rank: i32,
    value: Option<Variant>,
    is_abstract: bool,
    array_dimensions: Option<Vec<u32>>,
}

impl Default for VariableType {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::VariableType, &NodeId::null(), "", ""),
            data_type: NodeId::null(),
            value_rank: -1,
            value: None,
            is_abstract: false,
            array_dimensions: None,
        }
    }
}

impl WithIdentity for VariableType {
    fn set_identity(&mut self, node_id: &NodeId, browse_name: QualifiedName, display_name: LocalizedText) {
        self.base = Base::new(NodeClass::VariableType, node_id, browse_name, display_name);
    }
}

node_base_impl!(VariableType);

impl Node for VariableType {
    fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue> {
        match attribute_id {
            AttributeId::Value => self.value.clone().map(DataValue::new),
            AttributeId::DataType => Some(DataValue::new(self.data_type.clone())),
            AttributeId::ValueRank => Some(DataValue::new(self.value_rank)),
            AttributeId::IsAbstract => Some(DataValue::new(self.is_abstract)),
            AttributeId::ArrayDimensions => self
                .array_dimensions
                .clone()
                .map(|d| DataValue::new(Variant::from(d))),
            _ => self.base.get_attribute(attribute_id, index_range),
        }
    }

    fn set_attribute(&mut self, attribute_id: AttributeId, value: Variant) -> Result<(), StatusCode> {
        match attribute_id {
            AttributeId::Value => {
                self.value = Some(value);
                Ok(())
            }
            AttributeId::DataType => match value {
                Variant::NodeId(v) => {
                    self.data_type = *v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::ValueRank => match value {
                Variant::Int32(v) => {
                    self.value_rank = v;
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
            _ => self.base.set_attribute(attribute_id, value),
        }
    }
}

impl VariableType {
    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }
    pub fn data_type(&self) -> NodeId {
        self.data_type.clone()
    }
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }
}
