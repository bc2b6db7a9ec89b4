// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `DataType` and `DataTypeBuilder`.

use opcua_types::{AttributeId, DataValue, ExtensionObject, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant};

use crate::{
    base::Base,
    builder::{NodeBuilder, WithIdentity},
    node::{node_base_impl, Node},
};

pub type DataTypeBuilder = NodeBuilder<DataType>;

impl DataTypeBuilder {
    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.node.is_abstract = is_abstract;
        self
    }
}

/// A `DataType` is a type of node within the `AddressSpace`.
#[derive(Debug)]
pub struct DataType {
    base: Base,
    is_abstract: bool,
    data_type_definition: Option<ExtensionObject>,
}

impl Default for DataType {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::DataType, &NodeId::null(), "", ""),
            is_abstract: false,
            data_type_definition: None,
        }
    }
}

impl WithIdentity for DataType {
    fn set_identity(&mut self, node_id: &NodeId, browse_name: QualifiedName, display_name: LocalizedText) {
        self.base = Base::new(NodeClass::DataType, node_id, browse_name, display_name);
    }
}

node_base_impl!(DataType);

impl Node for DataType {
    fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue> {
        match attribute_id {
            AttributeId::IsAbstract => Some(DataValue::new(self.is_abstract)),
            AttributeId::DataTypeDefinition => self
                .data_type_definition
                .clone()
                .map(|v| DataValue::new(Variant::from(v))),
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
            AttributeId::DataTypeDefinition => match value {
                Variant::ExtensionObject(v) => {
                    self.data_type_definition = Some(*v);
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            _ => self.base.set_attribute(attribute_id, value),
        }
    }
}

impl DataType {
    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }
    pub fn data_type_definition(&self) -> Option<&ExtensionObject> {
        self.data_type_definition.as_ref()
    }
}
