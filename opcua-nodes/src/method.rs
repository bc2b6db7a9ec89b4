// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `Method` and `MethodBuilder`.

use opcua_types::{AttributeId, DataValue, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant};

use crate::{
    attributes::{AttributesMask, MethodAttributes},
    base::Base,
    builder::{NodeBuilder, WithIdentity},
    errors::FromAttributesError,
    node::{node_base_impl, Node},
};

pub type MethodBuilder = NodeBuilder<Method>;

impl MethodBuilder {
    pub fn executable(mut self, executable: bool) -> Self {
        self.node.set_executable(executable);
        self
    }
    pub fn user_executable(mut self, user_executable: bool) -> Self {
        self.node.set_user_executable(user_executable);
        self
    }
}

/// A `Method` is a type of node within the `AddressSpace`.
#[derive(Debug)]
pub struct Method {
    base: Base,
    executable: bool,
    user_executable: bool,
}

impl Default for Method {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::Method, &NodeId::null(), "", ""),
            executable: false,
            user_executable: false,
        }
    }
}

impl WithIdentity for Method {
    fn set_identity(&mut self, node_id: &NodeId, browse_name: QualifiedName, display_name: LocalizedText) {
        self.base = Base::new(NodeClass::Method, node_id, browse_name, display_name);
    }
}

node_base_impl!(Method);

impl Node for Method {
    fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue> {
        match attribute_id {
            AttributeId::Executable => Some(DataValue::new(self.executable)),
            AttributeId::UserExecutable => Some(DataValue::new(self.user_executable)),
            _ => self.base.get_attribute(attribute_id, index_range),
        }
    }

    fn set_attribute(&mut self, attribute_id: AttributeId, value: Variant) -> Result<(), StatusCode> {
        match attribute_id {
            AttributeId::Executable => match value {
                Variant::Boolean(v) => {
                    self.executable = v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::UserExecutable => match value {
                Variant::Boolean(v) => {
                    self.user_executable = v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            _ => self.base.set_attribute(attribute_id, value),
        }
    }
}

impl Method {
    pub fn new(node_id: &NodeId, browse_name: impl Into<QualifiedName>, display_name: impl Into<LocalizedText>, executable: bool) -> Self {
        MethodBuilder::new(node_id, browse_name, display_name)
            .executable(executable)
            .user_executable(executable)
            .build()
    }

    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }

    pub fn executable(&self) -> bool {
        self.executable
    }
    pub fn set_executable(&mut self, v: bool) {
        self.executable = v;
    }
    pub fn user_executable(&self) -> bool {
        self.user_executable
    }
    pub fn set_user_executable(&mut self, v: bool) {
        self.user_executable = v;
    }

    /// Build a `Method` from an `AddNode` request's attribute bag, applying
    /// the per-attribute population rules: `UserExecutable` is user-dependent
    /// and this engine refuses to accept a caller-supplied value for it.
    pub fn from_attributes(
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        attributes: MethodAttributes,
    ) -> Result<Self, FromAttributesError> {
        if attributes.specified_attributes.intersects(AttributesMask::WRITE_MASK | AttributesMask::USER_WRITE_MASK) {
            return Err(FromAttributesError::UnsupportedAttribute);
        }
        if attributes.user_executable.is_some() {
            return Err(FromAttributesError::UnsupportedAttribute);
        }
        let browse_name = browse_name.into();
        let display_name = attributes.display_name.unwrap_or_else(|| LocalizedText::from_text(browse_name.name.as_ref()));
        let mut node = MethodBuilder::new(node_id, browse_name, display_name)
            .executable(attributes.executable.unwrap_or(false))
            .user_executable(false)
            .build();
        if let Some(description) = attributes.description {
            node.set_description(description);
        }
        Ok(node)
    }
}
