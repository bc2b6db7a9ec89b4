// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `Node`, the attribute-dispatch trait every node class implements, and
//! `NodeType`, the tagged union over the eight node classes ("Dynamic dispatch per
//! NodeClass").

use opcua_types::{AttributeId, DataValue, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant};

use crate::{
    access_level::WriteMask,
    base::Base,
    data_type::DataType,
    method::Method,
    object::Object,
    object_type::ObjectType,
    reference::Reference,
    reference_type::ReferenceType,
    variable::Variable,
    variable_type::VariableType,
    view::View,
};

/// Attribute read/write dispatch, implemented once per node class. Unknown
/// or class-invalid attributes are rejected with `BadAttributeIdInvalid`,
/// never modelled as a subclass relationship.
pub trait Node {
    /// Read a single attribute. `None` means the attribute isn't known to
    /// this node class at all; callers map that to `BadAttributeIdInvalid`.
    fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue>;

    /// Write a single attribute.
    fn set_attribute(&mut self, attribute_id: AttributeId, value: Variant) -> Result<(), StatusCode>;
}

/// Accessors common to every node class, implemented by delegating to the
/// embedded `Base`.
pub trait NodeBase {
    fn base(&self) -> &Base;
    fn base_mut(&mut self) -> &mut Base;

    fn node_id(&self) -> &NodeId {
        self.base().node_id()
    }
    fn node_class(&self) -> NodeClass {
        self.base().node_class()
    }
    fn browse_name(&self) -> &QualifiedName {
        self.base().browse_name()
    }
    fn display_name(&self) -> &LocalizedText {
        self.base().display_name()
    }
    fn set_display_name(&mut self, v: impl Into<LocalizedText>) {
        self.base_mut().set_display_name(v)
    }
    fn description(&self) -> &LocalizedText {
        self.base().description()
    }
    fn set_description(&mut self, v: impl Into<LocalizedText>) {
        self.base_mut().set_description(v)
    }
    fn write_mask(&self) -> WriteMask {
        self.base().write_mask()
    }
    fn set_write_mask(&mut self, v: WriteMask) {
        self.base_mut().set_write_mask(v)
    }
    fn user_write_mask(&self) -> WriteMask {
        self.base().user_write_mask()
    }
    fn set_user_write_mask(&mut self, v: WriteMask) {
        self.base_mut().set_user_write_mask(v)
    }
    fn references(&self) -> &[Reference] {
        self.base().references()
    }
    fn references_mut(&mut self) -> &mut Vec<Reference> {
        self.base_mut().references_mut()
    }
    fn is_valid(&self) -> bool {
        self.base().is_valid()
    }
}

/// `node_base_impl!(Variable)` implements [`NodeBase`] for a node class
/// whose only field named `base` is a [`Base`].
macro_rules! node_base_impl {
    ($ty:ident) => {
        impl crate::node::NodeBase for $ty {
            fn base(&self) -> &crate::base::Base {
                &self.base
            }
            fn base_mut(&mut self) -> &mut crate::base::Base {
                &mut self.base
            }
        }
    };
}
pub(crate) use node_base_impl;

/// The tagged union over the eight node classes, held by the address
/// space's backing store: a mapping NodeId → Node.
#[derive(Debug)]
pub enum NodeType {
    Object(Object),
    Variable(Variable),
    Method(Method),
    ObjectType(ObjectType),
    VariableType(VariableType),
    ReferenceType(ReferenceType),
    DataType(DataType),
    View(View),
}

macro_rules! dispatch {
    ($self:ident, $node:ident => $body:expr) => {
        match $self {
            NodeType::Object($node) => $body,
            NodeType::Variable($node) => $body,
            NodeType::Method($node) => $body,
            NodeType::ObjectType($node) => $body,
            NodeType::VariableType($node) => $body,
            NodeType::ReferenceType($node) => $body,
            NodeType::DataType($node) => $body,
            NodeType::View($node) => $body,
        }
    };
}

impl NodeType {
    pub fn node_id(&self) -> &NodeId {
        dispatch!(self, n => n.node_id())
    }
    pub fn node_class(&self) -> NodeClass {
        dispatch!(self, n => n.node_class())
    }
    pub fn browse_name(&self) -> &QualifiedName {
        dispatch!(self, n => n.browse_name())
    }
    pub fn display_name(&self) -> &LocalizedText {
        dispatch!(self, n => n.display_name())
    }
    pub fn references(&self) -> &[Reference] {
        dispatch!(self, n => n.references())
    }
    pub fn references_mut(&mut self) -> &mut Vec<Reference> {
        dispatch!(self, n => n.references_mut())
    }
    pub fn is_valid(&self) -> bool {
        dispatch!(self, n => n.is_valid())
    }
    pub fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue> {
        dispatch!(self, n => n.get_attribute(attribute_id, index_range))
    }
    pub fn set_attribute(&mut self, attribute_id: AttributeId, value: Variant) -> Result<(), StatusCode> {
        dispatch!(self, n => n.set_attribute(attribute_id, value))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            NodeType::Variable(v) => Some(v),
            _ => None,
        }
    }
    pub fn as_variable_mut(&mut self) -> Option<&mut Variable> {
        match self {
            NodeType::Variable(v) => Some(v),
            _ => None,
        }
    }
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            NodeType::Object(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Object> for NodeType {
    fn from(v: Object) -> Self {
        NodeType::Object(v)
    }
}
impl From<Variable> for NodeType {
    fn from(v: Variable) -> Self {
        NodeType::Variable(v)
    }
}
impl From<Method> for NodeType {
    fn from(v: Method) -> Self {
        NodeType::Method(v)
    }
}
impl From<ObjectType> for NodeType {
    fn from(v: ObjectType) -> Self {
        NodeType::ObjectType(v)
    }
}
impl From<VariableType> for NodeType {
    fn from(v: VariableType) -> Self {
        NodeType::VariableType(v)
    }
}
impl From<ReferenceType> for NodeType {
    fn from(v: ReferenceType) -> Self {
        NodeType::ReferenceType(v)
    }
}
impl From<DataType> for NodeType {
    fn from(v: DataType) -> Self {
        NodeType::DataType(v)
    }
}
impl From<View> for NodeType {
    fn from(v: View) -> Self {
        NodeType::View(v)
    }
}
