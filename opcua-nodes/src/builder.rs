// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Builder scaffolding shared by every node class: a thin wrapper that owns
//! the node under construction and exposes chained setters, finished with
//! `.build()`. Mirrors the teacher's `node_builder_impl!` family of macros,
//! collapsed into one generic builder since every node class shares the
//! same `Base`-backed reference/description/display-name surface.

use opcua_types::{LocalizedText, NodeId, QualifiedName, ReferenceTypeId};

use crate::{
    node::NodeBase,
    reference::{Reference, ReferenceDirection},
};

/// A generic builder for any node class `T: Default + NodeBase`.
pub struct NodeBuilder<T> {
    pub(crate) node: T,
}

impl<T: Default + NodeBase> NodeBuilder<T> {
    /// Start building a node with its three always-present identifying
    /// attributes.
    pub fn new(node_id: &NodeId, browse_name: impl Into<QualifiedName>, display_name: impl Into<LocalizedText>) -> Self
    where
        T: WithIdentity,
    {
        let mut node = T::default();
        node.set_identity(node_id, browse_name.into(), display_name.into());
        NodeBuilder { node }
    }

    /// Set the `Description` attribute.
    pub fn description(mut self, description: impl Into<LocalizedText>) -> Self {
        self.node.set_description(description);
        self
    }

    /// Add an arbitrary reference from (or to) this node.
    pub fn reference(mut self, target: impl Into<NodeId>, reference_type: impl Into<NodeId>, direction: ReferenceDirection) -> Self {
        let reference_type = reference_type.into();
        let target = target.into();
        self.node.references_mut().push(match direction {
            ReferenceDirection::Forward => Reference::forward(reference_type, target),
            ReferenceDirection::Inverse => Reference::inverse(reference_type, target),
        });
        self
    }

    /// Add a `HasTypeDefinition` reference (Object/Variable).
    pub fn has_type_definition(self, type_id: impl Into<NodeId>) -> Self {
        self.reference(type_id, ReferenceTypeId::HasTypeDefinition, ReferenceDirection::Forward)
    }

    /// Add an inverse `Organizes` reference to `parent`.
    pub fn organized_by(self, parent: impl Into<NodeId>) -> Self {
        self.reference(parent, ReferenceTypeId::Organizes, ReferenceDirection::Inverse)
    }

    /// Add an inverse `HasComponent` reference to `parent`.
    pub fn component_of(self, parent: impl Into<NodeId>) -> Self {
        self.reference(parent, ReferenceTypeId::HasComponent, ReferenceDirection::Inverse)
    }

    /// Add an inverse `HasProperty` reference to `parent`.
    pub fn property_of(self, parent: impl Into<NodeId>) -> Self {
        self.reference(parent, ReferenceTypeId::HasProperty, ReferenceDirection::Inverse)
    }

    /// Add an inverse `HasSubtype` reference to `parent`, used by type
    /// nodes declaring their supertype.
    pub fn subtype_of(self, parent: impl Into<NodeId>) -> Self {
        self.reference(parent, ReferenceTypeId::HasSubtype, ReferenceDirection::Inverse)
    }

    /// Finish building, yielding the node.
    pub fn build(self) -> T {
        self.node
    }
}

/// Lets [`NodeBuilder::new`] populate a freshly `Default`-constructed node
/// with its node id and names, since `Base::new` needs a `NodeClass` only
/// each concrete node type knows.
pub trait WithIdentity {
    fn set_identity(&mut self, node_id: &NodeId, browse_name: QualifiedName, display_name: LocalizedText);
}
