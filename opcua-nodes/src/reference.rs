// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `Reference`, the directed, typed edge between two nodes.

use opcua_types::{ExpandedNodeId, NodeId};

/// Which way a reference points relative to the node that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceDirection {
    /// The owning node is the source.
    Forward,
    /// The owning node is the target.
    Inverse,
}

///// A single directed edge stored on a node: the reference type, direction,
/// and target.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// The reference type node (e.g. `HasComponent`).
    pub reference_type: NodeId,
    /// `Forward` if the owning node is the source, `Inverse` otherwise.
    pub direction: ReferenceDirection,
    /// The node at the other end.
    pub target: ExpandedNodeId,
}

impl Reference {
    /// Construct a forward reference to a local target.
    pub fn forward(reference_type: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Reference {
            reference_type: reference_type.into(),
            direction: ReferenceDirection::Forward,
            target: target.into().into_expanded(),
        }
    }

    /// Construct an inverse reference to a local target.
    pub fn inverse(reference_type: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Reference {
            reference_type: reference_type.into(),
            direction: ReferenceDirection::Inverse,
            target: target.into().into_expanded(),
        }
    }

    /// `true` iff this is a forward reference.
    pub fn is_forward(&self) -> bool {
        matches!(self.direction, ReferenceDirection::Forward)
    }

    /// `true` iff the target is local.
    pub fn is_local(&self) -> bool {
        self.target.is_local()
    }
}

///// The outcome of a `Browse` call over a node's references: just enough to
/// build a `ReferenceDescription`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDescription {
    /// The reference type followed.
    pub reference_type_id: NodeId,
    /// `true` if the reference was followed in the forward direction.
    pub is_forward: bool,
    /// The node at the other end.
    pub node_id: ExpandedNodeId,
}
