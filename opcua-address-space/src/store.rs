// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `AddressSpace`, the backing store and subtype utilities.

use hashbrown::{HashMap, HashSet};
use opcua_nodes::NodeType;
use opcua_types::{NodeClass, NodeId, ReferenceTypeId};

use crate::type_tree::{DefaultTypeTree, TypeTree};

/// Node store keyed by `NodeId`, preserving insertion order for
/// deterministic `Browse`.
pub struct AddressSpace {
    nodes: HashMap<NodeId, NodeType>,
    /// Insertion order, so Browse and iteration are deterministic even
    /// though lookup is by hashed key.
    order: Vec<NodeId>,
    type_tree: DefaultTypeTree,
    next_id_by_namespace: HashMap<u16, u32>,
    are_nodes_releasable: bool,
    are_read_only_nodes: bool,
    /// NodeIds already warned about a rejected metadata write, so the
    /// diagnostic fires once per node rather than once per write attempt.
    warned_metadata_write: HashSet<NodeId>,
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            type_tree: DefaultTypeTree::new(),
            next_id_by_namespace: HashMap::new(),
            are_nodes_releasable: true,
            are_read_only_nodes: false,
            warned_metadata_write: HashSet::new(),
        }
    }
}

impl AddressSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn are_nodes_releasable(&self) -> bool {
        self.are_nodes_releasable
    }
    pub fn set_nodes_releasable(&mut self, v: bool) {
        self.are_nodes_releasable = v;
    }
    pub fn are_read_only_nodes(&self) -> bool {
        self.are_read_only_nodes
    }
    pub fn set_read_only_nodes(&mut self, v: bool) {
        self.are_read_only_nodes = v;
    }

    pub fn type_tree(&self) -> &DefaultTypeTree {
        &self.type_tree
    }

    /// Emit the "metadata write rejected by read-only store" warning once
    /// per `node_id`, never as an error.
    pub fn warn_metadata_write_rejected_once(&mut self, node_id: &NodeId) {
        if self.warned_metadata_write.insert(node_id.clone()) {
            tracing::warn!(node_id = %node_id, "metadata write rejected by read-only store");
        }
    }

    /// `get(id) → Node?`
    pub fn get(&self, id: &NodeId) -> Option<&NodeType> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut NodeType> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in insertion order, for deterministic iteration.
    pub fn iter(&self) -> impl Iterator<Item = &NodeType> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// `append(node)`: O(1) insert; duplicate id is an error.
    pub fn append(&mut self, node: NodeType) -> Result<(), NodeType> {
        let id = node.node_id().clone();
        if self.nodes.contains_key(&id) {
            return Err(node);
        }
        if let NodeClass::ObjectType | NodeClass::VariableType | NodeClass::ReferenceType | NodeClass::DataType = node.node_class() {
            if let Some(parent) = node
                .references()
                .iter()
                .find(|r| !r.is_forward() && r.reference_type == ReferenceTypeId::HasSubtype.into())
            {
                self.type_tree.add_type_node(&id, &parent.target.node_id, node.node_class());
            }
        }
        self.order.push(id.clone());
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Remove a node entirely; used by `DeleteNode`.
    pub fn remove(&mut self, id: &NodeId) -> Option<NodeType> {
        let node = self.nodes.remove(id)?;
        self.order.retain(|n| n != id);
        self.type_tree.remove(id);
        Some(node)
    }

    /// `fresh_node_id(ns)`: yields a NodeId not already present in the
    /// store. A per-namespace monotonic counter, with a scan-on-collision
    /// fallback.
    pub fn fresh_node_id(&mut self, namespace: u16) -> NodeId {
        let counter = self.next_id_by_namespace.entry(namespace).or_insert(1);
        loop {
            let candidate = NodeId::numeric(namespace, *counter);
            *counter = counter.wrapping_add(1).max(1);
            if !self.nodes.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    // --- Subtype utilities -----------------------------

    /// `is_type_or_subtype(a, b)`: true iff `a == b` or `a` is transitively
    /// a subtype of `b`.
    pub fn is_type_or_subtype(&self, a: &NodeId, b: &NodeId) -> bool {
        a == b || self.type_tree.is_subtype_of(a, b)
    }

    /// `get_direct_parent_type(child)`: the first `TargetId` of the first
    /// inverse `HasSubtype`-or-subtype reference on `child`.
    pub fn get_direct_parent_type(&self, child: &NodeId) -> Option<NodeId> {
        if let Some(parent) = self.type_tree.get_supertype(child) {
            return Some(parent);
        }
        let node = self.nodes.get(child)?;
        node.references()
            .iter()
            .find(|r| !r.is_forward() && self.is_type_or_subtype(&r.reference_type, &ReferenceTypeId::HasSubtype.into()))
            .map(|r| r.target.node_id.clone())
    }

    /// `is_valid_reference_type_id(id)`: true iff `id` exists and has
    /// `NodeClass::ReferenceType`.
    pub fn is_valid_reference_type_id(&self, id: &NodeId) -> bool {
        if self.type_tree.is_reference_type(id) {
            return true;
        }
        matches!(self.nodes.get(id).map(|n| n.node_class()), Some(NodeClass::ReferenceType))
    }

    /// `get_type_definition(node)`: the first forward `HasTypeDefinition`
    /// reference target.
    pub fn get_type_definition(&self, node: &NodeId) -> Option<NodeId> {
        let node = self.nodes.get(node)?;
        node.references()
            .iter()
            .find(|r| r.is_forward() && r.reference_type == ReferenceTypeId::HasTypeDefinition.into())
            .map(|r| r.target.node_id.clone())
    }

    /// `get_encoding_data_type(encoding_node_id)`: given either a `DataType`
    /// node (returns it) or an Object node, follow inverse `HasEncoding` to
    /// the `DataType`.
    pub fn get_encoding_data_type(&self, encoding_node_id: &NodeId) -> Option<NodeId> {
        let node = self.nodes.get(encoding_node_id)?;
        if node.node_class() == NodeClass::DataType {
            return Some(encoding_node_id.clone());
        }
        node.references()
            .iter()
            .find(|r| !r.is_forward() && r.reference_type == ReferenceTypeId::HasEncoding.into())
            .map(|r| r.target.node_id.clone())
    }

    /// `get_data_type_default_binary_encoding(data_type_id)`: follow
    /// `HasEncoding` forward, picking the target Object whose `BrowseName`
    /// equals `"Default Binary"` in namespace 0.
    pub fn get_data_type_default_binary_encoding(&self, data_type_id: &NodeId) -> Option<NodeId> {
        let node = self.nodes.get(data_type_id)?;
        node.references()
            .iter()
            .filter(|r| r.is_forward() && r.reference_type == ReferenceTypeId::HasEncoding.into())
            .find_map(|r| {
                let target = self.nodes.get(&r.target.node_id)?;
                if target.browse_name_matches_default_binary() {
                    Some(r.target.node_id.clone())
                } else {
                    None
                }
            })
    }
}

/// Helper used only by `get_data_type_default_binary_encoding`, kept as an
/// extension trait so `store.rs` doesn't need a match over every
/// `NodeType` variant just to read `browse_name()`.
trait DefaultBinaryBrowseName {
    fn browse_name_matches_default_binary(&self) -> bool;
}

impl DefaultBinaryBrowseName for NodeType {
    fn browse_name_matches_default_binary(&self) -> bool {
        self.browse_name().namespace_index == 0 && self.browse_name().name.as_ref() == "Default Binary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcua_nodes::{Object, ObjectBuilder, ObjectType, Reference, ReferenceDirection, Variable};
    use opcua_types::{DataTypeId, ObjectTypeId, VariableTypeId};

    #[test]
    fn append_rejects_duplicate_id() {
        let mut space = AddressSpace::new();
        let id = NodeId::numeric(1, 1);
        space.append(Object::new(&id, "a", "a").into()).unwrap();
        assert!(space.append(Object::new(&id, "b", "b").into()).is_err());
    }

    #[test]
    fn fresh_node_id_skips_taken_ids() {
        let mut space = AddressSpace::new();
        let first = space.fresh_node_id(1);
        space.append(Object::new(&first, "a", "a").into()).unwrap();
        let second = space.fresh_node_id(1);
        assert_ne!(first, second);
    }

    #[test]
    fn type_definition_is_found() {
        let mut space = AddressSpace::new();
        let folder: NodeId = ObjectTypeId::FolderType.into();
        let id = NodeId::numeric(1, 1);
        let obj = ObjectBuilder::new(&id, "a", "a").has_type_definition(folder.clone()).build();
        space.append(obj.into()).unwrap();
        assert_eq!(space.get_type_definition(&id), Some(folder));
    }

    #[test]
    fn dynamic_variable_type_chains_to_static_root() {
        let mut space = AddressSpace::new();
        let custom = NodeId::numeric(1, 500);
        let vt = ObjectType::new(&custom, "CustomObjectType", "CustomObjectType", false);
        let mut vt: NodeType = vt.into();
        vt.references_mut().push(Reference::inverse(ObjectTypeId::BaseObjectType.into(), ObjectTypeId::BaseObjectType.into()));
        space.append(vt).unwrap();
        assert!(space.is_type_or_subtype(&custom, &ObjectTypeId::BaseObjectType.into()));
    }

    #[test]
    fn variable_data_type_is_dangling_until_added() {
        let v = Variable::new(&NodeId::numeric(1, 1), "v", "v", DataTypeId::UInt32, 1u32);
        assert!(!v.data_type().is_null());
        let _ = VariableTypeId::BaseVariableType;
    }
}
