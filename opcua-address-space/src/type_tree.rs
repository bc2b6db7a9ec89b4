// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The `HasSubtypeBackward` static table and `DefaultTypeTree`, the dynamic
//! subtype registry new types are added to at `AddNode` time.
//!
//! Grounded in the teacher's `async-opcua-nodes::type_tree` module: same
//! `subtypes_by_source`/`subtypes_by_target` shape, same `is_subtype_of`
//! walk, with the namespace-map bookkeeping the teacher carries for XML
//! nodeset import dropped (out of scope here) and a static table consulted
//! before the dynamic one.

use hashbrown::{HashMap, HashSet};

use opcua_types::{DataTypeId, NodeClass, NodeId, ObjectTypeId, ReferenceTypeId, VariableTypeId};

/// One row of the offline-generated `HasSubtypeBackward` table: a standard
/// (namespace 0) type and the type it is a direct subtype of.
struct StaticSubtypeRow {
    node_class: NodeClass,
    id: u32,
    supertype: u32,
}

/// A hand-picked slice of the standard namespace's `HasSubtype` hierarchy,
/// playing the role of an offline-generated table.
/// Constant-time lookup for any id appearing here; the dynamic
/// [`DefaultTypeTree`] walk is the fallback for everything else.
const STATIC_SUBTYPES: &[StaticSubtypeRow] = &[
    StaticSubtypeRow { node_class: NodeClass::VariableType, id: VariableTypeId::BaseDataVariableType as u32, supertype: VariableTypeId::BaseVariableType as u32 },
    StaticSubtypeRow { node_class: NodeClass::VariableType, id: VariableTypeId::PropertyType as u32, supertype: VariableTypeId::BaseVariableType as u32 },
    StaticSubtypeRow { node_class: NodeClass::ObjectType, id: ObjectTypeId::FolderType as u32, supertype: ObjectTypeId::BaseObjectType as u32 },
    StaticSubtypeRow { node_class: NodeClass::ObjectType, id: ObjectTypeId::ServerType as u32, supertype: ObjectTypeId::BaseObjectType as u32 },
    StaticSubtypeRow { node_class: NodeClass::ObjectType, id: ObjectTypeId::DataTypeEncodingType as u32, supertype: ObjectTypeId::BaseObjectType as u32 },
    StaticSubtypeRow { node_class: NodeClass::ObjectType, id: ObjectTypeId::BaseEventType as u32, supertype: ObjectTypeId::BaseObjectType as u32 },
    StaticSubtypeRow { node_class: NodeClass::ObjectType, id: ObjectTypeId::EventQueueOverflowEventType as u32, supertype: ObjectTypeId::BaseEventType as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HierarchicalReferences as u32, supertype: ReferenceTypeId::References as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::NonHierarchicalReferences as u32, supertype: ReferenceTypeId::References as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasChild as u32, supertype: ReferenceTypeId::HierarchicalReferences as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::Organizes as u32, supertype: ReferenceTypeId::HierarchicalReferences as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasEventSource as u32, supertype: ReferenceTypeId::HierarchicalReferences as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasNotifier as u32, supertype: ReferenceTypeId::HasEventSource as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::Aggregates as u32, supertype: ReferenceTypeId::HasChild as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasSubtype as u32, supertype: ReferenceTypeId::HasChild as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasComponent as u32, supertype: ReferenceTypeId::Aggregates as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasProperty as u32, supertype: ReferenceTypeId::Aggregates as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasOrderedComponent as u32, supertype: ReferenceTypeId::HasComponent as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasEncoding as u32, supertype: ReferenceTypeId::NonHierarchicalReferences as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasDescription as u32, supertype: ReferenceTypeId::NonHierarchicalReferences as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasTypeDefinition as u32, supertype: ReferenceTypeId::NonHierarchicalReferences as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::GeneratesEvent as u32, supertype: ReferenceTypeId::NonHierarchicalReferences as u32 },
    StaticSubtypeRow { node_class: NodeClass::ReferenceType, id: ReferenceTypeId::HasModellingRule as u32, supertype: ReferenceTypeId::NonHierarchicalReferences as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::Number as u32, supertype: DataTypeId::BaseDataType as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::Integer as u32, supertype: DataTypeId::Number as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::UInteger as u32, supertype: DataTypeId::Number as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::Float as u32, supertype: DataTypeId::Number as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::Double as u32, supertype: DataTypeId::Number as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::SByte as u32, supertype: DataTypeId::Integer as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::Int16 as u32, supertype: DataTypeId::Integer as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::Int32 as u32, supertype: DataTypeId::Integer as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::Int64 as u32, supertype: DataTypeId::Integer as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::Byte as u32, supertype: DataTypeId::UInteger as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::UInt16 as u32, supertype: DataTypeId::UInteger as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::UInt32 as u32, supertype: DataTypeId::UInteger as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::UInt64 as u32, supertype: DataTypeId::UInteger as u32 },
    StaticSubtypeRow { node_class: NodeClass::DataType, id: DataTypeId::Enumeration as u32, supertype: DataTypeId::BaseDataType as u32 },
];

/// Look up the static table entry for `id`, if `id` is in namespace 0 and
/// present in [`STATIC_SUBTYPES`].
fn static_supertype(id: &NodeId) -> Option<NodeId> {
    if id.namespace != 0 {
        return None;
    }
    let n = match id.identifier {
        opcua_types::Identifier::Numeric(n) => n,
        _ => return None,
    };
    STATIC_SUBTYPES
        .iter()
        .find(|row| row.id == n)
        .map(|row| NodeId::numeric(0, row.supertype))
}

/// `true` iff `id` is a `NodeClass::ReferenceType` row of the static table.
fn static_is_reference_type(id: &NodeId) -> bool {
    if id.namespace != 0 {
        return false;
    }
    let n = match id.identifier {
        opcua_types::Identifier::Numeric(n) => n,
        _ => return false,
    };
    n == ReferenceTypeId::References as u32
        || STATIC_SUBTYPES
            .iter()
            .any(|row| row.id == n && row.node_class == NodeClass::ReferenceType)
}

/// The `NodeClass` of `id` if it's a row of the static table (or one of the
/// four hierarchy roots).
fn static_node_class(id: &NodeId) -> Option<NodeClass> {
    if id.namespace != 0 {
        return None;
    }
    let n = match id.identifier {
        opcua_types::Identifier::Numeric(n) => n,
        _ => return None,
    };
    if n == ReferenceTypeId::References as u32 {
        return Some(NodeClass::ReferenceType);
    }
    if n == ObjectTypeId::BaseObjectType as u32 {
        return Some(NodeClass::ObjectType);
    }
    if n == VariableTypeId::BaseVariableType as u32 {
        return Some(NodeClass::VariableType);
    }
    if n == DataTypeId::BaseDataType as u32 {
        return Some(NodeClass::DataType);
    }
    STATIC_SUBTYPES.iter().find(|row| row.id == n).map(|row| row.node_class)
}

/// Trait for a type tree: a structure that answers subtype queries, used by
/// `is_type_or_subtype`/`is_valid_reference_type_id` and the event-filter
/// engine's `OfType` operator.
pub trait TypeTree {
    /// `true` if `child == ancestor` or `child` is transitively a subtype of
    /// `ancestor` via `HasSubtype`.
    fn is_subtype_of(&self, child: &NodeId, ancestor: &NodeId) -> bool;
    /// The node class of a registered type, if known.
    fn get(&self, node: &NodeId) -> Option<NodeClass>;
    /// The direct supertype of `node`, if any.
    fn get_supertype<'a>(&'a self, node: &'a NodeId) -> Option<NodeId>;
    /// `true` iff `id` is a known `ReferenceType`.
    fn is_reference_type(&self, id: &NodeId) -> bool;
}

/// The dynamic half of subtype resolution: every `ObjectType`/
/// `VariableType`/`ReferenceType`/`DataType` added via `AddNode`, seeded with
/// the roots of each type hierarchy. The static table is consulted first
/// for constant-time lookup when the id is in range; this is the fallback
/// bounded walk.
#[derive(Default, Clone)]
pub struct DefaultTypeTree {
    nodes: HashMap<NodeId, NodeClass>,
    subtypes_by_source: HashMap<NodeId, HashSet<NodeId>>,
    subtypes_by_target: HashMap<NodeId, NodeId>,
}

impl DefaultTypeTree {
    /// A type tree seeded with just the four hierarchy roots.
    pub fn new() -> Self {
        let mut tree = Self::default();
        tree.nodes.insert(ObjectTypeId::BaseObjectType.into(), NodeClass::ObjectType);
        tree.nodes.insert(ReferenceTypeId::References.into(), NodeClass::ReferenceType);
        tree.nodes.insert(VariableTypeId::BaseVariableType.into(), NodeClass::VariableType);
        tree.nodes.insert(DataTypeId::BaseDataType.into(), NodeClass::DataType);
        tree
    }

    /// Register a new type, recording its direct supertype.
    pub fn add_type_node(&mut self, id: &NodeId, parent: &NodeId, node_class: NodeClass) {
        self.nodes.insert(id.clone(), node_class);
        self.subtypes_by_source.entry(parent.clone()).or_default().insert(id.clone());
        self.subtypes_by_target.insert(id.clone(), parent.clone());
    }

    /// Drop a type (mirrors `DeleteNode` removing an `ObjectType`/etc).
    pub fn remove(&mut self, id: &NodeId) {
        self.nodes.remove(id);
        if let Some(parent) = self.subtypes_by_target.remove(id) {
            if let Some(children) = self.subtypes_by_source.get_mut(&parent) {
                children.remove(id);
            }
        }
    }

    fn dynamic_supertype(&self, node: &NodeId) -> Option<&NodeId> {
        self.subtypes_by_target.get(node)
    }
}

impl TypeTree for DefaultTypeTree {
    fn is_subtype_of(&self, child: &NodeId, ancestor: &NodeId) -> bool {
        let mut node = child.clone();
        let mut steps = 0u32;
        loop {
            if &node == ancestor {
                return true;
            }
            steps += 1;
            if steps > 4096 {
                // RECURSION_LIMIT-equivalent backstop for a corrupt/cyclic
                // table; a well-formed HasSubtype graph never reaches this.
                return false;
            }
            if let Some(next) = static_supertype(&node) {
                node = next;
                continue;
            }
            match self.dynamic_supertype(&node) {
                Some(next) => node = next.clone(),
                None => return false,
            }
        }
    }

    fn get(&self, node: &NodeId) -> Option<NodeClass> {
        self.nodes.get(node).copied().or_else(|| static_node_class(node))
    }

    fn get_supertype<'a>(&'a self, node: &'a NodeId) -> Option<NodeId> {
        static_supertype(node).or_else(|| self.dynamic_supertype(node).cloned())
    }

    fn is_reference_type(&self, id: &NodeId) -> bool {
        static_is_reference_type(id) || matches!(self.nodes.get(id), Some(NodeClass::ReferenceType))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_table_resolves_data_variable_chain() {
        let tree = DefaultTypeTree::new();
        assert!(tree.is_subtype_of(
            &VariableTypeId::BaseDataVariableType.into(),
            &VariableTypeId::BaseVariableType.into(),
        ));
    }

    #[test]
    fn same_node_is_its_own_subtype() {
        let tree = DefaultTypeTree::new();
        let id: NodeId = ObjectTypeId::BaseObjectType.into();
        assert!(tree.is_subtype_of(&id, &id));
    }

    #[test]
    fn dynamic_type_chains_onto_static_root() {
        let mut tree = DefaultTypeTree::new();
        let custom = NodeId::numeric(1, 1000);
        tree.add_type_node(&custom, &VariableTypeId::BaseDataVariableType.into(), NodeClass::VariableType);
        assert!(tree.is_subtype_of(&custom, &VariableTypeId::BaseVariableType.into()));
        assert!(!tree.is_subtype_of(&VariableTypeId::BaseVariableType.into(), &custom));
    }

    #[test]
    fn unrelated_types_are_not_subtypes() {
        let tree = DefaultTypeTree::new();
        assert!(!tree.is_subtype_of(&DataTypeId::Int32.into(), &DataTypeId::String.into()));
    }

    #[test]
    fn get_resolves_static_table_types_not_just_seeded_roots() {
        let tree = DefaultTypeTree::new();
        let base_data_variable: NodeId = VariableTypeId::BaseDataVariableType.into();
        assert_eq!(tree.get(&base_data_variable), Some(NodeClass::VariableType));
        let folder: NodeId = ObjectTypeId::FolderType.into();
        assert_eq!(tree.get(&folder), Some(NodeClass::ObjectType));
    }
}
