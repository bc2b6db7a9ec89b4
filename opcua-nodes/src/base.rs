// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `Base`, the fields and attribute handling common to every `NodeClass`.

use opcua_types::{AttributeId, DataValue, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant};

use crate::{
    access_level::WriteMask,
    reference::{Reference, ReferenceDirection},
};

/// Fields every node class carries, and the attribute dispatch for the five
/// attributes common to all eight classes.
#[derive(Debug, Clone)]
pub struct Base {
    node_class: NodeClass,
    node_id: NodeId,
    browse_name: QualifiedName,
    display_name: LocalizedText,
    description: LocalizedText,
    write_mask: WriteMask,
    user_write_mask: WriteMask,
    references: Vec<Reference>,
}

impl Base {
    /// Construct with defaulted optional attributes.
    pub fn new(
        node_class: NodeClass,
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        display_name: impl Into<LocalizedText>,
    ) -> Self {
        Base {
            node_class,
            node_id: node_id.clone(),
            browse_name: browse_name.into(),
            display_name: display_name.into(),
            description: LocalizedText::default(),
            write_mask: WriteMask::empty(),
            user_write_mask: WriteMask::empty(),
            references: Vec::new(),
        }
    }

    /// `true` iff the node id is non-null and the browse name is non-null,
    /// the minimum a node needs to be usable.
    pub fn is_valid(&self) -> bool {
        !self.node_id.is_null() && !self.browse_name.name.is_null()
    }

    pub fn node_class(&self) -> NodeClass {
        self.node_class
    }
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }
    pub fn browse_name(&self) -> &QualifiedName {
        &self.browse_name
    }
    pub fn set_browse_name(&mut self, v: impl Into<QualifiedName>) {
        self.browse_name = v.into();
    }
    pub fn display_name(&self) -> &LocalizedText {
        &self.display_name
    }
    pub fn set_display_name(&mut self, v: impl Into<LocalizedText>) {
        self.display_name = v.into();
    }
    pub fn description(&self) -> &LocalizedText {
        &self.description
    }
    pub fn set_description(&mut self, v: impl Into<LocalizedText>) {
        self.description = v.into();
    }
    pub fn write_mask(&self) -> WriteMask {
        self.write_mask
    }
    pub fn set_write_mask(&mut self, v: WriteMask) {
        self.write_mask = v;
    }
    pub fn user_write_mask(&self) -> WriteMask {
        self.user_write_mask
    }
    pub fn set_user_write_mask(&mut self, v: WriteMask) {
        self.user_write_mask = v;
    }

    /// This node's references, in insertion order.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Mutable access to this node's references, for the address space to
    /// append to or prune during `AddNode`/`DeleteNode`.
    pub fn references_mut(&mut self) -> &mut Vec<Reference> {
        &mut self.references
    }

    /// Append a reference.
    pub fn add_reference(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// Remove every reference whose target equals `target`, in either
    /// direction. Returns the count removed.
    pub fn remove_references_to(&mut self, target: &NodeId) -> usize {
        let before = self.references.len();
        self.references.retain(|r| &r.target.node_id != target);
        before - self.references.len()
    }

    /// First forward reference of the given type, if any.
    pub fn find_forward(&self, reference_type: &NodeId) -> Option<&Reference> {
        self.references
            .iter()
            .find(|r| r.is_forward() && &r.reference_type == reference_type)
    }

    /// First inverse reference of the given type, if any.
    pub fn find_inverse(&self, reference_type: &NodeId) -> Option<&Reference> {
        self.references
            .iter()
            .find(|r| !r.is_forward() && &r.reference_type == reference_type)
    }

    /// The five attributes common to every node class.
    pub fn get_attribute(&self, attribute_id: AttributeId, _index_range: &NumericRange) -> Option<DataValue> {
        Some(DataValue::new(match attribute_id {
            AttributeId::NodeId => Variant::from(self.node_id.clone()),
            AttributeId::NodeClass => Variant::Int32(self.node_class as i32),
            AttributeId::BrowseName => Variant::from(self.browse_name.clone()),
            AttributeId::DisplayName => Variant::from(self.display_name.clone()),
            AttributeId::Description => Variant::from(self.description.clone()),
            AttributeId::WriteMask => Variant::UInt32(self.write_mask.bits()),
            AttributeId::UserWriteMask => Variant::UInt32(self.user_write_mask.bits()),
            _ => return None,
        }))
    }

    /// Attempt to set one of the five common attributes. `AddNode` never
    /// calls this for `WriteMask`/`UserWriteMask` (a caller-specified write
    /// mask is rejected outright), but `ReadAttribute` still
    /// needs to report them, and other layers may rewrite `DisplayName`/
    /// `Description` post-construction.
    pub fn set_attribute(&mut self, attribute_id: AttributeId, value: Variant) -> Result<(), StatusCode> {
        match attribute_id {
            AttributeId::DisplayName => match value {
                Variant::LocalizedText(v) => {
                    self.display_name = *v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::Description => match value {
                Variant::LocalizedText(v) => {
                    self.description = *v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::WriteMask => match value {
                Variant::UInt32(v) => {
                    self.write_mask = WriteMask::from_bits_truncate(v);
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::UserWriteMask => match value {
                Variant::UInt32(v) => {
                    self.user_write_mask = WriteMask::from_bits_truncate(v);
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            _ => Err(StatusCode::BadAttributeIdInvalid),
        }
    }
}

/// Reference direction helper used when building a node's initial parent
/// link in `AddNode`: one forward and one inverse reference are created on
/// the new node.
pub fn parent_reference(reference_type: NodeId, parent: NodeId) -> Reference {
    Reference {
        reference_type,
        direction: ReferenceDirection::Inverse,
        target: parent.into_expanded(),
    }
}
