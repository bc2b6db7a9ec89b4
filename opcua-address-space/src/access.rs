// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `AddressSpaceAccess`, the transactional façade over an [`AddressSpace`]:
//! attribute/value read and write, structural add/delete, browse and
//! browse-path translation. Every method returns either a value plus
//! `StatusCode::Good` or a specific `Bad…`/`Uncertain…` code; nothing here
//! panics on caller input.
//!
//! A handle borrows the store mutably for its lifetime and, when
//! `record_operations` is set, accumulates an [`OperationLog`] of the writes
//! and structural changes it made, for a notification dispatcher to consume
//! once the handle is done.

use opcua_nodes::{
    parent_reference, Method, NodeAttributes, NodeType, Object, ObjectAttributes, Reference,
    ReferenceDescription, TimestampsToReturn, Variable,
};
use opcua_types::{
    AttributeId, DataTypeId, DataValue, DateTime, NodeClass, NodeId, NumericRange, QualifiedName,
    ReferenceTypeId, StatusCode, UAString, Variant, VariantArray, VariantScalarTypeId, VariableTypeId,
};

use crate::{
    errors::EngineError,
    limits::EngineLimits,
    operation_log::{OperationLog, OperationLogEntry, WriteValueRecord},
    store::AddressSpace,
    type_tree::TypeTree,
};

/// Attribute ids `ReadAttribute` refuses even when the underlying node
/// class technically carries the field — these are reported as
/// `BadNotImplemented` unconditionally, not as `BadAttributeIdInvalid`.
const UNIMPLEMENTED_ATTRIBUTES: &[AttributeId] = &[
    AttributeId::ContainsNoLoops,
    AttributeId::InverseName,
    AttributeId::Symmetric,
    AttributeId::EventNotifier,
    AttributeId::MinimumSamplingInterval,
    AttributeId::Historizing,
    AttributeId::UserAccessLevel,
    AttributeId::UserExecutable,
];

/// Which way a `Browse` call follows references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseDirection {
    Forward,
    Inverse,
    Both,
}

/// One step of a `TranslateBrowsePath` relative path.
#[derive(Debug, Clone)]
pub struct RelativePathElement {
    pub reference_type_id: NodeId,
    pub include_subtypes: bool,
    pub is_inverse: bool,
    pub target_name: QualifiedName,
}

/// A caller-supplied source timestamp for `WriteValue`. Both fields zero
/// means "use the current time" rather than an explicit epoch stamp.
#[derive(Debug, Clone, Copy)]
pub struct TimestampWrite {
    pub timestamp: DateTime,
    pub picoseconds: u16,
}

/// One `AddNodes` request item: the node to create, where it attaches, and
/// its class-tagged attribute bag.
#[derive(Debug, Clone)]
pub struct AddNodeItem {
    /// `None` (or the null id) means "server-assigned", drawn from the
    /// namespace of `browse_name`.
    pub requested_node_id: Option<NodeId>,
    pub parent_node_id: NodeId,
    pub reference_type_id: NodeId,
    pub browse_name: QualifiedName,
    pub type_definition: Option<NodeId>,
    pub attributes: NodeAttributes,
}

fn timestamps_to_return_flags(ttr: TimestampsToReturn) -> (bool, bool) {
    match ttr {
        TimestampsToReturn::Source => (true, false),
        TimestampsToReturn::Server => (false, true),
        TimestampsToReturn::Both => (true, true),
        TimestampsToReturn::Neither => (false, false),
    }
}

fn locale_supported(locale: &UAString, supported_locales: Option<&[String]>) -> bool {
    match supported_locales {
        None => true,
        Some(list) => list.iter().any(|l| l.as_str() == locale.as_ref()),
    }
}

/// The LocalizedText-merge special case of `WriteValue`: `None` means the
/// shapes didn't match and the caller should fall through to a plain
/// overwrite; `Some(Err(_))` means a translation named an unsupported
/// locale.
fn merge_localized_text(
    current: &Variant,
    incoming: &Variant,
    supported_locales: Option<&[String]>,
) -> Option<Result<Variant, StatusCode>> {
    match (current, incoming) {
        (Variant::LocalizedText(_), Variant::LocalizedText(new)) => {
            if locale_supported(&new.locale, supported_locales) {
                Some(Ok(incoming.clone()))
            } else {
                Some(Err(StatusCode::BadLocaleNotSupported))
            }
        }
        (Variant::Array(old_arr), Variant::Array(new_arr))
            if old_arr.value_type == VariantScalarTypeId::LocalizedText
                && new_arr.value_type == VariantScalarTypeId::LocalizedText
                && old_arr.dimensions == new_arr.dimensions
                && old_arr.values.len() == new_arr.values.len() =>
        {
            let mut merged = old_arr.values.clone();
            for (slot, incoming_elem) in merged.iter_mut().zip(new_arr.values.iter()) {
                if let Variant::LocalizedText(lt) = incoming_elem {
                    if !locale_supported(&lt.locale, supported_locales) {
                        return Some(Err(StatusCode::BadLocaleNotSupported));
                    }
                    *slot = incoming_elem.clone();
                }
            }
            Some(Ok(Variant::Array(Box::new(VariantArray {
                value_type: old_arr.value_type,
                values: merged,
                dimensions: old_arr.dimensions.clone(),
            }))))
        }
        _ => None,
    }
}

/// Check the `AddNode` preconditions that don't require mutating anything:
/// the reference to the parent is recognised and structurally sound for the
/// node class being added, and the type definition (if required) resolves
/// to the right `NodeClass`.
fn check_constraints(
    space: &AddressSpace,
    parent_node_id: &NodeId,
    reference_type_id: &NodeId,
    node_class: NodeClass,
    type_definition: Option<&NodeId>,
    browse_name: &QualifiedName,
) -> Result<(), EngineError> {
    // `parent_node_id` is a plain `NodeId`, not an `ExpandedNodeId`, so it is
    // local by construction; only its existence needs checking here.
    let parent = space.get(parent_node_id).ok_or(EngineError::ParentNodeInvalid)?;

    let has_component: NodeId = ReferenceTypeId::HasComponent.into();
    let has_property: NodeId = ReferenceTypeId::HasProperty.into();
    let organizes: NodeId = ReferenceTypeId::Organizes.into();
    let aggregates: NodeId = ReferenceTypeId::Aggregates.into();

    if node_class == NodeClass::Method {
        if !space.is_type_or_subtype(reference_type_id, &has_component) {
            return Err(EngineError::ReferenceNotAllowed);
        }
        if !matches!(parent.node_class(), NodeClass::Object | NodeClass::ObjectType) {
            return Err(EngineError::ReferenceNotAllowed);
        }
    } else if space.is_type_or_subtype(reference_type_id, &organizes) {
        if !matches!(parent.node_class(), NodeClass::Object | NodeClass::ObjectType | NodeClass::View) {
            return Err(EngineError::ReferenceNotAllowed);
        }
    } else if space.is_type_or_subtype(reference_type_id, &has_component) {
        match node_class {
            NodeClass::Object => {
                if !matches!(parent.node_class(), NodeClass::Object | NodeClass::ObjectType) {
                    return Err(EngineError::ReferenceNotAllowed);
                }
            }
            NodeClass::Variable => {
                let data_variable_type: NodeId = VariableTypeId::BaseDataVariableType.into();
                let type_def = type_definition.ok_or(EngineError::TypeDefinitionInvalid)?;
                if !space.is_type_or_subtype(type_def, &data_variable_type) {
                    return Err(EngineError::ReferenceNotAllowed);
                }
                if parent.node_class() == NodeClass::Variable {
                    let parent_type = space.get_type_definition(parent_node_id).ok_or(EngineError::ReferenceNotAllowed)?;
                    if !space.is_type_or_subtype(&parent_type, &data_variable_type) {
                        return Err(EngineError::ReferenceNotAllowed);
                    }
                }
                if !matches!(
                    parent.node_class(),
                    NodeClass::Object | NodeClass::ObjectType | NodeClass::VariableType | NodeClass::Variable
                ) {
                    return Err(EngineError::ReferenceNotAllowed);
                }
            }
            _ => return Err(EngineError::ReferenceNotAllowed),
        }
    } else if space.is_type_or_subtype(reference_type_id, &has_property) {
        if node_class != NodeClass::Variable {
            return Err(EngineError::ReferenceNotAllowed);
        }
        let property_type: NodeId = VariableTypeId::PropertyType.into();
        if parent.node_class() == NodeClass::Variable {
            if let Some(parent_type) = space.get_type_definition(parent_node_id) {
                if space.is_type_or_subtype(&parent_type, &property_type) {
                    return Err(EngineError::ReferenceNotAllowed);
                }
            }
        }
        let type_def = type_definition.ok_or(EngineError::TypeDefinitionInvalid)?;
        if !space.is_type_or_subtype(type_def, &property_type) {
            return Err(EngineError::TypeDefinitionInvalid);
        }
    } else if space.is_type_or_subtype(reference_type_id, &aggregates) {
        // Some other Aggregates subtype: accepted without further structural check.
    } else {
        return Err(EngineError::ReferenceNotAllowed);
    }

    if matches!(node_class, NodeClass::Object | NodeClass::Variable) {
        let type_def = type_definition.ok_or(EngineError::TypeDefinitionInvalid)?;
        // Consult the type tree rather than requiring a full node: the
        // standard type hierarchy roots are seeded there without
        // necessarily being present in the node map.
        let type_class = space.type_tree().get(type_def).ok_or(EngineError::TypeDefinitionInvalid)?;
        let expected_class = if node_class == NodeClass::Object { NodeClass::ObjectType } else { NodeClass::VariableType };
        if type_class != expected_class {
            return Err(EngineError::TypeDefinitionInvalid);
        }
    }

    let hierarchical: NodeId = ReferenceTypeId::HierarchicalReferences.into();
    let duplicate = parent.references().iter().any(|r| {
        r.is_forward()
            && r.is_local()
            && space.is_type_or_subtype(&r.reference_type, &hierarchical)
            && space
                .get(&r.target.node_id)
                .map(|n| n.browse_name() == browse_name)
                .unwrap_or(false)
    });
    if duplicate {
        return Err(EngineError::BrowseNameDuplicated);
    }

    Ok(())
}

/// A transactional handle onto one [`AddressSpace`], implementing the
/// read/write/add/delete/browse operations and, when recording, collecting
/// an [`OperationLog`] of what it did.
pub struct AddressSpaceAccess<'a> {
    space: &'a mut AddressSpace,
    limits: EngineLimits,
    record_operations: bool,
    log: OperationLog,
}

impl<'a> AddressSpaceAccess<'a> {
    pub fn new(space: &'a mut AddressSpace, limits: EngineLimits, record_operations: bool) -> Self {
        Self {
            space,
            limits,
            record_operations,
            log: OperationLog::new(),
        }
    }

    /// Detach the recorded operations (single-use); the log is empty
    /// afterwards. Dropping the handle without calling this clears and
    /// frees every recorded entry.
    pub fn take_operations(&mut self) -> Vec<OperationLogEntry> {
        self.log.take()
    }

    pub fn operation_log(&self) -> &OperationLog {
        &self.log
    }

    // --- ReadAttribute --------------------------------------------------

    pub fn read_attribute(
        &self,
        node_id: &NodeId,
        attribute_id: AttributeId,
        index_range: &NumericRange,
    ) -> Result<DataValue, StatusCode> {
        if node_id.is_null() {
            return Err(StatusCode::BadInvalidArgument);
        }
        if UNIMPLEMENTED_ATTRIBUTES.contains(&attribute_id) {
            return Err(StatusCode::BadNotImplemented);
        }
        let node = self.space.get(node_id).ok_or(StatusCode::BadNodeIdUnknown)?;
        let mut dv = node.get_attribute(attribute_id, index_range).ok_or(StatusCode::BadAttributeIdInvalid)?;
        if attribute_id == AttributeId::AccessLevel && self.space.are_read_only_nodes() {
            if let Variant::Byte(bits) = dv.value {
                let mask = opcua_nodes::AccessLevel::STATUS_WRITE.bits() | opcua_nodes::AccessLevel::TIMESTAMP_WRITE.bits();
                dv.value = Variant::Byte(bits & !mask);
            }
        }
        Ok(dv)
    }

    // --- ReadValue --------------------------------------------------------

    pub fn read_value(
        &self,
        node_id: &NodeId,
        index_range: &NumericRange,
        timestamps_to_return: TimestampsToReturn,
    ) -> Result<DataValue, StatusCode> {
        let node = self.space.get(node_id).ok_or(StatusCode::BadNodeIdUnknown)?;
        match node.node_class() {
            NodeClass::Variable => {
                let variable = node.as_variable().ok_or(StatusCode::BadAttributeIdInvalid)?;
                if index_range.has_range() {
                    variable.data_value().value.has_range(index_range, false)?;
                }
                Ok(variable.value(timestamps_to_return, index_range))
            }
            NodeClass::VariableType => {
                let mut dv = node.get_attribute(AttributeId::Value, index_range).ok_or(StatusCode::BadAttributeIdInvalid)?;
                if index_range.has_range() {
                    dv.value.has_range(index_range, false)?;
                    dv.value = dv.value.get_range(index_range)?;
                }
                let (keep_source, keep_server) = timestamps_to_return_flags(timestamps_to_return);
                dv.filter_timestamps(keep_source, keep_server);
                Ok(dv)
            }
            _ => Err(StatusCode::BadAttributeIdInvalid),
        }
    }

    // --- WriteValue -------------------------------------------------------

    pub fn write_value(
        &mut self,
        node_id: &NodeId,
        index_range: &NumericRange,
        value: Variant,
        status: Option<StatusCode>,
        source_timestamp: Option<TimestampWrite>,
        supported_locales: Option<&[String]>,
    ) -> Result<(), StatusCode> {
        let read_only = self.space.are_read_only_nodes();
        let node = self.space.get_mut(node_id).ok_or(StatusCode::BadNodeIdUnknown)?;
        let variable = node.as_variable_mut().ok_or(StatusCode::BadAttributeIdInvalid)?;
        if !variable.is_writable() {
            return Err(StatusCode::BadNotWritable);
        }

        if (status.is_some() || source_timestamp.is_some()) && read_only {
            self.space.warn_metadata_write_rejected_once(node_id);
            return Err(StatusCode::BadWriteNotSupported);
        }

        let old = variable.data_value().clone();
        let dv = variable.data_value_mut();

        if let Some(s) = status {
            dv.status = s;
        }
        if let Some(ts) = source_timestamp {
            let (timestamp, picoseconds) = if ts.timestamp == DateTime::min_value() && ts.picoseconds == 0 {
                (DateTime::now(), 0)
            } else {
                (ts.timestamp, ts.picoseconds)
            };
            dv.source_timestamp = Some(timestamp);
            dv.source_picoseconds = picoseconds;
        }

        let write_result = if index_range.has_range() {
            dv.value.has_range(index_range, true).and_then(|()| dv.value.set_range(&value, index_range))
        } else {
            match merge_localized_text(&dv.value, &value, supported_locales) {
                Some(Ok(merged)) => {
                    dv.value = merged;
                    Ok(())
                }
                Some(Err(e)) => Err(e),
                None => {
                    dv.value = value;
                    Ok(())
                }
            }
        };

        if let Err(e) = write_result {
            dv.status = old.status;
            dv.source_timestamp = old.source_timestamp;
            dv.source_picoseconds = old.source_picoseconds;
            return Err(e);
        }

        if self.record_operations {
            let new_value = variable.data_value().clone();
            self.log.push(OperationLogEntry::Write(WriteValueRecord {
                node_id: node_id.clone(),
                old_value: old,
                new_value,
            }));
        }
        Ok(())
    }

    // --- AddNode ------------------------------------------------------

    pub fn add_node(&mut self, item: AddNodeItem) -> Result<NodeId, StatusCode> {
        if !self.space.are_nodes_releasable() {
            return Err(StatusCode::BadServiceUnsupported);
        }

        let node_class = match &item.attributes {
            NodeAttributes::Object(_) => NodeClass::Object,
            NodeAttributes::Variable(_) => NodeClass::Variable,
            NodeAttributes::Method(_) => NodeClass::Method,
        };

        let node_id = match &item.requested_node_id {
            Some(id) if !id.is_null() => {
                if self.space.contains(id) {
                    return Err(StatusCode::BadNodeIdExists);
                }
                id.clone()
            }
            _ => self.space.fresh_node_id(item.browse_name.namespace_index),
        };

        check_constraints(
            self.space,
            &item.parent_node_id,
            &item.reference_type_id,
            node_class,
            item.type_definition.as_ref(),
            &item.browse_name,
        )
        .map_err(StatusCode::from)?;

        let mut node: NodeType = match item.attributes {
            NodeAttributes::Object(attrs) => Object::from_attributes(&node_id, item.browse_name.clone(), attrs)
                .map_err(|_| StatusCode::BadNodeAttributesInvalid)?
                .into(),
            NodeAttributes::Variable(attrs) => Variable::from_attributes(&node_id, item.browse_name.clone(), attrs)
                .map_err(|_| StatusCode::BadNodeAttributesInvalid)?
                .into(),
            NodeAttributes::Method(attrs) => Method::from_attributes(&node_id, item.browse_name.clone(), attrs)
                .map_err(|_| StatusCode::BadNodeAttributesInvalid)?
                .into(),
        };

        node.references_mut().push(parent_reference(item.reference_type_id.clone(), item.parent_node_id.clone()));
        if let Some(type_def) = &item.type_definition {
            node.references_mut().push(Reference::forward(ReferenceTypeId::HasTypeDefinition, type_def.clone()));
        }

        self.space.append(node).map_err(|_| StatusCode::BadNodeIdExists)?;

        if let Some(parent) = self.space.get_mut(&item.parent_node_id) {
            parent.references_mut().push(Reference::forward(item.reference_type_id.clone(), node_id.clone()));
        }

        if self.record_operations {
            self.log.push(OperationLogEntry::NodeChange { added: true, node_id: node_id.clone() });
        }

        Ok(node_id)
    }

    // --- DeleteNode ------------------------------------------------------

    /// Returns `StatusCode::Good`, `StatusCode::UncertainReferenceNotDeleted`
    /// (when `delete_target_references` was requested, since remote
    /// references can't be fixed up), or `StatusCode::BadNodeIdUnknown` when
    /// the root is missing.
    pub fn delete_node(&mut self, node_id: &NodeId, delete_target_references: bool, delete_child_nodes: bool) -> StatusCode {
        if !self.space.contains(node_id) {
            return StatusCode::BadNodeIdUnknown;
        }
        Self::delete_recursive(
            self.space,
            &mut self.log,
            self.record_operations,
            self.limits.recursion_limit,
            node_id,
            delete_target_references,
            delete_child_nodes,
            0,
        );
        if delete_target_references {
            StatusCode::UncertainReferenceNotDeleted
        } else {
            StatusCode::Good
        }
    }

    fn delete_recursive(
        space: &mut AddressSpace,
        log: &mut OperationLog,
        record_operations: bool,
        recursion_limit: u32,
        node_id: &NodeId,
        delete_target_references: bool,
        delete_child_nodes: bool,
        depth: u32,
    ) {
        if depth > recursion_limit {
            return;
        }
        if delete_child_nodes {
            let has_child: NodeId = ReferenceTypeId::HasChild.into();
            let children: Vec<NodeId> = space
                .get(node_id)
                .map(|n| {
                    n.references()
                        .iter()
                        .filter(|r| r.is_forward() && r.is_local() && space.is_type_or_subtype(&r.reference_type, &has_child))
                        .map(|r| r.target.node_id.clone())
                        .collect()
                })
                .unwrap_or_default();

            for child_id in children {
                if !space.contains(&child_id) {
                    continue;
                }
                if Self::has_single_hierarchical_parent(space, &child_id, node_id) {
                    Self::delete_recursive(
                        space,
                        log,
                        record_operations,
                        recursion_limit,
                        &child_id,
                        delete_target_references,
                        delete_child_nodes,
                        depth + 1,
                    );
                } else if delete_target_references {
                    if let Some(child) = space.get_mut(&child_id) {
                        child.references_mut().retain(|r| &r.target.node_id != node_id);
                    }
                }
            }
        }

        if space.remove(node_id).is_some() && record_operations {
            log.push(OperationLogEntry::NodeChange { added: false, node_id: node_id.clone() });
        }
    }

    /// `true` iff `child_id`'s inverse `HasChild`-or-subtype references name
    /// exactly one parent, and that parent is `parent_id`. Non-hierarchical
    /// inverse references (e.g. `HasEncoding`) are ignored when deciding
    /// single-parenthood; they are simply dropped along with the rest of the
    /// child's references once it is deleted.
    fn has_single_hierarchical_parent(space: &AddressSpace, child_id: &NodeId, parent_id: &NodeId) -> bool {
        let has_child: NodeId = ReferenceTypeId::HasChild.into();
        let Some(child) = space.get(child_id) else { return false };
        let mut total = 0u32;
        let mut matches_parent = 0u32;
        for r in child.references() {
            if !r.is_forward() && r.is_local() && space.is_type_or_subtype(&r.reference_type, &has_child) {
                total += 1;
                if &r.target.node_id == parent_id {
                    matches_parent += 1;
                }
            }
        }
        total == 1 && matches_parent == 1
    }

    // --- Browse -----------------------------------------------------------

    pub fn browse(
        &self,
        node_id: &NodeId,
        direction: BrowseDirection,
        reference_type_id: Option<&NodeId>,
        include_subtypes: bool,
    ) -> Result<Vec<ReferenceDescription>, StatusCode> {
        let node = self.space.get(node_id).ok_or(StatusCode::BadNodeIdUnknown)?;
        if let Some(rt) = reference_type_id {
            if !self.space.is_valid_reference_type_id(rt) {
                return Err(StatusCode::BadReferenceTypeIdInvalid);
            }
        }
        let mut out = Vec::new();
        for r in node.references() {
            let direction_ok = match direction {
                BrowseDirection::Forward => r.is_forward(),
                BrowseDirection::Inverse => !r.is_forward(),
                BrowseDirection::Both => true,
            };
            if !direction_ok {
                continue;
            }
            if let Some(rt) = reference_type_id {
                let type_ok = if include_subtypes {
                    self.space.is_type_or_subtype(&r.reference_type, rt)
                } else {
                    &r.reference_type == rt
                };
                if !type_ok {
                    continue;
                }
            }
            out.push(ReferenceDescription {
                reference_type_id: r.reference_type.clone(),
                is_forward: r.is_forward(),
                node_id: r.target.clone(),
            });
        }
        Ok(out)
    }

    // --- TranslateBrowsePath ----------------------------------------------

    pub fn translate_browse_path(&self, starting_node: &NodeId, path: &[RelativePathElement]) -> Result<NodeId, StatusCode> {
        if !self.space.contains(starting_node) {
            return Err(StatusCode::BadNodeIdUnknown);
        }
        let mut current = starting_node.clone();
        for (depth, step) in path.iter().enumerate() {
            if depth as u32 > self.limits.recursion_limit {
                return Err(StatusCode::BadNoMatch);
            }
            let node = self.space.get(&current).ok_or(StatusCode::BadNoMatch)?;
            let found = node.references().iter().find(|r| {
                r.is_forward() != step.is_inverse
                    && r.is_local()
                    && {
                        let type_ok = if step.include_subtypes {
                            self.space.is_type_or_subtype(&r.reference_type, &step.reference_type_id)
                        } else {
                            r.reference_type == step.reference_type_id
                        };
                        type_ok
                            && self
                                .space
                                .get(&r.target.node_id)
                                .map(|t| t.browse_name() == &step.target_name)
                                .unwrap_or(false)
                    }
            });
            match found {
                Some(r) => current = r.target.node_id.clone(),
                None => return Err(StatusCode::BadNoMatch),
            }
        }
        Ok(current)
    }

    // --- HistoryRead (surface validation only) -----------------------------

    /// Validates a `HistoryReadDetails` extension object's type, the only
    /// part of `HistoryRead` this engine implements: acceptance of
    /// `ReadRawModifiedDetails`, rejection of anything else. There is no
    /// history backend behind this call.
    pub fn validate_history_read_details(is_read_raw_modified_details: bool) -> StatusCode {
        if is_read_raw_modified_details {
            StatusCode::Good
        } else {
            StatusCode::BadHistoryOperationUnsupported
        }
    }

    /// Validates one `HistoryReadValueId` against the address space:
    /// node existence, NodeClass (`Variable` only), data-encoding filtering
    /// (only the "Default Binary" encoding of a `Structure`-typed value is
    /// accepted; any other requested encoding is rejected; requesting an
    /// encoding on a non-`Structure` value is invalid), and index-range
    /// well-formedness against the live value's current shape. No history
    /// data is read or returned.
    pub fn validate_history_read_node(&self, node_id: &NodeId, data_encoding: &QualifiedName, index_range: &NumericRange) -> StatusCode {
        let Some(node) = self.space.get(node_id) else {
            return StatusCode::BadNodeIdUnknown;
        };
        let Some(variable) = node.as_variable() else {
            return StatusCode::BadHistoryOperationUnsupported;
        };
        if !data_encoding.name.is_empty() {
            let data_type = variable.data_type();
            let is_structure = self.space.is_type_or_subtype(&data_type, &DataTypeId::Structure.into());
            if is_structure {
                if data_encoding.name.as_ref() != "Default Binary" {
                    return StatusCode::BadDataEncodingUnsupported;
                }
            } else {
                return StatusCode::BadDataEncodingInvalid;
            }
        }
        if index_range.has_range() {
            if let Err(e) = variable.data_value().value.has_range(index_range, false) {
                return e;
            }
        }
        StatusCode::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcua_nodes::{AccessLevel, ObjectBuilder, VariableBuilder};
    use opcua_types::{AttributesMask, ObjectId, ObjectTypeId};

    fn folder_space() -> AddressSpace {
        let mut space = AddressSpace::new();
        let folder_type: NodeId = ObjectTypeId::FolderType.into();
        let root: NodeId = ObjectId::ObjectsFolder.into();
        space
            .append(ObjectBuilder::new(&root, "Objects", "Objects").has_type_definition(folder_type.clone()).build().into())
            .unwrap();
        space
    }

    #[test]
    fn read_attribute_rejects_unimplemented() {
        let mut space = folder_space();
        let limits = EngineLimits::default();
        let access = AddressSpaceAccess::new(&mut space, limits, false);
        let root: NodeId = ObjectId::ObjectsFolder.into();
        assert_eq!(
            access.read_attribute(&root, AttributeId::EventNotifier, &NumericRange::None),
            Err(StatusCode::BadNotImplemented)
        );
    }

    #[test]
    fn read_attribute_unknown_node() {
        let mut space = folder_space();
        let limits = EngineLimits::default();
        let access = AddressSpaceAccess::new(&mut space, limits, false);
        assert_eq!(
            access.read_attribute(&NodeId::numeric(9, 9), AttributeId::BrowseName, &NumericRange::None),
            Err(StatusCode::BadNodeIdUnknown)
        );
    }

    #[test]
    fn write_value_round_trips_and_records_operation() {
        let mut space = folder_space();
        let var_id = NodeId::numeric(1, 100);
        space
            .append(
                VariableBuilder::new(&var_id, "x", "x")
                    .data_type(DataTypeId::UInt32)
                    .value(1u32)
                    .writable()
                    .build()
                    .into(),
            )
            .unwrap();
        let limits = EngineLimits::default();
        {
            let mut access = AddressSpaceAccess::new(&mut space, limits, true);
            access
                .write_value(&var_id, &NumericRange::None, Variant::UInt32(42), None, None, None)
                .unwrap();
            let ops = access.take_operations();
            assert_eq!(ops.len(), 1);
        }
        let access = AddressSpaceAccess::new(&mut space, limits, false);
        let dv = access.read_value(&var_id, &NumericRange::None, TimestampsToReturn::Both).unwrap();
        assert_eq!(dv.value, Variant::UInt32(42));
    }

    #[test]
    fn write_value_rejects_read_only_target() {
        let mut space = folder_space();
        let var_id = NodeId::numeric(1, 101);
        space
            .append(
                VariableBuilder::new(&var_id, "y", "y")
                    .data_type(DataTypeId::UInt32)
                    .value(1u32)
                    .access_level(AccessLevel::CURRENT_READ)
                    .build()
                    .into(),
            )
            .unwrap();
        let limits = EngineLimits::default();
        let mut access = AddressSpaceAccess::new(&mut space, limits, false);
        assert_eq!(
            access.write_value(&var_id, &NumericRange::None, Variant::UInt32(2), None, None, None),
            Err(StatusCode::BadNotWritable)
        );
    }

    #[test]
    fn add_node_rejects_unrecognised_reference() {
        let mut space = folder_space();
        let limits = EngineLimits::default();
        let root: NodeId = ObjectId::ObjectsFolder.into();
        let mut access = AddressSpaceAccess::new(&mut space, limits, false);
        let item = AddNodeItem {
            requested_node_id: None,
            parent_node_id: root,
            reference_type_id: ReferenceTypeId::HasSubtype.into(),
            browse_name: (1u16, "Bad").into(),
            type_definition: Some(ObjectTypeId::BaseObjectType.into()),
            attributes: NodeAttributes::Object(ObjectAttributes::default()),
        };
        assert_eq!(access.add_node(item), Err(StatusCode::BadReferenceNotAllowed));
    }

    #[test]
    fn add_object_then_browse_finds_it() {
        let mut space = folder_space();
        let limits = EngineLimits::default();
        let root: NodeId = ObjectId::ObjectsFolder.into();
        let new_id;
        {
            let mut access = AddressSpaceAccess::new(&mut space, limits, true);
            let item = AddNodeItem {
                requested_node_id: None,
                parent_node_id: root.clone(),
                reference_type_id: ReferenceTypeId::Organizes.into(),
                browse_name: (1u16, "ExampleObjectNode").into(),
                type_definition: Some(ObjectTypeId::BaseObjectType.into()),
                attributes: NodeAttributes::Object(ObjectAttributes {
                    specified_attributes: AttributesMask::empty(),
                    ..Default::default()
                }),
            };
            new_id = access.add_node(item).unwrap();
            assert_eq!(access.take_operations().len(), 1);
        }
        let access = AddressSpaceAccess::new(&mut space, limits, false);
        let refs = access.browse(&root, BrowseDirection::Forward, None, false).unwrap();
        assert!(refs.iter().any(|r| r.node_id.node_id == new_id));
        let dv = access.read_attribute(&new_id, AttributeId::DisplayName, &NumericRange::None).unwrap();
        if let Variant::LocalizedText(lt) = dv.value {
            assert_eq!(lt.text.as_ref(), "ExampleObjectNode");
        } else {
            panic!("expected LocalizedText");
        }
    }

    #[test]
    fn delete_node_removes_only_root_when_child_has_two_parents() {
        let mut space = folder_space();
        let limits = EngineLimits::default();
        let root: NodeId = ObjectId::ObjectsFolder.into();
        let a = NodeId::numeric(1, 1);
        let b = NodeId::numeric(1, 2);
        let child = NodeId::numeric(1, 3);
        space.append(ObjectBuilder::new(&a, "a", "a").organized_by(root.clone()).build().into()).unwrap();
        space.append(ObjectBuilder::new(&b, "b", "b").organized_by(root.clone()).build().into()).unwrap();
        let mut child_node = ObjectBuilder::new(&child, "c", "c").component_of(a.clone()).build();
        child_node.references_mut().push(Reference::inverse(ReferenceTypeId::HasComponent, b.clone()));
        space.append(child_node.into()).unwrap();
        if let Some(a_node) = space.get_mut(&a) {
            a_node.references_mut().push(Reference::forward(ReferenceTypeId::HasComponent, child.clone()));
        }
        if let Some(b_node) = space.get_mut(&b) {
            b_node.references_mut().push(Reference::forward(ReferenceTypeId::HasComponent, child.clone()));
        }

        let mut access = AddressSpaceAccess::new(&mut space, limits, false);
        let status = access.delete_node(&a, false, true);
        assert_eq!(status, StatusCode::Good);
        drop(access);
        assert!(!space.contains(&a));
        assert!(space.contains(&child));
    }

    #[test]
    fn validate_history_read_rejects_non_variable_and_unknown() {
        let mut space = folder_space();
        let limits = EngineLimits::default();
        let access = AddressSpaceAccess::new(&mut space, limits, false);
        let root: NodeId = ObjectId::ObjectsFolder.into();
        let empty_encoding: QualifiedName = (0u16, "").into();
        assert_eq!(
            access.validate_history_read_node(&root, &empty_encoding, &NumericRange::None),
            StatusCode::BadHistoryOperationUnsupported
        );
        assert_eq!(
            access.validate_history_read_node(&NodeId::numeric(9, 9), &empty_encoding, &NumericRange::None),
            StatusCode::BadNodeIdUnknown
        );
    }

    #[test]
    fn validate_history_read_accepts_variable_with_no_encoding() {
        let mut space = folder_space();
        let var_id = NodeId::numeric(1, 200);
        space
            .append(VariableBuilder::new(&var_id, "h", "h").data_type(DataTypeId::UInt32).value(1u32).build().into())
            .unwrap();
        let limits = EngineLimits::default();
        let access = AddressSpaceAccess::new(&mut space, limits, false);
        let empty_encoding: QualifiedName = (0u16, "").into();
        assert_eq!(access.validate_history_read_node(&var_id, &empty_encoding, &NumericRange::None), StatusCode::Good);
    }

    #[test]
    fn write_value_warns_once_on_read_only_metadata_write() {
        let mut space = folder_space();
        let var_id = NodeId::numeric(1, 102);
        space
            .append(VariableBuilder::new(&var_id, "z", "z").data_type(DataTypeId::UInt32).value(1u32).writable().build().into())
            .unwrap();
        space.set_read_only_nodes(true);
        let limits = EngineLimits::default();
        let mut access = AddressSpaceAccess::new(&mut space, limits, false);
        let bad_status = Some(StatusCode::Good);
        assert_eq!(
            access.write_value(&var_id, &NumericRange::None, Variant::UInt32(2), bad_status, None, None),
            Err(StatusCode::BadWriteNotSupported)
        );
        // Second rejection for the same node must not panic or double-insert.
        assert_eq!(
            access.write_value(&var_id, &NumericRange::None, Variant::UInt32(3), bad_status, None, None),
            Err(StatusCode::BadWriteNotSupported)
        );
    }
}
