// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The filter engine: data-change filter validation, event filter
//! validation against a lazily-populated event-type registry, and the
//! trigger predicate the dispatcher consults per write.

use hashbrown::HashMap;

use opcua_address_space::AddressSpace;
use opcua_nodes::{EventNotifier, TimestampsToReturn};
use opcua_types::{
    AttributeId, DataTypeId, DataValue, LocalizedText, NodeId, NumericRange, ObjectTypeId,
    QualifiedName, ReferenceTypeId, StatusCode, Variant, VariantScalarTypeId,
};

use crate::dispatch::clear_excluded_timestamps;

/// `DataChangeFilter.Trigger` (Part 4 §7.17.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataChangeTrigger {
    Status,
    StatusValue,
    StatusValueTimestamp,
}

/// `DeadbandType` (Part 8 §6.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadbandType {
    None,
    Absolute,
    Percent,
}

/// The incoming `DataChangeFilter` from a `CreateMonitoredItems`/
/// `ModifyMonitoredItems` request.
#[derive(Debug, Clone, Copy)]
pub struct DataChangeFilter {
    pub trigger: DataChangeTrigger,
    pub deadband_type: DeadbandType,
    pub deadband_value: f64,
}

/// The validated, resolved filter a [`crate::item::MonitoredItem`] actually
/// evaluates against: the allocated filter context.
#[derive(Debug, Clone)]
pub enum FilterContext {
    /// No filter was requested, or `DeadbandType::None`: every value change
    /// (subject to trigger) is reported.
    DataChange { trigger: DataChangeTrigger, absolute_deadband: Option<f64> },
    /// An event filter; select/where clauses already validated and kept so
    /// that each published event can be re-extracted against them.
    Event { select_clauses: Vec<SelectClause> },
}

/// Validates a `DataChangeFilter` against the target node. `filter` is
/// `None` when the request carried no filter at all, which this engine
/// treats the same as `DeadbandType::None`.
pub fn check_data_filter(space: &AddressSpace, node_id: &NodeId, filter: Option<&DataChangeFilter>) -> Result<FilterContext, StatusCode> {
    let Some(filter) = filter else {
        return Ok(FilterContext::DataChange { trigger: DataChangeTrigger::StatusValue, absolute_deadband: None });
    };
    match filter.deadband_type {
        DeadbandType::None => Ok(FilterContext::DataChange { trigger: filter.trigger, absolute_deadband: None }),
        DeadbandType::Absolute => {
            let variable = space.get(node_id).and_then(|n| n.as_variable()).ok_or(StatusCode::BadFilterNotAllowed)?;
            if !space.is_type_or_subtype(&variable.data_type(), &DataTypeId::Number.into()) {
                return Err(StatusCode::BadFilterNotAllowed);
            }
            Ok(FilterContext::DataChange { trigger: filter.trigger, absolute_deadband: Some(filter.deadband_value) })
        }
        DeadbandType::Percent => {
            space.get(node_id).and_then(|n| n.as_variable()).ok_or(StatusCode::BadFilterNotAllowed)?;
            let range = find_eu_range(space, node_id).ok_or(StatusCode::BadFilterNotAllowed)?;
            if !range.is_valid() {
                return Err(StatusCode::BadFilterNotAllowed);
            }
            let absolute_deadband = (filter.deadband_value / 100.0) * (range.high - range.low);
            Ok(FilterContext::DataChange { trigger: filter.trigger, absolute_deadband: Some(absolute_deadband) })
        }
    }
}

fn find_eu_range(space: &AddressSpace, node_id: &NodeId) -> Option<opcua_types::Range> {
    let node = space.get(node_id)?;
    let has_property: NodeId = ReferenceTypeId::HasProperty.into();
    let eu_range_name: QualifiedName = (0u16, "EURange").into();
    let target = node.references().iter().find(|r| {
        r.is_forward()
            && space.is_type_or_subtype(&r.reference_type, &has_property)
            && space.get(&r.target.node_id).map(|t| t.browse_name() == &eu_range_name).unwrap_or(false)
    })?;
    let property = space.get(&target.target.node_id)?.as_variable()?;
    match &property.data_value().value {
        Variant::ExtensionObject(ext) => ext.as_range(),
        _ => None,
    }
}

/// The deadband predicate handed to [`Variant::compare_custom_range`]: two
/// numeric values compare equal (`0`) when within `deadband` of each other,
/// NaN compares equal to NaN, and non-numeric built-in types are rejected.
fn deadband_compare(deadband: &f64, _built_in: VariantScalarTypeId, a: &Variant, b: &Variant) -> Result<i8, StatusCode> {
    let (a, b) = match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(StatusCode::BadFilterNotAllowed),
    };
    if a.is_nan() && b.is_nan() {
        return Ok(0);
    }
    let delta = a - b;
    if delta.abs() <= *deadband {
        Ok(0)
    } else if delta > 0.0 {
        Ok(1)
    } else {
        Ok(-1)
    }
}

/// Whether `old` and `new`, sliced by `range`, differ enough to report: a
/// plain natural compare with no deadband, or the deadband predicate above
/// when one is configured. A comparison error (range out of bounds, a
/// deadband against non-numeric data) is treated as a change.
fn values_differ(old: &Variant, new: &Variant, absolute_deadband: Option<f64>, range: &NumericRange) -> bool {
    let result = match absolute_deadband {
        Some(deadband) => Variant::compare_custom_range(&deadband_compare, &deadband, old, new, range),
        None => Variant::compare_range(old, new, range),
    };
    result.map(|ordering| ordering != 0).unwrap_or(true)
}

/// `is_notification_triggered(mi, old_dv, new_dv)`.
///
/// `old` must be the value last *reported*, not merely the previous write:
/// the worked deadband example (writes 0.0, 0.5, 1.2, 1.2 against an
/// absolute deadband of 1.0, triggering on writes 1 and 3 only) only holds
/// if 1.2 is compared against the last-reported 0.0 (delta 1.2, triggers)
/// rather than against the untriggered 0.5 (delta 0.7, would not trigger).
///
/// `range` is the monitored item's index range; both the deadband/equality
/// comparison and, separately, the value actually reported must use the
/// same slice of the underlying value.
pub fn is_notification_triggered(
    attribute_id: AttributeId,
    trigger: DataChangeTrigger,
    absolute_deadband: Option<f64>,
    range: &NumericRange,
    old: &DataValue,
    new: &DataValue,
) -> bool {
    if attribute_id != AttributeId::Value {
        return old.status != new.status;
    }
    if old.status != new.status {
        return true;
    }
    if trigger == DataChangeTrigger::Status {
        return false;
    }
    if values_differ(&old.value, &new.value, absolute_deadband, range) {
        return true;
    }
    trigger == DataChangeTrigger::StatusValueTimestamp && old.source_timestamp != new.source_timestamp
}

// --- Event filter (select clauses + single where clause) -------------------

/// One `SimpleAttributeOperand` select clause.
#[derive(Debug, Clone)]
pub struct SelectClause {
    pub type_definition_id: NodeId,
    pub browse_path: Vec<QualifiedName>,
    pub attribute_id: AttributeId,
    pub index_range: String,
}

/// The single supported where-clause shape: `OfType(<NodeId>)`.
#[derive(Debug, Clone)]
pub struct WhereClause {
    pub operand: WhereOperand,
}

#[derive(Debug, Clone)]
pub enum WhereOperand {
    Literal(NodeId),
    NodeIdAttribute(NodeId),
}

/// An incoming `EventFilter`.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub select_clauses: Vec<SelectClause>,
    pub where_clauses: Vec<WhereClause>,
}

/// Per-select-clause validation outcome, and the resolved `whereClauseTypeId`.
#[derive(Debug, Clone)]
pub struct EventFilterResult {
    pub select_clause_status: Vec<StatusCode>,
    pub where_clause_status: Vec<StatusCode>,
    pub where_clause_type_id: Option<NodeId>,
}

/// One registered event type: its direct supertype and the (datatype,
/// value-rank) of every browse-path field it declares.
#[derive(Debug, Clone, Default)]
pub struct EventTypeDef {
    pub supertype: Option<NodeId>,
    pub fields: HashMap<Vec<QualifiedName>, (NodeId, i32)>,
}

/// The endpoint's event-type registry, lazily built once and immutable
/// thereafter. Seeded with `BaseEventType`'s standard fields.
#[derive(Debug, Clone)]
pub struct EventTypeRegistry {
    types: HashMap<NodeId, EventTypeDef>,
    initialised: bool,
}

const BASE_EVENT_FIELDS: &[(&str, DataTypeId, i32)] = &[
    ("EventId", DataTypeId::ByteString, -1),
    ("EventType", DataTypeId::NodeId, -1),
    ("SourceNode", DataTypeId::NodeId, -1),
    ("SourceName", DataTypeId::String, -1),
    ("Time", DataTypeId::DateTime, -1),
    ("ReceiveTime", DataTypeId::DateTime, -1),
    ("Message", DataTypeId::LocalizedText, -1),
    ("Severity", DataTypeId::UInt16, -1),
];

impl Default for EventTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventTypeRegistry {
    /// An uninitialised registry: every lookup fails with
    /// `BadFilterNotAllowed` until [`Self::initialise`] runs.
    pub fn uninitialised() -> Self {
        Self { types: HashMap::new(), initialised: false }
    }

    /// Builds and initialises a registry seeded with `BaseEventType`.
    pub fn new() -> Self {
        let mut registry = Self::uninitialised();
        registry.initialise();
        registry
    }

    /// Lazily populates the base event type once per endpoint. Idempotent.
    pub fn initialise(&mut self) {
        if self.initialised {
            return;
        }
        let mut fields = HashMap::new();
        for (name, data_type, rank) in BASE_EVENT_FIELDS {
            fields.insert(vec![(0u16, *name).into()], ((*data_type).into(), *rank));
        }
        let base: NodeId = ObjectTypeId::BaseEventType.into();
        self.types.insert(base.clone(), EventTypeDef { supertype: None, fields });

        // EventQueueOverflowEventType adds no fields of its own beyond
        // BaseEventType's; registered here so the dispatcher's synthesized
        // overflow event resolves select clauses like any other event.
        let overflow: NodeId = ObjectTypeId::EventQueueOverflowEventType.into();
        self.types.insert(overflow, EventTypeDef { supertype: Some(base), fields: HashMap::new() });

        self.initialised = true;
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Registers a concrete event type (would ordinarily be discovered by
    /// walking `HasSubtype`/`HasProperty` under `BaseEventType` in the
    /// address space at server start-up).
    pub fn register_type(&mut self, id: NodeId, supertype: NodeId, fields: HashMap<Vec<QualifiedName>, (NodeId, i32)>) {
        self.types.insert(id, EventTypeDef { supertype: Some(supertype), fields });
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.types.contains_key(id)
    }

    pub fn is_subtype_of(&self, child: &NodeId, ancestor: &NodeId) -> bool {
        let mut current = child.clone();
        let mut steps = 0u32;
        loop {
            if &current == ancestor {
                return true;
            }
            steps += 1;
            if steps > 256 {
                return false;
            }
            match self.types.get(&current).and_then(|t| t.supertype.clone()) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Resolves a browse path on `type_id` or one of its supertypes, to the
    /// (DataType, ValueRank) of the field it names.
    pub fn resolve_field(&self, type_id: &NodeId, path: &[QualifiedName]) -> Option<(NodeId, i32)> {
        let mut current = type_id.clone();
        let mut steps = 0u32;
        loop {
            let def = self.types.get(&current)?;
            if let Some(field) = def.fields.get(path) {
                return Some(field.clone());
            }
            steps += 1;
            if steps > 256 {
                return None;
            }
            current = def.supertype.clone()?;
        }
    }
}

/// Whether an index range of `n` dimensions is compatible with a field of
/// the given `ValueRank` (OPC UA Part 4 Table 8).
fn may_value_rank_n_dimensions_be_compatible(n: usize, rank: i32) -> bool {
    let n = n as i32;
    (n == rank && rank > 0) || (n > 0 && matches!(rank, 0 | -2)) || (rank == -3 && n == 1) || (rank == -1 && n == 0)
}

/// Validates one select clause (a `SimpleAttributeOperand`).
fn validate_select_clause(registry: &EventTypeRegistry, clause: &SelectClause) -> StatusCode {
    let is_node_id_shortcut = clause.attribute_id == AttributeId::NodeId && clause.browse_path.is_empty();
    if clause.attribute_id != AttributeId::Value && !is_node_id_shortcut {
        return StatusCode::BadAttributeIdInvalid;
    }
    if is_node_id_shortcut {
        return StatusCode::Good;
    }
    let base_event_type: NodeId = ObjectTypeId::BaseEventType.into();
    if clause.type_definition_id != base_event_type && !registry.contains(&clause.type_definition_id) {
        return StatusCode::BadTypeDefinitionInvalid;
    }
    let Some((data_type, value_rank)) = registry.resolve_field(&clause.type_definition_id, &clause.browse_path) else {
        return StatusCode::BadNodeIdUnknown;
    };
    if clause.index_range.is_empty() {
        return StatusCode::Good;
    }
    let range = match NumericRange::parse(&clause.index_range) {
        Ok(range) => range,
        Err(_) => return StatusCode::BadIndexRangeInvalid,
    };
    let n_dims = range.dimensions();
    let is_scalar_string_exception = matches!(data_type, ref d if *d == DataTypeId::String.into() || *d == DataTypeId::ByteString.into());
    let compatible = may_value_rank_n_dimensions_be_compatible(n_dims, value_rank)
        || (is_scalar_string_exception && n_dims > 0 && may_value_rank_n_dimensions_be_compatible(n_dims - 1, value_rank));
    if compatible {
        StatusCode::Good
    } else if value_rank < -1 || value_rank == 0 {
        StatusCode::BadTypeMismatch
    } else {
        StatusCode::BadIndexRangeInvalid
    }
}

/// Validates the where clause: exactly one where-clause element is
/// supported.
fn validate_where_clause(registry: &EventTypeRegistry, clauses: &[WhereClause]) -> (Vec<StatusCode>, Option<NodeId>) {
    if clauses.len() > 1 {
        return (vec![StatusCode::BadMonitoredItemFilterUnsupported], None);
    }
    let Some(clause) = clauses.first() else {
        return (Vec::new(), None);
    };
    let type_id = match &clause.operand {
        WhereOperand::Literal(id) | WhereOperand::NodeIdAttribute(id) => id.clone(),
    };
    if !registry.contains(&type_id) {
        return (vec![StatusCode::BadNodeIdInvalid], None);
    }
    (vec![StatusCode::Good], Some(type_id))
}

/// Validates an incoming `EventFilter`'s select and where clauses.
pub fn init_event_filter(space: &AddressSpace, registry: &EventTypeRegistry, node_id: &NodeId, filter: &EventFilter) -> Result<EventFilterResult, StatusCode> {
    let notifier = space.get(node_id).and_then(|n| n.as_object()).map(|o| o.event_notifier()).unwrap_or(EventNotifier::empty());
    if !notifier.contains(EventNotifier::SUBSCRIBE_TO_EVENTS) {
        return Err(StatusCode::BadFilterNotAllowed);
    }
    if !registry.is_initialised() {
        return Err(StatusCode::BadFilterNotAllowed);
    }

    let select_clause_status: Vec<StatusCode> = filter.select_clauses.iter().map(|c| validate_select_clause(registry, c)).collect();

    if filter.where_clauses.len() > 1 {
        return Err(StatusCode::BadMonitoredItemFilterUnsupported);
    }
    let (where_clause_status, where_clause_type_id) = validate_where_clause(registry, &filter.where_clauses);

    Ok(EventFilterResult { select_clause_status, where_clause_status, where_clause_type_id })
}

// --- Event field extraction -------------------------------------------------

/// One published event: the concrete type it was raised as, its source
/// node, and its field values keyed by the same browse path a select
/// clause addresses.
#[derive(Debug, Clone, Default)]
pub struct EventOccurrence {
    pub type_id: NodeId,
    pub source_node: NodeId,
    pub fields: HashMap<Vec<QualifiedName>, Variant>,
}

impl EventOccurrence {
    pub fn field(&self, path: &[QualifiedName]) -> Option<&Variant> {
        self.fields.get(path)
    }
}

/// Extracts one `EventFieldList` entry per select clause in `select_clauses`
/// for `event`. `notifier_authorized` is the caller's authorization for the
/// event-notifier attribute on the event's source node, checked once for
/// the whole list rather than per clause.
pub fn extract_event_fields(
    registry: &EventTypeRegistry,
    select_clauses: &[SelectClause],
    event: &EventOccurrence,
    notifier_authorized: bool,
    preferred_locales: &[String],
    timestamps_to_return: TimestampsToReturn,
) -> Vec<Variant> {
    select_clauses
        .iter()
        .map(|clause| extract_one_field(registry, clause, event, notifier_authorized, preferred_locales, timestamps_to_return))
        .collect()
}

fn extract_one_field(
    registry: &EventTypeRegistry,
    clause: &SelectClause,
    event: &EventOccurrence,
    notifier_authorized: bool,
    preferred_locales: &[String],
    timestamps_to_return: TimestampsToReturn,
) -> Variant {
    if !notifier_authorized {
        return Variant::StatusCode(StatusCode::BadUserAccessDenied);
    }
    if !registry.is_subtype_of(&event.type_id, &clause.type_definition_id) {
        return Variant::Empty;
    }
    let Some(value) = event.field(&clause.browse_path) else {
        return Variant::Empty;
    };
    let mut value = reduce_locale(value.clone(), preferred_locales);
    if !clause.index_range.is_empty() {
        if let Ok(range) = NumericRange::parse(&clause.index_range) {
            if let Ok(sliced) = value.get_range(&range) {
                value = sliced;
            }
        }
    }
    clear_excluded_timestamps_in_variant(&mut value, timestamps_to_return);
    value
}

/// Reduces a field holding every translation of a localizable text (stored
/// as an array of `LocalizedText`) to the single preferred-locale
/// translation. Any other value passes through unchanged.
fn reduce_locale(value: Variant, preferred_locales: &[String]) -> Variant {
    let Variant::Array(array) = value else {
        return value;
    };
    if array.value_type != VariantScalarTypeId::LocalizedText {
        return Variant::Array(array);
    }
    let candidates: Vec<LocalizedText> = array
        .values
        .iter()
        .filter_map(|v| match v {
            Variant::LocalizedText(lt) => Some((**lt).clone()),
            _ => None,
        })
        .collect();
    match LocalizedText::select_preferred(&candidates, preferred_locales) {
        Some(selected) => Variant::LocalizedText(Box::new(selected.clone())),
        None => Variant::Empty,
    }
}

/// Zeroes the timestamp fields `timestamps_to_return` excludes on a
/// built-in `DataValue` field value, scalar or array.
fn clear_excluded_timestamps_in_variant(value: &mut Variant, timestamps_to_return: TimestampsToReturn) {
    match value {
        Variant::DataValue(dv) => clear_excluded_timestamps(dv, timestamps_to_return),
        Variant::Array(array) if array.value_type == VariantScalarTypeId::DataValue => {
            for v in array.values.iter_mut() {
                if let Variant::DataValue(dv) = v {
                    clear_excluded_timestamps(dv, timestamps_to_return);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_change_trigger_status_only_ignores_value() {
        let old = DataValue::new(Variant::Int32(1));
        let new = DataValue::new(Variant::Int32(2));
        assert!(!is_notification_triggered(AttributeId::Value, DataChangeTrigger::Status, None, &NumericRange::None, &old, &new));
    }

    #[test]
    fn deadband_example_from_worked_scenario() {
        let trigger = DataChangeTrigger::StatusValue;
        let deadband = Some(1.0);
        let v0 = DataValue::new(Variant::Double(0.0));
        let v1 = DataValue::new(Variant::Double(0.5));
        let v2 = DataValue::new(Variant::Double(1.2));
        assert!(!is_notification_triggered(AttributeId::Value, trigger, deadband, &NumericRange::None, &v0, &v1));
        assert!(is_notification_triggered(AttributeId::Value, trigger, deadband, &NumericRange::None, &v0, &v2));
        assert!(!is_notification_triggered(AttributeId::Value, trigger, deadband, &NumericRange::None, &v2, &v2));
    }

    #[test]
    fn event_filter_rejects_non_subscribable_node() {
        let space = AddressSpace::new();
        let registry = EventTypeRegistry::new();
        let server: NodeId = opcua_types::ObjectId::Server.into();
        let filter = EventFilter::default();
        assert_eq!(init_event_filter(&space, &registry, &server, &filter), Err(StatusCode::BadFilterNotAllowed));
    }

    #[test]
    fn select_clause_node_id_shortcut_is_accepted() {
        let registry = EventTypeRegistry::new();
        let clause = SelectClause {
            type_definition_id: ObjectTypeId::BaseEventType.into(),
            browse_path: vec![],
            attribute_id: AttributeId::NodeId,
            index_range: String::new(),
        };
        assert_eq!(validate_select_clause(&registry, &clause), StatusCode::Good);
    }

    #[test]
    fn select_clause_resolves_base_event_field() {
        let registry = EventTypeRegistry::new();
        let clause = SelectClause {
            type_definition_id: ObjectTypeId::BaseEventType.into(),
            browse_path: vec![(0u16, "Severity").into()],
            attribute_id: AttributeId::Value,
            index_range: String::new(),
        };
        assert_eq!(validate_select_clause(&registry, &clause), StatusCode::Good);
    }

    #[test]
    fn select_clause_unknown_path_is_node_id_unknown() {
        let registry = EventTypeRegistry::new();
        let clause = SelectClause {
            type_definition_id: ObjectTypeId::BaseEventType.into(),
            browse_path: vec![(0u16, "NoSuchField").into()],
            attribute_id: AttributeId::Value,
            index_range: String::new(),
        };
        assert_eq!(validate_select_clause(&registry, &clause), StatusCode::BadNodeIdUnknown);
    }
}
