// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The notification dispatcher (C6): walks an `OperationLog` and fans
//! writes out to subscribing monitored items.

use hashbrown::HashMap;

use opcua_address_space::{OperationLogEntry, WriteValueRecord};
use opcua_nodes::TimestampsToReturn;
use opcua_types::{
    AttributeId, DataValue, NodeId, ObjectId, ObjectTypeId, UAString, Variant, VariantArray,
    VariantScalarTypeId,
};

use crate::filters::{extract_event_fields, is_notification_triggered, EventOccurrence, EventTypeRegistry, FilterContext};
use crate::item::{MonitoredItem, MonitoredItemStore};
use crate::queue::Notification;

/// Clears the timestamp fields `ttr` excludes on a `DataValue` in place.
pub(crate) fn clear_excluded_timestamps(value: &mut DataValue, ttr: TimestampsToReturn) {
    match ttr {
        TimestampsToReturn::Source => value.server_timestamp = None,
        TimestampsToReturn::Server => value.source_timestamp = None,
        TimestampsToReturn::Neither => {
            value.source_timestamp = None;
            value.server_timestamp = None;
        }
        TimestampsToReturn::Both => {}
    }
}

fn filter_timestamps(mut value: DataValue, ttr: TimestampsToReturn) -> DataValue {
    clear_excluded_timestamps(&mut value, ttr);
    value
}

/// The overflow event's fixed `SourceName`; `Time` is stamped fresh on
/// every emission.
fn overflow_event_source_name() -> UAString {
    UAString::from("Internal/EventQueueOverflow")
}

/// Fans `OperationLog` entries out to a [`MonitoredItemStore`], applying
/// trigger evaluation and the per-MI queue policy. Holds no state of its
/// own; one instance is shared process-wide.
#[derive(Debug, Default)]
pub struct NotificationDispatcher;

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Walks `entries` in FIFO order, dispatching each one.
    pub fn dispatch(&self, entries: &[OperationLogEntry], store: &mut MonitoredItemStore) {
        for entry in entries {
            match entry {
                OperationLogEntry::Write(record) => self.dispatch_write(store, record),
                OperationLogEntry::NodeChange { added, node_id } => self.dispatch_node_change(store, *added, node_id),
            }
        }
    }

    /// Fans one value write out to every MI watching `(node_id, Value)`.
    fn dispatch_write(&self, store: &mut MonitoredItemStore, record: &WriteValueRecord) {
        let old_value = record.old_value.clone();
        let new_value = record.new_value.clone();
        for item in store.watching(&record.node_id, AttributeId::Value) {
            if !item.monitoring_mode.samples() {
                continue;
            }
            let (trigger, absolute_deadband) = match &item.filter {
                FilterContext::DataChange { trigger, absolute_deadband } => (*trigger, *absolute_deadband),
                FilterContext::Event { .. } => continue,
            };
            // Compare against the last *reported* value, not the literal
            // previous write, so cumulative sub-deadband drift still
            // triggers once the cumulative delta exceeds the deadband —
            // see `is_notification_triggered`'s doc comment.
            let baseline = item.last_reported.clone().unwrap_or_else(|| old_value.clone());
            if !is_notification_triggered(item.attribute_id, trigger, absolute_deadband, &item.index_range, &baseline, &new_value) {
                continue;
            }
            // The baseline kept for the *next* comparison is the full,
            // unsliced value — `is_notification_triggered` re-derives the
            // range slice on both sides every call, so the stored baseline
            // must stay in the same (full) shape as `new_value` above.
            item.last_reported = Some(new_value.clone());
            let mut reported = new_value.clone();
            if item.index_range.has_range() {
                match reported.value.get_range(&item.index_range) {
                    Ok(value) => reported.value = value,
                    Err(status) => {
                        tracing::warn!(node_id = %item.node_id, mi_id = item.id, %status, "monitored item index range no longer applies to the written value, dropping notification");
                        continue;
                    }
                }
            }
            let reported = filter_timestamps(reported, item.timestamps_to_return);
            if !item.queue.enqueue(Notification::new(reported)) {
                tracing::warn!(node_id = %item.node_id, mi_id = item.id, "monitored item notification count overflowed i32::MAX, dropping");
            }
        }
    }

    /// Samples `current` unconditionally and queues it, updating the MI's
    /// baseline. A `CreateMonitoredItems` caller invokes this once right
    /// after `MonitoredItemStore::create_monitored_item` to produce the
    /// initial notification every monitored item reports on creation.
    pub fn sample_initial_value(&self, item: &mut MonitoredItem, current: DataValue) {
        let reported = filter_timestamps(current, item.timestamps_to_return);
        item.last_reported = Some(reported.clone());
        if !item.queue.enqueue(Notification::new(reported)) {
            tracing::warn!(node_id = %item.node_id, mi_id = item.id, "monitored item notification count overflowed i32::MAX, dropping");
        }
    }

    /// A structural change: ordinarily this would propagate a NodeChange
    /// event to every MI observing structural changes.
    ///
    /// No `ModelChangeEventType`/`GeneralModelChangeEventType` NodeId is
    /// among the standard ids this engine carries, so this engine cannot
    /// synthesize a standards-conformant model-change event without
    /// inventing a constant with no grounding in the retrieved ID tables.
    /// Structural changes are logged; wiring them to a concrete event type
    /// is left as a documented extension point (see DESIGN.md).
    fn dispatch_node_change(&self, _store: &mut MonitoredItemStore, added: bool, node_id: &NodeId) {
        tracing::debug!(node_id = %node_id, added, "structural change recorded, no model-change event type available to synthesize");
    }

    /// Detects that `item`'s queue just overflowed and, if `item` is an
    /// event MI, synthesizes an `EventQueueOverflowEventType` instance with
    /// `SourceNode = Server`, runs it through the same select-clause
    /// extraction as any other published event, and enqueues the resulting
    /// field list. `item.queue`'s notifications carry a plain `overflowed`
    /// flag rather than the real wire's status-code info bit (see
    /// `queue.rs`); this checks that flag on the just-enqueued element.
    ///
    /// The overflow event is a server-internal diagnostic raised on the
    /// `Server` object, not attributable to any client-supplied identity,
    /// so notifier authorization for it is always granted.
    pub fn handle_event_queue_overflow(&self, item: &mut MonitoredItem, registry: &EventTypeRegistry, preferred_locales: &[String], stamp: opcua_types::DateTime) {
        let FilterContext::Event { select_clauses } = &item.filter else {
            return;
        };
        let overflowed = item.queue.iter().last().map(|n| n.overflowed).unwrap_or(false);
        if !overflowed {
            return;
        }
        let source_node: NodeId = ObjectId::Server.into();
        let event_type: NodeId = ObjectTypeId::EventQueueOverflowEventType.into();
        let mut fields = HashMap::new();
        fields.insert(vec![(0u16, "SourceNode").into()], Variant::NodeId(Box::new(source_node.clone())));
        fields.insert(vec![(0u16, "SourceName").into()], Variant::String(overflow_event_source_name()));
        fields.insert(vec![(0u16, "Time").into()], Variant::DateTime(Box::new(stamp)));
        let event = EventOccurrence { type_id: event_type, source_node: source_node.clone(), fields };

        let field_values = extract_event_fields(registry, select_clauses, &event, true, preferred_locales, item.timestamps_to_return);
        tracing::debug!(node_id = %source_node, mi_id = item.id, "event monitored item queue overflowed, synthesizing EventQueueOverflowEventType");
        let mut value = DataValue::new(Variant::Array(Box::new(VariantArray { value_type: VariantScalarTypeId::Variant, values: field_values, dimensions: None })));
        value.source_timestamp = Some(stamp);
        let _ = item.queue.enqueue(Notification::new(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::DataChangeTrigger;
    use crate::item::{CreateMonitoredItemParams, MonitoredItemStore};
    use crate::monitoring_mode::MonitoringMode;
    use opcua_types::Variant;

    fn dv(v: i32) -> DataValue {
        DataValue::new(Variant::Int32(v))
    }

    fn create(store: &mut MonitoredItemStore, node_id: NodeId, absolute_deadband: Option<f64>) -> u32 {
        store
            .create_monitored_item(CreateMonitoredItemParams {
                subscription_id: 1,
                node_id,
                attribute_id: AttributeId::Value,
                index_range: String::new(),
                timestamps_to_return: TimestampsToReturn::Both,
                monitoring_mode: MonitoringMode::Reporting,
                client_handle: 1,
                filter: FilterContext::DataChange { trigger: DataChangeTrigger::StatusValue, absolute_deadband },
                discard_oldest: true,
                queue_size: 10,
            })
            .unwrap()
    }

    #[test]
    fn plain_value_change_without_deadband_always_triggers() {
        let node: NodeId = ObjectId::Server.into();
        let mut store = MonitoredItemStore::new();
        let id = create(&mut store, node.clone(), None);
        let dispatcher = NotificationDispatcher::new();
        dispatcher.dispatch_write(&mut store, &WriteValueRecord { node_id: node, old_value: dv(1), new_value: dv(2) });
        assert_eq!(store.get(id).unwrap().queue.len(), 1);
    }

    #[test]
    fn disabled_item_never_enqueues() {
        let node: NodeId = ObjectId::Server.into();
        let mut store = MonitoredItemStore::new();
        let id = create(&mut store, node.clone(), None);
        store.set_monitoring_mode(id, MonitoringMode::Disabled).unwrap();
        let dispatcher = NotificationDispatcher::new();
        dispatcher.dispatch_write(&mut store, &WriteValueRecord { node_id: node, old_value: dv(1), new_value: dv(2) });
        assert_eq!(store.get(id).unwrap().queue.len(), 0);
    }

    #[test]
    fn cumulative_drift_past_last_reported_baseline_triggers() {
        let node: NodeId = ObjectId::Server.into();
        let mut store = MonitoredItemStore::new();
        let id = create(&mut store, node.clone(), Some(1.0));
        let dispatcher = NotificationDispatcher::new();
        let v0 = DataValue::new(Variant::Double(0.0));
        let v1 = DataValue::new(Variant::Double(0.5));
        let v2 = DataValue::new(Variant::Double(1.2));
        dispatcher.sample_initial_value(store.get_mut(id).unwrap(), v0);
        dispatcher.dispatch_write(&mut store, &WriteValueRecord { node_id: node.clone(), old_value: DataValue::default(), new_value: v1 });
        assert_eq!(store.get(id).unwrap().queue.len(), 1);
        dispatcher.dispatch_write(&mut store, &WriteValueRecord { node_id: node, old_value: DataValue::default(), new_value: v2 });
        assert_eq!(store.get(id).unwrap().queue.len(), 2);
    }

    #[test]
    fn index_range_slices_the_reported_value() {
        use opcua_types::{NumericRange, NumericRangeDimension, VariantScalarTypeId};

        let node: NodeId = ObjectId::Server.into();
        let mut store = MonitoredItemStore::new();
        let id = store
            .create_monitored_item(CreateMonitoredItemParams {
                subscription_id: 1,
                node_id: node.clone(),
                attribute_id: AttributeId::Value,
                index_range: "1".to_string(),
                timestamps_to_return: TimestampsToReturn::Both,
                monitoring_mode: MonitoringMode::Reporting,
                client_handle: 1,
                filter: FilterContext::DataChange { trigger: DataChangeTrigger::StatusValue, absolute_deadband: None },
                discard_oldest: true,
                queue_size: 10,
            })
            .unwrap();
        assert_eq!(store.get(id).unwrap().index_range, NumericRange::Range(vec![NumericRangeDimension { low: 1, high: 1 }]));

        let dispatcher = NotificationDispatcher::new();
        let old = DataValue::new(Variant::array(VariantScalarTypeId::Int32, vec![Variant::Int32(10), Variant::Int32(20), Variant::Int32(30)]));
        let new = DataValue::new(Variant::array(VariantScalarTypeId::Int32, vec![Variant::Int32(10), Variant::Int32(99), Variant::Int32(30)]));
        dispatcher.dispatch_write(&mut store, &WriteValueRecord { node_id: node, old_value: old, new_value: new });

        let item = store.get(id).unwrap();
        assert_eq!(item.queue.len(), 1);
        assert_eq!(item.queue.iter().next().unwrap().value.value, Variant::array(VariantScalarTypeId::Int32, vec![Variant::Int32(99)]));
    }

    #[test]
    fn event_queue_overflow_extracts_fields_through_select_clauses() {
        use crate::filters::{EventTypeRegistry, SelectClause};

        let mut store = MonitoredItemStore::new();
        let source_name_clause = SelectClause {
            type_definition_id: ObjectTypeId::BaseEventType.into(),
            browse_path: vec![(0u16, "SourceName").into()],
            attribute_id: AttributeId::Value,
            index_range: String::new(),
        };
        let id = store
            .create_monitored_item(CreateMonitoredItemParams {
                subscription_id: 1,
                node_id: ObjectId::Server.into(),
                attribute_id: AttributeId::EventNotifier,
                index_range: String::new(),
                timestamps_to_return: TimestampsToReturn::Both,
                monitoring_mode: MonitoringMode::Reporting,
                client_handle: 1,
                filter: FilterContext::Event { select_clauses: vec![source_name_clause] },
                discard_oldest: true,
                queue_size: 1,
            })
            .unwrap();

        let item = store.get_mut(id).unwrap();
        item.queue.enqueue(Notification::new(dv(1)));
        item.queue.enqueue(Notification::new(dv(2)));
        assert!(item.queue.iter().last().unwrap().overflowed);

        let dispatcher = NotificationDispatcher::new();
        let registry = EventTypeRegistry::new();
        dispatcher.handle_event_queue_overflow(item, &registry, &[], opcua_types::DateTime::now());

        let last = item.queue.iter().last().unwrap();
        match &last.value.value {
            Variant::Array(arr) => {
                assert_eq!(arr.values.len(), 1);
                assert_eq!(arr.values[0], Variant::String(overflow_event_source_name()));
            }
            other => panic!("expected an EventFieldList array, got {other:?}"),
        }
    }
}
