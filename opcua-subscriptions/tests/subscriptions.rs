// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! End-to-end monitored-item scenarios wiring `AddressSpace` +
//! `AddressSpaceAccess` writes through the `MonitoredItemStore` and
//! `NotificationDispatcher`.

use opcua_address_space::{AddressSpace, AddressSpaceAccess, EngineLimits};
use opcua_nodes::{ObjectBuilder, TimestampsToReturn, VariableBuilder};
use opcua_subscriptions::{
    check_data_filter, CreateMonitoredItemParams, DataChangeFilter, DataChangeTrigger,
    DeadbandType, MonitoredItemStore, MonitoringMode, NotificationDispatcher,
};
use opcua_types::{AttributeId, DataTypeId, NodeId, NumericRange, ObjectId, ObjectTypeId, Variant};

fn fixture_with_variable(var_id: &NodeId) -> AddressSpace {
    let mut space = AddressSpace::new();
    let folder_type: NodeId = ObjectTypeId::FolderType.into();
    let root: NodeId = ObjectId::ObjectsFolder.into();
    space
        .append(ObjectBuilder::new(&root, "Objects", "Objects").has_type_definition(folder_type).build().into())
        .unwrap();
    space
        .append(VariableBuilder::new(var_id, "Temp", "Temp").data_type(DataTypeId::Double).value(20.0f64).writable().build().into())
        .unwrap();
    space
}

#[test]
fn write_triggers_notification_for_subscribed_item() {
    let var_id = NodeId::numeric(1, 10);
    let mut space = fixture_with_variable(&var_id);
    let limits = EngineLimits::default();

    let mut items = MonitoredItemStore::new();
    let filter = check_data_filter(&space, &var_id, None).unwrap();
    let id = items
        .create_monitored_item(CreateMonitoredItemParams {
            subscription_id: 1,
            node_id: var_id.clone(),
            attribute_id: AttributeId::Value,
            index_range: String::new(),
            timestamps_to_return: TimestampsToReturn::Both,
            monitoring_mode: MonitoringMode::Reporting,
            client_handle: 100,
            filter,
            discard_oldest: true,
            queue_size: 5,
        })
        .unwrap();

    let mut access = AddressSpaceAccess::new(&mut space, limits, true);
    access.write_value(&var_id, &NumericRange::None, Variant::Double(22.0), None, None, None).unwrap();
    let ops = access.take_operations();

    let dispatcher = NotificationDispatcher::new();
    dispatcher.dispatch(&ops, &mut items);

    let item = items.get(id).unwrap();
    assert_eq!(item.queue.len(), 1);
}

#[test]
fn absolute_deadband_suppresses_small_changes() {
    let var_id = NodeId::numeric(1, 11);
    let mut space = fixture_with_variable(&var_id);
    let limits = EngineLimits::default();

    let mut items = MonitoredItemStore::new();
    let filter = check_data_filter(
        &space,
        &var_id,
        Some(&DataChangeFilter { trigger: DataChangeTrigger::StatusValue, deadband_type: DeadbandType::Absolute, deadband_value: 1.0 }),
    )
    .unwrap();
    let id = items
        .create_monitored_item(CreateMonitoredItemParams {
            subscription_id: 1,
            node_id: var_id.clone(),
            attribute_id: AttributeId::Value,
            index_range: String::new(),
            timestamps_to_return: TimestampsToReturn::Both,
            monitoring_mode: MonitoringMode::Reporting,
            client_handle: 1,
            filter,
            discard_oldest: true,
            queue_size: 10,
        })
        .unwrap();

    let dispatcher = NotificationDispatcher::new();
    let initial = opcua_types::DataValue::new(Variant::Double(0.0));
    dispatcher.sample_initial_value(items.get_mut(id).unwrap(), initial);

    let mut access = AddressSpaceAccess::new(&mut space, limits, true);
    access.write_value(&var_id, &NumericRange::None, Variant::Double(0.5), None, None, None).unwrap();
    dispatcher.dispatch(&access.take_operations(), &mut items);
    assert_eq!(items.get(id).unwrap().queue.len(), 1, "write within deadband of the reported baseline must not trigger");

    access.write_value(&var_id, &NumericRange::None, Variant::Double(1.2), None, None, None).unwrap();
    dispatcher.dispatch(&access.take_operations(), &mut items);
    assert_eq!(items.get(id).unwrap().queue.len(), 2, "cumulative drift past the deadband from the last reported value must trigger");
}

#[test]
fn sampling_mode_does_not_report_but_reporting_does() {
    let var_id = NodeId::numeric(1, 12);
    let mut space = fixture_with_variable(&var_id);
    let limits = EngineLimits::default();

    let mut items = MonitoredItemStore::new();
    let filter = check_data_filter(&space, &var_id, None).unwrap();
    let id = items
        .create_monitored_item(CreateMonitoredItemParams {
            subscription_id: 1,
            node_id: var_id.clone(),
            attribute_id: AttributeId::Value,
            index_range: String::new(),
            timestamps_to_return: TimestampsToReturn::Both,
            monitoring_mode: MonitoringMode::Sampling,
            client_handle: 1,
            filter,
            discard_oldest: true,
            queue_size: 5,
        })
        .unwrap();

    let dispatcher = NotificationDispatcher::new();
    let mut access = AddressSpaceAccess::new(&mut space, limits, true);
    access.write_value(&var_id, &NumericRange::None, Variant::Double(30.0), None, None, None).unwrap();
    dispatcher.dispatch(&access.take_operations(), &mut items);

    // Sampling still enqueues; it is the caller's Publish path that must
    // skip reporting a Sampling-mode item's queue, not the dispatcher.
    assert_eq!(items.get(id).unwrap().queue.len(), 1);
    assert!(!items.get(id).unwrap().monitoring_mode.reports());

    items.set_monitoring_mode(id, MonitoringMode::Reporting).unwrap();
    assert!(items.get(id).unwrap().monitoring_mode.reports());
}
