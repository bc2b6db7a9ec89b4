// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `MonitoredItem` and its process-wide store.

use hashbrown::HashMap;

use opcua_nodes::TimestampsToReturn;
use opcua_types::{AttributeId, NodeId, NumericRange, StatusCode};

use crate::filters::FilterContext;
use crate::monitoring_mode::MonitoringMode;
use crate::queue::NotificationQueue;

/// Identifies a monitored item within the process-wide store. Reused from
/// the free list after deletion.
pub type MonitoredItemId = u32;

/// One monitored item: the target it watches, its filter/queue state, and
/// the baseline it compares new values against.
#[derive(Debug, Clone)]
pub struct MonitoredItem {
    pub id: MonitoredItemId,
    pub subscription_id: u32,
    pub node_id: NodeId,
    pub attribute_id: AttributeId,
    pub index_range: NumericRange,
    pub timestamps_to_return: TimestampsToReturn,
    pub monitoring_mode: MonitoringMode,
    pub client_handle: u32,
    pub filter: FilterContext,
    pub queue: NotificationQueue,
    /// The last value this MI actually *reported*, i.e. the baseline the
    /// deadband/trigger comparison runs against on the next write. Updated
    /// only when a notification is accepted, not on every write — see
    /// [`crate::filters::is_notification_triggered`]'s doc comment for why
    /// this distinction matters for cumulative sub-deadband drift.
    pub last_reported: Option<opcua_types::DataValue>,
}

impl MonitoredItem {
    /// `true` if this item watches `(node_id, attribute_id)`.
    pub fn watches(&self, node_id: &NodeId, attribute_id: AttributeId) -> bool {
        &self.node_id == node_id && self.attribute_id == attribute_id
    }
}

/// Parameters for [`MonitoredItemStore::create_monitored_item`].
#[derive(Debug, Clone)]
pub struct CreateMonitoredItemParams {
    pub subscription_id: u32,
    pub node_id: NodeId,
    pub attribute_id: AttributeId,
    pub index_range: String,
    pub timestamps_to_return: TimestampsToReturn,
    pub monitoring_mode: MonitoringMode,
    pub client_handle: u32,
    pub filter: FilterContext,
    pub discard_oldest: bool,
    pub queue_size: u32,
}

/// Parameters for [`MonitoredItemStore::modify_monitored_item`].
#[derive(Debug, Clone)]
pub struct ModifyMonitoredItemParams {
    pub timestamps_to_return: TimestampsToReturn,
    pub client_handle: u32,
    pub filter: FilterContext,
    pub discard_oldest: bool,
    pub queue_size: u32,
}

/// The process-wide monitored-item map plus its id free list.
#[derive(Debug, Default)]
pub struct MonitoredItemStore {
    items: HashMap<MonitoredItemId, MonitoredItem>,
    free_list: Vec<MonitoredItemId>,
    next_id: MonitoredItemId,
}

impl MonitoredItemStore {
    pub fn new() -> Self {
        Self { items: HashMap::new(), free_list: Vec::new(), next_id: 1 }
    }

    fn allocate_id(&mut self) -> MonitoredItemId {
        if let Some(id) = self.free_list.pop() {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Allocates a new MI, parses its index range, and registers it.
    /// Rejects a syntactically invalid range string with
    /// `BadIndexRangeInvalid` without allocating an id.
    pub fn create_monitored_item(&mut self, params: CreateMonitoredItemParams) -> Result<MonitoredItemId, StatusCode> {
        let index_range = if params.index_range.is_empty() {
            NumericRange::None
        } else {
            NumericRange::parse(&params.index_range)?
        };
        let id = self.allocate_id();
        let item = MonitoredItem {
            id,
            subscription_id: params.subscription_id,
            node_id: params.node_id,
            attribute_id: params.attribute_id,
            index_range,
            timestamps_to_return: params.timestamps_to_return,
            monitoring_mode: params.monitoring_mode,
            client_handle: params.client_handle,
            filter: params.filter,
            queue: NotificationQueue::new(params.queue_size, params.discard_oldest),
            last_reported: None,
        };
        self.items.insert(id, item);
        Ok(id)
    }

    /// Replaces mutable fields and substitutes the filter context, freeing
    /// the old one in place.
    pub fn modify_monitored_item(&mut self, id: MonitoredItemId, params: ModifyMonitoredItemParams) -> Result<(), StatusCode> {
        let item = self.items.get_mut(&id).ok_or(StatusCode::BadMonitoredItemIdInvalid)?;
        item.timestamps_to_return = params.timestamps_to_return;
        item.client_handle = params.client_handle;
        item.filter = params.filter;
        item.queue.reconfigure(params.queue_size, params.discard_oldest);
        Ok(())
    }

    /// Pushes `id` onto the free list and removes the MI.
    pub fn delete_monitored_item(&mut self, id: MonitoredItemId) -> Result<(), StatusCode> {
        if self.items.remove(&id).is_none() {
            return Err(StatusCode::BadMonitoredItemIdInvalid);
        }
        self.free_list.push(id);
        Ok(())
    }

    /// Updates the mode in place.
    pub fn set_monitoring_mode(&mut self, id: MonitoredItemId, mode: MonitoringMode) -> Result<(), StatusCode> {
        let item = self.items.get_mut(&id).ok_or(StatusCode::BadMonitoredItemIdInvalid)?;
        item.monitoring_mode = mode;
        Ok(())
    }

    pub fn get(&self, id: MonitoredItemId) -> Option<&MonitoredItem> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: MonitoredItemId) -> Option<&mut MonitoredItem> {
        self.items.get_mut(&id)
    }

    /// Every MI currently watching `(node_id, attribute_id)`, in no
    /// particular order (the dispatcher fans out to all of them per write).
    pub fn watching(&mut self, node_id: &NodeId, attribute_id: AttributeId) -> impl Iterator<Item = &mut MonitoredItem> {
        self.items.values_mut().filter(move |item| item.watches(node_id, attribute_id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcua_types::ObjectId;

    fn params(node_id: NodeId) -> CreateMonitoredItemParams {
        CreateMonitoredItemParams {
            subscription_id: 1,
            node_id,
            attribute_id: AttributeId::Value,
            index_range: String::new(),
            timestamps_to_return: TimestampsToReturn::Both,
            monitoring_mode: MonitoringMode::Reporting,
            client_handle: 7,
            filter: FilterContext::DataChange { trigger: crate::filters::DataChangeTrigger::StatusValue, absolute_deadband: None },
            discard_oldest: true,
            queue_size: 2,
        }
    }

    #[test]
    fn create_then_delete_reuses_id() {
        let mut store = MonitoredItemStore::new();
        let node: NodeId = ObjectId::Server.into();
        let id1 = store.create_monitored_item(params(node.clone())).unwrap();
        store.delete_monitored_item(id1).unwrap();
        let id2 = store.create_monitored_item(params(node)).unwrap();
        assert_eq!(id1, id2);
    }

    #[test]
    fn invalid_index_range_is_rejected_before_allocating() {
        let mut store = MonitoredItemStore::new();
        let node: NodeId = ObjectId::Server.into();
        let mut p = params(node);
        p.index_range = "not a range".to_string();
        assert_eq!(store.create_monitored_item(p), Err(StatusCode::BadIndexRangeInvalid));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn set_monitoring_mode_updates_existing_item() {
        let mut store = MonitoredItemStore::new();
        let node: NodeId = ObjectId::Server.into();
        let id = store.create_monitored_item(params(node)).unwrap();
        store.set_monitoring_mode(id, MonitoringMode::Disabled).unwrap();
        assert_eq!(store.get(id).unwrap().monitoring_mode, MonitoringMode::Disabled);
    }

    #[test]
    fn delete_unknown_id_errors() {
        let mut store = MonitoredItemStore::new();
        assert_eq!(store.delete_monitored_item(42), Err(StatusCode::BadMonitoredItemIdInvalid));
    }
}
