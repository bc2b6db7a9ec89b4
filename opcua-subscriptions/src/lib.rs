// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The monitored-item store, filter engine, and notification dispatcher.
//!
//! [`item::MonitoredItemStore`] owns monitored-item lifecycle and per-item
//! queues; [`filters`] validates and evaluates data-change and event
//! filters; [`dispatch::NotificationDispatcher`] fans an
//! [`opcua_address_space::OperationLog`] out to subscribing items.

mod dispatch;
mod filters;
mod item;
mod monitoring_mode;
mod queue;

pub use dispatch::NotificationDispatcher;
pub use filters::{
    check_data_filter, init_event_filter, is_notification_triggered, DataChangeFilter,
    DataChangeTrigger, DeadbandType, EventFilter, EventFilterResult, EventTypeDef,
    EventTypeRegistry, FilterContext, SelectClause, WhereClause, WhereOperand,
};
pub use item::{
    CreateMonitoredItemParams, ModifyMonitoredItemParams, MonitoredItem, MonitoredItemId,
    MonitoredItemStore,
};
pub use monitoring_mode::MonitoringMode;
pub use queue::{Notification, NotificationQueue};
