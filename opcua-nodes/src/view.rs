// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `View` and `ViewBuilder`.

use opcua_types::{AttributeId, DataValue, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant};

use crate::{
    access_level::EventNotifier,
    base::Base,
    builder::{NodeBuilder, WithIdentity},
    node::{node_base_impl, Node},
};

pub type ViewBuilder = NodeBuilder<View>;

impl ViewBuilder {
    pub fn event_notifier(mut self, event_notifier: EventNotifier) -> Self {
        self.node.event_notifier = event_notifier;
        self
    }
    pub fn contains_no_loops(mut self, v: bool) -> Self {
        self.node.contains_no_loops = v;
        self
    }
}

/// A `View` is a type of node within the `AddressSpace`.
#[derive(Debug)]
pub struct View {
    base: Base,
    event_notifier: EventNotifier,
    contains_no_loops: bool,
}

impl Default for View {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::View, &NodeId::null(), "", ""),
            event_notifier: EventNotifier::empty(),
            contains_no_loops: true,
        }
    }
}

impl WithIdentity for View {
    fn set_identity(&mut self, node_id: &NodeId, browse_name: QualifiedName, display_name: LocalizedText) {
        self.base = Base::new(NodeClass::View, node_id, browse_name, display_name);
    }
}

node_base_impl!(View);

impl Node for View {
    fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue> {
        match attribute_id {
            AttributeId::EventNotifier => Some(DataValue::new(Variant::Byte(self.event_notifier.bits()))),
            AttributeId::ContainsNoLoops => Some(DataValue::new(self.contains_no_loops)),
            _ => self.base.get_attribute(attribute_id, index_range),
        }
    }

    fn set_attribute(&mut self, attribute_id: AttributeId, value: Variant) -> Result<(), StatusCode> {
        match attribute_id {
            AttributeId::EventNotifier => match value {
                Variant::Byte(v) => {
                    self.event_notifier = EventNotifier::from_bits_truncate(v);
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::ContainsNoLoops => match value {
                Variant::Boolean(v) => {
                    self.contains_no_loops = v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            _ => self.base.set_attribute(attribute_id, value),
        }
    }
}

impl View {
    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }
}
