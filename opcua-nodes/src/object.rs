// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `Object` and `ObjectBuilder`.

use opcua_types::{AttributeId, DataValue, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant};

use crate::{
    access_level::EventNotifier,
    attributes::{AttributesMask, ObjectAttributes},
    base::Base,
    builder::{NodeBuilder, WithIdentity},
    errors::FromAttributesError,
    node::{node_base_impl, Node},
};

pub type ObjectBuilder = NodeBuilder<Object>;

impl ObjectBuilder {
    pub fn event_notifier(mut self, event_notifier: EventNotifier) -> Self {
        self.node.set_event_notifier(event_notifier);
        self
    }
}

/// An `Object` is a type of node within the `AddressSpace`.
#[derive(Debug)]
pub struct Object {
    base: Base,
    event_notifier: EventNotifier,
}

impl Default for Object {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::Object, &NodeId::null(), "", ""),
            event_notifier: EventNotifier::empty(),
        }
    }
}

impl WithIdentity for Object {
    fn set_identity(&mut self, node_id: &NodeId, browse_name: QualifiedName, display_name: LocalizedText) {
        self.base = Base::new(NodeClass::Object, node_id, browse_name, display_name);
    }
}

node_base_impl!(Object);

impl Node for Object {
    fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue> {
        match attribute_id {
            AttributeId::EventNotifier => Some(DataValue::new(Variant::Byte(self.event_notifier.bits()))),
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
            _ => self.base.set_attribute(attribute_id, value),
        }
    }
}

impl Object {
    pub fn new(node_id: &NodeId, browse_name: impl Into<QualifiedName>, display_name: impl Into<LocalizedText>) -> Self {
        ObjectBuilder::new(node_id, browse_name, display_name).build()
    }

    pub fn is_valid(&self) -> bool {
        self.base.is_valid()
    }

    pub fn event_notifier(&self) -> EventNotifier {
        self.event_notifier
    }
    pub fn set_event_notifier(&mut self, v: EventNotifier) {
        self.event_notifier = v;
    }

    /// Build an `Object` from an `AddNode` request's attribute bag, applying
    /// the per-attribute population rules.
    pub fn from_attributes(
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        attributes: ObjectAttributes,
    ) -> Result<Self, FromAttributesError> {
        if attributes.specified_attributes.intersects(AttributesMask::WRITE_MASK | AttributesMask::USER_WRITE_MASK) {
            return Err(FromAttributesError::UnsupportedAttribute);
        }
        let browse_name = browse_name.into();
        let display_name = attributes.display_name.unwrap_or_else(|| LocalizedText::from_text(browse_name.name.as_ref()));
        let mut node = ObjectBuilder::new(node_id, browse_name, display_name)
            .event_notifier(attributes.event_notifier.map(EventNotifier::from_bits_truncate).unwrap_or(EventNotifier::empty()))
            .build();
        if let Some(description) = attributes.description {
            node.set_description(description);
        }
        Ok(node)
    }
}
