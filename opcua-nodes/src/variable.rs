// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `Variable` and `VariableBuilder`.

use opcua_types::{
    AttributeId, DataValue, LocalizedText, NodeClass, NodeId, NumericRange, QualifiedName, StatusCode, Variant,
};

use crate::{
    access_level::AccessLevel,
    attributes::{AttributesMask, VariableAttributes},
    base::Base,
    builder::{NodeBuilder, WithIdentity},
    errors::FromAttributesError,
    node::{node_base_impl, Node},
};

/// `TimestampsToReturn`, as carried by `Read` and by a `MonitoredItem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampsToReturn {
    Source,
    Server,
    Both,
    Neither,
}

/// A builder for `Variable` nodes.
pub type VariableBuilder = NodeBuilder<Variable>;

impl VariableBuilder {
    pub fn value(mut self, value: impl Into<Variant>) -> Self {
        let _ = self.node.set_value_direct(value.into());
        self
    }
    pub fn data_type(mut self, data_type: impl Into<NodeId>) -> Self {
        self.node.set_data_type(data_type);
        self
    }
    pub fn value_rank(mut self, value_rank: i32) -> Self {
        self.node.set_value_rank(value_rank);
        self
    }
    pub fn array_dimensions(mut self, dims: &[u32]) -> Self {
        self.node.set_array_dimensions(dims);
        self
    }
    pub fn access_level(mut self, access_level: AccessLevel) -> Self {
        self.node.set_access_level(access_level);
        self
    }
    pub fn user_access_level(mut self, user_access_level: AccessLevel) -> Self {
        self.node.set_user_access_level(user_access_level);
        self
    }
    pub fn writable(mut self) -> Self {
        self.node.set_access_level(self.node.access_level() | AccessLevel::CURRENT_WRITE);
        self.node.set_user_access_level(self.node.user_access_level() | AccessLevel::CURRENT_WRITE);
        self
    }
    pub fn minimum_sampling_interval(mut self, v: f64) -> Self {
        self.node.set_minimum_sampling_interval(v);
        self
    }
    pub fn historizing(mut self, v: bool) -> Self {
        self.node.set_historizing(v);
        self
    }
}

/// A `Variable` is a type of node within the `AddressSpace`.
#[derive(Debug)]
pub struct Variable {
    base: Base,
    data_type: NodeId,
    historizing: bool,
    value_rank: i32,
    value: DataValue,
    access_level: AccessLevel,
    user_access_level: AccessLevel,
    array_dimensions: Option<Vec<u32>>,
    minimum_sampling_interval: Option<f64>,
}

impl Default for Variable {
    fn default() -> Self {
        Self {
            base: Base::new(NodeClass::Variable, &NodeId::null(), "", ""),
            data_type: NodeId::null(),
            historizing: false,
            value_rank: -1,
            value: DataValue::default(),
            access_level: AccessLevel::CURRENT_READ,
            user_access_level: AccessLevel::CURRENT_READ,
            array_dimensions: None,
            minimum_sampling_interval: None,
        }
    }
}

impl WithIdentity for Variable {
    fn set_identity(&mut self, node_id: &NodeId, browse_name: QualifiedName, display_name: LocalizedText) {
        self.base = Base::new(NodeClass::Variable, node_id, browse_name, display_name);
    }
}

node_base_impl!(Variable);

impl Node for Variable {
    fn get_attribute(&self, attribute_id: AttributeId, index_range: &NumericRange) -> Option<DataValue> {
        match attribute_id {
            AttributeId::Value => Some(self.value(TimestampsToReturn::Both, index_range)),
            AttributeId::DataType => Some(DataValue::new(self.data_type.clone())),
            AttributeId::ValueRank => Some(DataValue::new(self.value_rank)),
            AttributeId::ArrayDimensions => {
                // Part 5 Table 1: non-null only when ValueRank > 0.
                if self.value_rank > 0 {
                    let dims = self.array_dimensions.clone().unwrap_or_else(|| vec![0; self.value_rank as usize]);
                    Some(DataValue::new(Variant::from(dims)))
                } else {
                    Some(DataValue::new(Variant::Empty))
                }
            }
            AttributeId::AccessLevel => Some(DataValue::new(Variant::Byte(self.access_level.bits()))),
            _ => self.base.get_attribute(attribute_id, index_range),
        }
    }

    fn set_attribute(&mut self, attribute_id: AttributeId, value: Variant) -> Result<(), StatusCode> {
        match attribute_id {
            AttributeId::DataType => match value {
                Variant::NodeId(v) => {
                    self.data_type = *v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::ValueRank => match value {
                Variant::Int32(v) => {
                    self.value_rank = v;
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            AttributeId::Value => self.set_value_direct(value),
            AttributeId::AccessLevel => match value {
                Variant::Byte(v) => {
                    self.access_level = AccessLevel::from_bits_truncate(v);
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            },
            _ => self.base.set_attribute(attribute_id, value),
        }
    }
}

impl Variable {
    pub fn new(node_id: &NodeId, browse_name: impl Into<QualifiedName>, display_name: impl Into<LocalizedText>, data_type: impl Into<NodeId>, value: impl Into<Variant>) -> Self {
        VariableBuilder::new(node_id, browse_name, display_name)
            .data_type(data_type)
            .value(value)
            .build()
    }

    pub fn is_valid(&self) -> bool {
        !self.data_type.is_null() && self.base.is_valid()
    }

    /// Build a `Variable` from an `AddNode` request's attribute bag, applying
    /// the per-attribute population rules: most attributes fall back to a
    /// default when unspecified, a few are rejected outright when the
    /// caller does specify them.
    pub fn from_attributes(
        node_id: &NodeId,
        browse_name: impl Into<QualifiedName>,
        attributes: VariableAttributes,
    ) -> Result<Self, FromAttributesError> {
        if attributes.specified_attributes.intersects(AttributesMask::WRITE_MASK | AttributesMask::USER_WRITE_MASK) {
            return Err(FromAttributesError::UnsupportedAttribute);
        }
        if attributes.user_access_level.is_some() || attributes.historizing.is_some() {
            return Err(FromAttributesError::UnsupportedAttribute);
        }
        let browse_name = browse_name.into();
        let display_name = attributes.display_name.unwrap_or_else(|| LocalizedText::from_text(browse_name.name.as_ref()));
        let value = attributes.value.unwrap_or(Variant::Empty);
        let value_status = if attributes.value.is_some() { StatusCode::Good } else { StatusCode::UncertainInitialValue };

        let mut node = VariableBuilder::new(node_id, browse_name, display_name)
            .data_type(attributes.data_type.unwrap_or_else(|| opcua_types::DataTypeId::BaseDataType.into()))
            .value(value)
            .value_rank(attributes.value_rank.unwrap_or(-2))
            .historizing(false)
            .access_level(attributes.access_level.map(AccessLevel::from_bits_truncate).unwrap_or(AccessLevel::CURRENT_READ))
            .user_access_level(AccessLevel::CURRENT_READ)
            .build();
        node.value.status = value_status;
        if let Some(description) = attributes.description {
            node.set_description(description);
        }
        if let Some(dims) = attributes.array_dimensions {
            if dims.is_empty() {
                return Err(FromAttributesError::MissingMandatoryValues);
            }
            node.set_array_dimensions(&dims);
        }
        if let Some(msi) = attributes.minimum_sampling_interval {
            tracing::warn!(node_id = %node_id, "MinimumSamplingInterval specified on AddNode is ignored");
            node.set_minimum_sampling_interval(msi);
        }
        Ok(node)
    }

    /// Read the value, applying `index_range` and filtering timestamps.
    pub fn value(&self, timestamps_to_return: TimestampsToReturn, index_range: &NumericRange) -> DataValue {
        let mut result = self.value.clone();
        if index_range.has_range() {
            match self.value.value.get_range(index_range) {
                Ok(v) => result.value = v,
                Err(e) => {
                    result.status = e;
                    result.value = Variant::Empty;
                }
            }
        }
        let (keep_source, keep_server) = match timestamps_to_return {
            TimestampsToReturn::Source => (true, false),
            TimestampsToReturn::Server => (false, true),
            TimestampsToReturn::Both => (true, true),
            TimestampsToReturn::Neither => (false, false),
        };
        result.filter_timestamps(keep_source, keep_server);
        result
    }

    /// Directly overwrite the whole `DataValue`.
    pub fn set_data_value(&mut self, value: DataValue) {
        self.value = value;
    }

    /// Current stored `DataValue`.
    pub fn data_value(&self) -> &DataValue {
        &self.value
    }

    /// Mutable access to the stored `DataValue`, used by
    /// `AddressSpaceAccess::write_value` to apply rollback-safe edits.
    pub fn data_value_mut(&mut self) -> &mut DataValue {
        &mut self.value
    }

    /// Set the variant value directly, stamping both timestamps to now and
    /// status to `Good`; handles the `Byte` array / `ByteString` coercion.
    pub fn set_value_direct(&mut self, value: impl Into<Variant>) -> Result<(), StatusCode> {
        let mut value = value.into();
        if matches!(self.value_rank, -3 | -2 | 1) && self.data_type == opcua_types::DataTypeId::Byte.into() {
            if let Variant::ByteString(_) = value {
                value = value.to_byte_array()?;
            }
        }
        let now = opcua_types::DateTime::now();
        self.value.value = value;
        self.value.status = StatusCode::Good;
        self.value.source_timestamp = Some(now);
        self.value.server_timestamp = Some(now);
        Ok(())
    }

    pub fn minimum_sampling_interval(&self) -> Option<f64> {
        self.minimum_sampling_interval
    }
    pub fn set_minimum_sampling_interval(&mut self, v: f64) {
        self.minimum_sampling_interval = Some(v);
    }
    pub fn is_readable(&self) -> bool {
        self.access_level.contains(AccessLevel::CURRENT_READ)
    }
    pub fn is_writable(&self) -> bool {
        self.access_level.contains(AccessLevel::CURRENT_WRITE)
    }
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }
    pub fn set_access_level(&mut self, v: AccessLevel) {
        self.access_level = v;
    }
    pub fn user_access_level(&self) -> AccessLevel {
        self.user_access_level
    }
    pub fn set_user_access_level(&mut self, v: AccessLevel) {
        self.user_access_level = v;
    }
    pub fn value_rank(&self) -> i32 {
        self.value_rank
    }
    pub fn set_value_rank(&mut self, v: i32) {
        self.value_rank = v;
    }
    pub fn historizing(&self) -> bool {
        self.historizing
    }
    pub fn set_historizing(&mut self, v: bool) {
        self.historizing = v;
    }
    pub fn array_dimensions(&self) -> Option<Vec<u32>> {
        self.array_dimensions.clone()
    }
    pub fn set_array_dimensions(&mut self, v: &[u32]) {
        self.array_dimensions = Some(v.to_vec());
    }
    pub fn data_type(&self) -> NodeId {
        self.data_type.clone()
    }
    pub fn set_data_type(&mut self, v: impl Into<NodeId>) {
        self.data_type = v.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_after_write_round_trips() {
        let mut v = Variable::new(&NodeId::numeric(1, 1), "x", "x", opcua_types::DataTypeId::UInt32, Variant::UInt32(1));
        v.set_value_direct(Variant::UInt32(42)).unwrap();
        let dv = v.value(TimestampsToReturn::Both, &NumericRange::None);
        assert_eq!(dv.value, Variant::UInt32(42));
        assert_eq!(dv.status, StatusCode::Good);
    }

    #[test]
    fn array_dimensions_null_when_value_rank_not_positive() {
        let v = Variable::new(&NodeId::numeric(1, 1), "x", "x", opcua_types::DataTypeId::UInt32, Variant::UInt32(1));
        let dv = v.get_attribute(AttributeId::ArrayDimensions, &NumericRange::None).unwrap();
        assert!(dv.value.is_empty());
    }
}
