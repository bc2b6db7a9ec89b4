// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

///! `DataValue`: a `Variant` paired with a status code and source/server
//! timestamps.

use crate::{date_time::DateTime, status_code::StatusCode, variant::Variant};

/// A value, its status, and the two timestamps that bracket when it was
/// produced (source) and when it was read from the address space (server),
/// each with a 100ns-sub-tick picoseconds remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct DataValue {
    /// The value itself.
    pub value: Variant,
    /// Quality of `value`.
    pub status: StatusCode,
    /// When the value was produced at its source.
    pub source_timestamp: Option<DateTime>,
    /// Sub-tick remainder for `source_timestamp`, `0..=9999`.
    pub source_picoseconds: u16,
    /// When the server obtained the value.
    pub server_timestamp: Option<DateTime>,
    /// Sub-tick remainder for `server_timestamp`, `0..=9999`.
    pub server_picoseconds: u16,
}

impl Default for DataValue {
    fn default() -> Self {
        DataValue {
            value: Variant::Empty,
            status: StatusCode::Good,
            source_timestamp: None,
            source_picoseconds: 0,
            server_timestamp: None,
            server_picoseconds: 0,
        }
    }
}

impl DataValue {
    /// A good value with no timestamps set, the shape returned for
    /// attributes other than `Value`.
    pub fn new(value: impl Into<Variant>) -> Self {
        DataValue {
            value: value.into(),
            ..Default::default()
        }
    }

    /// A `DataValue` carrying only a status code, no value or timestamps.
    pub fn from_status(status: StatusCode) -> Self {
        DataValue {
            status,
            ..Default::default()
        }
    }

    /// Zero the source and/or server timestamp fields, used when a
    /// subscription's `TimestampsToReturn` excludes one or both.
    pub fn filter_timestamps(&mut self, keep_source: bool, keep_server: bool) {
        if !keep_source {
            self.source_timestamp = None;
            self.source_picoseconds = 0;
        }
        if !keep_server {
            self.server_timestamp = None;
            self.server_picoseconds = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_good_empty() {
        let dv = DataValue::default();
        assert_eq!(dv.status, StatusCode::Good);
        assert!(dv.value.is_empty());
        assert!(dv.source_timestamp.is_none());
    }

    #[test]
    fn filter_timestamps_clears_selectively() {
        let mut dv = DataValue {
            value: Variant::Int32(1),
            status: StatusCode::Good,
            source_timestamp: Some(DateTime::now()),
            source_picoseconds: 5,
            server_timestamp: Some(DateTime::now()),
            server_picoseconds: 7,
        };
        dv.filter_timestamps(true, false);
        assert!(dv.source_timestamp.is_some());
        assert!(dv.server_timestamp.is_none());
        assert_eq!(dv.server_picoseconds, 0);
    }
}
