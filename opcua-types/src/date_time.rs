// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! A thin `DateTime` wrapper over `chrono::DateTime<Utc>`, matching the
//! teacher's `opcua-types` use of `chrono` for all wall-clock timestamps.

use chrono::{DateTime as ChronoDateTime, TimeZone, Utc};

/// An OPC UA timestamp: UTC time plus 100ns-tick resolution, paired
/// elsewhere with picosecond remainder fields on [`crate::DataValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(ChronoDateTime<Utc>);

impl DateTime {
    /// The current UTC time.
    pub fn now() -> Self {
        DateTime(Utc::now())
    }

    /// The OPC UA epoch / "min value" sentinel.
    pub fn min_value() -> Self {
        DateTime(Utc.timestamp_opt(0, 0).unwrap())
    }

    /// Underlying chrono value.
    pub fn as_chrono(&self) -> ChronoDateTime<Utc> {
        self.0
    }
}

impl Default for DateTime {
    fn default() -> Self {
        DateTime::min_value()
    }
}

impl From<ChronoDateTime<Utc>> for DateTime {
    fn from(v: ChronoDateTime<Utc>) -> Self {
        DateTime(v)
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
