// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `MonitoringMode`, the three-state mode of a monitored item.

/// Controls whether a monitored item samples and/or reports its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitoringMode {
    /// Neither samples nor reports; no notifications are produced.
    Disabled,
    /// Samples and enqueues notifications but does not report them.
    Sampling,
    /// Samples, enqueues, and reports notifications to the subscription.
    Reporting,
}

impl MonitoringMode {
    /// `true` for `Sampling` and `Reporting`: the item accepts new
    /// notifications at all.
    pub fn samples(self) -> bool {
        !matches!(self, MonitoringMode::Disabled)
    }

    /// `true` only for `Reporting`: a queued notification should be
    /// surfaced to the subscription's next Publish response.
    pub fn reports(self) -> bool {
        matches!(self, MonitoringMode::Reporting)
    }
}
