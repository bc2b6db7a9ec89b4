// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `EngineLimits`, the small set of tunables the core names only as
//! constants.

use serde::Deserialize;

/// Configuration loaded the way `ServerConfig`/`limits` are in the teacher's
/// `core.rs` (`context.info.config.limits...`).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EngineLimits {
    /// Bound on subtype-chain walks, cascade deletes, and
    /// `TranslateBrowsePath` recursion.
    pub recursion_limit: u32,
    /// Default `queueSize` for a `CreateMonitoredItems` item that doesn't
    /// specify one.
    pub default_queue_size: u32,
    /// Floor applied to `minimumSamplingInterval` when a client requests a
    /// faster rate.
    pub min_sampling_interval_ms: f64,
    /// Upper bound on monitored items per subscription.
    pub max_monitored_items_per_subscription: u32,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            recursion_limit: 128,
            default_queue_size: 1,
            min_sampling_interval_ms: 100.0,
            max_monitored_items_per_subscription: 0,
        }
    }
}
