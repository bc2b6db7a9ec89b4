// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! The three bitmask attributes carried by nodes: `AccessLevel` (Variable/
//! VariableType), `EventNotifier` (Object/View), and `WriteMask` (every node
//! class).

use bitflags::bitflags;

bitflags! {
    /// The `AccessLevel`/`UserAccessLevel` attribute bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessLevel: u8 {
        /// The current value is readable.
        const CURRENT_READ = 1;
        /// The current value is writable.
        const CURRENT_WRITE = 2;
        /// History may be read.
        const HISTORY_READ = 4;
        /// History may be written.
        const HISTORY_WRITE = 8;
        /// The status of the current value may be set directly.
        const STATUS_WRITE = 0x20;
        /// The source timestamp of the current value may be set directly.
        const TIMESTAMP_WRITE = 0x40;
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        AccessLevel::CURRENT_READ
    }
}

bitflags! {
    /// The `EventNotifier` attribute bitmask (Object/View nodes).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventNotifier: u8 {
        /// The node can be subscribed to for events.
        const SUBSCRIBE_TO_EVENTS = 1;
        /// Historical events may be read.
        const HISTORY_READ = 4;
        /// Historical events may be written.
        const HISTORY_WRITE = 8;
    }
}

bitflags! {
    /// The `WriteMask`/`UserWriteMask` attribute bitmask. This engine never
    /// accepts a caller-supplied `WriteMask` on `AddNode` — it fails the
    /// request with `NodeAttributesInvalid` instead — but the bits are
    /// still exposed for `ReadAttribute`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WriteMask: u32 {
        const ACCESS_LEVEL = 1 << 0;
        const ARRAY_DIMENSIONS = 1 << 1;
        const BROWSE_NAME = 1 << 2;
        const CONTAINS_NO_LOOPS = 1 << 3;
        const DATA_TYPE = 1 << 4;
        const DESCRIPTION = 1 << 5;
        const DISPLAY_NAME = 1 << 6;
        const EVENT_NOTIFIER = 1 << 7;
        const EXECUTABLE = 1 << 8;
        const HISTORIZING = 1 << 9;
        const INVERSE_NAME = 1 << 10;
        const IS_ABSTRACT = 1 << 11;
        const MINIMUM_SAMPLING_INTERVAL = 1 << 12;
        const NODE_CLASS = 1 << 13;
        const NODE_ID = 1 << 14;
        const SYMMETRIC = 1 << 15;
        const USER_ACCESS_LEVEL = 1 << 16;
        const USER_EXECUTABLE = 1 << 17;
        const USER_WRITE_MASK = 1 << 18;
        const VALUE_RANK = 1 << 19;
        const WRITE_MASK = 1 << 20;
        const VALUE_FOR_VARIABLE_TYPE = 1 << 21;
    }
}
