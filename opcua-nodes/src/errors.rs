// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Failure modes of building a node from a `NodeAttributes` mask.

use thiserror::Error;

use opcua_types::StatusCode;

/// Why a node couldn't be constructed from `NodeAttributes`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FromAttributesError {
    /// The `SpecifiedAttributes` bitmask itself didn't parse.
    #[error("invalid specified-attributes mask")]
    InvalidMask,
    /// A mandatory attribute for this node class was not specified.
    #[error("missing mandatory attribute values")]
    MissingMandatoryValues,
    /// The caller specified an attribute this engine refuses to accept from
    /// `AddNode`: `WriteMask`/`UserWriteMask`, `UserAccessLevel`,
    /// `Historizing`, `UserExecutable`.
    #[error("unsupported attribute specified")]
    UnsupportedAttribute,
}

impl From<FromAttributesError> for StatusCode {
    fn from(_: FromAttributesError) -> Self {
        StatusCode::BadNodeAttributesInvalid
    }
}
