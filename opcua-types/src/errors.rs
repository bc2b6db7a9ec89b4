// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Internal failure modes that have no natural `StatusCode` mapping. These
//! never escape a service boundary: callers at the edge convert them to the
//! nearest `BadXxx` status.

use thiserror::Error;

use crate::status_code::StatusCode;

/// Failures internal to this engine, distinct from the `StatusCode` that
/// every public service operation returns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A static table (e.g. `HasSubtype` backward index) was queried with
    /// an id it doesn't recognise.
    #[error("unknown standard type id {0}")]
    UnknownStandardType(u32),

    /// A recursive walk (subtype resolution, cascading delete) exceeded the
    /// configured recursion limit.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// A numeric range string failed to parse.
    #[error("invalid numeric range: {0}")]
    InvalidNumericRange(String),

    /// An internal invariant was violated; carries a short description for
    /// logs only, never shown to a protocol peer.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// The nearest OPC UA status code for this internal failure.
    pub fn as_status_code(&self) -> StatusCode {
        match self {
            EngineError::UnknownStandardType(_) => StatusCode::BadNodeIdUnknown,
            EngineError::RecursionLimitExceeded => StatusCode::BadInternalError,
            EngineError::InvalidNumericRange(_) => StatusCode::BadIndexRangeInvalid,
            EngineError::Internal(_) => StatusCode::BadInternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_bad_status() {
        assert_eq!(
            EngineError::RecursionLimitExceeded.as_status_code(),
            StatusCode::BadInternalError
        );
        assert_eq!(
            EngineError::InvalidNumericRange("x".into()).as_status_code(),
            StatusCode::BadIndexRangeInvalid
        );
    }
}
