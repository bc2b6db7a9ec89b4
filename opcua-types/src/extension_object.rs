// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `ExtensionObject`, used for structured values carried inside a
//! `Variant` — most importantly the `Range` (EURange) structure the
//! percent-deadband filter reads.

use crate::node_id::NodeId;

/// The `Range` structure (Part 8 §5.6.2): a variable's engineering-unit
/// range, used by percent-deadband filters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

impl Range {
    /// `true` iff `high >= low`, the precondition for a valid EURange in a
    /// percent-deadband validation.
    pub fn is_valid(&self) -> bool {
        self.high >= self.low
    }
}

/// The decoded body of an `ExtensionObject`. Only the structures this
/// engine needs to interpret locally are modelled; anything else is kept
/// as an opaque byte blob, exactly the way application-defined structures
/// pass through a server that doesn't understand their `DataTypeId`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionObjectBody {
    /// No body.
    None,
    /// A `Range` structure.
    Range(Range),
    /// Any other encoded structure, unparsed.
    Opaque(Vec<u8>),
}

/// A type-tagged structured value.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionObject {
    /// The data type of the encoded structure (`DataTypeId::Range` for the
    /// [`Range`] case).
    pub type_id: NodeId,
    /// The decoded (or opaque) body.
    pub body: ExtensionObjectBody,
}

impl ExtensionObject {
    /// The null extension object.
    pub fn null() -> Self {
        Self {
            type_id: NodeId::null(),
            body: ExtensionObjectBody::None,
        }
    }

    /// Wrap a [`Range`] value.
    pub fn from_range(range: Range) -> Self {
        Self {
            type_id: crate::ids::DataTypeId::Range.into(),
            body: ExtensionObjectBody::Range(range),
        }
    }

    /// Borrow the body as a [`Range`], if that's what it holds.
    pub fn as_range(&self) -> Option<Range> {
        match self.body {
            ExtensionObjectBody::Range(r) => Some(r),
            _ => None,
        }
    }

    /// `true` iff this extension object carries no value.
    pub fn is_null(&self) -> bool {
        matches!(self.body, ExtensionObjectBody::None) && self.type_id.is_null()
    }
}

impl Default for ExtensionObject {
    fn default() -> Self {
        Self::null()
    }
}
