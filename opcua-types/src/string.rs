// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `UAString`, distinguishing a "null"
//! string from an empty one the way OPC UA's wire encoding does.

use std::fmt;

/// An OPC UA string: `None` encodes the wire "null string" (length `-1`),
/// distinct from `Some(String::new())`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UAString(Option<String>);

impl UAString {
    /// The null string.
    pub fn null() -> Self {
        UAString(None)
    }

    /// `true` for the null string.
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// `true` for the null string or the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.as_deref().map(str::is_empty).unwrap_or(true)
    }

    /// Borrow the contents, or `""` if null.
    pub fn as_ref(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    /// Convert to an owned `String`, `""` if null.
    pub fn to_owned_string(&self) -> String {
        self.as_ref().to_owned()
    }
}

impl fmt::Display for UAString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl From<&str> for UAString {
    fn from(v: &str) -> Self {
        UAString(Some(v.to_owned()))
    }
}
impl From<String> for UAString {
    fn from(v: String) -> Self {
        UAString(Some(v))
    }
}
impl From<Option<String>> for UAString {
    fn from(v: Option<String>) -> Self {
        UAString(v)
    }
}
impl From<UAString> for String {
    fn from(v: UAString) -> Self {
        v.to_owned_string()
    }
}

impl PartialEq<str> for UAString {
    fn eq(&self, other: &str) -> bool {
        self.as_ref() == other
    }
}
impl PartialEq<&str> for UAString {
    fn eq(&self, other: &&str) -> bool {
        self.as_ref() == *other
    }
}
