// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `QualifiedName`.

use std::fmt;

use crate::string::UAString;

/// A name qualified by the namespace it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QualifiedName {
    /// Index into the namespace array.
    pub namespace_index: u16,
    /// The name itself.
    pub name: UAString,
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace_index, self.name)
    }
}

impl QualifiedName {
    /// Construct a qualified name.
    pub fn new(namespace_index: u16, name: impl Into<UAString>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    /// Construct a qualified name in namespace 0.
    pub fn from_name(name: impl Into<UAString>) -> Self {
        Self::new(0, name)
    }

    /// The null qualified name.
    pub fn null() -> Self {
        Self::default()
    }
}

impl From<&str> for QualifiedName {
    fn from(v: &str) -> Self {
        QualifiedName::from_name(v)
    }
}

impl From<(u16, &str)> for QualifiedName {
    fn from(v: (u16, &str)) -> Self {
        QualifiedName::new(v.0, v.1)
    }
}
