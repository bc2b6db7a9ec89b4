// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Contains the implementation of `NodeId`, `Identifier` and `ExpandedNodeId`.

use std::fmt;

use crate::string::UAString;

/// The four shapes an OPC UA identifier can take.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    /// A numeric identifier.
    Numeric(u32),
    /// A free-form string identifier.
    String(UAString),
    /// A GUID, stored as its 16 raw bytes.
    Guid([u8; 16]),
    /// An opaque byte-string identifier.
    ByteString(Vec<u8>),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(v) => write!(f, "{v}"),
            Identifier::String(v) => write!(f, "{v}"),
            Identifier::Guid(v) => {
                write!(f, "g=")?;
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Identifier::ByteString(v) => {
                write!(f, "b=")?;
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// A node identifier: a namespace index paired with a tagged identifier.
///
/// Equality and ordering are total: namespace index is compared first, then
/// the identifier tag, then the identifier value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// Index into the server's namespace array.
    pub namespace: u16,
    /// The identifier, tagged by kind.
    pub identifier: Identifier,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ns={};{}", self.namespace, self.identifier)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::null()
    }
}

impl NodeId {
    /// Construct a numeric node id.
    pub fn new(namespace: u16, identifier: impl Into<Identifier>) -> Self {
        Self {
            namespace,
            identifier: identifier.into(),
        }
    }

    /// The canonical null node id: `ns=0;i=0`.
    pub fn null() -> Self {
        Self {
            namespace: 0,
            identifier: Identifier::Numeric(0),
        }
    }

    /// `true` iff this is the null node id.
    pub fn is_null(&self) -> bool {
        self.namespace == 0 && matches!(self.identifier, Identifier::Numeric(0))
    }

    /// Shorthand for a numeric id in namespace 0 (the standard namespace).
    pub fn numeric(ns: u16, id: u32) -> Self {
        Self::new(ns, Identifier::Numeric(id))
    }

    /// Shorthand for a string id.
    pub fn string(ns: u16, id: impl Into<UAString>) -> Self {
        Self::new(ns, Identifier::String(id.into()))
    }

    /// Extend into an [`ExpandedNodeId`] local to this server (server index 0,
    /// empty namespace URI).
    pub fn into_expanded(self) -> ExpandedNodeId {
        ExpandedNodeId {
            node_id: self,
            namespace_uri: UAString::null(),
            server_index: 0,
        }
    }
}

impl From<u32> for Identifier {
    fn from(v: u32) -> Self {
        Identifier::Numeric(v)
    }
}
impl From<&str> for Identifier {
    fn from(v: &str) -> Self {
        Identifier::String(v.into())
    }
}
impl From<String> for Identifier {
    fn from(v: String) -> Self {
        Identifier::String(v.into())
    }
}
impl From<[u8; 16]> for Identifier {
    fn from(v: [u8; 16]) -> Self {
        Identifier::Guid(v)
    }
}

impl From<(u16, u32)> for NodeId {
    fn from(v: (u16, u32)) -> Self {
        NodeId::numeric(v.0, v.1)
    }
}
impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        NodeId::numeric(0, v)
    }
}

/// A [`NodeId`] qualified with an optional remote namespace URI and server
/// index. Used as a reference target so that remote references can be
/// represented without resolving them locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedNodeId {
    /// The local-shape node id.
    pub node_id: NodeId,
    /// Namespace URI; an empty string means "use `node_id.namespace` directly".
    pub namespace_uri: UAString,
    /// Server index; `0` means "the local server".
    pub server_index: u32,
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "svr={};{}", self.server_index, self.node_id)
    }
}

impl ExpandedNodeId {
    /// `true` iff this expanded id names a node in the local server: server
    /// index is `0` and the namespace URI is empty.
    pub fn is_local(&self) -> bool {
        self.server_index == 0 && self.namespace_uri.is_empty()
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        node_id.into_expanded()
    }
}

impl PartialEq<NodeId> for ExpandedNodeId {
    fn eq(&self, other: &NodeId) -> bool {
        self.is_local() && &self.node_id == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_total() {
        let a = NodeId::numeric(0, 1);
        let b = NodeId::numeric(0, 2);
        let c = NodeId::numeric(1, 1);
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn expanded_local_detection() {
        let n = NodeId::numeric(1, 42);
        let exp = n.clone().into_expanded();
        assert!(exp.is_local());
        assert_eq!(exp, n);

        let remote = ExpandedNodeId {
            node_id: NodeId::numeric(1, 42),
            namespace_uri: "http://example.com".into(),
            server_index: 0,
        };
        assert!(!remote.is_local());
    }
}
