// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Numeric identifiers for nodes in the standard (namespace 0) address
//! space, and the small set of enums (`NodeClass`, `AttributeId`) that
//! aren't themselves nodes. These mirror the `ObjectId`/`ReferenceTypeId`/
//! etc. enums `async-opcua-types` generates from the OPC UA nodeset, kept
//! here as a hand-picked subset sufficient for the address-space engine.

use crate::node_id::NodeId;

macro_rules! node_id_enum {
    ($(#[$meta:meta])* $name:ident { $( $variant:ident = $val:expr ),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum $name {
            $( $variant = $val ),*
        }

        impl $name {
            /// Attempt to resolve a numeric id in namespace 0 to this enum.
            pub fn try_from_id(id: u32) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )*
                    _ => None,
                }
            }
        }

        impl From<$name> for NodeId {
            fn from(v: $name) -> Self {
                NodeId::numeric(0, v as u32)
            }
        }

        impl TryFrom<&NodeId> for $name {
            type Error = ();
            fn try_from(id: &NodeId) -> Result<Self, ()> {
                if id.namespace != 0 {
                    return Err(());
                }
                if let crate::node_id::Identifier::Numeric(n) = id.identifier {
                    Self::try_from_id(n).ok_or(())
                } else {
                    Err(())
                }
            }
        }
    };
}

/// The eight node classes an OPC UA node can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NodeClass {
    /// Unspecified / invalid.
    Unspecified = 0,
    Object = 1,
    Variable = 2,
    Method = 4,
    ObjectType = 8,
    VariableType = 16,
    ReferenceType = 32,
    DataType = 64,
    View = 128,
}

/// Attribute identifiers, as assigned in OPC UA Part 6 Table 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AttributeId {
    NodeId = 1,
    NodeClass = 2,
    BrowseName = 3,
    DisplayName = 4,
    Description = 5,
    WriteMask = 6,
    UserWriteMask = 7,
    IsAbstract = 8,
    Symmetric = 9,
    InverseName = 10,
    ContainsNoLoops = 11,
    EventNotifier = 12,
    Value = 13,
    DataType = 14,
    ValueRank = 15,
    ArrayDimensions = 16,
    AccessLevel = 17,
    UserAccessLevel = 18,
    MinimumSamplingInterval = 19,
    Historizing = 20,
    Executable = 21,
    UserExecutable = 22,
    DataTypeDefinition = 23,
}

impl AttributeId {
    /// Resolve a raw Part-6 attribute id.
    pub fn try_from_id(id: u32) -> Option<Self> {
        use AttributeId::*;
        Some(match id {
            1 => NodeId,
            2 => NodeClass,
            3 => BrowseName,
            4 => DisplayName,
            5 => Description,
            6 => WriteMask,
            7 => UserWriteMask,
            8 => IsAbstract,
            9 => Symmetric,
            10 => InverseName,
            11 => ContainsNoLoops,
            12 => EventNotifier,
            13 => Value,
            14 => DataType,
            15 => ValueRank,
            16 => ArrayDimensions,
            17 => AccessLevel,
            18 => UserAccessLevel,
            19 => MinimumSamplingInterval,
            20 => Historizing,
            21 => Executable,
            22 => UserExecutable,
            23 => DataTypeDefinition,
            _ => return None,
        })
    }
}

node_id_enum!(
    /// Standard reference types this core recognises structurally.
    ReferenceTypeId {
        References = 31,
        NonHierarchicalReferences = 32,
        HierarchicalReferences = 33,
        HasChild = 34,
        Organizes = 35,
        HasEventSource = 36,
        HasModellingRule = 37,
        HasEncoding = 38,
        HasDescription = 39,
        HasTypeDefinition = 40,
        GeneratesEvent = 41,
        Aggregates = 44,
        HasSubtype = 45,
        HasProperty = 46,
        HasComponent = 47,
        HasNotifier = 48,
        HasOrderedComponent = 49,
    }
);

node_id_enum!(
    /// Standard DataType nodes.
    DataTypeId {
        Boolean = 1,
        SByte = 2,
        Byte = 3,
        Int16 = 4,
        UInt16 = 5,
        Int32 = 6,
        UInt32 = 7,
        Int64 = 8,
        UInt64 = 9,
        Float = 10,
        Double = 11,
        String = 12,
        DateTime = 13,
        Guid = 14,
        ByteString = 15,
        XmlElement = 16,
        NodeId = 17,
        ExpandedNodeId = 18,
        StatusCode = 19,
        QualifiedName = 20,
        LocalizedText = 21,
        Structure = 22,
        DataValue = 23,
        BaseDataType = 24,
        DiagnosticInfo = 25,
        Number = 26,
        Integer = 27,
        UInteger = 28,
        Enumeration = 29,
        Range = 884,
    }
);

node_id_enum!(
    /// Standard ObjectType nodes.
    ObjectTypeId {
        BaseObjectType = 58,
        FolderType = 61,
        DataTypeEncodingType = 76,
        ServerType = 2004,
        EventQueueOverflowEventType = 3035,
        BaseEventType = 2041,
    }
);

node_id_enum!(
    /// Standard VariableType nodes.
    VariableTypeId {
        BaseVariableType = 62,
        BaseDataVariableType = 63,
        PropertyType = 68,
    }
);

node_id_enum!(
    /// A handful of well-known Object/Variable instance nodes.
    ObjectId {
        RootFolder = 84,
        ObjectsFolder = 85,
        TypesFolder = 86,
        ViewsFolder = 87,
        Server = 2253,
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_node_id() {
        let id: NodeId = ReferenceTypeId::HasComponent.into();
        assert_eq!(ReferenceTypeId::try_from(&id), Ok(ReferenceTypeId::HasComponent));
    }
}
