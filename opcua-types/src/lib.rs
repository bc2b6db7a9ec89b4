// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! Core value and identifier types for the address-space and subscription
//! engine: `NodeId`, `Variant`, `DataValue`, `StatusCode`, and the standard
//! namespace-0 id tables. Mirrors the role of `async-opcua-types` in the
//! wider `async-opcua` workspace, scoped to what this engine needs.

mod byte_string;
mod data_value;
mod date_time;
mod errors;
mod extension_object;
mod ids;
mod localized_text;
mod node_id;
mod numeric_range;
mod qualified_name;
mod status_code;
mod string;
mod variant;

pub use byte_string::ByteString;
pub use data_value::DataValue;
pub use date_time::DateTime;
pub use errors::EngineError;
pub use extension_object::{ExtensionObject, ExtensionObjectBody, Range};
pub use ids::{AttributeId, DataTypeId, NodeClass, ObjectId, ObjectTypeId, ReferenceTypeId, VariableTypeId};
pub use localized_text::LocalizedText;
pub use node_id::{ExpandedNodeId, Identifier, NodeId};
pub use numeric_range::{NumericRange, NumericRangeDimension};
pub use qualified_name::QualifiedName;
pub use status_code::StatusCode;
pub use string::UAString;
pub use variant::{DiagnosticInfo, Variant, VariantArray, VariantScalarTypeId};
