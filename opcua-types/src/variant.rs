// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `Variant`, the dynamically-typed value carried by attributes and
//! notifications.

use crate::{
    byte_string::ByteString,
    data_value::DataValue,
    date_time::DateTime,
    extension_object::ExtensionObject,
    ids::DataTypeId,
    localized_text::LocalizedText,
    node_id::{ExpandedNodeId, NodeId},
    numeric_range::NumericRange,
    qualified_name::QualifiedName,
    status_code::StatusCode,
    string::UAString,
};

/// A placeholder for `DiagnosticInfo`, which this engine never populates
/// but must be representable as a built-in type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagnosticInfo;

/// The 25 OPC UA built-in type tags (Part 6 Table 1), used to describe the
/// element type of an array/matrix `Variant` and as the `builtInType`
/// argument to the deadband comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VariantScalarTypeId {
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
    ExtensionObject = 22,
    DataValue = 23,
    Variant = 24,
    DiagnosticInfo = 25,
}

impl VariantScalarTypeId {
    /// `true` for the nine numeric built-in types the deadband predicate
    /// and `Number`/`Integer`/`UInteger` subtype checks accept.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Float
                | Self::Double
        )
    }

    /// The canonical `DataType` node for this built-in type.
    /// `ExtensionObject` maps to the abstract `Structure` type, and
    /// `Variant` to `BaseDataType`, since there is no separate `Variant`
    /// data type node.
    pub fn data_type_node_id(self) -> NodeId {
        use VariantScalarTypeId::*;
        match self {
            Boolean => DataTypeId::Boolean.into(),
            SByte => DataTypeId::SByte.into(),
            Byte => DataTypeId::Byte.into(),
            Int16 => DataTypeId::Int16.into(),
            UInt16 => DataTypeId::UInt16.into(),
            Int32 => DataTypeId::Int32.into(),
            UInt32 => DataTypeId::UInt32.into(),
            Int64 => DataTypeId::Int64.into(),
            UInt64 => DataTypeId::UInt64.into(),
            Float => DataTypeId::Float.into(),
            Double => DataTypeId::Double.into(),
            String => DataTypeId::String.into(),
            DateTime => DataTypeId::DateTime.into(),
            Guid => DataTypeId::Guid.into(),
            ByteString => DataTypeId::ByteString.into(),
            XmlElement => DataTypeId::XmlElement.into(),
            NodeId => DataTypeId::NodeId.into(),
            ExpandedNodeId => DataTypeId::ExpandedNodeId.into(),
            StatusCode => DataTypeId::StatusCode.into(),
            QualifiedName => DataTypeId::QualifiedName.into(),
            LocalizedText => DataTypeId::LocalizedText.into(),
            ExtensionObject => DataTypeId::Structure.into(),
            DataValue => DataTypeId::DataValue.into(),
            Variant => DataTypeId::BaseDataType.into(),
            DiagnosticInfo => DataTypeId::DiagnosticInfo.into(),
        }
    }
}

/// An array or matrix value. Matrix storage is linearised row-major over
/// `dimensions`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantArray {
    /// Built-in type of every element.
    pub value_type: VariantScalarTypeId,
    /// Linearised element storage.
    pub values: Vec<Variant>,
    /// `None` for a plain 1-D array; `Some(dims)` for a rectangular matrix,
    /// with `dims.iter().product() == values.len()`.
    pub dimensions: Option<Vec<u32>>,
}

/// A dynamically-typed value: scalar, 1-D array, or rectangular matrix of
/// one of the 25 OPC UA built-in types.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// No value (the OPC UA "null" variant).
    Empty,
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(UAString),
    DateTime(Box<DateTime>),
    Guid(Box<[u8; 16]>),
    ByteString(ByteString),
    XmlElement(UAString),
    NodeId(Box<NodeId>),
    ExpandedNodeId(Box<ExpandedNodeId>),
    StatusCode(StatusCode),
    QualifiedName(Box<QualifiedName>),
    LocalizedText(Box<LocalizedText>),
    ExtensionObject(Box<ExtensionObject>),
    DataValue(Box<DataValue>),
    Variant(Box<Variant>),
    DiagnosticInfo(Box<DiagnosticInfo>),
    /// An array or matrix. Never itself nested: `value_type` always names a
    /// scalar built-in type.
    Array(Box<VariantArray>),
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Empty
    }
}

macro_rules! from_scalar {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Variant {
            fn from(v: $ty) -> Self {
                Variant::$variant(v)
            }
        }
    };
}

from_scalar!(bool, Boolean);
from_scalar!(i8, SByte);
from_scalar!(u8, Byte);
from_scalar!(i16, Int16);
from_scalar!(u16, UInt16);
from_scalar!(i32, Int32);
from_scalar!(u32, UInt32);
from_scalar!(i64, Int64);
from_scalar!(u64, UInt64);
from_scalar!(f32, Float);
from_scalar!(f64, Double);

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.into())
    }
}
impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::String(v.into())
    }
}
impl From<NodeId> for Variant {
    fn from(v: NodeId) -> Self {
        Variant::NodeId(Box::new(v))
    }
}
impl From<QualifiedName> for Variant {
    fn from(v: QualifiedName) -> Self {
        Variant::QualifiedName(Box::new(v))
    }
}
impl From<LocalizedText> for Variant {
    fn from(v: LocalizedText) -> Self {
        Variant::LocalizedText(Box::new(v))
    }
}
impl From<StatusCode> for Variant {
    fn from(v: StatusCode) -> Self {
        Variant::StatusCode(v)
    }
}
impl From<DateTime> for Variant {
    fn from(v: DateTime) -> Self {
        Variant::DateTime(Box::new(v))
    }
}
impl From<ExtensionObject> for Variant {
    fn from(v: ExtensionObject) -> Self {
        Variant::ExtensionObject(Box::new(v))
    }
}
impl From<Vec<u32>> for Variant {
    fn from(v: Vec<u32>) -> Self {
        Variant::Array(Box::new(VariantArray {
            value_type: VariantScalarTypeId::UInt32,
            values: v.into_iter().map(Variant::UInt32).collect(),
            dimensions: None,
        }))
    }
}
impl From<Vec<String>> for Variant {
    fn from(v: Vec<String>) -> Self {
        Variant::Array(Box::new(VariantArray {
            value_type: VariantScalarTypeId::String,
            values: v.into_iter().map(Variant::from).collect(),
            dimensions: None,
        }))
    }
}

impl Variant {
    /// Construct a 1-D array from homogeneous scalar variants. Panics if
    /// any element isn't a scalar of `value_type` — callers are expected to
    /// build arrays from already-typed data.
    pub fn array(value_type: VariantScalarTypeId, values: Vec<Variant>) -> Self {
        Variant::Array(Box::new(VariantArray {
            value_type,
            values,
            dimensions: None,
        }))
    }

    /// Construct a rectangular matrix. `dimensions.iter().product()` must
    /// equal `values.len()`.
    pub fn matrix(value_type: VariantScalarTypeId, values: Vec<Variant>, dimensions: Vec<u32>) -> Self {
        Variant::Array(Box::new(VariantArray {
            value_type,
            values,
            dimensions: Some(dimensions),
        }))
    }

    /// `true` for `Variant::Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    /// The built-in type tag of a scalar variant, or the element type for
    /// an array/matrix.
    pub fn scalar_type(&self) -> Option<VariantScalarTypeId> {
        use VariantScalarTypeId as T;
        Some(match self {
            Variant::Empty => return None,
            Variant::Boolean(_) => T::Boolean,
            Variant::SByte(_) => T::SByte,
            Variant::Byte(_) => T::Byte,
            Variant::Int16(_) => T::Int16,
            Variant::UInt16(_) => T::UInt16,
            Variant::Int32(_) => T::Int32,
            Variant::UInt32(_) => T::UInt32,
            Variant::Int64(_) => T::Int64,
            Variant::UInt64(_) => T::UInt64,
            Variant::Float(_) => T::Float,
            Variant::Double(_) => T::Double,
            Variant::String(_) => T::String,
            Variant::DateTime(_) => T::DateTime,
            Variant::Guid(_) => T::Guid,
            Variant::ByteString(_) => T::ByteString,
            Variant::XmlElement(_) => T::XmlElement,
            Variant::NodeId(_) => T::NodeId,
            Variant::ExpandedNodeId(_) => T::ExpandedNodeId,
            Variant::StatusCode(_) => T::StatusCode,
            Variant::QualifiedName(_) => T::QualifiedName,
            Variant::LocalizedText(_) => T::LocalizedText,
            Variant::ExtensionObject(_) => T::ExtensionObject,
            Variant::DataValue(_) => T::DataValue,
            Variant::Variant(_) => T::Variant,
            Variant::DiagnosticInfo(_) => T::DiagnosticInfo,
            Variant::Array(a) => a.value_type,
        })
    }

    /// Canonical `DataType` node id for this variant's built-in type.
    pub fn data_type(&self) -> Option<NodeId> {
        self.scalar_type().map(|t| t.data_type_node_id())
    }

    /// `true` iff this is a 1-D array (not a matrix, not a scalar).
    pub fn is_array(&self) -> bool {
        matches!(self, Variant::Array(a) if a.dimensions.is_none())
    }

    /// `true` iff this is a rectangular matrix.
    pub fn is_matrix(&self) -> bool {
        matches!(self, Variant::Array(a) if a.dimensions.is_some())
    }

    /// The shape's rank: `0` for a scalar, `1` for a plain array, or the
    /// number of matrix dimensions.
    pub fn actual_rank(&self) -> i32 {
        match self {
            Variant::Array(a) => match &a.dimensions {
                Some(d) => d.len() as i32,
                None => 1,
            },
            _ => 0,
        }
    }

    fn matrix_dims(&self) -> Option<&[u32]> {
        match self {
            Variant::Array(a) => a.dimensions.as_deref(),
            _ => None,
        }
    }

    /// Length of a scalar `String`/`ByteString`'s character/byte content,
    /// used by the scalar trailing-bound exception.
    fn scalar_text_len(&self) -> Option<usize> {
        match self {
            Variant::String(s) => Some(s.as_ref().len()),
            Variant::ByteString(b) => Some(b.len()),
            _ => None,
        }
    }

    /// The i-th element of an array/matrix in linearised (row-major)
    /// order, or `None` for anything else.
    pub fn get_array_value(&self, index: usize) -> Option<Variant> {
        match self {
            Variant::Array(a) => a.values.get(index).cloned(),
            _ => None,
        }
    }

    fn total_len(&self) -> usize {
        match self {
            Variant::Array(a) => a.values.len(),
            _ => 1,
        }
    }

    /// Report whether `range` is applicable to this value's current shape.
    /// For a write, missing data at an otherwise-applicable position is
    /// still reported applicable; for a read it is reported as
    /// `BadIndexRangeNoData`.
    pub fn has_range(&self, range: &NumericRange, for_write: bool) -> Result<(), StatusCode> {
        let NumericRange::Range(dims) = range else {
            return Ok(());
        };
        let rank = self.actual_rank();
        let is_scalar_text = rank == 0 && self.scalar_text_len().is_some();

        let expected = if is_scalar_text { 1 } else { rank as usize };
        if dims.len() != expected {
            return Err(StatusCode::BadIndexRangeInvalid);
        }

        if for_write {
            return Ok(());
        }

        if is_scalar_text {
            let len = self.scalar_text_len().unwrap();
            let d = &dims[0];
            return if (d.low as usize) < len {
                Ok(())
            } else {
                Err(StatusCode::BadIndexRangeNoData)
            };
        }

        match self.matrix_dims() {
            Some(mdims) => {
                for (d, size) in dims.iter().zip(mdims.iter()) {
                    if d.low as usize >= *size as usize {
                        return Err(StatusCode::BadIndexRangeNoData);
                    }
                }
                Ok(())
            }
            None => {
                // 1-D array: single bound, checked against element count.
                let len = self.total_len();
                if (dims[0].low as usize) < len {
                    Ok(())
                } else {
                    Err(StatusCode::BadIndexRangeNoData)
                }
            }
        }
    }

    /// Compute row-major linear indices selected by `range` over a 1-D
    /// array or matrix.
    fn selected_indices(&self, dims: &[crate::numeric_range::NumericRangeDimension]) -> Result<Vec<usize>, StatusCode> {
        match self.matrix_dims() {
            Some(mdims) => {
                let mut strides = vec![1usize; mdims.len()];
                for i in (0..mdims.len().saturating_sub(1)).rev() {
                    strides[i] = strides[i + 1] * mdims[i + 1] as usize;
                }
                let mut axis_indices: Vec<Vec<usize>> = Vec::with_capacity(dims.len());
                for (d, size) in dims.iter().zip(mdims.iter()) {
                    let hi = d.high.min(size.saturating_sub(1));
                    if d.low as usize > hi as usize {
                        axis_indices.push(vec![]);
                    } else {
                        axis_indices.push((d.low as usize..=hi as usize).collect());
                    }
                }
                let mut result = vec![0usize];
                for (axis, stride) in axis_indices.iter().zip(strides.iter()) {
                    let mut next = Vec::with_capacity(result.len() * axis.len());
                    for base in &result {
                        for idx in axis {
                            next.push(base + idx * stride);
                        }
                    }
                    result = next;
                }
                Ok(result)
            }
            None => {
                let len = self.total_len();
                let d = &dims[0];
                let hi = (d.high as usize).min(len.saturating_sub(1));
                if d.low as usize > hi {
                    Ok(vec![])
                } else {
                    Ok((d.low as usize..=hi).collect())
                }
            }
        }
    }

    /// Write a sub-slice view of this value selected by `range` into a new
    /// `Variant`. For a scalar `String`/`ByteString`, slices the
    /// characters/bytes instead.
    pub fn get_range(&self, range: &NumericRange) -> Result<Variant, StatusCode> {
        let NumericRange::Range(dims) = range else {
            return Ok(self.clone());
        };
        self.has_range(range, false)?;

        if self.scalar_text_len().is_some() && self.actual_rank() == 0 {
            let d = &dims[0];
            return match self {
                Variant::String(s) => {
                    let text = s.as_ref();
                    let hi = (d.high as usize).min(text.len().saturating_sub(1));
                    Ok(Variant::String(text[d.low as usize..=hi].into()))
                }
                Variant::ByteString(b) => {
                    let bytes = b.as_bytes();
                    let hi = (d.high as usize).min(bytes.len().saturating_sub(1));
                    Ok(Variant::ByteString(bytes[d.low as usize..=hi].to_vec().into()))
                }
                _ => unreachable!(),
            };
        }

        let Variant::Array(arr) = self else {
            return Err(StatusCode::BadIndexRangeInvalid);
        };
        let indices = self.selected_indices(dims)?;
        let values: Vec<_> = indices.iter().map(|&i| arr.values[i].clone()).collect();
        match self.matrix_dims() {
            Some(mdims) if mdims.len() == dims.len() => {
                let out_dims: Vec<u32> = dims
                    .iter()
                    .zip(mdims.iter())
                    .map(|(d, size)| {
                        let hi = d.high.min(size.saturating_sub(1));
                        hi.saturating_sub(d.low) + 1
                    })
                    .collect();
                Ok(Variant::matrix(arr.value_type, values, out_dims))
            }
            _ => Ok(Variant::array(arr.value_type, values)),
        }
    }

    /// Overwrite the sub-slice selected by `range` with `src`. Element
    /// counts must match.
    pub fn set_range(&mut self, src: &Variant, range: &NumericRange) -> Result<(), StatusCode> {
        let NumericRange::Range(dims) = range else {
            *self = src.clone();
            return Ok(());
        };
        self.has_range(range, true)?;

        if self.scalar_text_len().is_some() && self.actual_rank() == 0 {
            let d = &dims[0];
            match (self, src) {
                (Variant::String(cur), Variant::String(incoming)) => {
                    let mut text: Vec<u8> = cur.as_ref().as_bytes().to_vec();
                    let repl = incoming.as_ref().as_bytes();
                    let hi = (d.high as usize).min(text.len().saturating_sub(1));
                    if hi + 1 - d.low as usize != repl.len() {
                        return Err(StatusCode::BadIndexRangeInvalid);
                    }
                    text.splice(d.low as usize..=hi, repl.iter().copied());
                    *cur = String::from_utf8_lossy(&text).into_owned().into();
                    Ok(())
                }
                (Variant::ByteString(cur), Variant::ByteString(incoming)) => {
                    let mut bytes = cur.as_bytes().to_vec();
                    let repl = incoming.as_bytes();
                    let hi = (d.high as usize).min(bytes.len().saturating_sub(1));
                    if hi + 1 - d.low as usize != repl.len() {
                        return Err(StatusCode::BadIndexRangeInvalid);
                    }
                    bytes.splice(d.low as usize..=hi, repl.iter().copied());
                    *cur = bytes.into();
                    Ok(())
                }
                _ => Err(StatusCode::BadTypeMismatch),
            }
        } else {
            let indices = self.selected_indices(dims)?;
            let Variant::Array(src_arr) = src else {
                return Err(StatusCode::BadTypeMismatch);
            };
            if src_arr.values.len() != indices.len() {
                return Err(StatusCode::BadIndexRangeInvalid);
            }
            let Variant::Array(arr) = self else {
                return Err(StatusCode::BadIndexRangeInvalid);
            };
            for (i, v) in indices.into_iter().zip(src_arr.values.iter()) {
                arr.values[i] = v.clone();
            }
            Ok(())
        }
    }

    /// Natural ordering comparison of two scalars, returning `-1`, `0`, or
    /// `1`. Numeric types compare as `f64`; everything else must match
    /// type and falls back to `PartialEq`.
    fn natural_compare(a: &Variant, b: &Variant) -> Result<i8, StatusCode> {
        if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
            return Ok(if x < y {
                -1
            } else if x > y {
                1
            } else {
                0
            });
        }
        if a == b {
            Ok(0)
        } else {
            Err(StatusCode::BadTypeMismatch)
        }
    }

    /// Widen a numeric scalar to `f64` for comparison purposes.
    pub fn as_f64(&self) -> Option<f64> {
        Some(match self {
            Variant::SByte(v) => *v as f64,
            Variant::Byte(v) => *v as f64,
            Variant::Int16(v) => *v as f64,
            Variant::UInt16(v) => *v as f64,
            Variant::Int32(v) => *v as f64,
            Variant::UInt32(v) => *v as f64,
            Variant::Int64(v) => *v as f64,
            Variant::UInt64(v) => *v as f64,
            Variant::Float(v) => *v as f64,
            Variant::Double(v) => *v,
            _ => return None,
        })
    }

    /// Pairwise-compare `a` and `b` over the elements selected by `range`,
    /// using natural ordering. Returns the first non-zero comparison, or
    /// `0` if every selected element compares equal.
    pub fn compare_range(a: &Variant, b: &Variant, range: &NumericRange) -> Result<i8, StatusCode> {
        Self::compare_custom_range(&Self::const_natural_compare, &(), a, b, range)
    }

    fn const_natural_compare(_ctx: &(), _t: VariantScalarTypeId, a: &Variant, b: &Variant) -> Result<i8, StatusCode> {
        Self::natural_compare(a, b)
    }

    /// Pairwise-compare `a` and `b` over the elements selected by `range`
    /// using a custom predicate, used for the data-change deadband
    /// comparator.
    pub fn compare_custom_range<Ctx>(
        predicate: &dyn Fn(&Ctx, VariantScalarTypeId, &Variant, &Variant) -> Result<i8, StatusCode>,
        ctx: &Ctx,
        a: &Variant,
        b: &Variant,
        range: &NumericRange,
    ) -> Result<i8, StatusCode> {
        let (av, bv) = if range.has_range() {
            (a.get_range(range)?, b.get_range(range)?)
        } else {
            (a.clone(), b.clone())
        };

        let built_in = av
            .scalar_type()
            .or_else(|| bv.scalar_type())
            .unwrap_or(VariantScalarTypeId::Boolean);

        match (&av, &bv) {
            (Variant::Array(x), Variant::Array(y)) => {
                if x.values.len() != y.values.len() {
                    return Err(StatusCode::BadIndexRangeInvalid);
                }
                for (xi, yi) in x.values.iter().zip(y.values.iter()) {
                    let r = predicate(ctx, built_in, xi, yi)?;
                    if r != 0 {
                        return Ok(r);
                    }
                }
                Ok(0)
            }
            _ => predicate(ctx, built_in, &av, &bv),
        }
    }

    /// Convert a scalar `ByteString` into a `Byte` array, used when a
    /// single-dimension `Byte` variable is written with a `ByteString`.
    pub fn to_byte_array(&self) -> Result<Variant, StatusCode> {
        match self {
            Variant::ByteString(b) => Ok(Variant::array(
                VariantScalarTypeId::Byte,
                b.as_bytes().iter().map(|v| Variant::Byte(*v)).collect(),
            )),
            _ => Err(StatusCode::BadTypeMismatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric_range::NumericRange;

    #[test]
    fn copy_equals_original() {
        let v = Variant::array(
            VariantScalarTypeId::Int32,
            vec![Variant::Int32(1), Variant::Int32(2), Variant::Int32(3)],
        );
        let copy = v.clone();
        assert_eq!(v, copy);
    }

    #[test]
    fn get_range_on_1d_array() {
        let v = Variant::array(
            VariantScalarTypeId::Int32,
            (0..10).map(Variant::Int32).collect(),
        );
        let range = NumericRange::parse("2:4").unwrap();
        let sub = v.get_range(&range).unwrap();
        assert_eq!(
            sub,
            Variant::array(
                VariantScalarTypeId::Int32,
                vec![Variant::Int32(2), Variant::Int32(3), Variant::Int32(4)]
            )
        );
    }

    #[test]
    fn set_range_overwrites_subslice() {
        let mut v = Variant::array(
            VariantScalarTypeId::Int32,
            (0..5).map(Variant::Int32).collect(),
        );
        let src = Variant::array(VariantScalarTypeId::Int32, vec![Variant::Int32(99)]);
        let range = NumericRange::parse("2").unwrap();
        v.set_range(&src, &range).unwrap();
        assert_eq!(v.get_array_value(2), Some(Variant::Int32(99)));
    }

    #[test]
    fn matrix_is_row_major() {
        // 2x3 matrix: [[0,1,2],[3,4,5]]
        let v = Variant::matrix(
            VariantScalarTypeId::Int32,
            (0..6).map(Variant::Int32).collect(),
            vec![2, 3],
        );
        let range = NumericRange::parse("1,1").unwrap();
        let sub = v.get_range(&range).unwrap();
        assert_eq!(sub.get_array_value(0), Some(Variant::Int32(4)));
    }

    #[test]
    fn has_range_reports_no_data_on_read_out_of_bounds() {
        let v = Variant::array(VariantScalarTypeId::Int32, vec![Variant::Int32(1)]);
        let range = NumericRange::parse("5").unwrap();
        assert_eq!(
            v.has_range(&range, false).unwrap_err(),
            StatusCode::BadIndexRangeNoData
        );
        // For write, the same range is still "applicable".
        assert!(v.has_range(&range, true).is_ok());
    }

    #[test]
    fn wrong_dimensionality_is_invalid() {
        let v = Variant::Int32(5);
        let range = NumericRange::parse("0").unwrap();
        assert_eq!(
            v.has_range(&range, false).unwrap_err(),
            StatusCode::BadIndexRangeInvalid
        );
    }

    #[test]
    fn string_scalar_char_range() {
        let v = Variant::String("hello".into());
        let range = NumericRange::parse("1:3").unwrap();
        let sub = v.get_range(&range).unwrap();
        assert_eq!(sub, Variant::String("ell".into()));
    }
}
