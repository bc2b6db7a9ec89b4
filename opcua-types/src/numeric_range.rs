// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0
// Copyright (C) 2017-2024 Adam Lock

//! `NumericRange`, the per-dimension index range used by `Read`/`Write` with
//! a sub-value selector.

use std::fmt;

use crate::StatusCode;

/// A single `[low, high]` bound for one dimension. `low == high` selects a
/// single index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRangeDimension {
    /// Inclusive lower bound.
    pub low: u32,
    /// Inclusive upper bound.
    pub high: u32,
}

/// A parsed index range: either absent, or a non-empty ordered list of
/// per-dimension bounds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NumericRange {
    /// No range was specified.
    #[default]
    None,
    /// One bound per dimension.
    Range(Vec<NumericRangeDimension>),
}

impl NumericRange {
    /// `true` iff a range was specified.
    pub fn has_range(&self) -> bool {
        !matches!(self, NumericRange::None)
    }

    /// Number of dimensions named by the range, `0` if none.
    pub fn dimensions(&self) -> usize {
        match self {
            NumericRange::None => 0,
            NumericRange::Range(v) => v.len(),
        }
    }

    /// Parse the grammar `bound(,bound)*` where `bound := u32 | u32:u32`
    /// (second value must be `>=` first). Returns `BadIndexRangeInvalid` on
    /// any syntactic or ordering violation.
    pub fn parse(s: &str) -> Result<NumericRange, StatusCode> {
        if s.is_empty() {
            return Ok(NumericRange::None);
        }
        let mut dims = Vec::new();
        for part in s.split(',') {
            if part.is_empty() {
                return Err(StatusCode::BadIndexRangeInvalid);
            }
            let dim = if let Some((lo, hi)) = part.split_once(':') {
                let low: u32 = lo.parse().map_err(|_| StatusCode::BadIndexRangeInvalid)?;
                let high: u32 = hi.parse().map_err(|_| StatusCode::BadIndexRangeInvalid)?;
                if high < low {
                    return Err(StatusCode::BadIndexRangeInvalid);
                }
                NumericRangeDimension { low, high }
            } else {
                let v: u32 = part.parse().map_err(|_| StatusCode::BadIndexRangeInvalid)?;
                NumericRangeDimension { low: v, high: v }
            };
            dims.push(dim);
        }
        if dims.is_empty() {
            return Err(StatusCode::BadIndexRangeInvalid);
        }
        Ok(NumericRange::Range(dims))
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericRange::None => Ok(()),
            NumericRange::Range(dims) => {
                for (i, d) in dims.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    if d.low == d.high {
                        write!(f, "{}", d.low)?;
                    } else {
                        write!(f, "{}:{}", d.low, d.high)?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_index() {
        let r = NumericRange::parse("5").unwrap();
        assert_eq!(r.to_string(), "5");
    }

    #[test]
    fn parses_multi_dimension() {
        let r = NumericRange::parse("1:2,0:4").unwrap();
        assert_eq!(r.to_string(), "1:2,0:4");
    }

    #[test]
    fn rejects_inverted_bound() {
        assert_eq!(
            NumericRange::parse("5:2").unwrap_err(),
            StatusCode::BadIndexRangeInvalid
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(NumericRange::parse("a:b").is_err());
        assert!(NumericRange::parse(",").is_err());
        assert!(NumericRange::parse("1,").is_err());
    }

    #[test]
    fn round_trips_canonical_form() {
        for s in ["0", "1:4", "0,1:2", "1:2,3:9,0"] {
            let r = NumericRange::parse(s).unwrap();
            assert_eq!(r.to_string(), s);
        }
    }
}
