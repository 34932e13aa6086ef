//! Closed sets of API type codes.
//!
//! # Design
//! Each type code (currency, sort order, order-by field) is a plain Rust enum
//! whose variants are listed once in `ENUMERATIONS`. Lookup scans that list;
//! adding a variant means extending the enum and the list, never registering
//! one at runtime.
//!
//! Equality between variants is identity by key: two values are equal when
//! their `indexid` (or `key`, for keyed sets) matches.

use serde_json::Value;

use crate::error::{Error, Result};

/// A closed set identified by integer `indexid`.
pub trait Enumeration: Copy + 'static {
    /// Every variant, in declaration order.
    const ENUMERATIONS: &'static [Self];

    /// Name used in lookup errors.
    const TYPE_NAME: &'static str;

    fn indexid(&self) -> i64;

    fn name(&self) -> &'static str;

    fn equal_to(&self, other: Option<&Self>) -> bool {
        other.is_some_and(|other| other.indexid() == self.indexid())
    }

    fn not_equal_to(&self, other: Option<&Self>) -> bool {
        !self.equal_to(other)
    }

    /// False for an absent collection rather than an error.
    fn is_in(&self, others: Option<&[Self]>) -> bool {
        others.is_some_and(|others| others.iter().any(|other| self.equal_to(Some(other))))
    }

    fn is_not_in(&self, others: Option<&[Self]>) -> bool {
        !self.is_in(others)
    }

    fn with_id(indexid: i64) -> Result<Self> {
        with_id(indexid)
    }
}

/// Find the variant of `T` whose indexid is `indexid`.
pub fn with_id<T: Enumeration>(indexid: i64) -> Result<T> {
    T::ENUMERATIONS
        .iter()
        .copied()
        .find(|candidate| candidate.indexid() == indexid)
        .ok_or_else(|| Error::UnknownEnumeration {
            id: indexid.to_string(),
            type_name: T::TYPE_NAME,
        })
}

/// Decode a wire indexid, given as a JSON integer or a numeric string.
pub fn decode<T: Enumeration>(data: &Value) -> Result<T> {
    let indexid = match data {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::Decode(format!("{data} is not an indexid for {}", T::TYPE_NAME)))?;

    with_id(indexid)
}

/// Like `decode`, but yields `None` for absent values.
///
/// Absent covers null, `false`, `0`, the empty string, and the literal string
/// `"null"` that some API responses send in place of a missing field.
pub fn optionally_decode<T: Enumeration>(data: &Value) -> Result<Option<T>> {
    let absent = match data {
        Value::Null | Value::Bool(false) => true,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty() || text == "null",
        _ => false,
    };
    if absent {
        return Ok(None);
    }
    decode(data).map(Some)
}

/// A closed set identified by a string key, used for sort parameters.
pub trait KeyedEnumeration: Copy + 'static {
    const ENUMERATIONS: &'static [Self];

    const TYPE_NAME: &'static str;

    fn key(&self) -> &'static str;

    fn with_key(key: &str) -> Result<Self> {
        Self::ENUMERATIONS
            .iter()
            .copied()
            .find(|candidate| candidate.key() == key)
            .ok_or_else(|| Error::UnknownEnumeration {
                id: key.to_string(),
                type_name: Self::TYPE_NAME,
            })
    }
}
