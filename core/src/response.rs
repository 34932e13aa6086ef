//! Lifting dispatcher output into domain types.
//!
//! # Design
//! Every domain type implements `Decode` over an already integer-safe-parsed
//! `serde_json::Value`. `decode` and `decode_many` take the dispatcher's
//! result as-is: an error passes straight through, an empty answer stays
//! empty, and a decode failure replaces the value instead of escaping as a
//! panic.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// The decode contract of a domain type.
pub trait Decode: Sized {
    fn decode(data: &Value) -> Result<Self>;

    /// `None` for JSON null, otherwise `decode`.
    fn optionally_decode(data: &Value) -> Result<Option<Self>> {
        if data.is_null() {
            return Ok(None);
        }
        Self::decode(data).map(Some)
    }

    fn decode_many(data: &Value) -> Result<Vec<Self>> {
        match data {
            Value::Array(items) => items.iter().map(Self::decode).collect(),
            other => Err(Error::Decode(format!("expected an array, found {other}"))),
        }
    }
}

/// Decode the dispatcher's outcome into a single `T`.
pub fn decode<T: Decode>(outcome: Result<Option<Value>>) -> Result<Option<T>> {
    match outcome? {
        None => Ok(None),
        Some(data) => T::optionally_decode(&data),
    }
}

/// Decode the dispatcher's outcome element-wise; the first failing element
/// fails the whole list.
pub fn decode_many<T: Decode>(outcome: Result<Option<Value>>) -> Result<Option<Vec<T>>> {
    match outcome? {
        None | Some(Value::Null) => Ok(None),
        Some(data) => T::decode_many(&data).map(Some),
    }
}

/// Deserialize `data` into `T` through serde, reporting failures as
/// `Error::Decode`.
pub(crate) fn from_value<T: DeserializeOwned>(data: &Value) -> Result<T> {
    Ok(T::deserialize(data)?)
}

/// Accept a string or a bare number and keep it as text.
///
/// Identifiers arrive as strings when wide enough for the integer-safe codec
/// to quote them, and as numbers otherwise.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}
