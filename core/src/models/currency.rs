//! Currencies the API denominates amounts in.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::enumeration::{self, Enumeration};
use crate::error::{Error, Result};
use crate::response::Decode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Aud,
    Nzd,
}

impl Currency {
    /// Upper-case ISO 4217 code.
    pub fn iso_4217(&self) -> &'static str {
        match self {
            Currency::Aud => "AUD",
            Currency::Nzd => "NZD",
        }
    }

    /// Number of minor-unit digits.
    pub fn exponent(&self) -> usize {
        2
    }

    pub fn symbol(&self) -> &'static str {
        "$"
    }

    pub fn all_available() -> &'static [Currency] {
        Self::ENUMERATIONS
    }
}

impl Enumeration for Currency {
    const ENUMERATIONS: &'static [Self] = &[Currency::Aud, Currency::Nzd];
    const TYPE_NAME: &'static str = "Currency";

    fn indexid(&self) -> i64 {
        match self {
            Currency::Aud => 1,
            Currency::Nzd => 2,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Currency::Aud => "Australian Dollar",
            Currency::Nzd => "New Zealand Dollar",
        }
    }
}

impl Decode for Currency {
    /// Accepts the full wire object or a bare indexid. The variant is chosen by
    /// indexid alone; the object's other fields are not compared.
    fn decode(data: &Value) -> Result<Self> {
        match data {
            Value::Object(object) => match object.get("indexid") {
                Some(indexid) => enumeration::decode(indexid),
                None => Err(Error::Decode(format!("currency without indexid: {data}"))),
            },
            other => enumeration::decode(other),
        }
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Currency::decode(&value).map_err(D::Error::custom)
    }
}
