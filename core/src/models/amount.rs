//! A decimal magnitude paired with its currency.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::enumeration::Enumeration;
use crate::error::Result;
use crate::models::Currency;
use crate::response::{from_value, string_or_number, Decode};

/// The magnitude is kept as the decimal string the API sent; numeric views are
/// computed on demand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Amount {
    #[serde(deserialize_with = "string_or_number")]
    pub magnitude: String,
    pub denomination: Currency,
}

impl Amount {
    pub fn new(magnitude: impl Into<String>, denomination: Currency) -> Self {
        Self {
            magnitude: magnitude.into(),
            denomination,
        }
    }

    /// NaN when the magnitude is not a plain decimal number.
    pub fn as_number(&self) -> f64 {
        self.magnitude.trim().parse().unwrap_or(f64::NAN)
    }

    /// Magnitude with exactly the currency's exponent in fraction digits.
    pub fn formatted(&self) -> String {
        format!("{:.*}", self.denomination.exponent(), self.as_number())
    }

    /// e.g. `$1000.00`
    pub fn as_symbolised_string(&self) -> String {
        format!("{}{}", self.denomination.symbol(), self.formatted())
    }

    /// e.g. `AUD 1000.00`
    pub fn as_denominated_string(&self) -> String {
        format!("{} {}", self.denomination.iso_4217(), self.formatted())
    }

    pub fn is_greater_than_zero(&self) -> bool {
        self.as_number() > 0.0
    }

    pub fn magnitude_is_greater_than(&self, value: f64) -> bool {
        self.as_number() > value
    }

    pub fn rounded(&self, decimal_places: usize) -> Amount {
        Amount::new(
            format!("{:.*}", decimal_places, self.as_number()),
            self.denomination,
        )
    }

    /// Wire form: the magnitude string and the currency's indexid.
    pub fn encode(&self) -> Value {
        json!({
            "magnitude": self.magnitude,
            "denomination": self.denomination.indexid(),
        })
    }
}

impl Decode for Amount {
    fn decode(data: &Value) -> Result<Self> {
        from_value(data)
    }
}
