use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::response::{from_value, string_or_number, Decode};

/// Brief identification of a business entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntityHeadline {
    /// String-encoded integer; wide ids arrive quoted by the codec.
    #[serde(deserialize_with = "string_or_number")]
    pub entity_id: String,
    pub legal_entity_name: String,
}

impl Decode for EntityHeadline {
    fn decode(data: &Value) -> Result<Self> {
        from_value(data)
    }
}
