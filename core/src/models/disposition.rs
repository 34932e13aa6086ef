use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::response::{from_value, Decode};

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Disposition {
    /// Total number of matching items, not just this page.
    pub count: i64,
    pub limit: i64,
    pub offset: i64,
    pub sequence: i64,
}

impl Decode for Disposition {
    fn decode(data: &Value) -> Result<Self> {
        from_value(data)
    }
}
