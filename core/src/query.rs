//! URL query strings.

use std::fmt;

/// A single query value before it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(text) => f.write_str(text),
            QueryValue::Integer(number) => write!(f, "{number}"),
            QueryValue::Float(number) => write!(f, "{number}"),
            QueryValue::Boolean(true) => f.write_str("true"),
            QueryValue::Boolean(false) => f.write_str("false"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Text(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Integer(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Boolean(value)
    }
}

/// One `key=value` pair. The value is percent-encoded when rendered; the key
/// is emitted as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerm {
    key: String,
    value: String,
}

impl QueryTerm {
    pub fn new(key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into().to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value as rendered, before encoding.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// `key=percent-encoded-value`.
    pub fn string(&self) -> String {
        format!("{}={}", self.key, urlencoding::encode(&self.value))
    }

    /// Append a term for `value` unless it is absent.
    pub fn compact_push<V: Into<QueryValue>>(
        key: &str,
        value: Option<V>,
        terms: &mut Vec<QueryTerm>,
    ) {
        if let Some(value) = value {
            terms.push(QueryTerm::new(key, value));
        }
    }
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string())
    }
}

/// An ordered list of terms rendered as `?a=1&b=2`.
///
/// Order is the caller's; terms are never sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    parameters: Vec<QueryTerm>,
}

impl QueryString {
    pub fn new(parameters: Vec<QueryTerm>) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &[QueryTerm] {
        &self.parameters
    }

    /// The rendered query, always starting with `?`; just `?` when empty.
    pub fn query(&self) -> String {
        let joined = self
            .parameters
            .iter()
            .map(QueryTerm::string)
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }
}

impl FromIterator<QueryTerm> for QueryString {
    fn from_iter<I: IntoIterator<Item = QueryTerm>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_render_as_literals() {
        assert_eq!(QueryTerm::new("opened", true).string(), "opened=true");
        assert_eq!(QueryTerm::new("opened", false).string(), "opened=false");
    }

    #[test]
    fn numbers_render_with_default_formatting() {
        assert_eq!(QueryTerm::new("limit", 20).string(), "limit=20");
        assert_eq!(QueryTerm::new("principal", 1500.5).string(), "principal=1500.5");
        assert_eq!(QueryTerm::new("principal", 1500.0).string(), "principal=1500");
    }

    #[test]
    fn values_are_percent_encoded() {
        let term = QueryTerm::new("invitee_email", "a b&c@example.com");
        assert_eq!(term.string(), "invitee_email=a%20b%26c%40example.com");
        assert_eq!(term.value(), "a b&c@example.com");
    }

    #[test]
    fn empty_query_is_question_mark() {
        assert_eq!(QueryString::default().query(), "?");
        assert_eq!(QueryString::new(Vec::new()).to_string(), "?");
    }

    #[test]
    fn query_joins_terms_in_order() {
        let terms = vec![
            QueryTerm::new("limit", 20),
            QueryTerm::new("offset", 0),
            QueryTerm::new("order", "descending"),
            QueryTerm::new("limit", 5),
        ];
        let expected = format!(
            "?{}",
            terms.iter().map(QueryTerm::string).collect::<Vec<_>>().join("&")
        );
        let query = QueryString::new(terms);
        assert_eq!(query.query(), expected);
        assert_eq!(query.query(), "?limit=20&offset=0&order=descending&limit=5");
    }

    #[test]
    fn compact_push_skips_absent_values() {
        let mut terms = vec![QueryTerm::new("limit", 1)];
        QueryTerm::compact_push("opened", None::<bool>, &mut terms);
        QueryTerm::compact_push("supplier_id", Some("42"), &mut terms);
        let query: QueryString = terms.into_iter().collect();
        assert_eq!(query.query(), "?limit=1&supplier_id=42");
    }
}
