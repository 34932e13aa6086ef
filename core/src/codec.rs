//! JSON parsing that keeps wide integer identifiers exact.
//!
//! # Design
//! The API sends 64-bit identifiers as bare JSON numbers. Before parsing, every
//! bare run of 13 to 128 ASCII digits bounded by word boundaries is wrapped in
//! quotes, so it decodes as a string holding the exact digits. A run is left
//! alone when the character right after it is one of `.` `/` `%` `"` `:` `-`,
//! which keeps decimals, already-quoted strings, object keys and date-like
//! tokens intact.
//!
//! This is a text heuristic, not a grammar. A qualifying run inside a longer
//! string value (for example `"ref 12345678901234 x"`) is quoted too and
//! produces invalid JSON, which surfaces as `Error::Decode`.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::Result;

/// Characters that, directly after a digit run, exempt it from quoting.
const EXCLUDED_FOLLOWERS: [char; 6] = ['.', '/', '%', '"', ':', '-'];

fn digit_run() -> &'static Regex {
    static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
    DIGIT_RUN.get_or_init(|| {
        Regex::new(r"(?-u:\b)[0-9]{13,128}(?-u:\b)").expect("digit run pattern is valid")
    })
}

/// Quote every qualifying digit run in `text`.
///
/// Returns the input unchanged (borrowed) when nothing qualifies.
pub fn escape_integers(text: &str) -> Cow<'_, str> {
    let mut escaped = String::new();
    let mut last = 0;

    for found in digit_run().find_iter(text) {
        let follower = text[found.end()..].chars().next();
        if follower.is_some_and(|c| EXCLUDED_FOLLOWERS.contains(&c)) {
            continue;
        }
        escaped.push_str(&text[last..found.start()]);
        escaped.push('"');
        escaped.push_str(found.as_str());
        escaped.push('"');
        last = found.end();
    }

    if last == 0 {
        return Cow::Borrowed(text);
    }
    escaped.push_str(&text[last..]);
    Cow::Owned(escaped)
}

/// Parse `text` with wide integers decoded as strings.
pub fn integer_safe_parse(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(&escape_integers(text))?)
}

/// Parse `text`, escaping wide integers unless `escape` is false.
pub fn parse(text: &str, escape: bool) -> Result<Value> {
    if escape {
        integer_safe_parse(text)
    } else {
        Ok(serde_json::from_str(text)?)
    }
}
