//! Client configuration and caller-supplied credentials.

use std::env;
use std::fmt;

/// Endpoint used when neither the client nor the request names one.
pub const LIVE_ENDPOINT: &str = "https://procuret.com/api";

pub const ENDPOINT_VAR: &str = "PROCURET_API_ENDPOINT";
pub const API_KEY_VAR: &str = "PROCURET_API_KEY";
pub const SESSION_ID_VAR: &str = "PROCURET_SESSION_ID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl ClientConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `PROCURET_API_ENDPOINT`, falling back to the live endpoint.
    pub fn from_env() -> Self {
        match env::var(ENDPOINT_VAR) {
            Ok(endpoint) if !endpoint.trim().is_empty() => Self::new(endpoint.trim()),
            _ => Self::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(LIVE_ENDPOINT)
    }
}

/// API key and session identifier for authenticated calls.
///
/// The client never stores or refreshes a session; callers pass one per
/// request.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    api_key: String,
    session_id: String,
}

impl Session {
    pub fn new(api_key: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            session_id: session_id.into(),
        }
    }

    /// Reads `PROCURET_API_KEY` and `PROCURET_SESSION_ID`; `None` unless both
    /// are set.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var(API_KEY_VAR).ok()?;
        let session_id = env::var(SESSION_ID_VAR).ok()?;
        Some(Self::new(api_key, session_id))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Both halves present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.session_id.is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_key", &"<redacted>")
            .field("session_id", &self.session_id)
            .finish()
    }
}
