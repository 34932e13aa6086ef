//! The dispatcher: one `ApiRequest` in, one decoded body or error out.
//!
//! # Design
//! `Client` is the explicit context every domain operation receives. It holds
//! the endpoint and the transport; there is no module-level state beyond the
//! lazily built default transport it captures at construction. Tests swap the
//! transport on their own client, leaving every other client untouched.
//!
//! Each call suspends exactly once, on the transport. Validation failures are
//! returned before the transport is invoked. There are no retries and no
//! cancellation; dropping the future abandons the result.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::transport::{default_transport, Transport};

#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, default_transport())
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Configuration from the environment with the default transport.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Replace the transport for subsequent calls. Calls already in flight
    /// keep the transport they started with.
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    pub fn restore_default_transport(&mut self) {
        self.transport = default_transport();
    }

    /// Dispatch `request` and return its decoded body.
    ///
    /// `Ok(None)` is a successful empty answer (see `ApiRequest::interpret`).
    pub async fn make(&self, request: &ApiRequest) -> Result<Option<Value>> {
        let http_request = request.build(&self.config.endpoint)?;
        debug!(
            method = %http_request.method,
            url = %http_request.url,
            authenticated = http_request.header(crate::request::KEY_HEADER).is_some(),
            "sending API request"
        );

        let transport = Arc::clone(&self.transport);
        let response = transport.execute(http_request).await?;
        debug!(status = response.status, path = request.path(), "received API response");

        request.interpret(response)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.config.endpoint)
            .finish_non_exhaustive()
    }
}
