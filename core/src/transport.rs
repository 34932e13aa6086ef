//! The single seam through which the client reaches the network.
//!
//! # Design
//! `Transport` performs exactly one HTTP round trip per call: no retries, no
//! timeouts beyond the agent's own, no redirect handling beyond what the
//! underlying agent does. Every HTTP status comes back as `Ok`; only a failure
//! to obtain a response is an `Err`. Interpreting the status is the
//! dispatcher's job.
//!
//! `UreqTransport` wraps a blocking `ureq` agent. Inside a tokio runtime the
//! call is moved onto the blocking pool; outside one it runs on the caller's
//! thread. `default_transport` hands out one lazily built instance shared by
//! every `Client` that was not given its own.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tokio::runtime::Handle;

use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs a single HTTP round trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `Transport` backed by a blocking `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a preconfigured agent. It must not treat 4xx/5xx as errors, or
    /// those responses will surface as transport failures.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        match Handle::try_current() {
            Ok(handle) => {
                let agent = self.agent.clone();
                handle
                    .spawn_blocking(move || perform(&agent, request))
                    .await
                    .map_err(|e| Error::Transport(e.to_string()))?
            }
            Err(_) => perform(&self.agent, request),
        }
    }
}

/// Execute `request` on the current thread.
fn perform(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;

    let result = match (method, body) {
        (HttpMethod::Get, _) => with_headers(agent.get(&url), &headers).call(),
        (HttpMethod::Delete, Some(body)) => with_headers(agent.delete(&url), &headers)
            .force_send_body()
            .send(body.as_bytes()),
        (HttpMethod::Delete, None) => with_headers(agent.delete(&url), &headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(&url), &headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(&url), &headers).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(&url), &headers).send(body.as_bytes())
        }
        (HttpMethod::Put, None) => with_headers(agent.put(&url), &headers).send_empty(),
        (HttpMethod::Update, body) => {
            let mut builder = ureq::http::Request::builder()
                .method(method.as_str())
                .uri(url.as_str());
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let request = builder
                .body(body.unwrap_or_default())
                .map_err(|e| Error::Transport(e.to_string()))?;
            agent.run(request)
        }
    };

    let mut response = result.map_err(|e| Error::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| Error::Transport(e.to_string()))?;

    Ok(HttpResponse { status, body })
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

static DEFAULT_TRANSPORT: OnceLock<Arc<dyn Transport>> = OnceLock::new();

/// The process-wide transport, built on first use.
pub fn default_transport() -> Arc<dyn Transport> {
    DEFAULT_TRANSPORT
        .get_or_init(|| Arc::new(UreqTransport::new()))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transport_is_shared() {
        let first = default_transport();
        let second = default_transport();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn unreachable_host_is_a_transport_failure() {
        let transport = UreqTransport::new();
        let request = HttpRequest {
            method: HttpMethod::Get,
            // Port 9 (discard) is not expected to accept HTTP connections.
            url: "http://127.0.0.1:9/credit/prospective-payment".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = perform(&transport.agent, request).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
