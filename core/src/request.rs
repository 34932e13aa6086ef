//! A single API call: what to send and how to read what comes back.
//!
//! # Design
//! `ApiRequest` is split the same way as the rest of the client: `build`
//! turns it into an `HttpRequest` (path and method validation, endpoint,
//! authentication headers, JSON body, query string) and `interpret` turns the
//! transport's `HttpResponse` into a value or an error. Neither touches the
//! network, so both are deterministic and tested in isolation; `Client::make`
//! joins them around one transport call.
//!
//! A 404 on a GET is a successful empty answer unless `throw_on_get_404` is
//! set. Every other method treats 404 as an error.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::codec;
use crate::config::Session;
use crate::error::{ApiError, Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::QueryString;

pub const KEY_HEADER: &str = "x-procuret-api-key";
pub const SESSION_ID_HEADER: &str = "x-procuret-session-id";
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// What was asked of the API, kept on `ApiError` for diagnostics only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSummary {
    pub request_data: Option<String>,
    pub request_parameters: Option<String>,
    pub request_path: String,
    pub request_method: HttpMethod,
    pub suppress_error: bool,
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    path: String,
    method: HttpMethod,
    parameters: Option<QueryString>,
    body: Option<Value>,
    session: Option<Session>,
    endpoint: Option<String>,
    without_auth: bool,
    optional_auth: bool,
    suppress_error: bool,
    do_not_escape_int: bool,
    throw_on_get_404: bool,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            parameters: None,
            body: None,
            session: None,
            endpoint: None,
            without_auth: false,
            optional_auth: false,
            suppress_error: false,
            do_not_escape_int: false,
            throw_on_get_404: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Get)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Post)
    }

    pub fn parameters(mut self, parameters: QueryString) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `payload` as the JSON body.
    pub fn json<T: Serialize>(self, payload: &T) -> Result<Self> {
        let body =
            serde_json::to_value(payload).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(self.body(body))
    }

    pub fn session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    /// Send to `endpoint` instead of the client's configured one.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Send no authentication headers at all.
    pub fn without_auth(mut self, without_auth: bool) -> Self {
        self.without_auth = without_auth;
        self
    }

    /// Send authentication headers when a complete session is available,
    /// and proceed without them otherwise.
    pub fn optional_auth(mut self, optional_auth: bool) -> Self {
        self.optional_auth = optional_auth;
        self
    }

    /// Log a failure of this request at debug rather than warn level.
    pub fn suppress_error(mut self, suppress_error: bool) -> Self {
        self.suppress_error = suppress_error;
        self
    }

    /// Parse a successful body natively, without quoting wide integers.
    pub fn do_not_escape_int(mut self, do_not_escape_int: bool) -> Self {
        self.do_not_escape_int = do_not_escape_int;
        self
    }

    pub fn throw_on_get_404(mut self, throw_on_get_404: bool) -> Self {
        self.throw_on_get_404 = throw_on_get_404;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn suppresses_error(&self) -> bool {
        self.suppress_error
    }

    pub fn throws_on_404(&self) -> bool {
        self.method != HttpMethod::Get || self.throw_on_get_404
    }

    pub fn summary(&self) -> RequestSummary {
        RequestSummary {
            request_data: self
                .body
                .as_ref()
                .filter(|body| !body.is_null())
                .map(Value::to_string),
            request_parameters: self.parameters.as_ref().map(QueryString::query),
            request_path: self.path.clone(),
            request_method: self.method,
            suppress_error: self.suppress_error,
        }
    }

    /// `endpoint + path + query`, the endpoint being this request's override
    /// or `default_endpoint`.
    pub fn url(&self, default_endpoint: &str) -> String {
        let endpoint = self.endpoint.as_deref().unwrap_or(default_endpoint);
        match &self.parameters {
            Some(parameters) => format!("{endpoint}{}{}", self.path, parameters.query()),
            None => format!("{endpoint}{}", self.path),
        }
    }

    /// Validate and assemble the HTTP request.
    pub fn build(&self, default_endpoint: &str) -> Result<HttpRequest> {
        if self.path.is_empty() {
            return Err(Error::InvalidArgument(
                "cannot make request to empty path".to_string(),
            ));
        }

        let mut headers = Vec::new();

        if !self.without_auth {
            match self.session.as_ref().filter(|session| session.is_complete()) {
                Some(session) => {
                    headers.push((
                        SESSION_ID_HEADER.to_string(),
                        session.session_id().to_string(),
                    ));
                    headers.push((KEY_HEADER.to_string(), session.api_key().to_string()));
                }
                None if self.optional_auth => {}
                None => {
                    return Err(Error::InvalidArgument(
                        "no API key and session ID available; supply a Session to the request"
                            .to_string(),
                    ))
                }
            }
        }

        let body = match &self.body {
            Some(body) if !body.is_null() => {
                headers.push(("content-type".to_string(), JSON_CONTENT_TYPE.to_string()));
                Some(
                    serde_json::to_string(body)
                        .map_err(|e| Error::Serialization(e.to_string()))?,
                )
            }
            _ => None,
        };

        Ok(HttpRequest {
            method: self.method,
            url: self.url(default_endpoint),
            headers,
            body,
        })
    }

    /// Turn the transport's response into the decoded body.
    ///
    /// `Ok(None)` means "no value": a 404 under the non-throwing GET policy,
    /// or a 200 whose body is JSON `null`.
    pub fn interpret(&self, response: HttpResponse) -> Result<Option<Value>> {
        match response.status {
            200 => {
                let value = codec::parse(&response.body, !self.do_not_escape_int)?;
                Ok(Some(value).filter(|value| !value.is_null()))
            }
            404 if !self.throws_on_404() => Ok(None),
            status => {
                let content = codec::integer_safe_parse(&response.body).ok();
                let error = ApiError::new(status, content.as_ref(), Some(self.summary()));
                if self.suppress_error {
                    debug!(
                        status,
                        path = %self.path,
                        technical = error.technical_description(),
                        "suppressed API error"
                    );
                } else {
                    warn!(
                        status,
                        method = %self.method,
                        path = %self.path,
                        technical = error.technical_description(),
                        "API request failed"
                    );
                }
                Err(Error::Api(error))
            }
        }
    }
}
