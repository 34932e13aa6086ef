//! Error types for the Procuret API client.
//!
//! # Design
//! Every failure, whether detected before the request leaves the process or
//! after a response arrives, is returned as an `Error` from the same call that
//! would otherwise have produced the value. Nothing panics across the
//! dispatcher boundary.
//!
//! `ApiError` is a separate type because callers present its customer-facing
//! text directly, while the technical description is intended for logs and
//! support channels.

use serde_json::Value;
use thiserror::Error;

use crate::request::RequestSummary;

/// Field of an error response body carrying the server's technical detail.
pub const ERROR_INFO_KEY: &str = "error-information";

/// Customer-facing text used for any status without a dedicated entry.
pub const FALLBACK_INFORMATION: &str = "Procuret has encountered an error. There may be a \
bug in our systems, or they may be experiencing a temporary disruption. We will attempt to \
resolve the problem as quickly as possible";

/// Errors returned by the client, the codec and the decode contracts.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed call-site input: empty path, unknown method, missing
    /// credentials or a request the client refuses to build.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Lookup of an enumeration variant by id or key found nothing.
    #[error("unknown id {id} for enumeration {type_name}")]
    UnknownEnumeration { id: String, type_name: &'static str },

    /// The network round trip itself failed; no HTTP response was obtained.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a status the dispatcher treats as failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A body was not valid JSON, or valid JSON did not fit a domain type.
    #[error("decode failed: {0}")]
    Decode(String),

    /// A request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl Error {
    /// True for the call-site input failures, enumeration lookup misses included.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_) | Error::UnknownEnumeration { .. }
        )
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Decode(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A well-formed HTTP response whose status indicates failure.
///
/// Built once per failed round trip and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("API error ({code}), {technical_description}")]
pub struct ApiError {
    code: u16,
    customer_description: &'static str,
    technical_description: String,
    request_summary: Option<RequestSummary>,
}

impl ApiError {
    /// Build an error for `code`, pulling technical detail from the
    /// `error-information` field of `data` when the server supplied one.
    ///
    /// A `code` of 0 marks a failure detected on the client side.
    pub fn new(code: u16, data: Option<&Value>, request_summary: Option<RequestSummary>) -> Self {
        let technical_description = data
            .and_then(|data| data.get(ERROR_INFO_KEY))
            .and_then(technical_information)
            .unwrap_or_else(|| match code {
                0 => "Client side error".to_string(),
                code => format!("Generic {code}"),
            });

        Self {
            code,
            customer_description: customer_information(code).unwrap_or(FALLBACK_INFORMATION),
            technical_description,
            request_summary,
        }
    }

    pub fn generic_description() -> &'static str {
        FALLBACK_INFORMATION
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn customer_description(&self) -> &'static str {
        self.customer_description
    }

    pub fn technical_description(&self) -> &str {
        &self.technical_description
    }

    pub fn request_summary(&self) -> Option<&RequestSummary> {
        self.request_summary.as_ref()
    }
}

/// Only a present, non-empty value counts as technical detail.
fn technical_information(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn customer_information(code: u16) -> Option<&'static str> {
    let text = match code {
        400 => "Procuret's servers could not understand the information sent by your device. \
This likely indicates a bug in our application. Our support team has been notified \
automatically, but please feel free to contact us at support@procuret.com",
        401 => "Procuret's servers could not identify you when processing data sent by your \
device. This likely indicates a bug has crept into our application. Please contact us at \
support@procuret.com.",
        403 => "You don't appear to be authorised to perform the action you were attempting.  \
This likely indicates a bug has crept into our application. Please contact us at \
support@procuret.com.",
        404 => "Procuret's servers were unable to find a resource needed to serve your \
request. This likely indicates a bug in our application. Our support team has been notified \
automatically, but please feel free to contact us at support@procuret.com",
        422 => "Procuret was unable to process your request, due to a problem with the \
information sent by your device.",
        429 => "Procuret's servers have noticed unusually high activity levels from your \
device or the network it is connected to. Please try again in few minutes. If you continue \
to see this message, please contact support@procuret.com",
        500 => "Procuret's servers encountered an error when processing information sent by \
your device. There may be a bug in our systems, or they may be experiencing a temporary \
service disruption. Our support team has been notified automatically.",
        503 => "Procuret's servers encountered a service disruption while processing your \
request. This error may disappear if you try again in a few moments. Our support team has \
been notified automatically. If this error persists, please write to us at \
support@procuret.com.",
        _ => return None,
    };
    Some(text)
}
