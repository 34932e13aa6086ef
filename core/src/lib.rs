//! Client library for the Procuret API: instalment links and prospective
//! payment quotes.
//!
//! # Overview
//! Domain operations build an `ApiRequest` and hand it to a `Client`. The
//! client turns it into an `HttpRequest`, performs one round trip through its
//! `Transport`, parses the body with the integer-safe codec and returns the
//! JSON value, which the domain type then decodes.
//!
//! # Design
//! - `ApiRequest::build` / `ApiRequest::interpret` are pure; `Client::make`
//!   is the only place that awaits the network.
//! - `Transport` is the single network seam. `UreqTransport` is the default;
//!   tests inject their own.
//! - Wide integer identifiers decode as strings (see `codec`).
//! - Type codes are enums over the `Enumeration` / `KeyedEnumeration` traits.
//! - Every failure, synchronous or not, comes back as `Error`.

pub mod client;
pub mod codec;
pub mod config;
pub mod enumeration;
pub mod error;
pub mod http;
pub mod models;
pub mod query;
pub mod request;
pub mod response;
pub mod transport;

pub use client::Client;
pub use config::{ClientConfig, Session};
pub use enumeration::{Enumeration, KeyedEnumeration};
pub use error::{ApiError, Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use models::{
    Amount, Currency, Disposition, EntityHeadline, InstalmentLink, InstalmentLinkOpen,
    InstalmentLinkOrderBy, InstalmentLinkQuery, NewInstalmentLink, Order, ProspectivePayment,
};
pub use query::{QueryString, QueryTerm, QueryValue};
pub use request::{ApiRequest, RequestSummary};
pub use response::Decode;
pub use transport::{default_transport, Transport, UreqTransport};
