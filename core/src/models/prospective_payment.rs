//! Hypothetical instalment quotes shown before a customer applies.

use serde::Deserialize;
use serde_json::Value;

use crate::client::Client;
use crate::config::Session;
use crate::enumeration::Enumeration;
use crate::error::Result;
use crate::models::{Amount, Currency};
use crate::query::{QueryString, QueryTerm};
use crate::request::ApiRequest;
use crate::response::{self, from_value, string_or_number, Decode};

pub const PATH: &str = "/credit/prospective-payment";
pub const LIST_PATH: &str = "/credit/prospective-payment/list";

/// Monthly cycle, the only one the API quotes.
const MONTHLY_CYCLE: i64 = 1;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProspectivePayment {
    #[serde(deserialize_with = "string_or_number")]
    pub payment: String,
    pub cycle: i64,
    /// The supplier this quote is valid for.
    #[serde(deserialize_with = "string_or_number")]
    pub supplier_id: String,
    /// Number of payments.
    pub periods: i64,
    pub currency: Currency,
}

impl ProspectivePayment {
    /// The per-period payment.
    pub fn amount(&self) -> Amount {
        Amount::new(self.payment.clone(), self.currency)
    }

    /// Quote for `principal` repaid over `months`. Authentication is used
    /// when `session` is complete and skipped otherwise.
    pub async fn retrieve(
        client: &Client,
        principal: &str,
        supplier_id: &str,
        denomination: Currency,
        months: u32,
        session: Option<&Session>,
    ) -> Result<Option<ProspectivePayment>> {
        // The API spells this parameter "principle" on the single-quote path.
        let parameters = QueryString::new(vec![
            QueryTerm::new("cycle", MONTHLY_CYCLE),
            QueryTerm::new("supplier_id", supplier_id),
            QueryTerm::new("principle", principal),
            QueryTerm::new("periods", months),
            QueryTerm::new("denomination", denomination.indexid()),
        ]);
        let request = ApiRequest::get(PATH)
            .parameters(parameters)
            .session(session.cloned())
            .optional_auth(true);
        response::decode(client.make(&request).await)
    }

    /// Every quote the supplier offers for `principal`.
    pub async fn retrieve_all_available(
        client: &Client,
        principal: &str,
        denomination: Currency,
        supplier_id: &str,
        session: Option<&Session>,
    ) -> Result<Option<Vec<ProspectivePayment>>> {
        let parameters = QueryString::new(vec![
            QueryTerm::new("cycle", MONTHLY_CYCLE),
            QueryTerm::new("supplier_id", supplier_id),
            QueryTerm::new("principal_magnitude", principal),
            QueryTerm::new("denomination", denomination.indexid()),
        ]);
        let request = ApiRequest::get(LIST_PATH)
            .parameters(parameters)
            .session(session.cloned())
            .optional_auth(true);
        response::decode_many(client.make(&request).await)
    }
}

impl Decode for ProspectivePayment {
    fn decode(data: &Value) -> Result<Self> {
        from_value(data)
    }
}
