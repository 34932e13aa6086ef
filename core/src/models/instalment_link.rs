//! Shareable deferred-payment offers tied to an invoice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::config::Session;
use crate::enumeration::{Enumeration, KeyedEnumeration};
use crate::error::{Error, Result};
use crate::models::{Amount, Currency, Disposition, EntityHeadline, Order};
use crate::query::{QueryString, QueryTerm};
use crate::request::ApiRequest;
use crate::response::{self, from_value, string_or_number, Decode};

pub const PATH: &str = "/instalment-link";
pub const LIST_PATH: &str = "/instalment-link/list";

/// One recorded opening of a link by its invitee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalmentLinkOpen {
    pub sequence: i64,
    pub created: DateTime<Utc>,
}

impl Decode for InstalmentLinkOpen {
    fn decode(data: &Value) -> Result<Self> {
        from_value(data)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstalmentLink {
    #[serde(deserialize_with = "string_or_number")]
    pub public_id: String,
    pub supplier: EntityHeadline,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub invitee_email: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub invoice_amount: String,
    pub invoice_identifier: String,
    #[serde(default)]
    pub opens: Vec<InstalmentLinkOpen>,
    #[serde(default)]
    pub disposition: Option<Disposition>,
    pub sale_name: i64,
    pub allow_edit: bool,
    pub denomination_id: i64,
}

impl InstalmentLink {
    pub fn denomination(&self) -> Result<Currency> {
        Currency::with_id(self.denomination_id)
    }

    pub fn amount(&self) -> Result<Amount> {
        Ok(Amount::new(self.invoice_amount.clone(), self.denomination()?))
    }

    pub fn has_been_opened(&self) -> bool {
        !self.opens.is_empty()
    }

    pub fn open_count(&self) -> usize {
        self.opens.len()
    }

    /// Fetch one page of links visible to `session`.
    pub async fn retrieve_many(
        client: &Client,
        query: &InstalmentLinkQuery,
        session: Option<&Session>,
    ) -> Result<Option<Vec<InstalmentLink>>> {
        let request = ApiRequest::get(LIST_PATH)
            .parameters(query.to_query_string()?)
            .session(session.cloned());
        response::decode_many(client.make(&request).await)
    }

    /// Fetch the link with `public_id`, or `None` when there is none.
    pub async fn retrieve(
        client: &Client,
        public_id: &str,
        session: Option<&Session>,
    ) -> Result<Option<InstalmentLink>> {
        let query = InstalmentLinkQuery {
            limit: 1,
            public_id: Some(public_id.to_string()),
            ..InstalmentLinkQuery::default()
        };
        let links = Self::retrieve_many(client, &query, session).await?;
        Ok(links.and_then(|links| links.into_iter().next()))
    }

    pub async fn create(
        client: &Client,
        link: &NewInstalmentLink,
        session: Option<&Session>,
    ) -> Result<Option<InstalmentLink>> {
        let request = ApiRequest::post(PATH)
            .json(&link.payload())?
            .session(session.cloned());
        response::decode(client.make(&request).await)
    }
}

impl Decode for InstalmentLink {
    fn decode(data: &Value) -> Result<Self> {
        from_value(data)
    }
}

/// Fields a link list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InstalmentLinkOrderBy {
    #[default]
    Created,
}

impl InstalmentLinkOrderBy {
    pub fn default_order() -> Order {
        Order::Descending
    }
}

impl KeyedEnumeration for InstalmentLinkOrderBy {
    const ENUMERATIONS: &'static [Self] = &[InstalmentLinkOrderBy::Created];
    const TYPE_NAME: &'static str = "InstalmentLinkOrderBy";

    fn key(&self) -> &'static str {
        match self {
            InstalmentLinkOrderBy::Created => "created",
        }
    }
}

/// Filters and paging for `InstalmentLink::retrieve_many`.
#[derive(Debug, Clone, PartialEq)]
pub struct InstalmentLinkQuery {
    pub limit: u32,
    pub offset: u32,
    pub order: Order,
    pub order_by: InstalmentLinkOrderBy,
    /// Not supported by the API; setting it fails the query.
    pub text_fragment: Option<String>,
    pub opened: Option<bool>,
    pub supplier_id: Option<String>,
    pub public_id: Option<String>,
    pub accessible_to: Option<String>,
}

impl Default for InstalmentLinkQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            order: InstalmentLinkOrderBy::default_order(),
            order_by: InstalmentLinkOrderBy::default(),
            text_fragment: None,
            opened: None,
            supplier_id: None,
            public_id: None,
            accessible_to: None,
        }
    }
}

impl InstalmentLinkQuery {
    pub fn to_query_string(&self) -> Result<QueryString> {
        if self.text_fragment.is_some() {
            return Err(Error::InvalidArgument(
                "text search not implemented".to_string(),
            ));
        }

        let mut terms = vec![
            QueryTerm::new("limit", self.limit),
            QueryTerm::new("offset", self.offset),
            QueryTerm::new("order", self.order.key()),
            QueryTerm::new("order_by", self.order_by.key()),
        ];
        QueryTerm::compact_push("opened", self.opened, &mut terms);
        QueryTerm::compact_push("supplier_id", self.supplier_id.as_ref(), &mut terms);
        QueryTerm::compact_push("public_id", self.public_id.as_ref(), &mut terms);
        QueryTerm::compact_push("accessible_to", self.accessible_to.as_ref(), &mut terms);

        Ok(QueryString::new(terms))
    }
}

/// Input for `InstalmentLink::create`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInstalmentLink {
    pub supplier_id: String,
    pub amount: Amount,
    pub invoice_identifier: String,
    pub invitee_email: String,
    /// Ask the API to email the invitee.
    pub communicate: bool,
    pub invitee_phone: Option<String>,
    /// Indexid of the sale nomenclature.
    pub sale_name: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CreatePayload<'a> {
    supplier_id: &'a str,
    invoice_amount: &'a str,
    denomination: i64,
    invoice_identifier: &'a str,
    invitee_email: &'a str,
    communicate: bool,
    nomenclature: Option<i64>,
    invitee_phone: Option<&'a str>,
}

impl NewInstalmentLink {
    fn payload(&self) -> CreatePayload<'_> {
        CreatePayload {
            supplier_id: &self.supplier_id,
            invoice_amount: &self.amount.magnitude,
            denomination: self.amount.denomination.indexid(),
            invoice_identifier: &self.invoice_identifier,
            invitee_email: &self.invitee_email,
            communicate: self.communicate,
            nomenclature: self.sale_name,
            invitee_phone: self.invitee_phone.as_deref(),
        }
    }
}
