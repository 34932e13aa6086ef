//! In-process imitation of the Procuret API for tests and local development.
//!
//! Mirrors the conventions the client has to cope with: credentials in
//! `x-procuret-*` headers, failures explained in an `error-information` field,
//! and supplier ids wide enough to lose precision as JSON numbers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const API_KEY: &str = "mock-api-key";
pub const SESSION_ID: &str = "8127346510293847";

pub const KEY_HEADER: &str = "x-procuret-api-key";
pub const SESSION_ID_HEADER: &str = "x-procuret-session-id";

/// The one supplier the mock knows. Wider than 53 bits on purpose.
pub const SUPPLIER_ID: u64 = 589_121_958_603_420_123;
pub const SUPPLIER_NAME: &str = "Acme Hardware Pty Ltd";

/// Answers any method with the method, content type and body it received.
pub const ECHO_PATH: &str = "/echo";

/// Terms offered by `/credit/prospective-payment/list`.
pub const AVAILABLE_PERIODS: [u32; 3] = [3, 6, 12];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkOpen {
    pub sequence: i64,
    pub created: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub public_id: String,
    pub supplier_id: u64,
    pub created: DateTime<Utc>,
    pub invitee_email: String,
    pub invitee_phone: Option<String>,
    pub invoice_amount: String,
    pub invoice_identifier: String,
    pub opens: Vec<LinkOpen>,
    pub sale_name: i64,
    pub allow_edit: bool,
    pub denomination_id: i64,
}

impl Link {
    fn to_wire(&self, disposition: Value) -> Value {
        json!({
            "public_id": self.public_id,
            "supplier": {
                "entity_id": self.supplier_id,
                "legal_entity_name": SUPPLIER_NAME,
            },
            "created": self.created,
            "invitee_email": self.invitee_email,
            "invoice_amount": self.invoice_amount,
            "invoice_identifier": self.invoice_identifier,
            "opens": self.opens,
            "disposition": disposition,
            "sale_name": self.sale_name,
            "allow_edit": self.allow_edit,
            "denomination_id": self.denomination_id,
        })
    }
}

#[derive(Deserialize)]
pub struct CreateLink {
    pub supplier_id: Value,
    pub invoice_amount: String,
    pub denomination: i64,
    pub invoice_identifier: String,
    pub invitee_email: String,
    pub communicate: bool,
    pub nomenclature: Option<i64>,
    pub invitee_phone: Option<String>,
}

#[derive(Deserialize)]
pub struct LinkListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub order: Option<String>,
    pub order_by: Option<String>,
    pub opened: Option<bool>,
    pub supplier_id: Option<String>,
    pub public_id: Option<String>,
    pub accessible_to: Option<String>,
}

#[derive(Deserialize)]
pub struct PaymentQuery {
    pub cycle: Option<i64>,
    pub supplier_id: String,
    pub principle: Option<String>,
    pub principal_magnitude: Option<String>,
    pub periods: Option<u32>,
    pub denomination: i64,
}

pub type Db = Arc<RwLock<Vec<Link>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router preloaded with `links`.
pub fn app_with(links: Vec<Link>) -> Router {
    let db: Db = Arc::new(RwLock::new(links));
    Router::new()
        .route("/credit/prospective-payment", get(prospective_payment))
        .route("/credit/prospective-payment/list", get(prospective_payments))
        .route("/instalment-link", post(create_link))
        .route("/instalment-link/list", get(list_links))
        .route(ECHO_PATH, any(echo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    Json(json!({
        "method": method.as_str(),
        "content_type": content_type,
        "body": body,
    }))
}

fn failure(status: StatusCode, information: &str) -> Response {
    (status, Json(json!({ "error-information": information }))).into_response()
}

fn authorise(headers: &HeaderMap) -> Result<(), Response> {
    let key = headers.get(KEY_HEADER).and_then(|v| v.to_str().ok());
    let session = headers.get(SESSION_ID_HEADER).and_then(|v| v.to_str().ok());
    match (key, session) {
        (Some(API_KEY), Some(SESSION_ID)) => Ok(()),
        (None, _) | (_, None) => Err(failure(StatusCode::UNAUTHORIZED, "missing credentials")),
        _ => Err(failure(StatusCode::UNAUTHORIZED, "unknown session")),
    }
}

fn currency(indexid: i64) -> Option<Value> {
    match indexid {
        1 => Some(json!({
            "indexid": 1, "iso_4217": "aud", "name": "Australian Dollar",
            "exponent": 2, "symbol": "$"
        })),
        2 => Some(json!({
            "indexid": 2, "iso_4217": "nzd", "name": "New Zealand Dollar",
            "exponent": 2, "symbol": "$"
        })),
        _ => None,
    }
}

fn quote(principal: f64, periods: u32, currency: &Value) -> Value {
    json!({
        "payment": format!("{:.2}", principal / f64::from(periods)),
        "cycle": 1,
        "supplier_id": SUPPLIER_ID,
        "periods": periods,
        "currency": currency,
    })
}

/// Validates the parts both quote endpoints share.
fn quote_inputs(query: &PaymentQuery, principal: Option<&str>) -> Result<(f64, Value), Response> {
    if query.supplier_id != SUPPLIER_ID.to_string() {
        return Err(failure(StatusCode::NOT_FOUND, "no such supplier"));
    }
    if query.cycle.unwrap_or(1) != 1 {
        return Err(failure(StatusCode::BAD_REQUEST, "only monthly cycles are quoted"));
    }
    let currency = currency(query.denomination)
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "unknown denomination"))?;
    let principal = principal
        .and_then(|p| p.parse::<f64>().ok())
        .filter(|p| *p > 0.0)
        .ok_or_else(|| failure(StatusCode::UNPROCESSABLE_ENTITY, "principal must be positive"))?;
    Ok((principal, currency))
}

async fn prospective_payment(Query(query): Query<PaymentQuery>) -> Response {
    let (principal, currency) = match quote_inputs(&query, query.principle.as_deref()) {
        Ok(inputs) => inputs,
        Err(response) => return response,
    };
    match query.periods {
        Some(periods) if AVAILABLE_PERIODS.contains(&periods) => {
            Json(quote(principal, periods, &currency)).into_response()
        }
        _ => failure(StatusCode::NOT_FOUND, "no quote for that term"),
    }
}

async fn prospective_payments(Query(query): Query<PaymentQuery>) -> Response {
    let (principal, currency) = match quote_inputs(&query, query.principal_magnitude.as_deref()) {
        Ok(inputs) => inputs,
        Err(response) => return response,
    };
    let quotes: Vec<Value> = AVAILABLE_PERIODS
        .iter()
        .map(|periods| quote(principal, *periods, &currency))
        .collect();
    Json(quotes).into_response()
}

async fn create_link(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateLink>,
) -> Response {
    if let Err(response) = authorise(&headers) {
        return response;
    }
    let supplier_id = match &input.supplier_id {
        Value::String(text) => text.parse::<u64>().ok(),
        Value::Number(number) => number.as_u64(),
        _ => None,
    };
    if supplier_id != Some(SUPPLIER_ID) {
        return failure(StatusCode::FORBIDDEN, "not authorised for that supplier");
    }
    if !input.invitee_email.contains('@') {
        return failure(StatusCode::BAD_REQUEST, "invitee_email is not an email address");
    }
    if currency(input.denomination).is_none() {
        return failure(StatusCode::UNPROCESSABLE_ENTITY, "unknown denomination");
    }

    let link = Link {
        public_id: Uuid::new_v4().simple().to_string(),
        supplier_id: SUPPLIER_ID,
        created: Utc::now(),
        invitee_email: input.invitee_email,
        invitee_phone: input.invitee_phone,
        invoice_amount: input.invoice_amount,
        invoice_identifier: input.invoice_identifier,
        opens: Vec::new(),
        sale_name: input.nomenclature.unwrap_or(1),
        allow_edit: !input.communicate,
        denomination_id: input.denomination,
    };
    db.write().await.push(link.clone());
    Json(link.to_wire(Value::Null)).into_response()
}

async fn list_links(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<LinkListQuery>,
) -> Response {
    if let Err(response) = authorise(&headers) {
        return response;
    }
    if query.order_by.as_deref().is_some_and(|key| key != "created") {
        return failure(StatusCode::BAD_REQUEST, "unknown order_by");
    }
    if query.accessible_to.is_some() {
        return failure(StatusCode::BAD_REQUEST, "accessible_to is not supported");
    }

    let links = db.read().await;
    let mut matching: Vec<&Link> = links
        .iter()
        .filter(|link| query.public_id.as_ref().map_or(true, |id| &link.public_id == id))
        .filter(|link| {
            query
                .supplier_id
                .as_ref()
                .map_or(true, |id| link.supplier_id.to_string() == *id)
        })
        .filter(|link| query.opened.map_or(true, |opened| link.opens.is_empty() != opened))
        .collect();

    match query.order.as_deref() {
        Some("ascending") => matching.sort_by_key(|link| link.created),
        _ => matching.sort_by_key(|link| std::cmp::Reverse(link.created)),
    }

    let limit = query.limit.unwrap_or(20);
    let offset = query.offset.unwrap_or(0);
    let count = matching.len();
    let page: Vec<Value> = matching
        .into_iter()
        .skip(offset)
        .take(limit)
        .enumerate()
        .map(|(index, link)| {
            link.to_wire(json!({
                "count": count,
                "limit": limit,
                "offset": offset,
                "sequence": offset + index,
            }))
        })
        .collect();
    Json(page).into_response()
}
