//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port in its own runtime, then drives
//! every domain operation over real HTTP through `UreqTransport`. Validates
//! that request building, the transport and response decoding agree with an
//! actual server, including wide identifiers and the 404 policy.

use std::sync::Arc;

use procuret_core::{
    Amount, ApiRequest, Client, ClientConfig, Currency, Error, HttpMethod, InstalmentLink,
    InstalmentLinkQuery, NewInstalmentLink, ProspectivePayment, Session, UreqTransport,
};
use serde_json::json;

/// Supplier id as the exact decimal string the codec must preserve.
fn supplier_id() -> String {
    mock_server::SUPPLIER_ID.to_string()
}

fn session() -> Session {
    Session::new(mock_server::API_KEY, mock_server::SESSION_ID)
}

/// Start the mock server on a random port and return a client aimed at it.
fn start_server() -> Client {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    Client::with_transport(
        ClientConfig::new(&format!("http://{addr}")),
        Arc::new(UreqTransport::new()),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn prospective_payments() {
    let client = start_server();

    // Step 1: a single quote, unauthenticated.
    let quote = ProspectivePayment::retrieve(&client, "1200", &supplier_id(), Currency::Aud, 12, None)
        .await
        .unwrap()
        .expect("quote for an offered term");
    assert_eq!(quote.periods, 12);
    assert_eq!(quote.amount(), Amount::new("100.00", Currency::Aud));
    assert_eq!(quote.supplier_id, supplier_id(), "wide id must survive exactly");

    // Step 2: the same quote with credentials.
    let quote = ProspectivePayment::retrieve(
        &client,
        "1200",
        &supplier_id(),
        Currency::Aud,
        6,
        Some(&session()),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(quote.amount().magnitude, "200.00");

    // Step 3: an unoffered term is a 404, which a GET reports as no value.
    let missing = ProspectivePayment::retrieve(&client, "1200", &supplier_id(), Currency::Aud, 24, None)
        .await
        .unwrap();
    assert!(missing.is_none());

    // Step 4: so is an unknown supplier.
    let missing = ProspectivePayment::retrieve(&client, "1200", "1", Currency::Aud, 12, None)
        .await
        .unwrap();
    assert!(missing.is_none());

    // Step 5: every available term.
    let quotes = ProspectivePayment::retrieve_all_available(
        &client,
        "600",
        Currency::Nzd,
        &supplier_id(),
        None,
    )
    .await
    .unwrap()
    .unwrap();
    let periods: Vec<i64> = quotes.iter().map(|q| q.periods).collect();
    assert_eq!(periods, vec![3, 6, 12]);
    assert!(quotes.iter().all(|q| q.currency == Currency::Nzd));

    // Step 6: a non-positive principal is rejected by the server.
    let err = ProspectivePayment::retrieve(&client, "0", &supplier_id(), Currency::Aud, 12, None)
        .await
        .unwrap_err();
    assert_eq!(err.api_error().map(|e| e.code()), Some(422));
}

#[tokio::test(flavor = "multi_thread")]
async fn instalment_link_lifecycle() {
    let client = start_server();
    let session = session();

    // Step 1: nothing yet.
    let links = InstalmentLink::retrieve_many(&client, &InstalmentLinkQuery::default(), Some(&session))
        .await
        .unwrap()
        .unwrap();
    assert!(links.is_empty());

    // Step 2: create a link.
    let new_link = NewInstalmentLink {
        supplier_id: supplier_id(),
        amount: Amount::new("1500.00", Currency::Aud),
        invoice_identifier: "INV-001".to_string(),
        invitee_email: "buyer@example.com".to_string(),
        communicate: false,
        invitee_phone: None,
        sale_name: None,
    };
    let created = InstalmentLink::create(&client, &new_link, Some(&session))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.supplier.entity_id, supplier_id());
    assert_eq!(created.supplier.legal_entity_name, mock_server::SUPPLIER_NAME);
    assert_eq!(created.amount().unwrap(), new_link.amount);
    assert!(!created.has_been_opened());
    assert!(created.disposition.is_none());

    // Step 3: a second link.
    let second = NewInstalmentLink {
        invoice_identifier: "INV-002".to_string(),
        amount: Amount::new("80.00", Currency::Nzd),
        ..new_link.clone()
    };
    InstalmentLink::create(&client, &second, Some(&session))
        .await
        .unwrap()
        .unwrap();

    // Step 4: retrieve the first by public id.
    let fetched = InstalmentLink::retrieve(&client, &created.public_id, Some(&session))
        .await
        .unwrap()
        .expect("created link is retrievable");
    assert_eq!(fetched.public_id, created.public_id);
    assert_eq!(fetched.invoice_identifier, "INV-001");

    // Step 5: list both, paged with a disposition.
    let links = InstalmentLink::retrieve_many(&client, &InstalmentLinkQuery::default(), Some(&session))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|link| link.disposition.map(|d| d.count) == Some(2)));

    let page = InstalmentLinkQuery {
        limit: 1,
        offset: 1,
        supplier_id: Some(supplier_id()),
        ..InstalmentLinkQuery::default()
    };
    let links = InstalmentLink::retrieve_many(&client, &page, Some(&session))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].disposition.map(|d| d.sequence), Some(1));

    // Step 6: no link has been opened.
    let opened = InstalmentLinkQuery {
        opened: Some(true),
        ..InstalmentLinkQuery::default()
    };
    let links = InstalmentLink::retrieve_many(&client, &opened, Some(&session))
        .await
        .unwrap()
        .unwrap();
    assert!(links.is_empty());

    // Step 7: an unknown public id retrieves nothing.
    let missing = InstalmentLink::retrieve(&client, "does-not-exist", Some(&session))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn instalment_link_failures() {
    let client = start_server();

    // No session at all never reaches the server.
    let err = InstalmentLink::retrieve_many(&client, &InstalmentLinkQuery::default(), None)
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());

    // A session the server does not know.
    let stranger = Session::new(mock_server::API_KEY, "1");
    let err = InstalmentLink::retrieve_many(&client, &InstalmentLinkQuery::default(), Some(&stranger))
        .await
        .unwrap_err();
    let Error::Api(api_error) = err else {
        panic!("expected an API error, got {err:?}");
    };
    assert_eq!(api_error.code(), 401);
    assert_eq!(api_error.technical_description(), "unknown session");
    assert_eq!(api_error.request_summary().map(|s| s.request_path.as_str()), Some("/instalment-link/list"));

    // Creating for another supplier is forbidden.
    let foreign = NewInstalmentLink {
        supplier_id: "42".to_string(),
        amount: Amount::new("10.00", Currency::Aud),
        invoice_identifier: "INV-X".to_string(),
        invitee_email: "buyer@example.com".to_string(),
        communicate: true,
        invitee_phone: Some("+61400000000".to_string()),
        sale_name: Some(2),
    };
    let err = InstalmentLink::create(&client, &foreign, Some(&session()))
        .await
        .unwrap_err();
    assert_eq!(err.api_error().map(|e| e.code()), Some(403));

    // Text search is refused before any request is made.
    let search = InstalmentLinkQuery {
        text_fragment: Some("acme".to_string()),
        ..InstalmentLinkQuery::default()
    };
    let err = InstalmentLink::retrieve_many(&client, &search, Some(&session()))
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test(flavor = "multi_thread")]
async fn every_method_reaches_the_server_with_its_body() {
    let client = start_server();
    let payload = json!({"public_id": "abc"});

    for method in [
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Update,
    ] {
        let request = ApiRequest::new(mock_server::ECHO_PATH, method)
            .without_auth(true)
            .body(payload.clone());
        let echoed = client.make(&request).await.unwrap().unwrap();

        assert_eq!(echoed["method"], method.as_str(), "{method}: method");
        assert_eq!(
            echoed["content_type"], "application/json;charset=UTF-8",
            "{method}: content type"
        );
        let sent: serde_json::Value =
            serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
        assert_eq!(sent, payload, "{method}: body");
    }

    // Without a body nothing is sent, and no content type is claimed.
    for method in [HttpMethod::Get, HttpMethod::Delete] {
        let request = ApiRequest::new(mock_server::ECHO_PATH, method).without_auth(true);
        let echoed = client.make(&request).await.unwrap().unwrap();
        assert_eq!(echoed["method"], method.as_str());
        assert!(echoed["content_type"].is_null(), "{method}: content type");
        assert_eq!(echoed["body"], "", "{method}: body");
    }
}
