use crate::db::leads::SqliteLeadStore;
use crate::errors::ServerError;
use crate::events::bus::LeadBus;
use crate::events::types::LeadSignal;
use crate::leads::store::LeadStore;
use crate::router::handle;
use crate::tests::utils::init_test_db;
use astra::Body;
use http::{Method, Request};
use std::sync::{Arc, Mutex};

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[test]
fn contact_form_creates_a_website_lead() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let req = post_form(
        "/leads/contact",
        "name=Jane%20Doe&email=Jane%40Example.com&phone=555-0100&message=Looking+for+a+condo",
    );
    let resp = handle(req, &store, &bus).expect("Handler failed");

    assert_eq!(resp.status(), 302, "Should redirect after capture");
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "/thanks"
    );

    let leads = store.list_leads().unwrap();
    assert_eq!(leads.len(), 1);
    let lead = &leads[0];
    assert_eq!(lead.name, "Jane Doe");
    assert_eq!(lead.email, "jane@example.com");
    assert_eq!(lead.phone, Some("555-0100".to_string()));
    assert_eq!(lead.message, Some("Looking for a condo".to_string()));
    assert_eq!(lead.lead_source, "website");
    assert_eq!(lead.status.as_str(), "new");
    assert_eq!(lead.converted_at, None);
}

#[test]
fn callback_and_valuation_tag_their_channels() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    handle(
        post_form("/leads/callback", "name=Ann&email=ann%40example.com&phone=555-0101"),
        &store,
        &bus,
    )
    .unwrap();
    handle(
        post_form(
            "/leads/valuation",
            "name=Ben&email=ben%40example.com&property_address=9+Bay+Rd",
        ),
        &store,
        &bus,
    )
    .unwrap();

    let leads = store.list_leads().unwrap();
    let sources: Vec<&str> = leads.iter().map(|l| l.lead_source.as_str()).collect();
    assert!(sources.contains(&"callback_widget"));
    assert!(sources.contains(&"home_valuation"));

    let ben = leads.iter().find(|l| l.name == "Ben").unwrap();
    assert_eq!(ben.property_address, Some("9 Bay Rd".to_string()));
}

#[test]
fn invalid_email_never_reaches_the_store() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let req = post_form("/leads/contact", "name=Jane&email=not-an-email");
    match handle(req, &store, &bus) {
        Err(ServerError::Validation(_)) => {}
        other => panic!("expected Validation, got: {other:?}"),
    }

    assert!(store.list_leads().unwrap().is_empty());
}

#[test]
fn missing_name_is_rejected() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let req = post_form("/leads/callback", "email=ann%40example.com");
    assert!(matches!(
        handle(req, &store, &bus),
        Err(ServerError::Validation(_))
    ));
}

#[test]
fn quick_add_creates_a_manual_lead_and_returns_to_the_list() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let req = post_form("/admin/leads", "name=Walk-in&email=walkin%40example.com");
    let resp = handle(req, &store, &bus).expect("Handler failed");

    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "/admin/leads"
    );

    let leads = store.list_leads().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].lead_source, "manual");
}

#[test]
fn each_capture_announces_itself_on_the_bus() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.subscribe(move |signal| sink.lock().unwrap().push(signal.clone()));

    handle(
        post_form("/leads/contact", "name=Jane&email=jane%40example.com"),
        &store,
        &bus,
    )
    .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    match &seen[0] {
        LeadSignal::Created { lead_source, .. } => assert_eq!(lead_source, "website"),
        other => panic!("expected Created, got: {other:?}"),
    }
}
