use crate::db::leads::SqliteLeadStore;
use crate::domain::activity::ActivityDetail;
use crate::domain::lead::{Lead, LeadStatus, NewLead};
use crate::errors::ServerError;
use crate::events::bus::LeadBus;
use crate::leads::store::LeadStore;
use crate::router::handle;
use crate::tests::utils::init_test_db;
use astra::Body;
use http::{Method, Request};
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn seed_lead(store: &SqliteLeadStore, name: &str, email: &str) -> Lead {
    store
        .create_lead(
            &NewLead {
                name: name.to_string(),
                email: email.to_string(),
                phone: None,
                message: None,
                property_address: None,
                property_id: None,
                lead_source: "website".to_string(),
            },
            now_unix(),
        )
        .expect("Failed to seed lead")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn body_string(resp: astra::Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

#[test]
fn leads_list_shows_captured_leads() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    seed_lead(&store, "Jane Doe", "jane@example.com");
    seed_lead(&store, "John Roe", "john@example.com");

    let resp = handle(get("/admin/leads"), &store, &bus).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Jane Doe"));
    assert!(body.contains("John Roe"));
    assert!(body.contains("new this month"));
}

#[test]
fn list_filters_by_status() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let jane = seed_lead(&store, "Jane Doe", "jane@example.com");
    seed_lead(&store, "John Roe", "john@example.com");

    // move Jane along the pipeline
    let resp = handle(
        post_form(
            &format!("/admin/leads/{}/status", jane.id),
            &format!("status=qualified&version={}", jane.version),
        ),
        &store,
        &bus,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 302);

    let body = body_string(
        handle(get("/admin/leads?status=qualified"), &store, &bus).expect("Handler failed"),
    );
    assert!(body.contains("Jane Doe"));
    assert!(!body.contains("John Roe"));
}

#[test]
fn list_searches_name_and_email() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    seed_lead(&store, "Jane Doe", "jane@example.com");
    seed_lead(&store, "John Roe", "john@other.net");

    let body = body_string(
        handle(get("/admin/leads?q=other.net"), &store, &bus).expect("Handler failed"),
    );
    assert!(body.contains("John Roe"));
    assert!(!body.contains("Jane Doe"));
}

#[test]
fn bad_status_filter_is_rejected() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    match handle(get("/admin/leads?status=archived"), &store, &bus) {
        Err(ServerError::InvalidStatus(_)) => {}
        other => panic!("expected InvalidStatus, got: {other:?}"),
    }
}

#[test]
fn detail_page_shows_fields_and_transition_buttons() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let jane = seed_lead(&store, "Jane Doe", "jane@example.com");

    let resp = handle(get(&format!("/admin/leads/{}", jane.id)), &store, &bus)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("jane@example.com"));
    // buttons for every status except the current one
    assert!(body.contains("Mark contacted"));
    assert!(body.contains("Mark converted"));
    assert!(!body.contains("Mark new"));
}

#[test]
fn missing_lead_detail_is_not_found() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    assert!(matches!(
        handle(get("/admin/leads/ld_missing"), &store, &bus),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn status_posts_walk_the_pipeline_and_ratchet_converted_at() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let jane = seed_lead(&store, "Jane Doe", "jane@example.com");
    let detail_uri = format!("/admin/leads/{}", jane.id);
    let status_uri = format!("/admin/leads/{}/status", jane.id);

    let resp = handle(post_form(&status_uri, "status=qualified&version=1"), &store, &bus)
        .expect("Handler failed");
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        detail_uri
    );

    let lead = store.get_lead(&jane.id).unwrap();
    assert_eq!(lead.status, LeadStatus::Qualified);
    assert_eq!(lead.converted_at, None);

    handle(post_form(&status_uri, "status=converted&version=2"), &store, &bus).unwrap();
    let lead = store.get_lead(&jane.id).unwrap();
    assert_eq!(lead.status, LeadStatus::Converted);
    let stamped = lead.converted_at.expect("converted_at should be stamped");

    handle(post_form(&status_uri, "status=lost&version=3"), &store, &bus).unwrap();
    let lead = store.get_lead(&jane.id).unwrap();
    assert_eq!(lead.status, LeadStatus::Lost);
    assert_eq!(lead.converted_at, Some(stamped));

    let history = store.activity_for(&jane.id).unwrap();
    assert_eq!(history.len(), 3);
    assert!(matches!(
        history[0].detail,
        ActivityDetail::StatusChanged {
            from: LeadStatus::New,
            to: LeadStatus::Qualified,
        }
    ));
}

#[test]
fn contact_details_can_be_edited() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let jane = seed_lead(&store, "Jane Doe", "jane@example.com");
    let resp = handle(
        post_form(
            &format!("/admin/leads/{}/contact", jane.id),
            "name=Jane+A.+Doe&email=Jane.Doe%40example.com&phone=555-0199&version=1",
        ),
        &store,
        &bus,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 302);

    let lead = store.get_lead(&jane.id).unwrap();
    assert_eq!(lead.name, "Jane A. Doe");
    assert_eq!(lead.email, "jane.doe@example.com");
    assert_eq!(lead.phone, Some("555-0199".to_string()));
    assert_eq!(lead.version, 2);
    // the inquiry and capture channel never change
    assert_eq!(lead.message, jane.message);
    assert_eq!(lead.lead_source, "website");
}

#[test]
fn contact_edit_with_bad_email_is_rejected() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let jane = seed_lead(&store, "Jane Doe", "jane@example.com");
    let result = handle(
        post_form(
            &format!("/admin/leads/{}/contact", jane.id),
            "name=Jane&email=broken&version=1",
        ),
        &store,
        &bus,
    );
    assert!(matches!(result, Err(ServerError::Validation(_))));
    assert_eq!(store.get_lead(&jane.id).unwrap().email, "jane@example.com");
}

#[test]
fn stale_status_post_is_a_conflict() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let jane = seed_lead(&store, "Jane Doe", "jane@example.com");
    let status_uri = format!("/admin/leads/{}/status", jane.id);

    handle(post_form(&status_uri, "status=contacted&version=1"), &store, &bus).unwrap();

    // a second tab still showing version 1
    match handle(post_form(&status_uri, "status=lost&version=1"), &store, &bus) {
        Err(ServerError::Conflict(_)) => {}
        other => panic!("expected Conflict, got: {other:?}"),
    }

    let lead = store.get_lead(&jane.id).unwrap();
    assert_eq!(lead.status, LeadStatus::Contacted);
}

#[test]
fn note_post_lands_in_the_activity_feed() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let jane = seed_lead(&store, "Jane Doe", "jane@example.com");
    handle(
        post_form(
            &format!("/admin/leads/{}/notes", jane.id),
            "text=Called%2C+no+answer&version=1",
        ),
        &store,
        &bus,
    )
    .unwrap();

    let body = body_string(
        handle(get(&format!("/admin/leads/{}", jane.id)), &store, &bus).expect("Handler failed"),
    );
    assert!(body.contains("Called, no answer"));
}

#[test]
fn follow_up_post_records_the_exact_datetime_and_note() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let jane = seed_lead(&store, "Jane Doe", "jane@example.com");
    handle(
        post_form(
            &format!("/admin/leads/{}/follow-up", jane.id),
            "scheduled_for=2025-03-10T14%3A00%3A00&note=Discuss+pricing&version=1",
        ),
        &store,
        &bus,
    )
    .unwrap();

    // scheduling does not move the pipeline
    let lead = store.get_lead(&jane.id).unwrap();
    assert_eq!(lead.status, LeadStatus::New);

    let body = body_string(
        handle(get(&format!("/admin/leads/{}", jane.id)), &store, &bus).expect("Handler failed"),
    );
    assert!(body.contains("FOLLOW-UP SCHEDULED: 2025-03-10T14:00:00"));
    assert!(body.contains("Discuss pricing"));
}

#[test]
fn follow_up_preset_resolves_to_a_concrete_datetime() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    let jane = seed_lead(&store, "Jane Doe", "jane@example.com");
    handle(
        post_form(
            &format!("/admin/leads/{}/follow-up", jane.id),
            "preset=tomorrow&version=1",
        ),
        &store,
        &bus,
    )
    .unwrap();

    let history = store.activity_for(&jane.id).unwrap();
    assert_eq!(history.len(), 1);
    assert!(matches!(
        history[0].detail,
        ActivityDetail::FollowUpScheduled { .. }
    ));
}

#[test]
fn unknown_routes_are_not_found() {
    let db = init_test_db();
    let store = SqliteLeadStore::new(db);
    let bus = LeadBus::new();

    assert!(matches!(
        handle(get("/admin/reports"), &store, &bus),
        Err(ServerError::NotFound)
    ));
}
