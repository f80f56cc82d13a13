// src/tests/router_tests/public_tests.rs
use crate::db::SqliteEventStore;
use crate::domain::{EventDraft, Location};
use crate::errors::ServerError;
use crate::events::renderer::EMPTY_MESSAGE;
use crate::store::{BlobStore, EventStore};
use crate::tests::utils::{body_string, fake_app, test_app};
use chrono::{Duration, Local, NaiveDate};
use http::Method;

fn draft(title: &str, date: NaiveDate) -> EventDraft {
    EventDraft {
        title: title.into(),
        description: format!("{title} details"),
        date: Some(date),
        display_time: Some("5:00 PM".into()),
        recurring: false,
        location: Location::Structured {
            name: "Atlanta Blockchain Center".into(),
            address: None,
        },
        image_url: None,
        link: None,
    }
}

#[test]
fn home_page_ships_loading_placeholder_and_sponsors() {
    let app = test_app();
    let resp = app.get("/", None);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Loading events"));
    assert!(body.contains(r#"hx-get="/events""#));
    assert!(body.contains("Platinum Sponsorship"));
    assert!(body.contains("Custom Packages"));
}

#[test]
fn empty_store_serves_built_in_events() {
    let app = test_app();
    let body = body_string(app.get("/events", None));

    assert!(body.contains("Off The Chain Thursdays"));
    assert!(body.contains("Recurring @ 6:30 PM"));
    assert!(!body.contains("Loading events"));
}

#[test]
fn stored_events_replace_fallback_and_past_ones_are_hidden() {
    let app = test_app();
    let store = SqliteEventStore::new(app.db.clone());
    let today = Local::now().date_naive();

    store.insert_event(&draft("Future Meetup", today + Duration::days(30))).unwrap();
    store.insert_event(&draft("Today Meetup", today)).unwrap();
    store.insert_event(&draft("Past Meetup", today - Duration::days(1))).unwrap();

    let body = body_string(app.get("/events", None));
    assert!(body.contains("Future Meetup"));
    assert!(body.contains("Today Meetup"));
    assert!(!body.contains("Past Meetup"));
    assert!(!body.contains("Off The Chain Thursdays"));

    // ascending by date
    let today_at = body.find("Today Meetup").unwrap();
    let future_at = body.find("Future Meetup").unwrap();
    assert!(today_at < future_at);

    // plain location name links to directions
    assert!(body.contains("https://www.google.com/maps/dir/?api=1&amp;destination=Atlanta+Blockchain+Center"));
}

#[test]
fn only_past_events_shows_empty_state() {
    let app = test_app();
    let store = SqliteEventStore::new(app.db.clone());
    let today = Local::now().date_naive();
    store.insert_event(&draft("Long Gone", today - Duration::days(10))).unwrap();

    let body = body_string(app.get("/events", None));
    assert!(body.contains(EMPTY_MESSAGE));
    assert!(!body.contains("Long Gone"));
}

#[test]
fn failing_store_still_serves_fallback() {
    let app = fake_app();
    app.store().seed("Real Event");
    app.store().fail_reads(true);

    let resp = app.get("/events", None);
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Off The Chain Thursdays"));
    assert!(!body.contains("Real Event"));
}

#[test]
fn uploaded_images_are_served() {
    let app = test_app();
    let url = app
        .state
        .uploads
        .upload("flyer.png", "image/png", b"fake-png-bytes")
        .unwrap();

    let resp = app.get(&url, None);
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("Content-Type").unwrap(), "image/png");
    assert_eq!(body_string(resp), "fake-png-bytes");
}

#[test]
fn missing_upload_and_unknown_routes_are_not_found() {
    let app = test_app();
    for uri in ["/uploads/events/nope.png", "/nope", "/uploads/../site.sqlite3"] {
        let result = app.request(Method::GET, uri, None, None, Vec::new());
        assert!(matches!(result, Err(ServerError::NotFound)), "{uri}");
    }
}
