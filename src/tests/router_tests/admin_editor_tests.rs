// src/tests/router_tests/admin_editor_tests.rs
use crate::admin::session::lock;
use crate::admin::MAX_IMAGE_BYTES;
use crate::db::SqliteEventStore;
use crate::domain::{EventRecord, Location};
use crate::store::{EventSource, EventStore, ListOrder};
use crate::tests::utils::{body_string, fake_app, location, now_unix, test_app, TestApp};
use chrono::{Duration, Local};
use http::Method;
use std::io::Read;

fn future_date() -> String {
    (Local::now().date_naive() + Duration::days(14))
        .format("%Y-%m-%d")
        .to_string()
}

fn event_fields(date: &str) -> Vec<(&'static str, String)> {
    vec![
        ("title", "Smart Contract Development Bootcamp".into()),
        ("description", "Hands-on Solidity".into()),
        ("date", date.into()),
        ("hour", "2".into()),
        ("minute", "00".into()),
        ("period", "PM".into()),
        ("location", "Atlanta Blockchain Center".into()),
        ("link", "https://example.org/bootcamp".into()),
    ]
}

fn submit(app: &TestApp, token: &str, fields: &[(&'static str, String)]) -> astra::Response {
    let pairs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    app.post_form("/admin/events", Some(token), &pairs)
}

fn stage(app: &TestApp, token: &str, name: &str, content_type: &str, bytes: Vec<u8>) -> astra::Response {
    app.request(
        Method::POST,
        &format!("/admin/image?name={name}"),
        Some(token),
        Some(content_type),
        bytes,
    )
    .unwrap()
}

#[test]
fn create_event_with_image_end_to_end() {
    let app = test_app();
    let token = app.sign_up("admin@example.com");

    let form = body_string(app.get("/admin/events/new", Some(&token)));
    assert!(form.contains("Create New Event"));

    let resp = stage(&app, &token, "flyer.png", "image/png", b"png-bytes".to_vec());
    assert_eq!(resp.status(), 200);

    let mut preview = Vec::new();
    app.get("/admin/image/preview", Some(&token))
        .into_body()
        .reader()
        .read_to_end(&mut preview)
        .unwrap();
    assert_eq!(preview, b"png-bytes");

    let resp = submit(&app, &token, &event_fields(&future_date()));
    assert_eq!(resp.status(), 200);
    let page = body_string(resp);
    assert!(page.contains("Event created successfully!"));
    assert!(page.contains("1500"));

    let stored = SqliteEventStore::new(app.db.clone())
        .list_events(ListOrder::DateDescending)
        .unwrap();
    assert_eq!(stored.len(), 1);
    let image_url = stored[0].image_url.clone().unwrap();
    assert!(image_url.starts_with("/uploads/events/"));
    assert_eq!(stored[0].display_time.as_deref(), Some("2:00 PM"));

    // the stored image is served back, and the list shows the event
    assert_eq!(body_string(app.get(&image_url, None)), "png-bytes");
    let list = body_string(app.get("/admin", Some(&token)));
    assert!(list.contains("Smart Contract Development Bootcamp"));
    assert!(list.contains(&image_url));

    let public = body_string(app.get("/events", None));
    assert!(public.contains("Smart Contract Development Bootcamp"));
    assert!(public.contains("Read more"));
}

#[test]
fn missing_required_field_is_reported_inline() {
    let app = test_app();
    let token = app.sign_up("admin@example.com");
    app.get("/admin/events/new", Some(&token));

    let mut fields = event_fields(&future_date());
    fields.retain(|(k, _)| *k != "location");

    let resp = submit(&app, &token, &fields);
    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("Please fill in all required fields"));
    // typed values survive
    assert!(body.contains("Hands-on Solidity"));

    let stored = SqliteEventStore::new(app.db.clone())
        .list_events(ListOrder::Unordered)
        .unwrap();
    assert!(stored.is_empty());
}

#[test]
fn submit_without_opening_the_editor_goes_back_to_list() {
    let app = test_app();
    let token = app.sign_up("admin@example.com");

    let resp = submit(&app, &token, &event_fields(&future_date()));
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/admin");
}

#[test]
fn failed_upload_creates_nothing_and_keeps_image_staged() {
    let app = fake_app();
    let token = app.sign_up("admin@example.com");
    app.get("/admin/events/new", Some(&token));
    stage(&app, &token, "flyer.png", "image/png", b"png".to_vec());
    app.blobs().fail_uploads(true);

    let resp = submit(&app, &token, &event_fields(&future_date()));
    assert_eq!(resp.status(), 502);
    assert!(body_string(resp).contains("Image upload failed. Please try again."));
    assert!(app.store().all().is_empty());

    assert_eq!(app.get("/admin/image/preview", Some(&token)).status(), 200);

    app.blobs().fail_uploads(false);
    let resp = submit(&app, &token, &event_fields(&future_date()));
    assert_eq!(resp.status(), 200);
    assert_eq!(app.store().all().len(), 1);
}

#[test]
fn bad_images_are_rejected_with_a_message() {
    let app = test_app();
    let token = app.sign_up("admin@example.com");
    app.get("/admin/events/new", Some(&token));

    let resp = stage(&app, &token, "notes.txt", "text/plain", b"hello".to_vec());
    assert_eq!(resp.status(), 422);
    assert_eq!(body_string(resp), "Please select an image file");

    let resp = stage(&app, &token, "huge.png", "image/png", vec![0; MAX_IMAGE_BYTES + 10]);
    assert_eq!(resp.status(), 422);
    assert_eq!(body_string(resp), "Image must be less than 5MB");

    let preview = app.request(Method::GET, "/admin/image/preview", Some(&token), None, Vec::new());
    assert!(preview.is_err());
}

#[test]
fn second_submit_while_one_is_running_is_refused() {
    let app = fake_app();
    let token = app.sign_up("admin@example.com");
    app.get("/admin/events/new", Some(&token));

    let user = app.state.auth.current_user(&token, now_unix()).unwrap().unwrap();
    let session = app.state.admin_sessions.get_or_create(&user);
    let held = lock(&session);

    let resp = submit(&app, &token, &event_fields(&future_date()));
    assert_eq!(resp.status(), 409);
    assert_eq!(body_string(resp), "A submission is already in progress");
    assert_eq!(app.store().write_count(), 0);

    drop(held);
    assert_eq!(submit(&app, &token, &event_fields(&future_date())).status(), 200);
}

#[test]
fn edit_prefills_form_and_updates_in_place() {
    let app = test_app();
    let token = app.sign_up("admin@example.com");
    let store = SqliteEventStore::new(app.db.clone());

    let mut fields = event_fields(&future_date());
    let draft = crate::admin::EventForm::from_pairs(fields.iter().map(|(k, v)| (*k, v.clone())))
        .to_draft()
        .unwrap();
    let id = store.insert_event(&draft).unwrap();

    let form = body_string(app.get(&format!("/admin/events/{id}/edit"), Some(&token)));
    assert!(form.contains("Edit Event"));
    assert!(form.contains("Update Event"));
    assert!(form.contains(r#"value="Smart Contract Development Bootcamp""#));
    assert!(form.contains(r#"value="2""#));

    fields[0].1 = "Advanced Solidity Bootcamp".into();
    let resp = submit(&app, &token, &fields);
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Event updated successfully!"));

    let saved = store.get_event(&id).unwrap().unwrap();
    assert_eq!(saved.title, "Advanced Solidity Bootcamp");
    assert_eq!(store.list_events(ListOrder::Unordered).unwrap().len(), 1);
}

#[test]
fn editing_a_missing_event_shows_alert() {
    let app = test_app();
    let token = app.sign_up("admin@example.com");

    let resp = app.get("/admin/events/does-not-exist/edit", Some(&token));
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Event not found"));
}

#[test]
fn delete_ignores_image_cleanup_failure() {
    let app = fake_app();
    let token = app.sign_up("admin@example.com");
    let id = app.store().insert(EventRecord {
        title: "Old Meetup".into(),
        image_url: Some("mem://events/old.png".into()),
        location: Location::Legacy("Somewhere".into()),
        ..Default::default()
    });
    app.blobs().fail_deletes(true);

    let resp = app.post_form(&format!("/admin/events/{id}/delete"), Some(&token), &[]);
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/admin");
    assert!(app.store().all().is_empty());
}

#[test]
fn failed_document_delete_keeps_record_and_alerts() {
    let app = fake_app();
    let token = app.sign_up("admin@example.com");
    let id = app.store().seed("Keep Me");
    app.store().fail_deletes(true);

    let resp = app.post_form(&format!("/admin/events/{id}/delete"), Some(&token), &[]);
    assert_eq!(resp.status(), 502);
    let body = body_string(resp);
    assert!(body.contains("Failed to delete event. Please try again."));
    assert!(body.contains("Keep Me"));
    assert_eq!(app.store().all().len(), 1);
}
