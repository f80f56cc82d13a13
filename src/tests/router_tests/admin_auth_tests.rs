// src/tests/router_tests/admin_auth_tests.rs
use crate::auth::{AuthConfig, SessionState};
use crate::tests::utils::{body_string, location, session_token_from, test_app, test_app_with};

#[test]
fn admin_without_session_shows_sign_in_and_register() {
    let app = test_app();
    let resp = app.get("/admin", None);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains(r#"action="/admin/login""#));
    assert!(body.contains(r#"action="/admin/register""#));
}

#[test]
fn register_then_admin_lists_no_events() {
    let app = test_app();
    let token = app.sign_up("Admin@Example.com");

    let body = body_string(app.get("/admin", Some(&token)));
    assert!(body.contains("admin@example.com"));
    assert!(body.contains("No events yet"));
    assert!(body.contains("Create your first event to get started"));
}

#[test]
fn register_with_mismatched_passwords() {
    let app = test_app();
    let resp = app.post_form(
        "/admin/register",
        None,
        &[("email", "a@b.com"), ("password", "secret1"), ("confirm", "secret2")],
    );
    assert_eq!(resp.status(), 400);
    assert!(session_token_from(&resp).is_none());
    assert!(body_string(resp).contains("Passwords do not match"));
}

#[test]
fn registration_can_be_disabled() {
    let app = test_app_with(AuthConfig {
        disable_signup: true,
        ..AuthConfig::default()
    });

    let page = body_string(app.get("/admin", None));
    assert!(!page.contains(r#"action="/admin/register""#));

    let resp = app.post_form(
        "/admin/register",
        None,
        &[("email", "a@b.com"), ("password", "secret1"), ("confirm", "secret1")],
    );
    assert_eq!(resp.status(), 403);
}

#[test]
fn login_errors_are_shown_on_the_form() {
    let app = test_app();
    app.sign_up("admin@example.com");

    let resp = app.post_form(
        "/admin/login",
        None,
        &[("email", "admin@example.com"), ("password", "wrong!!")],
    );
    assert_eq!(resp.status(), 401);
    assert!(body_string(resp).contains("Incorrect password"));

    let resp = app.post_form(
        "/admin/login",
        None,
        &[("email", "nobody@example.com"), ("password", "secret1")],
    );
    assert_eq!(resp.status(), 401);
    assert!(body_string(resp).contains("No account found with this email"));
}

#[test]
fn repeated_failures_are_rate_limited() {
    let app = test_app();
    app.sign_up("admin@example.com");

    for _ in 0..5 {
        let resp = app.post_form(
            "/admin/login",
            None,
            &[("email", "admin@example.com"), ("password", "nope123")],
        );
        assert_eq!(resp.status(), 401);
    }

    // even the right password is refused inside the window
    let resp = app.post_form(
        "/admin/login",
        None,
        &[("email", "admin@example.com"), ("password", "secret1")],
    );
    assert_eq!(resp.status(), 429);
    assert!(body_string(resp).contains("Too many failed attempts"));
}

#[test]
fn login_sets_cookie_and_logout_clears_it() {
    let app = test_app();
    let hub_events = app.state.auth.hub().subscribe();
    app.sign_up("admin@example.com");

    let resp = app.post_form(
        "/admin/login",
        None,
        &[("email", "admin@example.com"), ("password", "secret1")],
    );
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/admin");
    let token = session_token_from(&resp).unwrap();

    assert_eq!(app.get("/admin", Some(&token)).status(), 200);
    assert_eq!(app.state.admin_sessions.len(), 1);

    let resp = app.post_form("/admin/logout", Some(&token), &[]);
    assert_eq!(resp.status(), 303);
    assert!(session_token_from(&resp).is_none());
    assert_eq!(app.state.admin_sessions.len(), 0);

    // token no longer works
    let body = body_string(app.get("/admin", Some(&token)));
    assert!(body.contains(r#"action="/admin/login""#));

    let states = hub_events.drain();
    assert!(matches!(states.as_slice(), [
        SessionState::SignedIn(_),
        SessionState::SignedIn(_),
        SessionState::SignedOut(u),
    ] if u.email == "admin@example.com"));
}

#[test]
fn admin_routes_redirect_without_session() {
    let app = test_app();
    for uri in ["/admin/events/new", "/admin/events/abc/edit"] {
        let resp = app.get(uri, None);
        assert_eq!(resp.status(), 303, "{uri}");
        assert_eq!(location(&resp), "/admin");
    }

    let resp = app.post_form("/admin/events", None, &[("title", "x")]);
    assert_eq!(resp.status(), 303);

    let resp = app.post_form("/admin/events/abc/delete", Some("forged-token"), &[]);
    assert_eq!(resp.status(), 303);
}
