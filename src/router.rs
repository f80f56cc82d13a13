use crate::admin::session::{lock, try_lock};
use crate::admin::{EditorError, EventForm, MAX_IMAGE_BYTES, SUCCESS_REDIRECT_DELAY};
use crate::auth::{AuthError, AuthUser};
use crate::errors::ServerError;
use crate::events::EventListRenderer;
use crate::responses::{
    bytes_response, cleared_session_cookie, html_response, html_with_status, read_cookie,
    redirect, session_cookie, stylesheet_response, text_response, ResultResp, SESSION_COOKIE,
};
use crate::state::AppState;
use crate::templates::components::HtmlEventSurface;
use crate::templates::pages::{self, AdminListVm, LoginVm};
use astra::Request;
use chrono::{Local, Utc};
use std::io::Read;

const SITE_CSS: &str = include_str!("../static/site.css");
const MAX_FORM_BYTES: usize = 64 * 1024;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => home(&req, state),
        ("GET", ["events"]) => events_fragment(state),
        ("GET", ["static", "site.css"]) => stylesheet_response(SITE_CSS),
        ("GET", ["uploads", key @ ..]) if !key.is_empty() => serve_upload(state, &key.join("/")),

        ("GET", ["admin"]) => admin_home(&req, state),
        ("POST", ["admin", "login"]) => login(req, state),
        ("POST", ["admin", "register"]) => register(req, state),
        ("POST", ["admin", "logout"]) => logout(&req, state),

        ("GET", ["admin", "events", "new"]) => new_event(&req, state),
        ("GET", ["admin", "events", id, "edit"]) => edit_event(&req, state, id),
        ("POST", ["admin", "events"]) => submit_event(req, state),
        ("POST", ["admin", "events", id, "delete"]) => delete_event(&req, state, id),

        ("POST", ["admin", "image"]) => stage_image(req, state),
        ("POST", ["admin", "image", "remove"]) => clear_image(&req, state),
        ("GET", ["admin", "image", "preview"]) => preview_image(&req, state),

        _ => Err(ServerError::NotFound),
    }
}

// ---------- public ----------

fn home(req: &Request, state: &AppState) -> ResultResp {
    let user = current_user(req, state)?;
    html_response(pages::home_page(user.as_ref().map(|u| u.email.as_str())))
}

fn events_fragment(state: &AppState) -> ResultResp {
    let renderer = EventListRenderer::new(state.events.clone());
    let mut surface = HtmlEventSurface::new();
    renderer.render(Local::now().date_naive(), &mut surface);
    html_response(surface.into_markup())
}

fn serve_upload(state: &AppState, key: &str) -> ResultResp {
    let (bytes, content_type) = state.uploads.read(key)?;
    bytes_response(bytes, content_type, "public, max-age=86400")
}

// ---------- auth ----------

fn admin_home(req: &Request, state: &AppState) -> ResultResp {
    let Some(user) = current_user(req, state)? else {
        return html_response(pages::login_page(&LoginVm {
            signup_enabled: state.auth.signup_enabled(),
            ..Default::default()
        }));
    };

    let session = state.admin_sessions.get_or_create(&user);
    state.editor.finish(&mut lock(&session));

    admin_list(state, &user, None, 200)
}

fn login(req: Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;
    let email = field(&form, "email");

    match state.auth.sign_in(email, field(&form, "password"), now_unix()) {
        Ok(signed_in) => redirect("/admin", Some(&session_cookie(&signed_in.session_token))),
        Err(e) => {
            tracing::info!(code = e.code(), "sign-in rejected");
            let vm = LoginVm {
                email: email.to_string(),
                login_error: Some(e.user_message().to_string()),
                signup_enabled: state.auth.signup_enabled(),
                ..Default::default()
            };
            html_with_status(auth_status(&e), pages::login_page(&vm))
        }
    }
}

fn register(req: Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;

    let result = state.auth.sign_up(
        field(&form, "email"),
        field(&form, "password"),
        field(&form, "confirm"),
        now_unix(),
    );

    match result {
        Ok(signed_in) => redirect("/admin", Some(&session_cookie(&signed_in.session_token))),
        Err(e) => {
            tracing::info!(code = e.code(), "registration rejected");
            let vm = LoginVm {
                register_error: Some(e.user_message().to_string()),
                signup_enabled: state.auth.signup_enabled(),
                ..Default::default()
            };
            html_with_status(auth_status(&e), pages::login_page(&vm))
        }
    }
}

fn logout(req: &Request, state: &AppState) -> ResultResp {
    if let Some(token) = read_cookie(req, SESSION_COOKIE) {
        let now = now_unix();
        if let Some(user) = state.auth.current_user(&token, now)? {
            state.admin_sessions.remove(user.id);
        }
        state.auth.sign_out(&token, now)?;
    }
    redirect("/admin", Some(&cleared_session_cookie()))
}

// ---------- editor ----------

fn new_event(req: &Request, state: &AppState) -> ResultResp {
    let Some(user) = current_user(req, state)? else {
        return redirect("/admin", None);
    };
    let session = state.admin_sessions.get_or_create(&user);
    let mut s = lock(&session);

    state.editor.begin_create(&mut s);
    html_response(pages::event_form_page(&s))
}

fn edit_event(req: &Request, state: &AppState, id: &str) -> ResultResp {
    let Some(user) = current_user(req, state)? else {
        return redirect("/admin", None);
    };
    let session = state.admin_sessions.get_or_create(&user);
    let mut s = lock(&session);

    match state.editor.begin_edit(&mut s, id) {
        Ok(()) => html_response(pages::event_form_page(&s)),
        Err(e) => {
            drop(s);
            admin_list(state, &user, Some(e.user_message()), editor_status(&e))
        }
    }
}

fn submit_event(req: Request, state: &AppState) -> ResultResp {
    let Some(user) = current_user(&req, state)? else {
        return redirect("/admin", None);
    };
    let form = EventForm::from_pairs(read_form(req)?);

    let session = state.admin_sessions.get_or_create(&user);
    let mut s = match try_lock(&session) {
        Ok(guard) => guard,
        Err(e) => return text_response(editor_status(&e), &e.user_message()),
    };

    match state.editor.submit(&mut s, form) {
        Ok(confirmation) => html_response(pages::success_page(
            &user.email,
            &confirmation,
            SUCCESS_REDIRECT_DELAY,
        )),
        Err(EditorError::NotEditing) => redirect("/admin", None),
        Err(e) => html_with_status(editor_status(&e), pages::event_form_page(&s)),
    }
}

fn delete_event(req: &Request, state: &AppState, id: &str) -> ResultResp {
    let Some(user) = current_user(req, state)? else {
        return redirect("/admin", None);
    };

    match state.editor.delete(id) {
        Ok(()) => redirect("/admin", None),
        Err(e) => admin_list(state, &user, Some(e.user_message()), editor_status(&e)),
    }
}

fn stage_image(req: Request, state: &AppState) -> ResultResp {
    let Some(user) = current_user(&req, state)? else {
        return text_response(401, "Please sign in again.");
    };

    let file_name = req
        .uri()
        .query()
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == "name")
                .map(|(_, v)| v.into_owned())
        })
        .or_else(|| header(&req, "X-File-Name"))
        .unwrap_or_default();
    let content_type = header(&req, "Content-Type").unwrap_or_default();
    let bytes = read_body(req, MAX_IMAGE_BYTES)?;

    let session = state.admin_sessions.get_or_create(&user);
    let mut s = lock(&session);

    match state.editor.stage_image(&mut s, &file_name, &content_type, bytes) {
        Ok(()) => text_response(200, "Image ready"),
        Err(e) => text_response(editor_status(&e), &e.user_message()),
    }
}

fn clear_image(req: &Request, state: &AppState) -> ResultResp {
    let Some(user) = current_user(req, state)? else {
        return text_response(401, "Please sign in again.");
    };
    let session = state.admin_sessions.get_or_create(&user);
    state.editor.clear_image(&mut lock(&session));
    text_response(200, "")
}

fn preview_image(req: &Request, state: &AppState) -> ResultResp {
    let Some(user) = current_user(req, state)? else {
        return Err(ServerError::NotFound);
    };
    let session = state.admin_sessions.get_or_create(&user);
    let s = lock(&session);

    let image = s.staged_image.as_ref().ok_or(ServerError::NotFound)?;
    bytes_response(image.bytes.clone(), image.content_type.essence_str(), "no-store")
}

// ---------- helpers ----------

fn admin_list(state: &AppState, user: &AuthUser, alert: Option<String>, status: u16) -> ResultResp {
    let events = state.editor.list().map_err(|e| {
        tracing::error!("admin event list failed: {e}");
        e.to_string()
    });

    html_with_status(
        status,
        pages::admin_page(&AdminListVm {
            email: &user.email,
            events,
            alert,
        }),
    )
}

fn current_user(req: &Request, state: &AppState) -> Result<Option<AuthUser>, ServerError> {
    match read_cookie(req, SESSION_COOKIE) {
        Some(token) => state.auth.current_user(&token, now_unix()),
        None => Ok(None),
    }
}

fn auth_status(e: &AuthError) -> u16 {
    match e {
        AuthError::TooManyRequests => 429,
        AuthError::SignupDisabled => 403,
        AuthError::UserNotFound | AuthError::WrongPassword => 401,
        AuthError::Backend(_) => 500,
        _ => 400,
    }
}

fn editor_status(e: &EditorError) -> u16 {
    match e {
        EditorError::Invalid(_) | EditorError::ImageRejected(_) => 422,
        EditorError::SubmissionInProgress | EditorError::NotEditing => 409,
        EditorError::EventNotFound => 404,
        EditorError::Upload(_) | EditorError::Load(_) | EditorError::Save(_) | EditorError::Delete(_) => 502,
    }
}

fn header(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Read at most `limit + 1` bytes, so callers can tell an oversized body apart.
fn read_body(req: Request, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read request body: {e}")))?;
    Ok(buf)
}

fn read_form(req: Request) -> Result<Vec<(String, String)>, ServerError> {
    let body = read_body(req, MAX_FORM_BYTES)?;
    if body.len() > MAX_FORM_BYTES {
        return Err(ServerError::BadRequest("form too large".into()));
    }
    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}

fn field<'a>(form: &'a [(String, String)], name: &str) -> &'a str {
    form.iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
        .unwrap_or_default()
}

fn now_unix() -> i64 {
    Utc::now().timestamp()
}
