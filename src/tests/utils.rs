use crate::admin::AdminEventEditor;
use crate::auth::{AuthConfig, AuthService, SessionHub};
use crate::db::connection::{init_db, Database};
use crate::db::SqliteEventStore;
use crate::errors::ServerError;
use crate::events::EventRepository;
use crate::router::handle;
use crate::state::AppState;
use crate::tests::fakes::{FakeBlobStore, FakeEventStore};
use crate::uploads::LocalBlobStore;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

/// Apply the production schema to a fresh database file inside `dir`.
pub fn open_test_db(dir: &Path) -> Database {
    let path = dir.join("site.sqlite3");
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

/// A database in its own temp dir, removed when this is dropped.
pub struct TestDb {
    db: Database,
    _dir: TempDir,
}

impl Deref for TestDb {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.db
    }
}

pub fn init_test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    TestDb {
        db: open_test_db(dir.path()),
        _dir: dir,
    }
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

// ---------- router harness ----------

pub struct TestApp {
    pub state: AppState,
    pub db: Database,
    pub fake_store: Option<Arc<FakeEventStore>>,
    pub fake_blobs: Option<Arc<FakeBlobStore>>,
    /// Holds the database file and the upload directory.
    _dir: TempDir,
}

fn auth(db: &Database, cfg: AuthConfig) -> AuthService {
    AuthService::new(db.clone(), cfg, SessionHub::new())
}

/// SQLite events plus an upload directory under a temp dir.
pub fn test_app() -> TestApp {
    test_app_with(AuthConfig::default())
}

pub fn test_app_with(cfg: AuthConfig) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let db = open_test_db(dir.path());
    let store = Arc::new(SqliteEventStore::new(db.clone()));
    let uploads = Arc::new(LocalBlobStore::new(dir.path().join("uploads"), "/uploads"));

    let state = AppState::new(
        auth(&db, cfg),
        EventRepository::new(store.clone()),
        AdminEventEditor::new(store, uploads.clone()),
        uploads,
    );

    TestApp {
        state,
        db,
        fake_store: None,
        fake_blobs: None,
        _dir: dir,
    }
}

/// Same wiring, but events and images go to fakes with failure switches.
pub fn fake_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let db = open_test_db(dir.path());
    let store = Arc::new(FakeEventStore::default());
    let blobs = Arc::new(FakeBlobStore::default());
    let uploads = Arc::new(LocalBlobStore::new(dir.path().join("uploads"), "/uploads"));

    let state = AppState::new(
        auth(&db, AuthConfig::default()),
        EventRepository::new(store.clone()),
        AdminEventEditor::new(store.clone(), blobs.clone()),
        uploads,
    );

    TestApp {
        state,
        db,
        fake_store: Some(store),
        fake_blobs: Some(blobs),
        _dir: dir,
    }
}

impl TestApp {
    pub fn store(&self) -> &FakeEventStore {
        self.fake_store.as_deref().expect("fake_app() store")
    }

    pub fn blobs(&self) -> &FakeBlobStore {
        self.fake_blobs.as_deref().expect("fake_app() blobs")
    }

    pub fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> Result<Response, ServerError> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = cookie {
            builder = builder.header("Cookie", format!("session={token}"));
        }
        if let Some(ct) = content_type {
            builder = builder.header("Content-Type", ct);
        }
        handle(builder.body(Body::from(body)).unwrap(), &self.state)
    }

    pub fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        self.request(Method::GET, uri, cookie, None, Vec::new())
            .unwrap_or_else(|e| panic!("GET {uri} failed: {e}"))
    }

    pub fn post_form(&self, uri: &str, cookie: Option<&str>, pairs: &[(&str, &str)]) -> Response {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.request(
            Method::POST,
            uri,
            cookie,
            Some("application/x-www-form-urlencoded"),
            body.into_bytes(),
        )
        .unwrap_or_else(|e| panic!("POST {uri} failed: {e}"))
    }

    /// Register through the router and return the session token from the cookie.
    pub fn sign_up(&self, email: &str) -> String {
        let resp = self.post_form(
            "/admin/register",
            None,
            &[("email", email), ("password", "secret1"), ("confirm", "secret1")],
        );
        assert_eq!(resp.status(), 303, "registration should redirect");
        session_token_from(&resp).expect("registration sets a session cookie")
    }
}

pub fn session_token_from(resp: &Response) -> Option<String> {
    resp.headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|c| c.strip_prefix("session="))
        .and_then(|c| c.split(';').next())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

#[test]
fn test_databases_are_removed_on_drop() {
    let db = init_test_db();
    let path = db.path().to_string();
    assert!(Path::new(&path).exists());
    drop(db);
    assert!(!Path::new(&path).exists());

    let app = fake_app();
    let path = app.db.path().to_string();
    assert!(Path::new(&path).exists());
    drop(app);
    assert!(!Path::new(&path).exists());
}
