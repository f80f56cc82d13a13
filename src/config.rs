// Site configuration loaded from environment variables (and `.env` via dotenvy).

use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_WORKERS: usize = 8;

/// Where the public event list is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventsSource {
    /// The SQLite store the admin portal writes to.
    #[default]
    Local,
    /// A hosted Firestore `events` collection.
    Firestore {
        project_id: String,
        api_key: Option<String>,
    },
    /// No backend: the built-in list only.
    None,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub database_path: String,
    pub upload_dir: String,
    /// URL prefix uploaded images are served under.
    pub upload_base_url: String,
    pub events_source: EventsSource,
    pub disable_signup: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_workers: DEFAULT_MAX_WORKERS,
            database_path: "site.sqlite3".to_string(),
            upload_dir: "uploads".to_string(),
            upload_base_url: "/uploads".to_string(),
            events_source: EventsSource::Local,
            disable_signup: false,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Invalid values fall back to defaults with a warning.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match get("SITE_BIND_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(%raw, "SITE_BIND_ADDR is not a socket address, using {DEFAULT_BIND_ADDR}");
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let max_workers = match get("SITE_MAX_WORKERS") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(%raw, "SITE_MAX_WORKERS must be a positive integer, using {DEFAULT_MAX_WORKERS}");
                    defaults.max_workers
                }
            },
            None => defaults.max_workers,
        };

        let events_source = match get("SITE_EVENTS_SOURCE").map(|s| s.to_lowercase()).as_deref() {
            None | Some("local") => EventsSource::Local,
            Some("none") => EventsSource::None,
            Some("firestore") => match get("FIRESTORE_PROJECT_ID") {
                Some(project_id) => EventsSource::Firestore {
                    project_id,
                    api_key: get("FIRESTORE_API_KEY"),
                },
                None => {
                    tracing::warn!("SITE_EVENTS_SOURCE=firestore but FIRESTORE_PROJECT_ID is not set, using local store");
                    EventsSource::Local
                }
            },
            Some(other) => {
                tracing::warn!(value = %other, "unknown SITE_EVENTS_SOURCE, using local store");
                EventsSource::Local
            }
        };

        let disable_signup = get("SITE_DISABLE_SIGNUP")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(defaults.disable_signup);

        Self {
            bind_addr,
            max_workers,
            database_path: get("SITE_DATABASE_PATH").unwrap_or(defaults.database_path),
            upload_dir: get("SITE_UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            upload_base_url: get("SITE_UPLOAD_BASE_URL").unwrap_or(defaults.upload_base_url),
            events_source,
            disable_signup,
        }
    }
}
