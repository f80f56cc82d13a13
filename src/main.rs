use crate::admin::AdminEventEditor;
use crate::auth::{AuthConfig, AuthService, SessionHub, SessionState};
use crate::config::{AppConfig, EventsSource};
use crate::db::{init_db, Database, SqliteEventStore};
use crate::events::EventRepository;
use crate::firestore::FirestoreEventSource;
use crate::router::handle;
use crate::state::AppState;
use crate::uploads::LocalBlobStore;
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod admin;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod events;
mod firestore;
mod responses;
mod router;
mod state;
mod store;
mod templates;
mod uploads;

#[cfg(test)]
mod tests;

fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("terminus_site=info")),
        )
        .init();

    let cfg = AppConfig::from_env();

    // Database handle + schema
    let db = Database::new(cfg.database_path.clone());
    if let Err(e) = init_db(&db) {
        tracing::error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let store = Arc::new(SqliteEventStore::new(db.clone()));
    let uploads = Arc::new(LocalBlobStore::new(&cfg.upload_dir, &cfg.upload_base_url));

    let events = match &cfg.events_source {
        EventsSource::Local => EventRepository::new(store.clone()),
        EventsSource::Firestore { project_id, api_key } => {
            match FirestoreEventSource::new(project_id.clone(), api_key.clone()) {
                Ok(source) => {
                    tracing::info!(%project_id, "public events read from firestore");
                    EventRepository::new(Arc::new(source))
                }
                Err(e) => {
                    tracing::warn!("firestore unavailable, serving built-in events: {e}");
                    EventRepository::offline()
                }
            }
        }
        EventsSource::None => EventRepository::offline(),
    };

    let hub = SessionHub::new();
    spawn_session_audit(&hub);

    let auth = AuthService::new(
        db,
        AuthConfig {
            disable_signup: cfg.disable_signup,
            ..AuthConfig::default()
        },
        hub,
    );
    let editor = AdminEventEditor::new(store, uploads.clone());
    let state = AppState::new(auth, events, editor, uploads);

    tracing::info!(addr = %cfg.bind_addr, workers = cfg.max_workers, "starting server");

    let server = Server::bind(&cfg.bind_addr).max_workers(cfg.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!("server ended with error: {e}");
    }

    tracing::info!("server shut down");
}

/// Log every sign-in and sign-out published by the auth service.
fn spawn_session_audit(hub: &SessionHub) {
    let subscription = hub.subscribe();
    let spawned = std::thread::Builder::new()
        .name("session-audit".into())
        .spawn(move || {
            while let Some(state) = subscription.recv() {
                match state {
                    SessionState::SignedIn(user) => {
                        tracing::info!(user_id = user.id, email = %user.email, "admin signed in")
                    }
                    SessionState::SignedOut(user) => {
                        tracing::info!(user_id = user.id, email = %user.email, "admin signed out")
                    }
                }
            }
        });

    if let Err(e) = spawned {
        tracing::warn!("could not start session audit thread: {e}");
    }
}
