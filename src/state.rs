// src/state.rs
use std::sync::Arc;

use crate::admin::{AdminEventEditor, AdminSessions};
use crate::auth::AuthService;
use crate::events::EventRepository;
use crate::uploads::LocalBlobStore;

/// Everything a request handler needs, shared by all workers.
pub struct AppState {
    pub auth: AuthService,
    pub events: EventRepository,
    pub editor: AdminEventEditor,
    pub admin_sessions: AdminSessions,
    pub uploads: Arc<LocalBlobStore>,
}

impl AppState {
    pub fn new(
        auth: AuthService,
        events: EventRepository,
        editor: AdminEventEditor,
        uploads: Arc<LocalBlobStore>,
    ) -> Self {
        Self {
            auth,
            events,
            editor,
            admin_sessions: AdminSessions::new(),
            uploads,
        }
    }
}
