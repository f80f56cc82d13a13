// src/admin/session.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use crate::admin::editor::{EditorError, EditorMode, EditorState};
use crate::admin::form::EventForm;
use crate::admin::image::StagedImage;
use crate::auth::AuthUser;

/// Everything the editor knows about one signed-in admin's work in progress.
#[derive(Debug)]
pub struct AdminSession {
    pub user: AuthUser,
    pub state: EditorState,
    pub mode: EditorMode,
    pub form: EventForm,
    pub staged_image: Option<StagedImage>,
    /// Image already attached to the record being edited.
    pub existing_image_url: Option<String>,
}

impl AdminSession {
    pub fn new(user: AuthUser) -> Self {
        Self {
            user,
            state: EditorState::Idle,
            mode: EditorMode::Create,
            form: EventForm::default(),
            staged_image: None,
            existing_image_url: None,
        }
    }

    /// Drop any in-progress work.
    pub fn reset(&mut self) {
        self.state = EditorState::Idle;
        self.mode = EditorMode::Create;
        self.form = EventForm::default();
        self.staged_image = None;
        self.existing_image_url = None;
    }
}

pub type SharedSession = Arc<Mutex<AdminSession>>;

/// One editor session per signed-in user id.
#[derive(Default)]
pub struct AdminSessions {
    inner: Mutex<HashMap<i64, SharedSession>>,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, user: &AuthUser) -> SharedSession {
        let mut map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        Arc::clone(
            map.entry(user.id)
                .or_insert_with(|| Arc::new(Mutex::new(AdminSession::new(user.clone())))),
        )
    }

    pub fn remove(&self, user_id: i64) -> bool {
        let mut map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        map.remove(&user_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|m| m.len()).unwrap_or(0)
    }
}

/// Wait for the session. A poisoned lock is recovered.
pub fn lock(session: &SharedSession) -> MutexGuard<'_, AdminSession> {
    session.lock().unwrap_or_else(|p| p.into_inner())
}

/// Take the session only if nobody else holds it: a second submit while one
/// is running is refused rather than queued.
pub fn try_lock(session: &SharedSession) -> Result<MutexGuard<'_, AdminSession>, EditorError> {
    match session.try_lock() {
        Ok(guard) => Ok(guard),
        Err(TryLockError::WouldBlock) => Err(EditorError::SubmissionInProgress),
        Err(TryLockError::Poisoned(p)) => Ok(p.into_inner()),
    }
}
