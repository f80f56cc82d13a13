// src/admin/editor.rs
//! Create / update / delete workflow for events.
//!
//! ```text
//! Idle ──begin──▶ Editing ──submit──▶ Submitting ──ok──▶ Success ──finish──▶ Idle
//!                    ▲                     │
//!                    └──── Failed ◀──err───┘
//! ```

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::admin::form::{EventForm, FormError};
use crate::admin::image::{ImageRejection, StagedImage};
use crate::admin::session::AdminSession;
use crate::domain::EventRecord;
use crate::errors::ServerError;
use crate::store::{BlobStore, EventStore, ListOrder};

/// How long the confirmation stays up before returning to the list.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Editing,
    Submitting,
    /// Confirmation text.
    Success(String),
    /// User-facing error; the form stays editable.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Update { id: String },
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no event is being edited")]
    NotEditing,
    #[error("a submission is already in progress")]
    SubmissionInProgress,
    #[error("event not found")]
    EventNotFound,
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    ImageRejected(#[from] ImageRejection),
    #[error("image upload failed: {0}")]
    Upload(ServerError),
    #[error("load failed: {0}")]
    Load(ServerError),
    #[error("save failed: {0}")]
    Save(ServerError),
    #[error("delete failed: {0}")]
    Delete(ServerError),
}

impl EditorError {
    pub fn user_message(&self) -> String {
        match self {
            EditorError::NotEditing => "Open an event or start a new one first.".into(),
            EditorError::SubmissionInProgress => "A submission is already in progress".into(),
            EditorError::EventNotFound => "Event not found".into(),
            EditorError::Invalid(e) => e.to_string(),
            EditorError::ImageRejected(e) => e.to_string(),
            EditorError::Upload(_) => "Image upload failed. Please try again.".into(),
            EditorError::Load(_) => "Failed to load event. Please try again.".into(),
            EditorError::Save(_) => "Failed to save event. Please try again.".into(),
            EditorError::Delete(_) => "Failed to delete event. Please try again.".into(),
        }
    }
}

/// Drives an `AdminSession` against the event and image backends.
#[derive(Clone)]
pub struct AdminEventEditor {
    store: Arc<dyn EventStore>,
    blobs: Arc<dyn BlobStore>,
}

impl AdminEventEditor {
    pub fn new(store: Arc<dyn EventStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// All events for the admin list, newest date first.
    pub fn list(&self) -> Result<Vec<EventRecord>, ServerError> {
        self.store.list_events(ListOrder::DateDescending)
    }

    pub fn begin_create(&self, session: &mut AdminSession) {
        session.reset();
        session.state = EditorState::Editing;
        tracing::debug!(user = %session.user.email, "editor: new event");
    }

    /// Load `id` into the form. The session is untouched when loading fails.
    pub fn begin_edit(&self, session: &mut AdminSession, id: &str) -> Result<(), EditorError> {
        let event = self
            .store
            .get_event(id)
            .map_err(EditorError::Load)?
            .ok_or(EditorError::EventNotFound)?;

        session.reset();
        session.form = EventForm::from_record(&event);
        session.existing_image_url = event.image_url;
        session.mode = EditorMode::Update { id: id.to_string() };
        session.state = EditorState::Editing;
        tracing::debug!(user = %session.user.email, %id, "editor: editing event");
        Ok(())
    }

    /// Replace the staged image. A rejected file leaves the session as it was.
    pub fn stage_image(
        &self,
        session: &mut AdminSession,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), EditorError> {
        ensure_editable(session)?;
        let image = StagedImage::new(file_name, content_type, bytes)?;
        tracing::debug!(?image, "editor: image staged");
        session.staged_image = Some(image);
        Ok(())
    }

    pub fn clear_image(&self, session: &mut AdminSession) {
        session.staged_image = None;
    }

    /// Validate, upload the staged image, then write the document.
    ///
    /// Returns the confirmation text. On error the session is left in
    /// `Failed` with the form and staged image intact for a retry.
    pub fn submit(&self, session: &mut AdminSession, form: EventForm) -> Result<String, EditorError> {
        match session.state {
            EditorState::Submitting => return Err(EditorError::SubmissionInProgress),
            EditorState::Editing | EditorState::Failed(_) => {}
            EditorState::Idle | EditorState::Success(_) => return Err(EditorError::NotEditing),
        }

        session.form = form;
        session.state = EditorState::Submitting;

        match self.persist(session) {
            Ok(confirmation) => {
                session.state = EditorState::Success(confirmation.clone());
                Ok(confirmation)
            }
            Err(e) => {
                tracing::warn!(user = %session.user.email, "event submission failed: {e}");
                session.state = EditorState::Failed(e.user_message());
                Err(e)
            }
        }
    }

    fn persist(&self, session: &mut AdminSession) -> Result<String, EditorError> {
        let mut draft = session.form.to_draft()?;

        let uploaded = match &session.staged_image {
            Some(image) => Some(
                self.blobs
                    .upload(&image.file_name, image.content_type.essence_str(), &image.bytes)
                    .map_err(EditorError::Upload)?,
            ),
            None => None,
        };
        draft.image_url = uploaded.clone().or_else(|| session.existing_image_url.clone());

        let written = match &session.mode {
            EditorMode::Create => self
                .store
                .insert_event(&draft)
                .map(|_| "Event created successfully!"),
            EditorMode::Update { id } => self
                .store
                .update_event(id, &draft)
                .map(|()| "Event updated successfully!"),
        };

        let confirmation = match written {
            Ok(text) => text,
            Err(e) => {
                // The staged image stays staged, so the copy just uploaded is orphaned.
                if let Some(url) = &uploaded {
                    self.discard_image(url);
                }
                return Err(EditorError::Save(e));
            }
        };

        if let (Some(_), Some(previous)) = (&uploaded, &session.existing_image_url) {
            self.discard_image(previous);
        }

        session.staged_image = None;
        session.existing_image_url = draft.image_url;
        Ok(confirmation.to_string())
    }

    /// Back to the list once the confirmation has been shown.
    pub fn finish(&self, session: &mut AdminSession) {
        if matches!(session.state, EditorState::Success(_)) {
            session.reset();
        }
    }

    /// Delete an event and, best effort, its image.
    ///
    /// If the document delete fails the record is left in place.
    pub fn delete(&self, id: &str) -> Result<(), EditorError> {
        let event = self
            .store
            .get_event(id)
            .map_err(EditorError::Delete)?
            .ok_or(EditorError::EventNotFound)?;

        if let Some(url) = &event.image_url {
            self.discard_image(url);
        }

        self.store.delete_event(id).map_err(EditorError::Delete)
    }

    fn discard_image(&self, url: &str) {
        if let Err(e) = self.blobs.delete_by_url(url) {
            tracing::warn!(%url, "could not delete image: {e}");
        }
    }
}

fn ensure_editable(session: &AdminSession) -> Result<(), EditorError> {
    match session.state {
        EditorState::Editing | EditorState::Failed(_) => Ok(()),
        EditorState::Submitting => Err(EditorError::SubmissionInProgress),
        EditorState::Idle | EditorState::Success(_) => Err(EditorError::NotEditing),
    }
}
