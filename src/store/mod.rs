// src/store/mod.rs
//! Seams to the backends that hold events and uploaded images.

use crate::domain::{EventDraft, EventRecord};
use crate::errors::ServerError;

/// How `list_events` should order its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Whatever the backend returns; the public page sorts client-side.
    Unordered,
    /// Newest date first, as the admin list shows them.
    DateDescending,
}

/// Read access to the events collection.
pub trait EventSource: Send + Sync {
    fn list_events(&self, order: ListOrder) -> Result<Vec<EventRecord>, ServerError>;

    fn get_event(&self, id: &str) -> Result<Option<EventRecord>, ServerError>;
}

/// Write access to the events collection.
///
/// Implementations stamp `createdAt` on insert and `updatedAt` on every write.
pub trait EventStore: EventSource {
    /// Insert a new document and return the id the store generated for it.
    fn insert_event(&self, draft: &EventDraft) -> Result<String, ServerError>;

    /// Overwrite the editable fields of an existing document.
    fn update_event(&self, id: &str, draft: &EventDraft) -> Result<(), ServerError>;

    fn delete_event(&self, id: &str) -> Result<(), ServerError>;
}

/// Hosted file storage for event images.
pub trait BlobStore: Send + Sync {
    /// Store the bytes under a fresh key and return a publicly fetchable URL.
    fn upload(&self, file_name: &str, content_type: &str, bytes: &[u8]) -> Result<String, ServerError>;

    /// Remove a previously uploaded file given the URL `upload` returned.
    fn delete_by_url(&self, url: &str) -> Result<(), ServerError>;
}
