// src/events/repository.rs
use std::sync::Arc;

use crate::domain::fallback::fallback_events;
use crate::domain::EventRecord;
use crate::errors::ServerError;
use crate::store::{EventSource, ListOrder};

/// Where the renderer gets its records from.
///
/// The repository never fails, but other feeds can, and the renderer shows
/// an error state for those.
pub trait EventFeed {
    fn fetch_all(&self) -> Result<Vec<EventRecord>, ServerError>;
}

/// Public read path with graceful degradation.
#[derive(Clone)]
pub struct EventRepository {
    source: Option<Arc<dyn EventSource>>,
}

impl EventRepository {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// No backend configured: always serve the built-in list.
    pub fn offline() -> Self {
        Self { source: None }
    }

    /// Every event in the store, or the built-in list when the store is
    /// unavailable, empty, or fails.
    pub fn fetch_all(&self) -> Vec<EventRecord> {
        let Some(source) = &self.source else {
            tracing::debug!("no event source configured, serving fallback events");
            return fallback_events();
        };

        match source.list_events(ListOrder::Unordered) {
            Ok(events) if !events.is_empty() => events,
            Ok(_) => {
                tracing::info!("event store is empty, serving fallback events");
                fallback_events()
            }
            Err(e) => {
                tracing::warn!("event store read failed, serving fallback events: {e}");
                fallback_events()
            }
        }
    }
}

impl EventFeed for EventRepository {
    fn fetch_all(&self) -> Result<Vec<EventRecord>, ServerError> {
        Ok(EventRepository::fetch_all(self))
    }
}
