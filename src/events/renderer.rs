// src/events/renderer.rs
use chrono::NaiveDate;

use crate::domain::datetime::format_event_date;
use crate::domain::location::{directions_link, display_name};
use crate::domain::selector::select_upcoming;
use crate::domain::EventRecord;
use crate::events::repository::EventFeed;

pub const EMPTY_MESSAGE: &str = "No upcoming events at this time. Check back soon!";
pub const ERROR_MESSAGE: &str = "Events could not be loaded right now. Please try again later.";

/// Render-ready projection of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventView {
    pub title: String,
    pub when: String,
    pub recurring: bool,
    pub image_url: Option<String>,
    pub location_name: Option<String>,
    pub directions_url: Option<String>,
    pub description: String,
    pub more_info_url: Option<String>,
}

impl EventView {
    pub fn from_record(event: &EventRecord) -> Self {
        Self {
            title: event.title.clone(),
            when: format_event_date(event.date, event.display_time.as_deref(), event.recurring),
            recurring: event.recurring,
            image_url: event.image_url.clone(),
            location_name: display_name(&event.location).map(str::to_string),
            directions_url: directions_link(&event.location),
            description: event.description.clone(),
            more_info_url: event.link.clone(),
        }
    }
}

/// Whatever displays the list: an HTML fragment, a test recorder, ...
pub trait EventSurface {
    fn show_loading(&mut self);
    fn show_events(&mut self, events: &[EventView]);
    fn show_empty(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Events(Vec<EventView>),
    Empty,
    Failed(String),
}

pub struct EventListRenderer<F> {
    feed: F,
}

impl<F: EventFeed> EventListRenderer<F> {
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    /// fetch -> select -> format, driving `surface` through its states.
    pub fn render(&self, as_of: NaiveDate, surface: &mut dyn EventSurface) -> RenderOutcome {
        surface.show_loading();

        let records = match self.feed.fetch_all() {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("event list fetch failed: {e}");
                surface.show_error(ERROR_MESSAGE);
                return RenderOutcome::Failed(e.to_string());
            }
        };

        let views: Vec<EventView> = select_upcoming(records, as_of)
            .iter()
            .map(EventView::from_record)
            .collect();

        if views.is_empty() {
            surface.show_empty(EMPTY_MESSAGE);
            return RenderOutcome::Empty;
        }

        surface.show_events(&views);
        RenderOutcome::Events(views)
    }
}
