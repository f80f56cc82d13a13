// templates/components/event_list.rs
use maud::{html, Markup};

use crate::events::{EventSurface, EventView};

pub const EVENTS_CONTAINER_ID: &str = "eventsList";

/// Placeholder the home page ships with; htmx replaces it on load.
pub fn events_loading() -> Markup {
    html! {
        div id=(EVENTS_CONTAINER_ID) class="events-list"
            hx-get="/events" hx-trigger="load" hx-swap="outerHTML"
        {
            div class="loading" { "Loading events" }
        }
    }
}

pub fn event_card(event: &EventView) -> Markup {
    html! {
        div class="event-card fade-in" {
            @if let Some(src) = &event.image_url {
                img class="event-image" src=(src) alt=(event.title) loading="lazy";
            }
            h3 class="event-title" {
                (event.title)
                @if event.recurring {
                    span class="recurring-badge" { "Recurring" }
                }
            }
            p class="event-date" { (event.when) }
            @if let Some(name) = &event.location_name {
                p class="event-location" {
                    "📍 "
                    @match &event.directions_url {
                        Some(href) => {
                            a href=(href) target="_blank" rel="noopener noreferrer" { (name) }
                        }
                        None => { (name) }
                    }
                }
            }
            @if !event.description.is_empty() {
                p class="event-description" { (event.description) }
            }
            @if let Some(href) = &event.more_info_url {
                a class="event-link" href=(href) target="_blank" rel="noopener noreferrer" { "Read more" }
            }
        }
    }
}

/// Renders the list into markup, one state at a time.
#[derive(Default)]
pub struct HtmlEventSurface {
    current: Option<Markup>,
}

impl HtmlEventSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_markup(self) -> Markup {
        self.current.unwrap_or_else(events_loading)
    }

    fn container(&mut self, inner: Markup) {
        self.current = Some(html! {
            div id=(EVENTS_CONTAINER_ID) class="events-list" { (inner) }
        });
    }
}

impl EventSurface for HtmlEventSurface {
    fn show_loading(&mut self) {
        self.current = Some(events_loading());
    }

    fn show_events(&mut self, events: &[EventView]) {
        self.container(html! {
            @for event in events {
                (event_card(event))
            }
        });
    }

    fn show_empty(&mut self, message: &str) {
        self.container(html! { p class="events-empty" { (message) } });
    }

    fn show_error(&mut self, message: &str) {
        self.container(html! { p class="events-error" { (message) } });
    }
}
