use crate::domain::EventRecord;
use crate::templates::{components::admin_event_card, desktop_layout};
use maud::{html, Markup};

pub struct AdminListVm<'a> {
    pub email: &'a str,
    /// The events, or the error message from loading them.
    pub events: Result<Vec<EventRecord>, String>,
    /// One-off notice, e.g. a failed delete.
    pub alert: Option<String>,
}

pub fn admin_page(vm: &AdminListVm) -> Markup {
    desktop_layout(
        "Manage events",
        Some(vm.email),
        html! {
            main class="container" {
                div class="admin-toolbar" {
                    h1 { "Events" }
                    a class="btn primary" href="/admin/events/new" { "Create New Event" }
                }

                @if let Some(alert) = &vm.alert {
                    div class="alert" role="alert" { (alert) }
                }

                div id="adminEventsList" {
                    @match &vm.events {
                        Err(message) => {
                            div class="empty-state" {
                                h3 { "Error loading events" }
                                p { (message) }
                            }
                        }
                        Ok(events) if events.is_empty() => {
                            div class="empty-state" {
                                h3 { "No events yet" }
                                p { "Create your first event to get started" }
                            }
                        }
                        Ok(events) => {
                            @for event in events {
                                (admin_event_card(event))
                            }
                        }
                    }
                }
            }
        },
    )
}
