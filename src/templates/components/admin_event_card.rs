use maud::{html, Markup};

use crate::domain::datetime::format_compact;
use crate::domain::location::display_name;
use crate::domain::EventRecord;

pub fn admin_event_card(event: &EventRecord) -> Markup {
    let id = event.id.as_deref().unwrap_or_default();

    html! {
        div class="admin-event-card" {
            @match &event.image_url {
                Some(src) => {
                    img class="admin-event-image" src=(src) alt=(event.title);
                }
                None => {
                    div class="admin-event-image placeholder" { "No image" }
                }
            }
            div class="admin-event-details" {
                h3 class="admin-event-title" {
                    (event.title)
                    @if event.recurring {
                        span class="recurring-badge" { "Recurring" }
                    }
                }
                div class="admin-event-meta" {
                    span { (format_compact(event.date, event.display_time.as_deref(), event.recurring)) }
                    span { (display_name(&event.location).unwrap_or("No location")) }
                }
                p class="admin-event-description" { (event.description) }
                div class="admin-event-actions" {
                    a class="btn-edit" href=(format!("/admin/events/{id}/edit")) { "Edit" }
                    form class="inline" method="post" action=(format!("/admin/events/{id}/delete"))
                        onsubmit="return confirm('Are you sure you want to delete this event? This action cannot be undone.');"
                    {
                        button type="submit" class="btn-delete" { "Delete" }
                    }
                }
            }
        }
    }
}
