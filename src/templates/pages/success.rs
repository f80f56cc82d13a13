use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};
use std::time::Duration;

/// Confirmation that sends the browser back to the list after `delay`.
pub fn success_page(email: &str, message: &str, delay: Duration) -> Markup {
    // meta refresh only takes whole seconds
    let fallback = format!("{}; url=/admin", delay.as_millis().div_ceil(1000));
    let redirect = format!(
        "setTimeout(function () {{ window.location.href = '/admin'; }}, {});",
        delay.as_millis()
    );

    desktop_layout(
        "Saved",
        Some(email),
        html! {
            main class="container narrow" {
                p id="formSuccess" class="form-success" { (message) }
                p { a href="/admin" { "Back to events" } }
            }
            script { (PreEscaped(redirect)) }
            noscript { meta http-equiv="refresh" content=(fallback); }
        },
    )
}
