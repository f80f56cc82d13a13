pub mod admin_event_card;
pub mod error;
pub mod event_list;

pub use admin_event_card::admin_event_card;
pub use error::html_error_response;
pub use event_list::{events_loading, HtmlEventSurface};
