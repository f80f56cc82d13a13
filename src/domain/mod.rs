pub mod datetime;
pub mod event;
pub mod fallback;
pub mod location;
pub mod selector;
pub mod sponsors;

pub use event::{EventDocument, EventDraft, EventRecord, Location};
