pub mod renderer;
pub mod repository;

pub use renderer::{EventListRenderer, EventSurface, EventView};
pub use repository::EventRepository;
