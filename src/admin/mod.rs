pub mod editor;
pub mod form;
pub mod image;
pub mod session;

pub use editor::{AdminEventEditor, EditorError, EditorMode, EditorState, SUCCESS_REDIRECT_DELAY};
pub use form::EventForm;
pub use image::MAX_IMAGE_BYTES;
pub use session::{AdminSession, AdminSessions};
