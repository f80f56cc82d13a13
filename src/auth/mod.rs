pub mod observer;
pub mod password;
pub mod service;
pub mod sessions;
pub mod token;

pub use observer::{SessionHub, SessionState};
pub use service::{AuthConfig, AuthError, AuthService};
pub use sessions::AuthUser;
