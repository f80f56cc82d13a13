pub mod cookies;
pub mod files;
pub mod html;

pub use crate::errors::ResultResp;

pub use cookies::{cleared_session_cookie, read_cookie, session_cookie, SESSION_COOKIE};
pub use files::{bytes_response, stylesheet_response};
pub use html::{html_response, html_with_status, redirect, text_response};
