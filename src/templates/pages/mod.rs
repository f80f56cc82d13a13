pub mod admin;
pub mod event_form;
pub mod home;
pub mod login;
pub mod success;

pub use admin::{admin_page, AdminListVm};
pub use event_form::event_form_page;
pub use home::home_page;
pub use login::{login_page, LoginVm};
pub use success::success_page;
