mod admin_auth_tests;
mod admin_editor_tests;
mod public_tests;
