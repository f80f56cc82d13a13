use crate::templates::desktop_layout;
use maud::{html, Markup};

/// What the sign-in / register page shows after a failed attempt.
#[derive(Debug, Default)]
pub struct LoginVm {
    pub email: String,
    pub login_error: Option<String>,
    pub register_error: Option<String>,
    pub signup_enabled: bool,
}

pub fn login_page(vm: &LoginVm) -> Markup {
    desktop_layout(
        "Admin sign in",
        None,
        html! {
            main class="container narrow auth-forms" {
                div class="card" {
                    h2 { "Sign in" }
                    form method="post" action="/admin/login" {
                        label for="loginEmail" { "Email" }
                        input type="email" id="loginEmail" name="email" value=(vm.email) autocomplete="email" required;
                        label for="loginPassword" { "Password" }
                        input type="password" id="loginPassword" name="password" autocomplete="current-password" required;
                        p id="loginError" class="form-error" { (vm.login_error.as_deref().unwrap_or_default()) }
                        button type="submit" class="btn primary" { "Sign in" }
                    }
                }

                @if vm.signup_enabled {
                    div class="card" {
                        h2 { "Create account" }
                        form method="post" action="/admin/register" {
                            label for="registerEmail" { "Email" }
                            input type="email" id="registerEmail" name="email" autocomplete="email" required;
                            label for="registerPassword" { "Password" }
                            input type="password" id="registerPassword" name="password" autocomplete="new-password" minlength="6" required;
                            label for="registerConfirm" { "Confirm password" }
                            input type="password" id="registerConfirm" name="confirm" autocomplete="new-password" required;
                            p id="registerError" class="form-error" { (vm.register_error.as_deref().unwrap_or_default()) }
                            button type="submit" class="btn" { "Create account" }
                        }
                    }
                }
            }
        },
    )
}
