// src/auth/service.rs
use thiserror::Error;

use crate::auth::observer::{SessionHub, SessionState};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::sessions::{self, AuthUser};
use crate::db::connection::Database;
use crate::db::users;
use crate::errors::ServerError;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Failed sign-ins allowed per email inside `lockout_window_secs`.
    pub max_failed_attempts: i64,
    pub lockout_window_secs: i64,
    pub disable_signup: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lockout_window_secs: 15 * 60,
            disable_signup: false,
        }
    }
}

/// Sign-in / sign-up failures, each with a stable code and a message for the form.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no account for this email")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("email already registered")]
    EmailAlreadyInUse,
    #[error("password too short")]
    WeakPassword,
    #[error("malformed email")]
    InvalidEmail,
    #[error("too many failed attempts")]
    TooManyRequests,
    #[error("password confirmation does not match")]
    PasswordMismatch,
    #[error("registration is disabled")]
    SignupDisabled,
    #[error(transparent)]
    Backend(#[from] ServerError),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => "auth/user-not-found",
            AuthError::WrongPassword => "auth/wrong-password",
            AuthError::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthError::WeakPassword => "auth/weak-password",
            AuthError::InvalidEmail => "auth/invalid-email",
            AuthError::TooManyRequests => "auth/too-many-requests",
            AuthError::PasswordMismatch => "auth/password-mismatch",
            AuthError::SignupDisabled => "auth/operation-not-allowed",
            AuthError::Backend(_) => "auth/internal-error",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => "No account found with this email",
            AuthError::WrongPassword => "Incorrect password",
            AuthError::EmailAlreadyInUse => "An account with this email already exists",
            AuthError::WeakPassword => "Password should be at least 6 characters",
            AuthError::InvalidEmail => "Please enter a valid email address",
            AuthError::TooManyRequests => "Too many failed attempts. Please try again later",
            AuthError::PasswordMismatch => "Passwords do not match",
            AuthError::SignupDisabled => "Registration is closed. Ask an admin for access.",
            AuthError::Backend(_) => "An error occurred. Please try again.",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: AuthUser,
    /// Raw session token for the cookie; only its hash is stored.
    pub session_token: String,
}

/// Email/password accounts and cookie sessions backed by SQLite.
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    cfg: AuthConfig,
    hub: SessionHub,
}

impl AuthService {
    pub fn new(db: Database, cfg: AuthConfig, hub: SessionHub) -> Self {
        Self { db, cfg, hub }
    }

    pub fn hub(&self) -> &SessionHub {
        &self.hub
    }

    pub fn signup_enabled(&self) -> bool {
        !self.cfg.disable_signup
    }

    /// Trim + lowercase, minimal sanity check.
    pub fn normalize_email(email: &str) -> Result<String, AuthError> {
        let e = email.trim().to_lowercase();
        let Some((local, domain)) = e.split_once('@') else {
            return Err(AuthError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') || e.contains(char::is_whitespace) {
            return Err(AuthError::InvalidEmail);
        }
        Ok(e)
    }

    pub fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
        now: i64,
    ) -> Result<SignedIn, AuthError> {
        if self.cfg.disable_signup {
            return Err(AuthError::SignupDisabled);
        }
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        let email = Self::normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let hash = hash_password(password)?;

        let signed_in = self.db.with_conn(|conn| {
            let Some(user_id) = users::insert_user(conn, &email, &hash, now)? else {
                return Ok(None);
            };
            users::touch_last_login(conn, user_id, now)?;
            let session_token = sessions::create_session(conn, user_id, now)?;
            Ok(Some(SignedIn {
                user: AuthUser {
                    id: user_id,
                    email: email.clone(),
                },
                session_token,
            }))
        })?;

        let signed_in = signed_in.ok_or(AuthError::EmailAlreadyInUse)?;

        tracing::info!(user_id = signed_in.user.id, "account registered");
        self.hub.publish(SessionState::SignedIn(signed_in.user.clone()));
        Ok(signed_in)
    }

    pub fn sign_in(&self, email: &str, password: &str, now: i64) -> Result<SignedIn, AuthError> {
        let email = Self::normalize_email(email)?;
        let window_start = now - self.cfg.lockout_window_secs;

        let failures = self
            .db
            .with_conn(|conn| users::count_failed_logins(conn, &email, window_start))?;
        if failures >= self.cfg.max_failed_attempts {
            tracing::warn!(%email, failures, "sign-in rate limited");
            return Err(AuthError::TooManyRequests);
        }

        let user = self.db.with_conn(|conn| users::find_user_by_email(conn, &email))?;

        let Some(user) = user else {
            self.db
                .with_conn(|conn| users::record_failed_login(conn, &email, now))?;
            return Err(AuthError::UserNotFound);
        };

        if !verify_password(password, &user.password_hash)? {
            self.db
                .with_conn(|conn| users::record_failed_login(conn, &email, now))?;
            return Err(AuthError::WrongPassword);
        }

        let session_token = self.db.with_conn(|conn| {
            users::clear_failed_logins(conn, &email)?;
            users::touch_last_login(conn, user.id, now)?;
            sessions::create_session(conn, user.id, now)
        })?;

        let signed_in = SignedIn {
            user: AuthUser {
                id: user.id,
                email: user.email,
            },
            session_token,
        };

        tracing::info!(user_id = signed_in.user.id, "signed in");
        self.hub.publish(SessionState::SignedIn(signed_in.user.clone()));
        Ok(signed_in)
    }

    pub fn sign_out(&self, session_token: &str, now: i64) -> Result<(), ServerError> {
        let revoked = self
            .db
            .with_conn(|conn| sessions::revoke_session(conn, session_token, now))?;

        if let Some(user) = revoked {
            tracing::info!(user_id = user.id, "signed out");
            self.hub.publish(SessionState::SignedOut(user));
        }
        Ok(())
    }

    pub fn current_user(&self, session_token: &str, now: i64) -> Result<Option<AuthUser>, ServerError> {
        self.db
            .with_conn(|conn| sessions::load_user_from_session(conn, session_token, now))
    }
}
