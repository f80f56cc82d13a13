// src/db/users.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// Insert a user. Returns `None` when the email is already registered.
/// Email should already be normalized by caller (trim/lowercase).
pub fn insert_user(
    conn: &Connection,
    email: &str,
    password_hash: &str,
    now: i64,
) -> Result<Option<i64>, ServerError> {
    let inserted = conn
        .execute(
            "insert or ignore into users (email, password_hash, created_at) values (?, ?, ?)",
            params![email, password_hash, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    if inserted == 0 {
        return Ok(None);
    }
    Ok(Some(conn.last_insert_rowid()))
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>, ServerError> {
    conn.query_row(
        "select id, email, password_hash from users where email = ?",
        params![email],
        |r| {
            Ok(UserRow {
                id: r.get(0)?,
                email: r.get(1)?,
                password_hash: r.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last login failed: {e}")))?;
    Ok(())
}

pub fn record_failed_login(conn: &Connection, email: &str, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "insert into login_attempts (email, attempted_at) values (?, ?)",
        params![email, now],
    )
    .map_err(|e| ServerError::DbError(format!("record login attempt failed: {e}")))?;
    Ok(())
}

/// Failed attempts for `email` at or after `since`.
pub fn count_failed_logins(conn: &Connection, email: &str, since: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from login_attempts where email = ? and attempted_at >= ?",
        params![email, since],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count login attempts failed: {e}")))
}

pub fn clear_failed_logins(conn: &Connection, email: &str) -> Result<(), ServerError> {
    conn.execute("delete from login_attempts where email = ?", params![email])
        .map_err(|e| ServerError::DbError(format!("clear login attempts failed: {e}")))?;
    Ok(())
}
