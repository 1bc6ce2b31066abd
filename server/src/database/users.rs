use bookstore_shared::types::UserSummary;
use sqlx::{FromRow, SqlitePool};

use crate::database::utils::get_timestamp;

/// A full user row. Never serialize this directly; use [`User::summary`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub is_logged_in: bool,
    pub created_at: i64,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
            is_active: self.is_active,
            is_logged_in: self.is_logged_in,
        }
    }
}

pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_admin: bool,
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_admin, is_active, is_logged_in, created_at";

/// Insert a user and return its id. New users start logged out and active.
pub async fn insert_user(db: &SqlitePool, user: NewUser<'_>) -> sqlx::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash, is_admin, is_active, is_logged_in, created_at)
         VALUES (?, ?, ?, ?, 1, 0, ?)",
    )
    .bind(user.username)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.is_admin)
    .bind(get_timestamp())
    .execute(db)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Look up a user by username or email.
pub async fn find_by_identifier(db: &SqlitePool, identifier: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = ? OR email = ? LIMIT 1",
        USER_COLUMNS
    ))
    .bind(identifier)
    .bind(identifier)
    .fetch_optional(db)
    .await
}

pub async fn find_by_id(db: &SqlitePool, user_id: i64) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(user_id)
        .fetch_optional(db)
        .await
}

/// Whether `username` belongs to any user other than `exclude_id`.
pub async fn username_exists(
    db: &SqlitePool,
    username: &str,
    exclude_id: Option<i64>,
) -> sqlx::Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ? AND id != ?")
            .bind(username)
            .bind(exclude_id.unwrap_or(0))
            .fetch_one(db)
            .await?;
    Ok(count > 0)
}

/// Whether `email` belongs to any user other than `exclude_id`.
pub async fn email_exists(
    db: &SqlitePool,
    email: &str,
    exclude_id: Option<i64>,
) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ? AND id != ?")
        .bind(email)
        .bind(exclude_id.unwrap_or(0))
        .fetch_one(db)
        .await?;
    Ok(count > 0)
}

pub async fn admin_exists(db: &SqlitePool) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_admin = 1")
        .fetch_one(db)
        .await?;
    Ok(count > 0)
}

pub async fn set_logged_in(db: &SqlitePool, user_id: i64, logged_in: bool) -> sqlx::Result<()> {
    sqlx::query("UPDATE users SET is_logged_in = ? WHERE id = ?")
        .bind(logged_in)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}

/// Toggle `is_active`. Deactivation also clears `is_logged_in`.
/// Returns false when no such user exists.
pub async fn set_active(db: &SqlitePool, user_id: i64, active: bool) -> sqlx::Result<bool> {
    let result = if active {
        sqlx::query("UPDATE users SET is_active = 1 WHERE id = ?")
            .bind(user_id)
            .execute(db)
            .await?
    } else {
        sqlx::query("UPDATE users SET is_active = 0, is_logged_in = 0 WHERE id = ?")
            .bind(user_id)
            .execute(db)
            .await?
    };
    Ok(result.rows_affected() > 0)
}

/// Apply whichever of username / email is present in a single statement.
pub async fn update_details(
    db: &SqlitePool,
    user_id: i64,
    username: Option<&str>,
    email: Option<&str>,
) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE users
         SET username = COALESCE(?, username),
             email    = COALESCE(?, email)
         WHERE id = ?",
    )
    .bind(username)
    .bind(email)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(())
}

/// Store a new hash and force the user to log in again.
pub async fn update_password_hash(
    db: &SqlitePool,
    user_id: i64,
    password_hash: &str,
) -> sqlx::Result<()> {
    sqlx::query("UPDATE users SET password_hash = ?, is_logged_in = 0 WHERE id = ?")
        .bind(password_hash)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn list_users(db: &SqlitePool) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
        .fetch_all(db)
        .await
}

pub async fn list_logged_in(db: &SqlitePool) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE is_logged_in = 1 ORDER BY id",
        USER_COLUMNS
    ))
    .fetch_all(db)
    .await
}

/// Returns false when no such user exists.
pub async fn delete_user(db: &SqlitePool, user_id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
