use sqlx::SqlitePool;

use crate::database::utils::get_timestamp;

/// A recorded token that has not yet expired.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

pub async fn record_token(
    db: &SqlitePool,
    user_id: i64,
    token: &str,
    expires_at: i64,
) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO user_tokens (user_id, token, expires_at, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(token)
    .bind(expires_at)
    .bind(get_timestamp())
    .execute(db)
    .await?;
    Ok(())
}

/// Resolve a raw token to the id of the active user it was issued to.
pub async fn find_user_by_token(db: &SqlitePool, token: &str) -> sqlx::Result<Option<i64>> {
    sqlx::query_scalar(
        "SELECT t.user_id
         FROM user_tokens t
         JOIN users u ON u.id = t.user_id
         WHERE t.token = ? AND t.expires_at > ? AND u.is_active = 1",
    )
    .bind(token)
    .bind(get_timestamp())
    .fetch_optional(db)
    .await
}

/// All of a user's tokens that are still within their validity window.
pub async fn tokens_for_user(db: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<IssuedToken>> {
    sqlx::query_as::<_, IssuedToken>(
        "SELECT token, expires_at FROM user_tokens WHERE user_id = ? AND expires_at > ?",
    )
    .bind(user_id)
    .bind(get_timestamp())
    .fetch_all(db)
    .await
}

pub async fn delete_token(db: &SqlitePool, token: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM user_tokens WHERE token = ?")
        .bind(token)
        .execute(db)
        .await?;
    Ok(())
}

/// Drop every record for a user, including expired ones.
pub async fn delete_tokens_for_user(db: &SqlitePool, user_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM user_tokens WHERE user_id = ?")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
