use sqlx::SqlitePool;
use tracing::info;

/// Create every table and index. Safe to run on every start.
pub async fn create_tables(db: &SqlitePool) -> sqlx::Result<()> {
    // Users: username and email are both unique login identifiers, compared
    // without regard to case.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT    NOT NULL UNIQUE COLLATE NOCASE,
            email         TEXT    NOT NULL UNIQUE COLLATE NOCASE,
            password_hash TEXT    NOT NULL,
            is_admin      INTEGER NOT NULL DEFAULT 0,
            is_active     INTEGER NOT NULL DEFAULT 1,
            is_logged_in  INTEGER NOT NULL DEFAULT 0,
            created_at    INTEGER NOT NULL
        )",
    )
    .execute(db)
    .await?;

    // Books survive the deletion of the user who created them.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS books (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            title      TEXT    NOT NULL,
            author     TEXT    NOT NULL,
            price      REAL    NOT NULL,
            isbn       TEXT    NOT NULL UNIQUE,
            discount   REAL,
            sell_count INTEGER NOT NULL DEFAULT 0,
            created_by INTEGER,
            created_at INTEGER NOT NULL,
            FOREIGN KEY (created_by) REFERENCES users(id) ON DELETE SET NULL
        )",
    )
    .execute(db)
    .await?;

    // Every issued JWT, so a raw token can be resolved back to its user.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_tokens (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL,
            token      TEXT    NOT NULL UNIQUE,
            expires_at INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
    )
    .execute(db)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_created_by ON books(created_by)")
        .execute(db)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_price ON books(price)")
        .execute(db)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_tokens_user ON user_tokens(user_id)")
        .execute(db)
        .await?;

    info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect;

    #[tokio::test]
    async fn create_tables_is_idempotent() {
        let db = connect("sqlite::memory:", 1).await.unwrap();
        create_tables(&db).await.unwrap();
        create_tables(&db).await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('users', 'books', 'user_tokens')",
        )
        .fetch_one(&db)
        .await
        .unwrap();
        assert_eq!(count, 3);
    }
}
