pub mod books;
pub mod create;
pub mod tokens;
pub mod users;
pub mod utils;

pub use create::create_tables;

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

/// Open a connection pool, creating the database file if needed.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database url: {}", url))?
        .create_if_missing(true)
        .foreign_keys(true);

    // Each in-memory connection is its own database, so pin the pool to one
    // connection that never gets recycled.
    let pool = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
    }
    .with_context(|| format!("Failed to open database: {}", url))?;

    info!("Database pool ready ({})", url);
    Ok(pool)
}

/// True when the error is a UNIQUE constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
