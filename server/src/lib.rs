pub mod auth;
pub mod catalog;
pub mod database;
pub mod error;
pub mod handlers;
pub mod messages;

use std::sync::Arc;

use anyhow::{Context, Result};
use bookstore_shared::config::LiveConfig;
use bookstore_shared::types::server_config::AppConfig;
use sqlx::SqlitePool;

use crate::auth::{InMemoryRevocationStore, RevocationStore, TokenIssuer};

/// Everything a request handler needs. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: LiveConfig,
    pub tokens: TokenIssuer,
    pub revocations: Arc<dyn RevocationStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("revoked_tokens", &self.revocations.len())
            .finish()
    }
}

impl AppState {
    /// Build state around an existing pool with an in-memory revocation registry.
    pub fn new(db: SqlitePool, config: AppConfig) -> Result<Self> {
        Self::with_revocations(db, config, Arc::new(InMemoryRevocationStore::new()))
    }

    pub fn with_revocations(
        db: SqlitePool,
        config: AppConfig,
        revocations: Arc<dyn RevocationStore>,
    ) -> Result<Self> {
        let secret = config
            .auth
            .resolved_jwt_secret()
            .context("JWT secret is not configured")?;
        let tokens = TokenIssuer::new(
            &secret,
            config.auth.token_expiry_secs(),
            config.auth.issuer.clone(),
        );

        Ok(Self {
            db,
            config: LiveConfig::new(config),
            tokens,
            revocations,
        })
    }

    /// Open the configured database, create the schema and build state.
    pub async fn connect(config: AppConfig) -> Result<Self> {
        let db = database::connect(&config.database.url, config.database.max_connections).await?;
        database::create_tables(&db)
            .await
            .context("Failed to create database schema")?;
        Self::new(db, config)
    }
}
