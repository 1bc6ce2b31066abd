pub mod config;

pub use self::config::{load_config, parse_config};

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::server_config::AppConfig;

/// A cheaply-cloneable, live config handle.
///
/// All clones share the same underlying `RwLock<AppConfig>`, so a call to
/// [`LiveConfig::reload`] is immediately visible to every part of the
/// application that holds a clone.
///
/// # Usage
/// ```rust,no_run
/// // Read (short-lived guard: do not hold across .await points)
/// // let expiry = state.config.read().await.auth.token_expiry_secs();
/// ```
#[derive(Clone, Debug)]
pub struct LiveConfig(Arc<RwLock<AppConfig>>);

impl LiveConfig {
    /// Wrap an `AppConfig` in a new `LiveConfig`.
    pub fn new(config: AppConfig) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    /// Acquire a read guard. Keep it short-lived; never hold across `.await`.
    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.0.read().await
    }

    /// Atomically swap in a new config. All existing clones see the new
    /// values on their next `.read()` call.
    pub async fn reload(&self, new: AppConfig) {
        *self.0.write().await = new;
    }
}
