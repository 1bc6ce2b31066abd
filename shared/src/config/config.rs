use std::fs;
use tracing::{debug, error, info};

use crate::types::server_config::{AppConfig, ConfigError, MAX_TOKEN_EXPIRY_MINUTES};

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    info!("Loading configuration from: {}", path);

    let contents = fs::read_to_string(path)?;
    debug!("Processing file: {}", path);

    parse_config(&contents)
}

/// Parse and validate a TOML document.
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    if contents.trim().is_empty() {
        error!("Configuration file is empty");
        return Err(ConfigError::InvalidConfig("empty file".into()));
    }

    let config: AppConfig = toml::from_str(contents)?;

    validate_config(&config)?;

    info!("Config validated");

    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.database.url.trim().is_empty() {
        return Err(ConfigError::InvalidConfig(
            "database.url cannot be empty".into(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::InvalidConfig(
            "database.max_connections must be greater than 0".into(),
        ));
    }

    if config.auth.token_expiry_minutes == 0 {
        return Err(ConfigError::InvalidConfig(
            "token_expiry_minutes must be greater than 0".into(),
        ));
    }

    if config.auth.token_expiry_minutes > MAX_TOKEN_EXPIRY_MINUTES {
        return Err(ConfigError::InvalidConfig(format!(
            "token_expiry_minutes must be at most {}",
            MAX_TOKEN_EXPIRY_MINUTES
        )));
    }

    if config.server.max_connections == 0 {
        return Err(ConfigError::InvalidConfig(
            "max_connections must be greater than 0".into(),
        ));
    }

    // Secret problems fail at startup, not on first signing.
    match config.auth.resolved_jwt_secret() {
        None => {
            return Err(ConfigError::InvalidConfig(
                "jwt_secret must be set via the JWT_SECRET env var or auth.jwt_secret config field"
                    .into(),
            ));
        }
        Some(secret) if secret.len() < 32 => {
            return Err(ConfigError::InvalidConfig(
                "jwt_secret must be at least 32 characters long".into(),
            ));
        }
        _ => {}
    }

    Ok(())
}
