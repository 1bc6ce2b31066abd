#![allow(dead_code)]

use bookstore::AppState;
use bookstore::auth::workflow;
use bookstore::database;
use bookstore_shared::config::parse_config;
use bookstore_shared::types::server_config::AppConfig;
use bookstore_shared::types::{LoginData, RegistrationData};

pub const PASSWORD: &str = "Passw0rd!";

pub fn test_config() -> AppConfig {
    parse_config(
        r#"
        [server]
        port = 0

        [database]
        url = "sqlite::memory:"

        [auth]
        token_expiry_minutes = 60
        jwt_secret = "integration-test-secret-0123456789abcdef"
        "#,
    )
    .unwrap()
}

/// Fresh in-memory database with the schema applied.
pub async fn test_state() -> AppState {
    let config = test_config();
    let db = database::connect(&config.database.url, 1).await.unwrap();
    database::create_tables(&db).await.unwrap();
    AppState::new(db, config).unwrap()
}

pub fn registration(username: &str, email: &str, password: &str) -> RegistrationData {
    RegistrationData {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn credentials(identifier: &str, password: &str) -> LoginData {
    LoginData {
        identifier: identifier.to_string(),
        password: password.to_string(),
    }
}

/// Register `username` with [`PASSWORD`] and return the new id.
pub async fn register_user(state: &AppState, username: &str) -> i64 {
    workflow::register(
        state,
        &registration(username, &format!("{}@example.com", username), PASSWORD),
    )
    .await
    .unwrap()
}

pub async fn login(state: &AppState, username: &str) -> String {
    workflow::login(state, &credentials(username, PASSWORD))
        .await
        .unwrap()
        .token
}

/// Bootstrap an admin account and return `(id, token)`.
pub async fn bootstrap_admin(state: &AppState, username: &str) -> (i64, String) {
    let id = workflow::register_admin(
        state,
        &registration(username, &format!("{}@example.com", username), PASSWORD),
        None,
    )
    .await
    .unwrap();
    (id, login(state, username).await)
}
