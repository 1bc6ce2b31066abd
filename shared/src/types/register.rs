use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationData {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub user_id: i64,
    pub username: String,
    pub message: String,
}
