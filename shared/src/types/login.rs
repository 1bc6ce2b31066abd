use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Login wire types
// ---------------------------------------------------------------------------

/// Login body. `identifier` is either a username or an email address.
///
/// Missing fields deserialize as empty strings so the workflow can answer
/// with its own "required" message instead of a JSON parse error.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    #[serde(default, alias = "username", alias = "email")]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed JWT, sent back as `Authorization: Bearer <token>`.
    pub token: String,
    pub expires_in: u64,
}
