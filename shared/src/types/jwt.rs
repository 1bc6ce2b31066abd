use serde::{Deserialize, Serialize};

/// Role claim value carried by administrator tokens.
pub const ADMIN_ROLE: &str = "Admin";

/// Claims embedded in every JWT issued by the server.
///
/// Signature and expiry are checked on every authenticated request, then the
/// raw token string is looked up in the revocation registry. Mutating routes
/// additionally confirm that the token is still recorded against an active
/// user in `user_tokens`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Standard JWT subject: set to the username.
    pub sub: String,

    /// Numeric user ID (matches `users.id`).
    pub user_id: i64,

    pub email: String,

    /// `Some("Admin")` for administrators, absent for regular users.
    /// Embedded so admin routes need no extra DB query; a role change only
    /// takes effect on the next login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Unique token id (UUID v4). Two logins in the same second still get
    /// distinct tokens, so revoking one never revokes the other.
    pub jti: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Standard JWT expiry (Unix timestamp, seconds).
    pub exp: usize,

    /// Issued-at (Unix timestamp, seconds).
    pub iat: usize,
}

impl JwtClaims {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}
