use serde::Deserialize;

/// PUT /api/auth/update-details: every field is optional, at least one must be set.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDetailsData {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// PUT /api/auth/update-password
#[derive(Debug, Deserialize)]
pub struct ChangePasswordData {
    #[serde(default, alias = "current_password")]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}
