use serde::{Deserialize, Serialize};

/// Public view of a user row: never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub is_logged_in: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooksCountByUser {
    pub user_id: i64,
    pub username: String,
    pub book_count: i64,
}

/// POST /api/admin/deactivate-user/:userId: an empty body deactivates.
#[derive(Debug, Default, Deserialize)]
pub struct DeactivateData {
    #[serde(default)]
    pub active: bool,
}
