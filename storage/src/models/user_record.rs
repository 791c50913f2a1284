//! User record model for persistence.
//!
//! Maps to the `users` table and is used by UserRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub full_name: String,
    pub registration_date: DateTime<Utc>,
    pub is_blocked: bool,
}
