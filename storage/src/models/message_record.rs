//! Message record model for persistence.
//!
//! Maps to the `messages` table and is used by MessageRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    /// Auto-incrementing row id.
    pub id: i64,
    pub from_id: i64,
    pub to_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// Stored for schema compatibility; nothing sets it.
    pub is_read: bool,
}
