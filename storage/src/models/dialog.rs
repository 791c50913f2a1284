//! Derived rows: dialog partners of the administrator and history entries joined to the sender.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user who exchanged at least one message with the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DialogPartner {
    pub user_id: i64,
    pub username: Option<String>,
    pub full_name: String,
}

/// A message joined with its sender's profile. Profile columns are None when the sender never registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HistoryEntry {
    pub id: i64,
    pub from_id: i64,
    pub to_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub username: Option<String>,
    pub full_name: Option<String>,
}
