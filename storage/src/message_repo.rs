//! Message repository: persistence and queries for relayed messages.
//!
//! Uses SqlitePoolManager and the models (MessageRecord, HistoryEntry, DialogPartner).
//! Every message is between a user and the administrator; the queries rely on that convention.

use crate::error::StorageError;
use crate::models::{DialogPartner, HistoryEntry, MessageRecord};
use crate::schema;
use crate::sqlite_pool::SqlitePoolManager;
use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};
use tracing::info;

/// Number of messages shown in one dialog history view.
pub const DEFAULT_HISTORY_LIMIT: i64 = 10;

/// Result of [`MessageRepository::save_user_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent(MessageRecord),
    /// Sender is blocked; nothing was written.
    Blocked,
}

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    /// Opens (or creates) the database file and ensures the tables exist.
    pub async fn new(database_path: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_path).await?;
        Self::with_pool(pool_manager).await
    }

    /// Uses an existing pool (shared with [`crate::UserRepository`]).
    pub async fn with_pool(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        schema::create_tables(pool_manager.pool()).await?;
        Ok(Self { pool_manager })
    }

    async fn insert<'e, E>(
        executor: E,
        from_id: i64,
        to_id: i64,
        body: &str,
    ) -> Result<MessageRecord, StorageError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let created_at: DateTime<Utc> = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO messages (from_id, to_id, body, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(from_id)
        .bind(to_id)
        .bind(body.to_owned())
        .bind(created_at)
        .execute(executor)
        .await?;

        Ok(MessageRecord {
            id: result.last_insert_rowid(),
            from_id,
            to_id,
            body: body.to_string(),
            created_at,
            is_read: false,
        })
    }

    /// Persists a message unconditionally and returns the stored row.
    pub async fn save(
        &self,
        from_id: i64,
        to_id: i64,
        body: &str,
    ) -> Result<MessageRecord, StorageError> {
        let record = Self::insert(self.pool_manager.pool(), from_id, to_id, body).await?;
        info!(
            message_id = record.id,
            from_id = from_id,
            to_id = to_id,
            "Saved message"
        );
        Ok(record)
    }

    /// Persists a message from a user unless the sender is blocked.
    ///
    /// The blocked check and the insert run in one transaction, so a block that lands between
    /// them cannot let a message through.
    pub async fn save_user_message(
        &self,
        from_id: i64,
        to_id: i64,
        body: &str,
    ) -> Result<SendOutcome, StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        let blocked: Option<(bool,)> =
            sqlx::query_as("SELECT is_blocked FROM users WHERE user_id = ?")
                .bind(from_id)
                .fetch_optional(&mut *tx)
                .await?;

        if blocked.map(|r| r.0).unwrap_or(false) {
            tx.rollback().await?;
            info!(from_id = from_id, "Rejected message from blocked user");
            return Ok(SendOutcome::Blocked);
        }

        let record = Self::insert(&mut *tx, from_id, to_id, body).await?;
        tx.commit().await?;

        info!(
            message_id = record.id,
            from_id = from_id,
            to_id = to_id,
            "Saved user message"
        );
        Ok(SendOutcome::Sent(record))
    }

    pub async fn get_message_by_id(
        &self,
        message_id: i64,
    ) -> Result<Option<MessageRecord>, StorageError> {
        let message = sqlx::query_as::<_, MessageRecord>(
            "SELECT id, from_id, to_id, body, created_at, is_read FROM messages WHERE id = ?",
        )
        .bind(message_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        Ok(message)
    }

    /// Messages in either direction between `user_id` and `admin_id`, newest first, each joined
    /// to its sender's profile.
    pub async fn get_dialog_history(
        &self,
        user_id: i64,
        admin_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HistoryEntry>, StorageError> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT m.id, m.from_id, m.to_id, m.body, m.created_at, m.is_read,
                   u.username, u.full_name
            FROM messages m
            LEFT JOIN users u ON m.from_id = u.user_id
            WHERE (m.from_id = ? AND m.to_id = ?) OR (m.from_id = ? AND m.to_id = ?)
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(admin_id)
        .bind(admin_id)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool_manager.pool())
        .await?;

        info!(
            user_id = user_id,
            count = entries.len(),
            "Retrieved dialog history"
        );
        Ok(entries)
    }

    /// Registered users who exchanged at least one message with the administrator, most recently
    /// active first. The administrator is never listed as their own partner.
    pub async fn get_all_dialogs(&self, admin_id: i64) -> Result<Vec<DialogPartner>, StorageError> {
        let dialogs = sqlx::query_as::<_, DialogPartner>(
            r#"
            SELECT u.user_id, u.username, u.full_name
            FROM users u
            JOIN messages m
              ON (m.from_id = u.user_id AND m.to_id = ?)
              OR (m.to_id = u.user_id AND m.from_id = ?)
            WHERE u.user_id != ?
            GROUP BY u.user_id, u.username, u.full_name
            ORDER BY MAX(m.id) DESC
            "#,
        )
        .bind(admin_id)
        .bind(admin_id)
        .bind(admin_id)
        .fetch_all(self.pool_manager.pool())
        .await?;

        info!(count = dialogs.len(), "Retrieved dialogs");
        Ok(dialogs)
    }
}
