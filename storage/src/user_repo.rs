//! User repository: registration, profile lookup, and the one-way block flag.

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::schema;
use crate::sqlite_pool::SqlitePoolManager;
use chrono::Utc;
use tracing::info;

#[derive(Clone)]
pub struct UserRepository {
    pool_manager: SqlitePoolManager,
}

impl UserRepository {
    /// Opens (or creates) the database file and ensures the tables exist.
    pub async fn new(database_path: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_path).await?;
        Self::with_pool(pool_manager).await
    }

    /// Uses an existing pool (shared with [`crate::MessageRepository`]).
    pub async fn with_pool(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        schema::create_tables(pool_manager.pool()).await?;
        Ok(Self { pool_manager })
    }

    /// Registers a user; does nothing if the id is already known (first registration wins).
    pub async fn add_user(
        &self,
        user_id: i64,
        username: Option<&str>,
        full_name: &str,
    ) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO users (user_id, username, full_name, registration_date)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(full_name)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        if result.rows_affected() > 0 {
            info!(user_id = user_id, "Registered new user");
        }
        Ok(())
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, username, full_name, registration_date, is_blocked FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        Ok(user)
    }

    /// Sets the blocked flag. Returns false when no such user is registered.
    /// Blocking an already blocked user is a no-op that still returns true.
    pub async fn block_user(&self, user_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE users SET is_blocked = 1 WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;

        let found = result.rows_affected() > 0;
        info!(user_id = user_id, found = found, "Block user");
        Ok(found)
    }

    /// Unknown users are not blocked.
    pub async fn is_blocked(&self, user_id: i64) -> Result<bool, StorageError> {
        let row: Option<(bool,)> = sqlx::query_as("SELECT is_blocked FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        Ok(row.map(|r| r.0).unwrap_or(false))
    }
}
