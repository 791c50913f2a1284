//! Storage crate: user and message persistence for the feedback relay.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord, MessageRecord, DialogPartner, HistoryEntry
//! - [`user_repo`] – UserRepository (SQLite)
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager
//!
//! Both repositories share one [`SqlitePoolManager`]; tables are created on construction.

mod error;
mod message_repo;
mod models;
mod schema;
mod sqlite_pool;
mod user_repo;

#[cfg(test)]
mod message_repo_test;

pub use error::StorageError;
pub use message_repo::{MessageRepository, SendOutcome, DEFAULT_HISTORY_LIMIT};
pub use models::{DialogPartner, HistoryEntry, MessageRecord, UserRecord};
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::UserRepository;
