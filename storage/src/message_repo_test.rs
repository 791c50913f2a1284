//! Unit tests for MessageRepository.
//!
//! Covers save/get_message_by_id round-trip and the blocked-sender transaction.

use crate::message_repo::{MessageRepository, SendOutcome};
use crate::sqlite_pool::SqlitePoolManager;
use crate::user_repo::UserRepository;
use tempfile::TempDir;

const ADMIN_ID: i64 = 1000;

async fn fresh_repos() -> (TempDir, UserRepository, MessageRepository) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("test.db");
    let pool = SqlitePoolManager::new(&path.to_string_lossy())
        .await
        .expect("Failed to create pool");
    let users = UserRepository::with_pool(pool.clone())
        .await
        .expect("Failed to create user repository");
    let messages = MessageRepository::with_pool(pool)
        .await
        .expect("Failed to create message repository");
    (dir, users, messages)
}

#[tokio::test]
async fn test_save_then_get_round_trip() {
    let (_dir, _users, repo) = fresh_repos().await;

    let saved = repo
        .save(123, ADMIN_ID, "Hello World")
        .await
        .expect("Failed to save message");

    let message = repo
        .get_message_by_id(saved.id)
        .await
        .expect("Failed to get message")
        .expect("message exists");

    assert_eq!(message.id, saved.id);
    assert_eq!(message.from_id, 123);
    assert_eq!(message.to_id, ADMIN_ID);
    assert_eq!(message.body, "Hello World");
    assert!(!message.is_read);
}

#[tokio::test]
async fn test_ids_auto_increment() {
    let (_dir, _users, repo) = fresh_repos().await;

    let first = repo.save(1, ADMIN_ID, "a").await.unwrap();
    let second = repo.save(ADMIN_ID, 1, "b").await.unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_get_message_by_id_not_found() {
    let (_dir, _users, repo) = fresh_repos().await;

    let retrieved = repo
        .get_message_by_id(424242)
        .await
        .expect("Failed to query");

    assert!(retrieved.is_none());
}

#[tokio::test]
async fn test_save_user_message_from_registered_user() {
    let (_dir, users, repo) = fresh_repos().await;
    users.add_user(7, Some("carol"), "Carol").await.unwrap();

    let outcome = repo.save_user_message(7, ADMIN_ID, "hi admin").await.unwrap();

    let SendOutcome::Sent(record) = outcome else {
        panic!("expected Sent, got {:?}", outcome);
    };
    let stored = repo.get_message_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored, record);
}

#[tokio::test]
async fn test_save_user_message_from_blocked_user_persists_nothing() {
    let (_dir, users, repo) = fresh_repos().await;
    users.add_user(7, Some("carol"), "Carol").await.unwrap();
    users.block_user(7).await.unwrap();

    let outcome = repo.save_user_message(7, ADMIN_ID, "let me in").await.unwrap();

    assert_eq!(outcome, SendOutcome::Blocked);
    let history = repo.get_dialog_history(7, ADMIN_ID, 10, 0).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_save_user_message_from_unregistered_user_is_allowed() {
    let (_dir, _users, repo) = fresh_repos().await;

    let outcome = repo.save_user_message(8, ADMIN_ID, "no /start yet").await.unwrap();

    assert!(matches!(outcome, SendOutcome::Sent(_)));
}
