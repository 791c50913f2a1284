//! Unit tests for ConversationStore.

use std::sync::Arc;

use crate::{ConversationState, ConversationStore};

#[test]
fn test_unknown_user_is_idle() {
    let store = ConversationStore::new();
    assert_eq!(store.get(1), ConversationState::Idle);
    assert_eq!(store.pending(), 0);
}

#[test]
fn test_set_and_reset() {
    let store = ConversationStore::new();
    store.set(1, ConversationState::AwaitingUserMessage);
    store.set(2, ConversationState::AwaitingAdminReply { user_id: 1 });

    assert_eq!(store.get(1), ConversationState::AwaitingUserMessage);
    assert_eq!(
        store.get(2),
        ConversationState::AwaitingAdminReply { user_id: 1 }
    );
    assert_eq!(store.pending(), 2);

    store.reset(1);
    assert_eq!(store.get(1), ConversationState::Idle);
    assert_eq!(store.pending(), 1);
}

#[test]
fn test_setting_idle_removes_entry() {
    let store = ConversationStore::new();
    store.set(1, ConversationState::AwaitingBlockTarget);
    store.set(1, ConversationState::Idle);
    assert_eq!(store.pending(), 0);
}

#[test]
fn test_states_are_per_user() {
    let store = ConversationStore::new();
    store.set(1, ConversationState::AwaitingUserMessage);
    assert_eq!(store.get(2), ConversationState::Idle);
}

#[test]
fn test_inbox_page_defaults_to_first() {
    let store = ConversationStore::new();
    assert_eq!(store.inbox_page(100), 1);
    store.set_inbox_page(100, 3);
    assert_eq!(store.inbox_page(100), 3);
    assert_eq!(store.inbox_page(200), 1);
}

#[test]
fn test_concurrent_updates_from_many_threads() {
    let store = Arc::new(ConversationStore::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                for j in 0..100 {
                    store.set(i * 1000 + j, ConversationState::AwaitingUserMessage);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.pending(), 800);
}
