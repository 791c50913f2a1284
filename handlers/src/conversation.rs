//! Per-user conversation state.
//!
//! The relay's flows are tiny state machines: a user composing a message for the administrator,
//! the administrator composing a reply to one user, or the administrator entering a user id to
//! block. [`ConversationStore`] keeps the current state per user id. It lives in memory only;
//! a restart drops every pending flow back to idle.

use dashmap::DashMap;

/// Where a user is in a multi-step flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversationState {
    #[default]
    Idle,
    /// A user pressed "write message"; their next text goes to the administrator.
    AwaitingUserMessage,
    /// The administrator pressed "reply"; their next text goes to `user_id`.
    AwaitingAdminReply { user_id: i64 },
    /// The administrator pressed "block user"; their next text is a user id.
    AwaitingBlockTarget,
}

impl ConversationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationState::Idle)
    }
}

/// Keyed state store: user id → [`ConversationState`], plus the last inbox page each
/// administrator viewed.
#[derive(Debug, Default)]
pub struct ConversationStore {
    states: DashMap<i64, ConversationState>,
    inbox_pages: DashMap<i64, i64>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; users without an entry are idle.
    pub fn get(&self, user_id: i64) -> ConversationState {
        self.states
            .get(&user_id)
            .map(|s| *s.value())
            .unwrap_or_default()
    }

    /// Sets the state. Setting `Idle` removes the entry so idle users cost nothing.
    pub fn set(&self, user_id: i64, state: ConversationState) {
        if state.is_idle() {
            self.states.remove(&user_id);
        } else {
            self.states.insert(user_id, state);
        }
    }

    /// Returns the user to idle (flow finished or abandoned by a new command).
    pub fn reset(&self, user_id: i64) {
        self.states.remove(&user_id);
    }

    /// Number of users in a non-idle state.
    pub fn pending(&self) -> usize {
        self.states.len()
    }

    /// Last inbox page the user viewed; 1 when none.
    pub fn inbox_page(&self, user_id: i64) -> i64 {
        self.inbox_pages
            .get(&user_id)
            .map(|p| *p.value())
            .unwrap_or(1)
    }

    pub fn set_inbox_page(&self, user_id: i64, page: i64) {
        self.inbox_pages.insert(user_id, page);
    }
}
