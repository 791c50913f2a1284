//! Shared dependencies of every relay handler.

use std::sync::Arc;

use relay_core::{Bot, Chat, RelayError};
use storage::{MessageRepository, StorageError, UserRepository};

use crate::conversation::ConversationStore;

pub struct RelayContext {
    pub bot: Arc<dyn Bot>,
    pub users: UserRepository,
    pub messages: MessageRepository,
    pub conversations: ConversationStore,
    pub admin_id: i64,
}

impl RelayContext {
    pub fn new(
        bot: Arc<dyn Bot>,
        users: UserRepository,
        messages: MessageRepository,
        admin_id: i64,
    ) -> Self {
        Self {
            bot,
            users,
            messages,
            conversations: ConversationStore::new(),
            admin_id,
        }
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        user_id == self.admin_id
    }

    /// The administrator's private chat.
    pub fn admin_chat(&self) -> Chat {
        Chat::private(self.admin_id)
    }
}

pub(crate) fn db_error(err: StorageError) -> RelayError {
    RelayError::Database(err.to_string())
}
