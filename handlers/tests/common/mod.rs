//! Shared fixtures for relay flow tests: a recording bot and a chain over a temp database.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use handler_chain::HandlerChain;
use handlers::{build_handler_chain, RelayContext};
use relay_core::{
    Bot, Callback, Chat, Event, EventKind, HandlerResponse, InlineKeyboard, RelayError, Result,
    User,
};
use storage::{MessageRepository, SqlitePoolManager, UserRepository};
use tempfile::TempDir;

pub const ADMIN_ID: i64 = 1000;

/// One outbound call made through [`MockBot`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Sent {
        chat_id: i64,
        text: String,
        keyboard: Option<InlineKeyboard>,
    },
    Edited {
        chat_id: i64,
        message_id: String,
        text: String,
        keyboard: Option<InlineKeyboard>,
    },
    Answered {
        callback_id: String,
        text: Option<String>,
        show_alert: bool,
    },
}

/// Records every call. Chats in `unreachable` fail with [`RelayError::Unreachable`]; with
/// `not_modified` set, every edit fails with [`RelayError::NotModified`].
#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<Outbound>>,
    unreachable: Mutex<HashSet<i64>>,
    not_modified: Mutex<bool>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unreachable(&self, chat_id: i64) {
        self.unreachable.lock().unwrap().insert(chat_id);
    }

    pub fn set_not_modified(&self, on: bool) {
        *self.not_modified.lock().unwrap() = on;
    }

    pub fn calls(&self) -> Vec<Outbound> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Texts sent (not edited) to `chat_id`, in order.
    pub fn sent_to(&self, chat_id: i64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Outbound::Sent { chat_id: id, text, .. } if id == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_sent_keyboard(&self, chat_id: i64) -> Option<InlineKeyboard> {
        self.calls().into_iter().rev().find_map(|c| match c {
            Outbound::Sent { chat_id: id, keyboard, .. } if id == chat_id => keyboard,
            _ => None,
        })
    }

    pub fn edits(&self) -> Vec<(String, Option<InlineKeyboard>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Outbound::Edited { text, keyboard, .. } => Some((text, keyboard)),
                _ => None,
            })
            .collect()
    }

    /// Popup texts shown via callback answers.
    pub fn alerts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Outbound::Answered {
                    text: Some(text),
                    show_alert: true,
                    ..
                } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn answered(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Outbound::Answered { .. }))
            .count()
    }

    fn check_reachable(&self, chat: &Chat) -> Result<()> {
        if self.unreachable.lock().unwrap().contains(&chat.id) {
            return Err(RelayError::Unreachable(format!(
                "bot was blocked by the user {}",
                chat.id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        self.check_reachable(chat)?;
        self.calls.lock().unwrap().push(Outbound::Sent {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        self.check_reachable(chat)?;
        if *self.not_modified.lock().unwrap() {
            return Err(RelayError::NotModified);
        }
        self.calls.lock().unwrap().push(Outbound::Edited {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(Outbound::Answered {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
            show_alert,
        });
        Ok(())
    }
}

/// Relay chain wired to a [`MockBot`] and a fresh database file.
pub struct Harness {
    pub bot: Arc<MockBot>,
    pub ctx: Arc<RelayContext>,
    pub chain: HandlerChain,
    _dir: TempDir,
}

impl Harness {
    pub async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.db");
        let pool = SqlitePoolManager::new(path.to_str().unwrap()).await.unwrap();
        let users = UserRepository::with_pool(pool.clone()).await.unwrap();
        let messages = MessageRepository::with_pool(pool).await.unwrap();

        let bot = Arc::new(MockBot::new());
        let ctx = Arc::new(RelayContext::new(bot.clone(), users, messages, ADMIN_ID));
        let chain = build_handler_chain(ctx.clone());

        Self {
            bot,
            ctx,
            chain,
            _dir: dir,
        }
    }

    pub async fn text(&self, user_id: i64, text: &str) -> HandlerResponse {
        self.chain
            .handle(&event(user_id, EventKind::from_text(text)))
            .await
            .unwrap()
    }

    /// Presses a button on message `"1"` whose current text is unknown.
    pub async fn press(&self, user_id: i64, data: &str) -> HandlerResponse {
        self.press_on(user_id, data, Some("1"), None).await
    }

    pub async fn press_on(
        &self,
        user_id: i64,
        data: &str,
        message_id: Option<&str>,
        message_text: Option<&str>,
    ) -> HandlerResponse {
        let callback = Callback {
            id: format!("cb-{}", data),
            data: data.to_string(),
            message_id: message_id.map(str::to_string),
            message_text: message_text.map(str::to_string),
        };
        self.chain
            .handle(&event(user_id, EventKind::Callback(callback)))
            .await
            .unwrap()
    }

    /// `/start` for a user with a handle derived from the id.
    pub async fn start(&self, user_id: i64) {
        self.text(user_id, "/start").await;
    }
}

pub fn user(user_id: i64) -> User {
    User {
        id: user_id,
        username: Some(format!("user{}", user_id)),
        first_name: Some("User".to_string()),
        last_name: Some(user_id.to_string()),
    }
}

pub fn event(user_id: i64, kind: EventKind) -> Event {
    Event {
        id: format!("evt-{}", user_id),
        user: user(user_id),
        chat: Chat::private(user_id),
        kind,
        created_at: Utc::now(),
    }
}
