//! Adapters from Telegram (teloxide) types to relay_core types.
//! Depends only on teloxide and relay_core type definitions.

use relay_core::{Callback, Chat, Event, EventKind, ToCoreEvent, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn to_core_chat(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_group() {
        "group"
    } else {
        "channel"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

/// Wraps a teloxide Message. Only text messages with a sender become events; commands are
/// recognised by their leading `/`.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreEvent for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Option<Event> {
        let msg = self.0;
        let from = msg.from.as_ref()?;
        let text = msg.text()?;

        Some(Event {
            id: msg.id.to_string(),
            user: TelegramUserWrapper(from).to_core(),
            chat: to_core_chat(&msg.chat),
            kind: EventKind::from_text(text),
            created_at: msg.date,
        })
    }
}

/// Wraps a teloxide CallbackQuery. Queries without data (game buttons) are not events.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreEvent for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Option<Event> {
        let q = self.0;
        let data = q.data.clone()?;
        let user = TelegramUserWrapper(&q.from).to_core();

        // Private chat ids equal user ids, so a press on an inaccessible message still has a
        // chat to answer in.
        let chat = q
            .message
            .as_ref()
            .map(|m| to_core_chat(m.chat()))
            .unwrap_or_else(|| Chat::private(user.id));

        Some(Event {
            id: q.id.0.clone(),
            chat,
            kind: EventKind::Callback(Callback {
                id: q.id.0.clone(),
                data,
                message_id: q.message.as_ref().map(|m| m.id().to_string()),
                message_text: q
                    .regular_message()
                    .and_then(|m| m.text())
                    .map(str::to_string),
            }),
            user,
            created_at: chrono::Utc::now(),
        })
    }
}
