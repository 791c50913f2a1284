//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code talks to Telegram;
//! tests substitute another Bot impl.
//!
//! Telegram failures are classified here so handlers never look at transport errors: a
//! recipient who blocked the bot (or cannot be reached at all) becomes
//! [`RelayError::Unreachable`], an edit that changes nothing becomes [`RelayError::NotModified`].

use async_trait::async_trait;
use relay_core::{parse_message_id, Bot as CoreBot, Chat, InlineKeyboard, RelayError, Result};
use teloxide::payloads::{AnswerCallbackQuerySetters, EditMessageTextSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId,
};
use teloxide::{ApiError, RequestError};

/// Thin wrapper around teloxide::Bot that implements relay-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Converts a core keyboard into Telegram inline markup.
pub fn to_markup(keyboard: &InlineKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.text.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}

fn is_message_not_modified(description: &str) -> bool {
    description.contains("message is not modified")
}

fn is_unreachable(description: &str) -> bool {
    ["bot was blocked by the user", "user is deactivated", "chat not found"]
        .iter()
        .any(|pattern| description.contains(pattern))
}

/// Maps a teloxide error to the relay's error kinds.
pub fn classify_error(err: RequestError) -> RelayError {
    match &err {
        RequestError::Api(ApiError::MessageNotModified) => RelayError::NotModified,
        RequestError::Api(
            ApiError::BotBlocked
            | ApiError::UserDeactivated
            | ApiError::ChatNotFound
            | ApiError::CantInitiateConversation
            | ApiError::BotKicked
            | ApiError::BotKickedFromSupergroup,
        ) => RelayError::Unreachable(err.to_string()),
        _ => {
            let description = err.to_string();
            if is_message_not_modified(&description) {
                RelayError::NotModified
            } else if is_unreachable(&description) {
                RelayError::Unreachable(description)
            } else {
                RelayError::Bot(description)
            }
        }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat.id), text.to_string());
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_markup(keyboard));
        }
        request.await.map_err(classify_error)?;
        Ok(())
    }

    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        let id = parse_message_id(message_id)?;
        let mut request = self
            .bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text.to_string());
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_markup(keyboard));
        }
        request.await.map_err(classify_error)?;
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        if let Some(text) = text {
            request = request.text(text.to_string()).show_alert(show_alert);
        }
        request.await.map_err(classify_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::InlineButton;

    #[test]
    fn test_classify_api_errors() {
        assert!(classify_error(RequestError::Api(ApiError::BotBlocked)).is_unreachable());
        assert!(classify_error(RequestError::Api(ApiError::UserDeactivated)).is_unreachable());
        assert!(classify_error(RequestError::Api(ApiError::ChatNotFound)).is_unreachable());
        assert!(classify_error(RequestError::Api(ApiError::MessageNotModified)).is_not_modified());
    }

    #[test]
    fn test_classify_unknown_descriptions() {
        let not_modified = RequestError::Api(ApiError::Unknown(
            "Bad Request: message is not modified: specified new message content".to_string(),
        ));
        assert!(classify_error(not_modified).is_not_modified());

        let other = RequestError::Api(ApiError::Unknown("Bad Request: can't parse entities".to_string()));
        assert!(matches!(classify_error(other), RelayError::Bot(_)));
    }

    #[test]
    fn test_to_markup_keeps_layout() {
        let keyboard = InlineKeyboard::new()
            .row(vec![
                InlineButton::callback("A", "a"),
                InlineButton::callback("B", "b"),
            ])
            .row(vec![InlineButton::callback("C", "c")]);

        let markup = to_markup(&keyboard);

        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[1][0].text, "C");
    }
}
