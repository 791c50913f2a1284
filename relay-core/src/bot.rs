//! Bot abstraction for sending and editing messages and answering button presses.
//!
//! [`Bot`] is transport-agnostic; relay-telegram implements it via teloxide and tests
//! substitute a recording implementation.

use crate::error::{RelayError, Result};
use crate::types::{Chat, Event, InlineKeyboard};
use async_trait::async_trait;

/// Outbound side of the relay. Implementations map to a transport (e.g. Telegram).
///
/// Implementations must report a blocked or vanished recipient as
/// [`RelayError::Unreachable`] and an edit with identical content as
/// [`RelayError::NotModified`].
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat, optionally with an inline keyboard.
    async fn send_message(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()>;

    /// Replaces the text (and keyboard) of an already-sent message. `message_id` is transport-specific.
    /// Passing `None` as keyboard removes any existing keyboard.
    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()>;

    /// Acknowledges a button press, optionally showing a notification or alert.
    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()>;

    /// Sends a message to the chat the event came from.
    async fn reply_to(
        &self,
        event: &Event,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<()> {
        self.send_message(&event.chat, text, keyboard).await
    }
}

/// Parses a message id string into an i32. Used by edit_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| RelayError::Bot(format!("Invalid message_id for edit: {}", s)))
}
