//! Inbound event types: command, free text, or button press, each carrying the sender.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A button press on an inline keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callback {
    /// Transport id used to acknowledge the press.
    pub id: String,
    /// Callback data of the pressed button.
    pub data: String,
    /// Id of the message the keyboard is attached to; None when the message is no longer accessible.
    pub message_id: Option<String>,
    /// Current text of that message; used to skip edits that would change nothing.
    pub message_text: Option<String>,
}

/// What the event carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// `/name args`; name is lowercased and stripped of any `@botname` suffix.
    Command { name: String, args: String },
    Text(String),
    Callback(Callback),
}

impl EventKind {
    /// Classifies message text as a command (leading `/`) or free text.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim_start();
        if let Some(rest) = trimmed.strip_prefix('/') {
            let (head, args) = match rest.split_once(char::is_whitespace) {
                Some((head, args)) => (head, args.trim()),
                None => (rest, ""),
            };
            let name = head.split('@').next().unwrap_or(head);
            if !name.is_empty() {
                return EventKind::Command {
                    name: name.to_lowercase(),
                    args: args.to_string(),
                };
            }
        }
        EventKind::Text(text.to_string())
    }
}

/// A single inbound event with sender, chat and payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub kind: EventKind,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Free text, if this is a plain text message.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Command name, if this is a command.
    pub fn command(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Command { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn callback(&self) -> Option<&Callback> {
        match &self.kind {
            EventKind::Callback(cb) => Some(cb),
            _ => None,
        }
    }

    /// Callback data, if this is a button press.
    pub fn callback_data(&self) -> Option<&str> {
        self.callback().map(|cb| cb.data.as_str())
    }

    /// Short label for logs.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EventKind::Command { .. } => "command",
            EventKind::Text(_) => "text",
            EventKind::Callback(_) => "callback",
        }
    }
}
