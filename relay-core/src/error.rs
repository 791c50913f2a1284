//! Error types for the relay core.
//!
//! [`RelayError`] is the top-level error; [`HandlerError`] covers handler-side inconsistencies.
//! `Unreachable` and `NotModified` are split out of `Bot` so callers can match on the two
//! platform conditions the relay tolerates.

use thiserror::Error;

/// Top-level error for the relay.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bot error: {0}")]
    Bot(String),

    /// The recipient cannot be reached (blocked the bot, deactivated, chat not found).
    #[error("Recipient unreachable: {0}")]
    Unreachable(String),

    /// An edit would leave the message text and markup unchanged.
    #[error("Message not modified")]
    NotModified,

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

impl RelayError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RelayError::Unreachable(_))
    }

    pub fn is_not_modified(&self) -> bool {
        matches!(self, RelayError::NotModified)
    }
}

/// Errors raised by handlers themselves rather than by storage or the platform.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Stored data disagrees with what the handler just wrote.
    #[error("State error: {0}")]
    State(String),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
