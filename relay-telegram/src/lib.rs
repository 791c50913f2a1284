//! # relay-telegram
//!
//! Telegram layer of the feedback relay: teloxide → core event adapters, the [`relay_core::Bot`]
//! implementation with delivery-error classification, and the update dispatcher.
//! Handles only Telegram connectivity and handler-chain execution; no persistence or flow logic.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{classify_error, to_markup, TelegramBotAdapter};
pub use runner::{build_bot, run_dispatcher};
