//! # Handlers for the feedback relay
//!
//! This crate provides the relay's handlers: logging and role checks, the user flows (history,
//! writing to the administrator) and the administrator flows (paginated inbox, dialogs, replies,
//! blocking). Per-user conversation state lives in [`ConversationStore`].

mod admin_handlers;
mod callback_data;
mod chain;
mod context;
mod conversation;
mod keyboards;
mod logging_guard;
mod menu_handlers;
mod pagination;
mod relay;
pub mod texts;
mod user_handlers;

#[cfg(test)]
mod test;

pub use admin_handlers::{BlockHandler, DialogHandler, InboxHandler, ReplyHandler};
pub use callback_data::{callback_action, CallbackAction};
pub use chain::build_handler_chain;
pub use context::RelayContext;
pub use conversation::{ConversationState, ConversationStore};
pub use keyboards::{admin_message_keyboard, dialog_keyboard, inbox_keyboard, main_keyboard};
pub use logging_guard::{AccessGuardHandler, LoggingHandler};
pub use menu_handlers::{FallbackHandler, MenuHandler, StartHandler};
pub use pagination::{clamp_page, paginate, total_pages, Page, PAGE_SIZE};
pub use relay::{ack, alert, deliver, refresh, show};
pub use user_handlers::{ComposeHandler, HistoryHandler};
