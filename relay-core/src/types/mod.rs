//! Core types: user, chat, inbound event, inline keyboard, handler response, and Handler trait.
//!
//! One file per main type.

mod chat;
mod event;
mod handler;
mod keyboard;
mod response;
mod user;

pub use chat::Chat;
pub use event::{Callback, Event, EventKind};
pub use handler::{Handler, ToCoreEvent, ToCoreUser};
pub use keyboard::{InlineButton, InlineKeyboard};
pub use response::HandlerResponse;
pub use user::User;
