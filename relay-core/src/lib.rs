//! # relay-core
//!
//! Core types and traits for the feedback relay: [`Bot`], [`Handler`], inbound [`Event`]s,
//! inline keyboards, user and chat types, and tracing initialization. Transport-agnostic;
//! used by relay-telegram, handler-chain and handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{HandlerError, RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    Callback, Chat, Event, EventKind, Handler, HandlerResponse, InlineButton, InlineKeyboard,
    ToCoreEvent, ToCoreUser, User,
};
