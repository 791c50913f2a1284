use std::sync::Arc;

use handler_chain::HandlerChain;

use crate::admin_handlers::{BlockHandler, DialogHandler, InboxHandler, ReplyHandler};
use crate::context::RelayContext;
use crate::logging_guard::{AccessGuardHandler, LoggingHandler};
use crate::menu_handlers::{FallbackHandler, MenuHandler, StartHandler};
use crate::user_handlers::{ComposeHandler, HistoryHandler};

/// Assembles the relay's handler chain. Logging and the role guard run first, the fallback
/// last; each flow handler stops the chain once it has taken an event.
pub fn build_handler_chain(ctx: Arc<RelayContext>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AccessGuardHandler::new(ctx.clone())))
        .add_handler(Arc::new(StartHandler::new(ctx.clone())))
        .add_handler(Arc::new(MenuHandler::new(ctx.clone())))
        .add_handler(Arc::new(HistoryHandler::new(ctx.clone())))
        .add_handler(Arc::new(ComposeHandler::new(ctx.clone())))
        .add_handler(Arc::new(InboxHandler::new(ctx.clone())))
        .add_handler(Arc::new(DialogHandler::new(ctx.clone())))
        .add_handler(Arc::new(ReplyHandler::new(ctx.clone())))
        .add_handler(Arc::new(BlockHandler::new(ctx.clone())))
        .add_handler(Arc::new(FallbackHandler::new(ctx)))
}
