//! Dispatcher: converts teloxide messages and callback queries to core events and passes them to
//! the HandlerChain. Updates from one chat are handled in order; different chats run concurrently.

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use relay_core::{Event, ToCoreEvent};
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message, Update};
use tracing::{debug, error, info, instrument};

use crate::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Creates a teloxide Bot, pointed at `api_url` when one is given (e.g. a local Bot API server
/// or a test double).
pub fn build_bot(token: &str, api_url: Option<&str>) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .with_context(|| format!("Invalid Telegram API URL: {}", url))?;
            info!(api_url = %url, "Using custom Telegram API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

async fn dispatch_event(chain: &HandlerChain, event: Option<Event>) {
    let Some(event) = event else {
        debug!("Skipped update without text or callback data");
        return;
    };
    if let Err(e) = chain.handle(&event).await {
        error!(
            error = %e,
            user_id = event.user.id,
            chat_id = event.chat.id,
            kind = event.kind_name(),
            "Handler chain failed"
        );
    }
}

async fn on_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    dispatch_event(&chain, TelegramMessageWrapper(&msg).to_core()).await;
    Ok(())
}

async fn on_callback(q: CallbackQuery, chain: HandlerChain) -> ResponseResult<()> {
    dispatch_event(&chain, TelegramCallbackWrapper(&q).to_core()).await;
    Ok(())
}

/// Runs long polling until Ctrl-C. Chain errors are logged and never stop the dispatcher.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or("unknown"),
            "Connected to Telegram"
        ),
        Err(e) => error!(error = %e, "getMe failed; starting dispatcher anyway"),
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!(handlers = handler_chain.len(), "Starting dispatcher");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
