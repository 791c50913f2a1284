//! Outbound helpers that absorb the two expected delivery failures: a recipient who blocked
//! the bot, and an edit that would not change the message.

use relay_core::{Bot, Callback, Chat, Event, InlineKeyboard, Result};
use tracing::{debug, warn};

use crate::texts;

/// Sends `text` to `chat`. An unreachable recipient is logged and reported as `Ok(false)`;
/// every other failure propagates.
pub async fn deliver(
    bot: &dyn Bot,
    chat: &Chat,
    text: &str,
    keyboard: Option<&InlineKeyboard>,
) -> Result<bool> {
    match bot.send_message(chat, &texts::truncate(text), keyboard).await {
        Ok(()) => Ok(true),
        Err(e) if e.is_unreachable() => {
            warn!(chat_id = chat.id, error = %e, "Recipient unreachable, message not delivered");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Renders a screen in place of the message whose button was pressed, then acknowledges the
/// press. Falls back to a new message when the pressed message is no longer editable, and to
/// a plain send for non-callback events. An edit that changes nothing is absorbed.
pub async fn show(
    bot: &dyn Bot,
    event: &Event,
    text: &str,
    keyboard: Option<&InlineKeyboard>,
) -> Result<()> {
    render(bot, event, text, keyboard, false).await
}

/// Like [`show`], but skips the edit when the pressed message already reads `text`. Only for
/// screens whose keyboard is fixed for the caller, so equal text means an equal screen.
pub async fn refresh(
    bot: &dyn Bot,
    event: &Event,
    text: &str,
    keyboard: Option<&InlineKeyboard>,
) -> Result<()> {
    render(bot, event, text, keyboard, true).await
}

async fn render(
    bot: &dyn Bot,
    event: &Event,
    text: &str,
    keyboard: Option<&InlineKeyboard>,
    skip_same_text: bool,
) -> Result<()> {
    let text = texts::truncate(text);
    let Some(callback) = event.callback() else {
        deliver(bot, &event.chat, &text, keyboard).await?;
        return Ok(());
    };

    if skip_same_text && callback.message_text.as_deref() == Some(text.as_str()) {
        debug!(chat_id = event.chat.id, "Screen unchanged, skipping edit");
    } else if let Some(message_id) = callback.message_id.as_deref() {
        match bot.edit_message(&event.chat, message_id, &text, keyboard).await {
            Ok(()) => {}
            Err(e) if e.is_not_modified() => {
                debug!(chat_id = event.chat.id, "Message not modified");
            }
            Err(e) if e.is_unreachable() => {
                warn!(chat_id = event.chat.id, error = %e, "Recipient unreachable, edit dropped");
            }
            Err(e) => return Err(e),
        }
    } else {
        deliver(bot, &event.chat, &text, keyboard).await?;
    }

    ack(bot, callback).await
}

/// Answers a button press with a popup.
pub async fn alert(bot: &dyn Bot, callback: &Callback, text: &str) -> Result<()> {
    bot.answer_callback(&callback.id, Some(text), true).await
}

/// Stops the client's loading indicator. A failed acknowledgement is only logged; the press
/// has already been handled.
pub async fn ack(bot: &dyn Bot, callback: &Callback) -> Result<()> {
    if let Err(e) = bot.answer_callback(&callback.id, None, false).await {
        warn!(callback_id = %callback.id, error = %e, "Failed to acknowledge callback");
    }
    Ok(())
}
