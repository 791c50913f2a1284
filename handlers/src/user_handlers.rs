//! User side: reading the dialog history and writing to the administrator.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{Event, Handler, HandlerResponse, Result};
use storage::{SendOutcome, DEFAULT_HISTORY_LIMIT};
use tracing::{info, instrument};

use crate::callback_data::{callback_action, CallbackAction};
use crate::context::{db_error, RelayContext};
use crate::conversation::ConversationState;
use crate::keyboards::{admin_message_keyboard, main_keyboard};
use crate::menu_handlers::register;
use crate::relay;
use crate::texts;

/// `dialog_history`: the last messages between the user and the administrator.
pub struct HistoryHandler {
    ctx: Arc<RelayContext>,
}

impl HistoryHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Handler for HistoryHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Some((_, CallbackAction::DialogHistory)) = callback_action(event) else {
            return Ok(HandlerResponse::Continue);
        };

        let user_id = event.user.id;
        let history = self
            .ctx
            .messages
            .get_dialog_history(user_id, self.ctx.admin_id, DEFAULT_HISTORY_LIMIT, 0)
            .await
            .map_err(db_error)?;

        let text = if history.is_empty() {
            texts::HISTORY_EMPTY.to_string()
        } else {
            texts::user_history(&history, user_id)
        };
        let keyboard = main_keyboard(false);
        relay::refresh(self.ctx.bot.as_ref(), event, &text, Some(&keyboard)).await?;
        Ok(HandlerResponse::Stop)
    }
}

/// `write_message` and the text that follows it.
///
/// The text is persisted before anything is sent, so the administrator's inbox has it even if
/// the relay fails. A sender blocked in the meantime gets a refusal and nothing is stored.
pub struct ComposeHandler {
    ctx: Arc<RelayContext>,
}

impl ComposeHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }

    async fn start(&self, event: &Event) -> Result<()> {
        let bot = self.ctx.bot.as_ref();
        let user_id = event.user.id;
        let Some(callback) = event.callback() else {
            return Ok(());
        };

        if self.ctx.users.is_blocked(user_id).await.map_err(db_error)? {
            info!(user_id = user_id, "Blocked user tried to write");
            return relay::alert(bot, callback, texts::YOU_ARE_BLOCKED).await;
        }

        self.ctx
            .conversations
            .set(user_id, ConversationState::AwaitingUserMessage);
        relay::show(bot, event, texts::ASK_MESSAGE, None).await
    }

    async fn submit(&self, event: &Event, body: &str) -> Result<()> {
        let ctx = &self.ctx;
        let user = &event.user;

        register(ctx, user).await?;
        let outcome = ctx
            .messages
            .save_user_message(user.id, ctx.admin_id, body)
            .await
            .map_err(db_error)?;
        ctx.conversations.reset(user.id);

        let record = match outcome {
            SendOutcome::Blocked => {
                return ctx.bot.reply_to(event, texts::YOU_ARE_BLOCKED, None).await;
            }
            SendOutcome::Sent(record) => record,
        };

        let keyboard = main_keyboard(false);
        ctx.bot
            .reply_to(event, texts::MESSAGE_SENT, Some(&keyboard))
            .await?;

        let notice = texts::new_message_for_admin(user.username.as_deref(), user.id, &record.body);
        let delivered = relay::deliver(
            ctx.bot.as_ref(),
            &ctx.admin_chat(),
            &notice,
            Some(&admin_message_keyboard(user.id)),
        )
        .await?;
        info!(
            message_id = record.id,
            user_id = user.id,
            delivered = delivered,
            "Relayed message to administrator"
        );
        Ok(())
    }
}

#[async_trait]
impl Handler for ComposeHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        if let Some((_, CallbackAction::WriteMessage)) = callback_action(event) {
            self.start(event).await?;
            return Ok(HandlerResponse::Stop);
        }

        match (event.text(), self.ctx.conversations.get(event.user.id)) {
            (Some(body), ConversationState::AwaitingUserMessage) => {
                self.submit(event, body).await?;
                Ok(HandlerResponse::Stop)
            }
            _ => Ok(HandlerResponse::Continue),
        }
    }
}
