//! Administrator side: the paginated inbox, single dialogs, replies and blocking.
//!
//! Role checks happen earlier in the chain (see [`crate::AccessGuardHandler`]); the text steps
//! below are only reachable from states that the guarded buttons set.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{Chat, Event, Handler, HandlerResponse, Result};
use storage::DEFAULT_HISTORY_LIMIT;
use tracing::{info, instrument, warn};

use crate::callback_data::{callback_action, CallbackAction};
use crate::context::{db_error, RelayContext};
use crate::conversation::ConversationState;
use crate::keyboards::{dialog_keyboard, inbox_keyboard, main_keyboard};
use crate::pagination::{paginate, PAGE_SIZE};
use crate::relay;
use crate::texts;

/// `all_dialogs` and `page_{n}`.
pub struct InboxHandler {
    ctx: Arc<RelayContext>,
}

impl InboxHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }

    async fn render(&self, event: &Event, requested: i64) -> Result<()> {
        let dialogs = self
            .ctx
            .messages
            .get_all_dialogs(self.ctx.admin_id)
            .await
            .map_err(db_error)?;
        let page = paginate(&dialogs, requested, PAGE_SIZE);

        self.ctx
            .conversations
            .set_inbox_page(event.user.id, page.number);
        info!(
            requested = requested,
            page = page.number,
            total_pages = page.total_pages,
            dialogs = dialogs.len(),
            "Rendering inbox"
        );

        let keyboard = inbox_keyboard(&page);
        relay::show(self.ctx.bot.as_ref(), event, texts::INBOX_TITLE, Some(&keyboard)).await
    }
}

#[async_trait]
impl Handler for InboxHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let requested = match callback_action(event) {
            Some((_, CallbackAction::AllDialogs)) => {
                self.ctx.conversations.inbox_page(event.user.id)
            }
            Some((_, CallbackAction::Page(n))) => n,
            _ => return Ok(HandlerResponse::Continue),
        };
        self.render(event, requested).await?;
        Ok(HandlerResponse::Stop)
    }
}

/// `dialog_{id}`: the last messages with one user.
pub struct DialogHandler {
    ctx: Arc<RelayContext>,
}

impl DialogHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Handler for DialogHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Some((callback, CallbackAction::Dialog(user_id))) = callback_action(event) else {
            return Ok(HandlerResponse::Continue);
        };
        let ctx = &self.ctx;

        let history = ctx
            .messages
            .get_dialog_history(user_id, ctx.admin_id, DEFAULT_HISTORY_LIMIT, 0)
            .await
            .map_err(db_error)?;
        if history.is_empty() {
            relay::alert(ctx.bot.as_ref(), callback, texts::DIALOG_EMPTY).await?;
            return Ok(HandlerResponse::Stop);
        }

        let text = texts::admin_dialog(&history, user_id, ctx.admin_id);
        let keyboard = dialog_keyboard(user_id);
        relay::show(ctx.bot.as_ref(), event, &text, Some(&keyboard)).await?;
        Ok(HandlerResponse::Stop)
    }
}

/// `reply_{id}` and the reply text that follows it.
pub struct ReplyHandler {
    ctx: Arc<RelayContext>,
}

impl ReplyHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }

    async fn submit(&self, event: &Event, user_id: i64, body: &str) -> Result<()> {
        let ctx = &self.ctx;
        let record = ctx
            .messages
            .save(ctx.admin_id, user_id, body)
            .await
            .map_err(db_error)?;
        ctx.conversations.reset(event.user.id);

        let keyboard = main_keyboard(true);
        ctx.bot
            .reply_to(event, texts::REPLY_SENT, Some(&keyboard))
            .await?;

        let delivered = relay::deliver(
            ctx.bot.as_ref(),
            &Chat::private(user_id),
            &texts::reply_for_user(&record.body),
            Some(&main_keyboard(false)),
        )
        .await?;
        info!(
            message_id = record.id,
            user_id = user_id,
            delivered = delivered,
            "Relayed reply to user"
        );
        Ok(())
    }
}

#[async_trait]
impl Handler for ReplyHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        if let Some((_, CallbackAction::Reply(user_id))) = callback_action(event) {
            self.ctx
                .conversations
                .set(event.user.id, ConversationState::AwaitingAdminReply { user_id });
            relay::show(self.ctx.bot.as_ref(), event, texts::ASK_REPLY, None).await?;
            return Ok(HandlerResponse::Stop);
        }

        match (event.text(), self.ctx.conversations.get(event.user.id)) {
            (Some(body), ConversationState::AwaitingAdminReply { user_id })
                if self.ctx.is_admin(event.user.id) =>
            {
                self.submit(event, user_id, body).await?;
                Ok(HandlerResponse::Stop)
            }
            _ => Ok(HandlerResponse::Continue),
        }
    }
}

/// `block_user` (asks for an id), `block_{id}` (blocks directly) and the id typed after
/// `block_user`.
pub struct BlockHandler {
    ctx: Arc<RelayContext>,
}

impl BlockHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }

    /// Sets the flag and drops any flow the target was in. Returns whether the user exists.
    async fn block(&self, user_id: i64) -> Result<bool> {
        let found = self.ctx.users.block_user(user_id).await.map_err(db_error)?;
        if found {
            self.ctx.conversations.reset(user_id);
            info!(target_user_id = user_id, "User blocked");
        } else {
            warn!(target_user_id = user_id, "Block requested for unknown user");
        }
        Ok(found)
    }

    async fn submit(&self, event: &Event, input: &str) -> Result<()> {
        let ctx = &self.ctx;
        let target = match input.trim().parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                return ctx.bot.reply_to(event, texts::INVALID_USER_ID, None).await;
            }
        };
        if ctx.is_admin(target) {
            return ctx.bot.reply_to(event, texts::CANNOT_BLOCK_SELF, None).await;
        }

        let found = self.block(target).await?;
        ctx.conversations.reset(event.user.id);
        let keyboard = main_keyboard(true);
        ctx.bot
            .reply_to(event, &texts::block_result(target, found), Some(&keyboard))
            .await
    }
}

#[async_trait]
impl Handler for BlockHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let bot = self.ctx.bot.as_ref();
        match callback_action(event) {
            Some((_, CallbackAction::BlockUser)) => {
                self.ctx
                    .conversations
                    .set(event.user.id, ConversationState::AwaitingBlockTarget);
                relay::show(bot, event, texts::ASK_BLOCK_TARGET, None).await?;
                return Ok(HandlerResponse::Stop);
            }
            Some((callback, CallbackAction::Block(target))) => {
                if self.ctx.is_admin(target) {
                    relay::alert(bot, callback, texts::CANNOT_BLOCK_SELF).await?;
                } else {
                    let found = self.block(target).await?;
                    let keyboard = main_keyboard(true);
                    relay::show(bot, event, &texts::block_result(target, found), Some(&keyboard))
                        .await?;
                }
                return Ok(HandlerResponse::Stop);
            }
            _ => {}
        }

        match (event.text(), self.ctx.conversations.get(event.user.id)) {
            (Some(input), ConversationState::AwaitingBlockTarget)
                if self.ctx.is_admin(event.user.id) =>
            {
                self.submit(event, input).await?;
                Ok(HandlerResponse::Stop)
            }
            _ => Ok(HandlerResponse::Continue),
        }
    }
}
