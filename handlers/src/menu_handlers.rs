//! `/start`, the main menu, the profile screen, and the catch-all for unhandled buttons.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{Event, Handler, HandlerError, HandlerResponse, Result, User};
use storage::UserRecord;
use tracing::{debug, info, instrument};

use crate::callback_data::{callback_action, CallbackAction};
use crate::context::{db_error, RelayContext};
use crate::keyboards::main_keyboard;
use crate::relay;
use crate::texts;

/// Registers `user` if unknown. The display name falls back to the handle, then the id.
pub(crate) async fn register(ctx: &RelayContext, user: &User) -> Result<()> {
    let mut full_name = user.full_name();
    if full_name.is_empty() {
        full_name = user
            .username
            .clone()
            .unwrap_or_else(|| user.id.to_string());
    }
    ctx.users
        .add_user(user.id, user.username.as_deref(), &full_name)
        .await
        .map_err(db_error)
}

/// `/start`: register, drop any pending flow, show the main menu.
pub struct StartHandler {
    ctx: Arc<RelayContext>,
}

impl StartHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        if event.command() != Some("start") {
            return Ok(HandlerResponse::Continue);
        }

        register(&self.ctx, &event.user).await?;
        self.ctx.conversations.reset(event.user.id);

        let keyboard = main_keyboard(self.ctx.is_admin(event.user.id));
        self.ctx
            .bot
            .reply_to(event, texts::WELCOME, Some(&keyboard))
            .await?;
        info!(user_id = event.user.id, "Started session");
        Ok(HandlerResponse::Stop)
    }
}

/// `main_menu`, `profile` and `ignore` buttons.
pub struct MenuHandler {
    ctx: Arc<RelayContext>,
}

impl MenuHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }

    async fn profile(&self, event: &Event) -> Result<UserRecord> {
        let users = &self.ctx.users;
        if let Some(user) = users.get_user(event.user.id).await.map_err(db_error)? {
            return Ok(user);
        }
        register(&self.ctx, &event.user).await?;
        users
            .get_user(event.user.id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| {
                HandlerError::State(format!("user {} missing after registration", event.user.id))
                    .into()
            })
    }
}

#[async_trait]
impl Handler for MenuHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let Some((callback, action)) = callback_action(event) else {
            return Ok(HandlerResponse::Continue);
        };
        let bot = self.ctx.bot.as_ref();
        let keyboard = main_keyboard(self.ctx.is_admin(event.user.id));

        match action {
            CallbackAction::MainMenu => {
                self.ctx.conversations.reset(event.user.id);
                relay::show(bot, event, texts::WELCOME, Some(&keyboard)).await?;
            }
            CallbackAction::Profile => {
                let user = self.profile(event).await?;
                relay::refresh(bot, event, &texts::profile(&user), Some(&keyboard)).await?;
            }
            CallbackAction::Ignore => relay::ack(bot, callback).await?,
            _ => return Ok(HandlerResponse::Continue),
        }
        Ok(HandlerResponse::Stop)
    }
}

/// Last in the chain: acknowledges buttons nobody handled and drops idle free text.
pub struct FallbackHandler {
    ctx: Arc<RelayContext>,
}

impl FallbackHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Handler for FallbackHandler {
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        if let Some(callback) = event.callback() {
            debug!(callback_data = %callback.data, "Unhandled callback");
            relay::ack(self.ctx.bot.as_ref(), callback).await?;
            return Ok(HandlerResponse::Stop);
        }
        debug!(user_id = event.user.id, kind = event.kind_name(), "Ignored event");
        Ok(HandlerResponse::Ignore)
    }
}
