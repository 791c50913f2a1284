//! Handlers for event logging and role checks on buttons.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{Event, EventKind, Handler, HandlerResponse, Result};
use tracing::{debug, info, instrument, warn};

use crate::callback_data::callback_action;
use crate::context::RelayContext;
use crate::relay;
use crate::texts;

/// Logs each event in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, event))]
    async fn before(&self, event: &Event) -> Result<bool> {
        match &event.kind {
            EventKind::Command { name, .. } => info!(
                user_id = event.user.id,
                username = %event.user.username.as_deref().unwrap_or("unknown"),
                command = %name,
                "Received command"
            ),
            EventKind::Text(text) => info!(
                user_id = event.user.id,
                username = %event.user.username.as_deref().unwrap_or("unknown"),
                chars = text.chars().count(),
                "Received text"
            ),
            EventKind::Callback(cb) => info!(
                user_id = event.user.id,
                username = %event.user.username.as_deref().unwrap_or("unknown"),
                callback_data = %cb.data,
                "Received callback"
            ),
        }
        Ok(true)
    }

    #[instrument(skip(self, event, response))]
    async fn after(&self, event: &Event, response: &HandlerResponse) -> Result<()> {
        debug!(
            event_id = %event.id,
            kind = event.kind_name(),
            response = ?response,
            "Processed event"
        );
        Ok(())
    }
}

/// Stops the chain when a button is pressed by the wrong role. Administrator buttons pressed by
/// anyone else, and user-only buttons pressed by the administrator, get an alert.
pub struct AccessGuardHandler {
    ctx: Arc<RelayContext>,
}

impl AccessGuardHandler {
    pub fn new(ctx: Arc<RelayContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Handler for AccessGuardHandler {
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    async fn before(&self, event: &Event) -> Result<bool> {
        let Some((callback, action)) = callback_action(event) else {
            return Ok(true);
        };
        let is_admin = self.ctx.is_admin(event.user.id);

        if action.is_admin_only() && !is_admin {
            warn!(
                user_id = event.user.id,
                callback_data = %callback.data,
                "Unauthorized admin action"
            );
            relay::alert(self.ctx.bot.as_ref(), callback, texts::INSUFFICIENT_RIGHTS).await?;
            return Ok(false);
        }
        if action.is_user_only() && is_admin {
            debug!(callback_data = %callback.data, "User-only action pressed by administrator");
            relay::alert(self.ctx.bot.as_ref(), callback, texts::USERS_ONLY).await?;
            return Ok(false);
        }
        Ok(true)
    }
}
