//! Component factory: builds storage, relay context and handler chain from config. Isolates
//! assembly from the runner so tests can inject their own Bot.

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use handlers::{build_handler_chain, RelayContext};
use relay_core::Bot;
use std::sync::Arc;
use storage::{MessageRepository, SqlitePoolManager, UserRepository};
use tracing::{error, info, instrument};

use crate::config::AppConfig;

/// Everything the dispatcher needs.
pub struct RelayComponents {
    pub context: Arc<RelayContext>,
    pub handler_chain: HandlerChain,
}

/// Opens the database (creating file and tables if missing) and returns both repositories over
/// one shared pool.
#[instrument(skip(config), fields(database = %config.database_path()))]
pub async fn open_repositories(config: &AppConfig) -> Result<(UserRepository, MessageRepository)> {
    let path = config.database_path();
    let pool = SqlitePoolManager::new(path).await.map_err(|e| {
        error!(error = %e, database = %path, "Failed to open database");
        anyhow::anyhow!("Failed to open database {}: {}", path, e)
    })?;

    let users = UserRepository::with_pool(pool.clone())
        .await
        .context("Failed to initialize user storage")?;
    let messages = MessageRepository::with_pool(pool)
        .await
        .context("Failed to initialize message storage")?;
    Ok((users, messages))
}

/// Builds the relay context and handler chain around `bot`.
#[instrument(skip(config, bot))]
pub async fn build_components(config: &AppConfig, bot: Arc<dyn Bot>) -> Result<RelayComponents> {
    let (users, messages) = open_repositories(config).await?;
    let context = Arc::new(RelayContext::new(bot, users, messages, config.admin_id));
    let handler_chain = build_handler_chain(context.clone());

    info!(
        admin_id = config.admin_id,
        handlers = handler_chain.len(),
        "Relay components ready"
    );
    Ok(RelayComponents {
        context,
        handler_chain,
    })
}
