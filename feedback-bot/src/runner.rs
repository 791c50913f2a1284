use anyhow::Result;
use relay_core::{init_tracing, Bot};
use relay_telegram::{build_bot, run_dispatcher, TelegramBotAdapter};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::components::build_components;
use crate::config::AppConfig;

/// Main entry: validate config, init logging, build components, then dispatch updates until
/// Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: AppConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database = %config.database_path(),
        admin_id = config.admin_id,
        custom_api_url = config.telegram_api_url.is_some(),
        "Initializing bot"
    );

    let teloxide_bot: teloxide::Bot =
        build_bot(&config.bot_token, config.telegram_api_url.as_deref())?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let components = build_components(&config, bot).await?;

    info!("Bot started successfully");
    run_dispatcher(teloxide_bot, components.handler_chain).await
}
