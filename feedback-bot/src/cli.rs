//! CLI parser and the offline maintenance commands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use handlers::texts;
use std::path::PathBuf;
use storage::{DialogPartner, HistoryEntry, DEFAULT_HISTORY_LIMIT};
use tracing::info;

use crate::components::open_repositories;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "feedback-bot")]
#[command(about = "Telegram feedback relay: run the bot or inspect its database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON config file (defaults to ./config.json when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// List users who have a dialog with the administrator, most recent first.
    Dialogs,
    /// Print the latest messages of one dialog.
    History {
        #[arg(short, long)]
        user: i64,
        #[arg(short, long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: i64,
    },
    /// Block a user without going through Telegram.
    Block {
        #[arg(short, long)]
        user: i64,
    },
}

/// Load AppConfig from the config file and environment. If `token` is provided it overrides
/// BOT_TOKEN.
pub fn load_config(config: Option<&std::path::Path>, token: Option<String>) -> Result<AppConfig> {
    AppConfig::load(config, token)
}

pub async fn list_dialogs(config: &AppConfig) -> Result<Vec<DialogPartner>> {
    config.validate_admin()?;
    let (_, messages) = open_repositories(config).await?;
    Ok(messages.get_all_dialogs(config.admin_id).await?)
}

pub async fn dialog_history(config: &AppConfig, user_id: i64, limit: i64) -> Result<Vec<HistoryEntry>> {
    config.validate_admin()?;
    let (_, messages) = open_repositories(config).await?;
    Ok(messages
        .get_dialog_history(user_id, config.admin_id, limit.max(1), 0)
        .await?)
}

/// Returns whether the user was found.
pub async fn block_user(config: &AppConfig, user_id: i64) -> Result<bool> {
    config.validate_admin()?;
    if user_id == config.admin_id {
        anyhow::bail!("Refusing to block the administrator ({})", user_id);
    }
    let (users, _) = open_repositories(config).await?;
    let found = users.block_user(user_id).await?;
    info!(user_id = user_id, found = found, "Blocked user from CLI");
    Ok(found)
}

pub fn format_dialogs(dialogs: &[DialogPartner]) -> String {
    if dialogs.is_empty() {
        return "No dialogs yet".to_string();
    }
    dialogs
        .iter()
        .map(|d| format!("{}\t{}", d.user_id, texts::partner_label(d)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_history(entries: &[HistoryEntry], user_id: i64, admin_id: i64) -> String {
    if entries.is_empty() {
        return texts::DIALOG_EMPTY.to_string();
    }
    texts::admin_dialog(entries, user_id, admin_id)
}
