//! Binary for the feedback relay bot.

use anyhow::Result;
use clap::Parser;
use feedback_bot::cli::{block_user, dialog_history, format_dialogs, format_history, list_dialogs};
use feedback_bot::{load_config, run_bot, Cli, Commands};

fn init_cli_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(config_path, token)?;
            run_bot(config).await
        }
        Commands::Dialogs => {
            init_cli_tracing();
            let config = load_config(config_path, None)?;
            println!("{}", format_dialogs(&list_dialogs(&config).await?));
            Ok(())
        }
        Commands::History { user, limit } => {
            init_cli_tracing();
            let config = load_config(config_path, None)?;
            let entries = dialog_history(&config, user, limit).await?;
            println!("{}", format_history(&entries, user, config.admin_id));
            Ok(())
        }
        Commands::Block { user } => {
            init_cli_tracing();
            let config = load_config(config_path, None)?;
            if block_user(&config, user).await? {
                println!("User {} blocked", user);
            } else {
                println!("User {} not found", user);
            }
            Ok(())
        }
    }
}
