//! # feedback-bot
//!
//! Telegram feedback relay application: config loading, component assembly, the long-polling
//! runner and a CLI with offline database commands.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_components, open_repositories, RelayComponents};
pub use config::AppConfig;
pub use runner::run_bot;
