//! Application config: Telegram connection, administrator, database and log paths.
//! Loaded from a JSON file, then environment overrides, then the CLI token.

mod app_config;


pub use app_config::{AppConfig, DEFAULT_CONFIG_FILE, DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE};
