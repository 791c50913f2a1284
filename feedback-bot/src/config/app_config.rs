use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_DATABASE_URL: &str = "./feedback.db";
pub const DEFAULT_LOG_FILE: &str = "logs/feedback-bot.log";

/// On-disk shape of `config.json`. Keys match the environment variable names.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "BOT_TOKEN")]
    bot_token: Option<String>,
    #[serde(rename = "ADMIN_ID")]
    admin_id: Option<i64>,
    #[serde(rename = "DATABASE_URL")]
    database_url: Option<String>,
    #[serde(rename = "LOG_FILE")]
    log_file: Option<String>,
    #[serde(rename = "TELEGRAM_API_URL")]
    telegram_api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// ADMIN_ID: the single recipient of user messages
    pub admin_id: i64,
    /// SQLite file path; `sqlite:` and `file:` prefixes are accepted
    pub database_url: String,
    pub log_file: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
}

impl AppConfig {
    /// Loads `config_path` (or `config.json` when present), then applies environment overrides.
    /// `token` overrides both.
    pub fn load(config_path: Option<&Path>, token: Option<String>) -> Result<Self> {
        let file = match config_path {
            Some(path) => read_config_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => ConfigFile::default(),
        };

        let admin_id = match env::var("ADMIN_ID") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<i64>()
                    .with_context(|| format!("ADMIN_ID is not an integer: {}", raw))?,
            ),
            Err(_) => file.admin_id,
        };

        let bot_token = token
            .or_else(|| env::var("BOT_TOKEN").ok())
            .or(file.bot_token)
            .unwrap_or_default();
        let database_url = env::var("DATABASE_URL")
            .ok()
            .or(file.database_url)
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE")
            .ok()
            .or(file.log_file)
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok()
            .or(file.telegram_api_url);

        Ok(Self {
            bot_token,
            admin_id: admin_id.unwrap_or_default(),
            database_url,
            log_file,
            telegram_api_url,
        })
    }

    /// Everything the running bot needs: token, administrator and a valid API URL if set.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is not set (config file, environment or --token)");
        }
        self.validate_admin()?;
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    /// Offline commands only need the administrator id.
    pub fn validate_admin(&self) -> Result<()> {
        if self.admin_id <= 0 {
            anyhow::bail!("ADMIN_ID must be a positive Telegram user id, got {}", self.admin_id);
        }
        Ok(())
    }

    /// Database file path with any URL scheme prefix removed.
    pub fn database_path(&self) -> &str {
        let url = self.database_url.as_str();
        ["sqlite://", "sqlite:", "file:"]
            .iter()
            .find_map(|prefix| url.strip_prefix(prefix))
            .unwrap_or(url)
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
