//! Configuration types for the homework watcher

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Fixed period between the start of one tick's sleep and the next fetch
    #[serde(default = "default_retry_interval", with = "humantime_serde")]
    pub retry_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: CredentialsConfig::default(),
            api: ApiConfig::default(),
            telegram: TelegramConfig::default(),
            retry_interval: default_retry_interval(),
        }
    }
}

/// Secrets, normally left empty in the file and taken from the environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub practicum_token: Option<String>,
    #[serde(default)]
    pub telegram_token: Option<String>,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
}

/// Review status API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Initial watermark in Unix seconds; defaults to the start time
    #[serde(default)]
    pub from_date: Option<i64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout: default_request_timeout(),
            from_date: None,
        }
    }
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
        }
    }
}

/// The three credentials required before the watch loop may start
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Reject settings the watch loop cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.retry_interval.is_zero() {
            return Err(crate::WatcherError::Config(
                "retry_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Fill absent credentials from the process environment
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_from(|name| std::env::var(name).ok());
    }

    /// Fill absent or empty credentials using `lookup`
    pub fn resolve_secrets_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let credentials = &mut self.credentials;
        for (slot, var) in [
            (&mut credentials.practicum_token, PRACTICUM_TOKEN_VAR),
            (&mut credentials.telegram_token, TELEGRAM_TOKEN_VAR),
            (&mut credentials.telegram_chat_id, TELEGRAM_CHAT_ID_VAR),
        ] {
            if is_blank(slot) {
                if let Some(value) = lookup(var) {
                    tracing::debug!("Resolved {} from environment", var);
                    *slot = Some(value);
                }
            }
        }
    }

    /// Check that every credential is present
    pub fn credentials(&self) -> crate::Result<Credentials> {
        let c = &self.credentials;
        let missing: Vec<String> = [
            (&c.practicum_token, PRACTICUM_TOKEN_VAR),
            (&c.telegram_token, TELEGRAM_TOKEN_VAR),
            (&c.telegram_chat_id, TELEGRAM_CHAT_ID_VAR),
        ]
        .into_iter()
        .filter(|(value, _)| is_blank(value))
        .map(|(_, var)| var.to_string())
        .collect();

        if !missing.is_empty() {
            return Err(crate::WatcherError::MissingCredentials(missing));
        }

        Ok(Credentials {
            practicum_token: c.practicum_token.clone().unwrap_or_default(),
            telegram_token: c.telegram_token.clone().unwrap_or_default(),
            telegram_chat_id: c.telegram_chat_id.clone().unwrap_or_default(),
        })
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_interval() -> Duration {
    Duration::from_secs(600)
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::WatcherError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
