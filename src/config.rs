//! Startup configuration from the process environment.

use crate::conversation::controller::DEFAULT_FIAT;
use crate::error::ConfigError;
use crate::network::{DEFAULT_API_URL, DEFAULT_TELEGRAM_URL};

use std::path::PathBuf;

pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const COINAPI_KEY_VAR: &str = "COINAPI_KEY";
pub const DEFAULT_FIAT_VAR: &str = "DEFAULT_FIAT";
pub const HISTORY_FILE_VAR: &str = "HISTORY_FILE";
pub const COINAPI_URL_VAR: &str = "COINAPI_URL";
pub const TELEGRAM_URL_VAR: &str = "TELEGRAM_API_URL";

const DEFAULT_HISTORY_FILE: &str = "history.json";

#[derive(Clone, PartialEq)]
pub struct BotConfig {
    pub telegram_token: String,
    pub coinapi_key: String,
    pub default_fiat: String,
    pub history_path: PathBuf,
    pub api_url: String,
    pub telegram_url: String,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("default_fiat", &self.default_fiat)
            .field("history_path", &self.history_path)
            .field("api_url", &self.api_url)
            .field("telegram_url", &self.telegram_url)
            .finish_non_exhaustive()
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram_token = get(TELEGRAM_TOKEN_VAR).ok_or(ConfigError::Missing(TELEGRAM_TOKEN_VAR))?;
        let coinapi_key = get(COINAPI_KEY_VAR).ok_or(ConfigError::Missing(COINAPI_KEY_VAR))?;

        let default_fiat = get(DEFAULT_FIAT_VAR)
            .map(|v| v.to_uppercase())
            .unwrap_or_else(|| DEFAULT_FIAT.to_string());
        if !default_fiat.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid {
                key: DEFAULT_FIAT_VAR,
                reason: format!("{:?} is not an asset code", default_fiat),
            });
        }

        Ok(Self {
            telegram_token,
            coinapi_key,
            default_fiat,
            history_path: get(HISTORY_FILE_VAR)
                .unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string())
                .into(),
            api_url: get(COINAPI_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            telegram_url: get(TELEGRAM_URL_VAR).unwrap_or_else(|| DEFAULT_TELEGRAM_URL.to_string()),
        })
    }
}
