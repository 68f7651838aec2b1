//! Error types for every layer of the bot.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Rate API error: {0}")]
    Rate(#[from] RateError),

    #[error("Chat transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("History store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

/// Market-data API failures.
///
/// None of these are retried automatically; the user re-invokes the flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    /// 401 / 403: the API key was rejected.
    #[error("Authorization failed (status {status}), check the API key")]
    Auth { status: u16 },

    /// 400 / 404: the provider did not accept the asset pair.
    #[error("Bad request (status {status}): {message}")]
    BadRequest { status: u16, message: String },

    /// 200 with a payload that is malformed or missing base/quote/rate.
    #[error("Incomplete rate data: {0}")]
    IncompleteData(String),

    /// Timeout, DNS, refused connection, broken body stream.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected API status {0}")]
    UnexpectedStatus(u16),
}

impl From<reqwest::Error> for RateError {
    fn from(e: reqwest::Error) -> Self {
        RateError::Network(e.to_string())
    }
}

/// Chat-platform failures.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {code:?}: {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },

    #[error("Decode error: {0}")]
    Decode(String),
}

/// History snapshot persistence failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Startup configuration failures. Always fatal.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
