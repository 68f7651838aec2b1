//! Low-level HTTP client — `CoinApiHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in `domain::rate`). Status classification lives here so both
//! endpoints fail the same way.

use crate::domain::rate::wire::{ApiErrorBody, OhlcvEntry, RateResponse};
use crate::error::RateError;
use crate::network::{API_KEY_HEADER, RATE_REQUEST_TIMEOUT};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Message used when a 400/404 body carries no `error` field.
pub const BAD_REQUEST_FALLBACK: &str = "check the crypto/fiat codes";

/// Low-level HTTP client for the CoinAPI REST API.
#[derive(Clone)]
pub struct CoinApiHttp {
    base_url: String,
    api_key: String,
    client: Client,
}

impl CoinApiHttp {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, RateError> {
        Self::with_timeout(base_url, api_key, RATE_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, RateError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Exchange rate ────────────────────────────────────────────────────

    pub async fn get_exchange_rate(&self, base: &str, quote: &str) -> Result<RateResponse, RateError> {
        let url = format!(
            "{}/exchangerate/{}/{}",
            self.base_url,
            urlencoding::encode(&base.to_uppercase()),
            urlencoding::encode(&quote.to_uppercase())
        );
        self.get(&url).await
    }

    // ── OHLCV ────────────────────────────────────────────────────────────

    /// Latest daily candle for the pair (`period_id=1DAY&limit=1`).
    pub async fn get_ohlcv_latest(&self, base: &str, quote: &str) -> Result<Vec<OhlcvEntry>, RateError> {
        let url = format!(
            "{}/ohlcv/{}/{}/latest?period_id=1DAY&limit=1",
            self.base_url,
            urlencoding::encode(&base.to_uppercase()),
            urlencoding::encode(&quote.to_uppercase())
        );
        self.get(&url).await
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, RateError> {
        tracing::debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await?;

        if status == 200 {
            return serde_json::from_slice(&body)
                .map_err(|e| RateError::IncompleteData(e.to_string()));
        }

        Err(classify_failure(status, &body))
    }
}

/// Map a non-200 response onto the error taxonomy.
pub(crate) fn classify_failure(status: u16, body: &[u8]) -> RateError {
    match status {
        401 | 403 => RateError::Auth { status },
        400 | 404 => {
            let message = serde_json::from_slice::<ApiErrorBody>(body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| BAD_REQUEST_FALLBACK.to_string());
            RateError::BadRequest { status, message }
        }
        _ => RateError::UnexpectedStatus(status),
    }
}
