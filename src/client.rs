//! High-level market-data client — `RateClient` and its builder.
//!
//! The operations themselves live in `domain/rate/client.rs`; this module keeps
//! construction and configuration.

use crate::error::RateError;
use crate::http::CoinApiHttp;
use crate::network::{DEFAULT_API_URL, RATE_REQUEST_TIMEOUT};

use std::time::Duration;

/// Client for the market-data API. Cheap to clone; clones share the
/// connection pool, so one can be moved into every spawned fetch.
#[derive(Clone)]
pub struct RateClient {
    pub(crate) http: CoinApiHttp,
}

impl RateClient {
    pub fn builder() -> RateClientBuilder {
        RateClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct RateClientBuilder {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl Default for RateClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            timeout: RATE_REQUEST_TIMEOUT,
        }
    }
}

impl RateClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = key.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<RateClient, RateError> {
        Ok(RateClient {
            http: CoinApiHttp::with_timeout(&self.base_url, &self.api_key, self.timeout)?,
        })
    }
}
