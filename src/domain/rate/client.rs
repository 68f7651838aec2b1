//! Rate operations on `RateClient` — spot rate and 24h stats.

use super::{CoinStats, RateQuote};
use crate::client::RateClient;
use crate::error::RateError;

impl RateClient {
    /// Current rate for `base/quote`. Codes are upper-cased before the request.
    pub async fn fetch_rate(&self, base: &str, quote: &str) -> Result<RateQuote, RateError> {
        let resp = self.http.get_exchange_rate(base, quote).await?;
        RateQuote::try_from(resp)
    }

    /// Rate plus the latest daily low/high.
    ///
    /// A failing rate request fails the whole call. A failing candle request
    /// degrades to rate-only stats: a network failure sets `warning`, any other
    /// failure (non-200, undecodable, empty list) is silent.
    pub async fn fetch_stats(&self, base: &str, quote: &str) -> Result<CoinStats, RateError> {
        let rate = self.fetch_rate(base, quote).await?;

        match self.http.get_ohlcv_latest(base, quote).await {
            Ok(candles) => match candles.first() {
                Some(candle) => Ok(CoinStats::aggregated(rate, candle)),
                None => {
                    tracing::debug!("No OHLCV candle for {}/{}", base, quote);
                    Ok(CoinStats::rate_only(rate, None))
                }
            },
            Err(RateError::Network(reason)) => {
                tracing::warn!("OHLCV request for {}/{} failed: {}", base, quote, reason);
                Ok(CoinStats::rate_only(
                    rate,
                    Some(format!("24h stats unavailable: {}", reason)),
                ))
            }
            Err(e) => {
                tracing::debug!("OHLCV for {}/{} unavailable: {}", base, quote, e);
                Ok(CoinStats::rate_only(rate, None))
            }
        }
    }
}
