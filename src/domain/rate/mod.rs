//! Rate domain — exchange-rate quotes and 24h coin statistics.

pub mod client;
mod convert;
pub mod wire;

use serde::{Deserialize, Serialize};

/// A current exchange rate for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub base: String,
    pub quote: String,
    pub rate: f64,
    /// Provider timestamp, ISO 8601.
    pub time: Option<String>,
}

/// Where the 24h figures of a [`CoinStats`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Aggregator {
    /// Rate plus the latest daily OHLCV candle.
    Aggregated,
    /// Rate alone; min/max are zero.
    GlobalOnly,
}

impl Aggregator {
    pub fn label(&self) -> &'static str {
        match self {
            Aggregator::Aggregated => "aggregated",
            Aggregator::GlobalOnly => "global-only",
        }
    }
}

impl std::fmt::Display for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rate enriched with optional 24h low/high.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinStats {
    pub base: String,
    pub quote: String,
    pub rate: f64,
    pub time: Option<String>,
    pub min_24h: f64,
    pub max_24h: f64,
    pub aggregator: Aggregator,
    /// Set when the OHLCV request failed at the network level. Never shown to
    /// the user; the controller logs it.
    pub warning: Option<String>,
}
