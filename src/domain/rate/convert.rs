//! Conversions: wire types → rate domain types.

use super::wire::{OhlcvEntry, RateResponse};
use super::{Aggregator, CoinStats, RateQuote};
use crate::error::RateError;

impl TryFrom<RateResponse> for RateQuote {
    type Error = RateError;

    fn try_from(resp: RateResponse) -> Result<Self, Self::Error> {
        let missing = [
            ("asset_id_base", resp.asset_id_base.is_none()),
            ("asset_id_quote", resp.asset_id_quote.is_none()),
            ("rate", resp.rate.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect::<Vec<_>>();

        match (resp.asset_id_base, resp.asset_id_quote, resp.rate) {
            (Some(base), Some(quote), Some(rate)) => Ok(RateQuote {
                base,
                quote,
                rate,
                time: resp.time,
            }),
            _ => Err(RateError::IncompleteData(format!(
                "missing {}",
                missing.join(", ")
            ))),
        }
    }
}

impl CoinStats {
    /// Rate-only stats, used when the 24h candle is unavailable.
    pub fn rate_only(quote: RateQuote, warning: Option<String>) -> Self {
        Self {
            base: quote.base,
            quote: quote.quote,
            rate: quote.rate,
            time: quote.time,
            min_24h: 0.0,
            max_24h: 0.0,
            aggregator: Aggregator::GlobalOnly,
            warning,
        }
    }

    /// Stats enriched with the first (latest) daily candle.
    pub fn aggregated(quote: RateQuote, candle: &OhlcvEntry) -> Self {
        Self {
            base: quote.base,
            quote: quote.quote,
            rate: quote.rate,
            time: quote.time,
            min_24h: candle.rate_low,
            max_24h: candle.rate_high,
            aggregator: Aggregator::Aggregated,
            warning: None,
        }
    }
}
