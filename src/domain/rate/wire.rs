//! Wire types for CoinAPI REST responses.

use serde::{Deserialize, Serialize};

/// `GET /exchangerate/{base}/{quote}` body.
///
/// Every field is optional on the wire; conversion rejects payloads
/// without base, quote or rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateResponse {
    #[serde(default)]
    pub asset_id_base: Option<String>,
    #[serde(default)]
    pub asset_id_quote: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub time: Option<String>,
}

/// One element of the `GET /ohlcv/{base}/{quote}/latest` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcvEntry {
    #[serde(default, alias = "price_high")]
    pub rate_high: f64,
    #[serde(default, alias = "price_low")]
    pub rate_low: f64,
}

/// Error body returned alongside 400/404.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
