//! Network URL constants and timeouts.

use std::time::Duration;

/// Default CoinAPI REST base URL.
pub const DEFAULT_API_URL: &str = "https://rest.coinapi.io/v1";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";

/// Header carrying the CoinAPI key.
pub const API_KEY_HEADER: &str = "X-CoinAPI-Key";

/// Client-side bound on every market-data request.
pub const RATE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Server-side long-poll timeout passed to `getUpdates`, in seconds.
pub const LONG_POLL_TIMEOUT_SECS: u64 = 60;
