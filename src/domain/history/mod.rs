//! History domain — recent pairs per user, persisted as a JSON snapshot.

pub mod state;

use crate::shared::{ChatId, Pair};
use std::collections::BTreeMap;

pub use state::HistoryStore;

/// Entries kept per user.
pub const HISTORY_CAPACITY: usize = 5;

/// On-disk shape: chat id → pairs, most recent first.
///
/// ```json
/// { "42": ["BTC/UAH", "ETH/USD"] }
/// ```
pub type HistorySnapshot = BTreeMap<ChatId, Vec<Pair>>;
