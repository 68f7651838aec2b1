//! Shared newtypes and utilities used across the crate.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw form the chat platform and the snapshot file use, so they can be used
//! directly in wire types and in the history snapshot without conversion.

pub mod fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── ChatId ──────────────────────────────────────────────────────────────────

/// Identifier of the user's chat. All per-user state is keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ─── MessageId ───────────────────────────────────────────────────────────────

/// Identifier of a message inside a chat, used to edit it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Pair ────────────────────────────────────────────────────────────────────

/// A `BASE/QUOTE` trading pair, e.g. `BTC/UAH`.
///
/// Serializes as the single string `"BTC/UAH"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair {
    pub base: String,
    pub quote: String,
}

impl Pair {
    /// Build a pair, upper-casing both codes.
    pub fn new(base: impl AsRef<str>, quote: impl AsRef<str>) -> Self {
        Self {
            base: base.as_ref().trim().to_uppercase(),
            quote: quote.as_ref().trim().to_uppercase(),
        }
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pair {0:?}, expected BASE/QUOTE")]
pub struct PairParseError(pub String);

impl FromStr for Pair {
    type Err = PairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(quote), None) if !base.trim().is_empty() && !quote.trim().is_empty() => {
                Ok(Pair::new(base, quote))
            }
            _ => Err(PairParseError(s.to_string())),
        }
    }
}

impl Serialize for Pair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_parse_and_display() {
        let pair: Pair = "btc/uah".parse().unwrap();
        assert_eq!(pair.base, "BTC");
        assert_eq!(pair.quote, "UAH");
        assert_eq!(pair.to_string(), "BTC/UAH");
    }

    #[test]
    fn test_pair_parse_rejects_malformed() {
        assert!("BTC".parse::<Pair>().is_err());
        assert!("BTC/".parse::<Pair>().is_err());
        assert!("/USD".parse::<Pair>().is_err());
        assert!("A/B/C".parse::<Pair>().is_err());
    }

    #[test]
    fn test_pair_serializes_as_string() {
        let json = serde_json::to_string(&Pair::new("eth", "usd")).unwrap();
        assert_eq!(json, "\"ETH/USD\"");
        let back: Pair = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Pair::new("ETH", "USD"));
    }

    #[test]
    fn test_chat_id_transparent() {
        assert_eq!(serde_json::to_string(&ChatId(42)).unwrap(), "42");
        let id: ChatId = serde_json::from_str("-100").unwrap();
        assert_eq!(id, ChatId(-100));
    }
}
