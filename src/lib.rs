//! # coinrate-bot
//!
//! A chat front-end for cryptocurrency exchange rates backed by CoinAPI.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared newtypes, formatting, errors, per-user stores
//! 2. **HTTP API** — `CoinApiHttp`, one method per market-data endpoint
//! 3. **High-Level Client** — `RateClient` with rate and 24h stats lookups
//! 4. **Conversation** — Input parsing, keyboards, texts, the controller state machine
//! 5. **Transport** — The `ChatTransport` port and its Telegram adapter
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinrate_bot::prelude::*;
//!
//! let rates = RateClient::builder().api_key("...").build()?;
//! let quote = rates.fetch_rate("btc", "uah").await?;
//! let stats = rates.fetch_stats("eth", "usd").await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and number/time formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, stores.
pub mod domain;

/// Error types for every layer.
pub mod error;

/// Network URL constants and timeouts.
pub mod network;

/// Environment configuration.
pub mod config;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// Low-level market-data HTTP client.
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `RateClient` — the market-data entry point.
pub mod client;

// ── Layer 4: Conversation ────────────────────────────────────────────────────

/// The per-user conversation flow.
pub mod conversation;

// ── Layer 5: Transport ───────────────────────────────────────────────────────

/// Chat transport port.
pub mod transport;

/// Telegram Bot API adapter.
pub mod telegram;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{ChatId, MessageId, Pair};

    // Domain types
    pub use crate::domain::cooldown::{Admission, RateLimiter, COIN_COOLDOWN};
    pub use crate::domain::history::{HistoryStore, HISTORY_CAPACITY};
    pub use crate::domain::rate::{Aggregator, CoinStats, RateQuote};
    pub use crate::domain::session::{SessionStore, UserSession};

    // Errors
    pub use crate::error::{BotError, ConfigError, RateError, StoreError, TransportError};

    // Configuration + network
    pub use crate::config::BotConfig;
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_TELEGRAM_URL};

    // Clients
    pub use crate::client::{RateClient, RateClientBuilder};

    // Conversation
    pub use crate::conversation::{
        parse_asset_input, AssetInput, ControllerConfig, ConversationController,
        FetchCompletion, FetchOrigin, RateRequest, Stores,
    };

    // Transport
    pub use crate::telegram::{TelegramHttp, TelegramPoller};
    pub use crate::transport::{Button, ChatTransport, InboundEvent, Keyboard, OutgoingMessage};
}
