//! Session domain — the per-user "pick asset → pick quote" selection.

pub mod state;

use serde::{Deserialize, Serialize};

pub use state::SessionStore;

/// Ephemeral selection state for one user. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    /// Empty while waiting for the user to choose an asset.
    pub asset: String,
    /// Never zero; zero amounts are rejected by the input parser.
    pub amount: f64,
}

impl UserSession {
    /// A fresh session waiting for the asset choice.
    pub fn awaiting_asset() -> Self {
        Self {
            asset: String::new(),
            amount: 1.0,
        }
    }

    pub fn is_awaiting_asset(&self) -> bool {
        self.asset.is_empty()
    }
}

impl Default for UserSession {
    fn default() -> Self {
        Self::awaiting_asset()
    }
}
