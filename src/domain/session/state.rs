//! Session store — one selection per chat behind a single lock.

use super::UserSession;
use crate::shared::ChatId;

use async_lock::RwLock;
use std::collections::HashMap;

/// In-memory session map. Every operation takes the lock once, so each
/// read-modify-write is atomic with respect to concurrent fetch completions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<ChatId, UserSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a selection: the user is now awaiting an asset choice.
    pub async fn begin(&self, chat: ChatId) {
        self.sessions
            .write()
            .await
            .insert(chat, UserSession::awaiting_asset());
    }

    /// True iff a session exists and no asset has been chosen yet.
    pub async fn is_awaiting_asset(&self, chat: ChatId) -> bool {
        self.sessions
            .read()
            .await
            .get(&chat)
            .is_some_and(UserSession::is_awaiting_asset)
    }

    /// Overwrite the session wholesale.
    pub async fn set_selection(&self, chat: ChatId, asset: &str, amount: f64) {
        self.sessions.write().await.insert(
            chat,
            UserSession {
                asset: asset.to_string(),
                amount,
            },
        );
    }

    pub async fn get(&self, chat: ChatId) -> Option<UserSession> {
        self.sessions.read().await.get(&chat).cloned()
    }

    /// Drop the session (back to the top-level menu).
    pub async fn clear(&self, chat: ChatId) {
        self.sessions.write().await.remove(&chat);
    }

    /// Drop the session only if it still holds `asset`.
    ///
    /// Returns whether a session was removed. Used when a fetch completes, so a
    /// selection the user restarted in the meantime survives.
    pub async fn clear_if_asset(&self, chat: ChatId, asset: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let matches = sessions
            .get(&chat)
            .is_some_and(|s| !s.asset.is_empty() && s.asset.eq_ignore_ascii_case(asset));
        if matches {
            sessions.remove(&chat);
        }
        matches
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    const CHAT: ChatId = ChatId(7);

    #[test]
    fn test_begin_marks_awaiting_asset() {
        block_on(async {
            let store = SessionStore::new();
            assert!(!store.is_awaiting_asset(CHAT).await);
            store.begin(CHAT).await;
            assert!(store.is_awaiting_asset(CHAT).await);
            assert_eq!(store.get(CHAT).await, Some(UserSession::awaiting_asset()));
        });
    }

    #[test]
    fn test_set_selection_overwrites() {
        block_on(async {
            let store = SessionStore::new();
            store.begin(CHAT).await;
            store.set_selection(CHAT, "ETH", 0.5).await;
            assert!(!store.is_awaiting_asset(CHAT).await);
            let session = store.get(CHAT).await.unwrap();
            assert_eq!(session.asset, "ETH");
            assert_eq!(session.amount, 0.5);
        });
    }

    #[test]
    fn test_clear_removes_session() {
        block_on(async {
            let store = SessionStore::new();
            store.set_selection(CHAT, "BTC", 1.0).await;
            store.clear(CHAT).await;
            assert!(store.get(CHAT).await.is_none());
            assert!(store.is_empty().await);
        });
    }

    #[test]
    fn test_clear_if_asset_keeps_restarted_selection() {
        block_on(async {
            let store = SessionStore::new();
            store.begin(CHAT).await;
            assert!(!store.clear_if_asset(CHAT, "BTC").await);
            assert!(store.is_awaiting_asset(CHAT).await);

            store.set_selection(CHAT, "BTC", 2.0).await;
            assert!(!store.clear_if_asset(CHAT, "ETH").await);
            assert!(store.clear_if_asset(CHAT, "btc").await);
            assert!(store.get(CHAT).await.is_none());
        });
    }

    #[test]
    fn test_sessions_are_per_chat() {
        block_on(async {
            let store = SessionStore::new();
            store.begin(ChatId(1)).await;
            store.set_selection(ChatId(2), "SOL", 3.0).await;
            assert!(store.is_awaiting_asset(ChatId(1)).await);
            assert!(!store.is_awaiting_asset(ChatId(2)).await);
            assert_eq!(store.len().await, 2);
        });
    }
}
