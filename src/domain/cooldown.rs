//! Per-user cooldown gate for the `/coin` command.

use crate::shared::ChatId;

use async_lock::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default cooldown between two accepted `/coin` calls.
pub const COIN_COOLDOWN: Duration = Duration::from_secs(10);

/// Outcome of [`RateLimiter::try_acquire`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    Allowed,
    /// Cooldown not elapsed; `remaining` until the next call is accepted.
    Rejected { remaining: Duration },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed)
    }
}

/// Latest accepted timestamp per user. No queueing, one gated action.
#[derive(Debug, Default)]
pub struct RateLimiter {
    last_allowed: Mutex<HashMap<ChatId, Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn try_acquire(&self, chat: ChatId, cooldown: Duration) -> Admission {
        self.try_acquire_at(chat, cooldown, Instant::now()).await
    }

    /// Same as [`try_acquire`](Self::try_acquire) with an explicit clock reading.
    ///
    /// A rejected call leaves the stored timestamp untouched.
    pub async fn try_acquire_at(&self, chat: ChatId, cooldown: Duration, now: Instant) -> Admission {
        let mut last_allowed = self.last_allowed.lock().await;

        if let Some(last) = last_allowed.get(&chat) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < cooldown {
                return Admission::Rejected {
                    remaining: cooldown - elapsed,
                };
            }
        }

        last_allowed.insert(chat, now);
        Admission::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    const CHAT: ChatId = ChatId(5);

    #[test]
    fn test_first_call_allowed() {
        block_on(async {
            let limiter = RateLimiter::new();
            assert_eq!(
                limiter.try_acquire(CHAT, COIN_COOLDOWN).await,
                Admission::Allowed
            );
        });
    }

    #[test]
    fn test_second_call_within_cooldown_rejected() {
        block_on(async {
            let limiter = RateLimiter::new();
            let t0 = Instant::now();
            assert!(limiter.try_acquire_at(CHAT, COIN_COOLDOWN, t0).await.is_allowed());
            let verdict = limiter
                .try_acquire_at(CHAT, COIN_COOLDOWN, t0 + Duration::from_secs(4))
                .await;
            assert_eq!(
                verdict,
                Admission::Rejected {
                    remaining: Duration::from_secs(6)
                }
            );
        });
    }

    #[test]
    fn test_allowed_again_after_cooldown() {
        block_on(async {
            let limiter = RateLimiter::new();
            let t0 = Instant::now();
            limiter.try_acquire_at(CHAT, COIN_COOLDOWN, t0).await;
            assert!(limiter
                .try_acquire_at(CHAT, COIN_COOLDOWN, t0 + COIN_COOLDOWN)
                .await
                .is_allowed());
        });
    }

    #[test]
    fn test_rejection_does_not_reset_timer() {
        block_on(async {
            let limiter = RateLimiter::new();
            let t0 = Instant::now();
            limiter.try_acquire_at(CHAT, COIN_COOLDOWN, t0).await;
            // Rejected at 9s; if that reset the timer, 11s would be rejected too.
            assert!(!limiter
                .try_acquire_at(CHAT, COIN_COOLDOWN, t0 + Duration::from_secs(9))
                .await
                .is_allowed());
            assert!(limiter
                .try_acquire_at(CHAT, COIN_COOLDOWN, t0 + Duration::from_secs(11))
                .await
                .is_allowed());
        });
    }

    #[test]
    fn test_users_are_independent() {
        block_on(async {
            let limiter = RateLimiter::new();
            let t0 = Instant::now();
            limiter.try_acquire_at(ChatId(1), COIN_COOLDOWN, t0).await;
            assert!(limiter
                .try_acquire_at(ChatId(2), COIN_COOLDOWN, t0)
                .await
                .is_allowed());
        });
    }
}
