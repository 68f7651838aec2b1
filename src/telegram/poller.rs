//! Long-poll loop turning Bot API updates into [`InboundEvent`]s.

use super::client::TelegramHttp;
use super::wire::Update;
use crate::shared::{ChatId, MessageId};
use crate::transport::InboundEvent;

use futures_timer::Delay;
use std::time::Duration;
use tokio::sync::mpsc;

const BASE_RETRY_DELAY_MS: u32 = 1_000;
const MAX_RETRY_DELAY_MS: u32 = 60_000;
const RETRY_JITTER_MS: u32 = 500;

pub struct TelegramPoller {
    http: TelegramHttp,
    offset: i64,
    failures: u32,
}

impl TelegramPoller {
    pub fn new(http: TelegramHttp) -> Self {
        Self {
            http,
            offset: 0,
            failures: 0,
        }
    }

    /// Next update id to request.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Poll until `events` is closed. Errors back off and retry forever.
    pub async fn run(mut self, events: mpsc::Sender<InboundEvent>) {
        tracing::info!("Polling {} for updates", self.http.base_url());
        loop {
            match self.http.get_updates(self.offset).await {
                Ok(updates) => {
                    self.failures = 0;
                    for event in self.accept(updates) {
                        if events.send(event).await.is_err() {
                            tracing::info!("Event channel closed, poller stopping");
                            return;
                        }
                    }
                }
                Err(e) => {
                    self.failures += 1;
                    let delay = retry_delay(self.failures);
                    tracing::warn!(
                        "getUpdates failed (attempt {}): {}; retrying in {}ms",
                        self.failures,
                        e,
                        delay.as_millis()
                    );
                    Delay::new(delay).await;
                }
            }
        }
    }

    /// Advance the offset past `updates` and keep the ones the bot handles.
    pub fn accept(&mut self, updates: Vec<Update>) -> Vec<InboundEvent> {
        let mut events = Vec::with_capacity(updates.len());
        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);
            match to_event(update) {
                Some(event) => events.push(event),
                None => tracing::debug!("Skipping update without text or callback"),
            }
        }
        events
    }
}

/// `None` for updates that carry neither a text message nor a callback query.
pub fn to_event(update: Update) -> Option<InboundEvent> {
    if let Some(query) = update.callback_query {
        let message = query.message?;
        return Some(InboundEvent::Button {
            chat: ChatId(message.chat.id),
            message_id: MessageId(message.message_id),
            callback_id: query.id,
            data: query.data.unwrap_or_default(),
        });
    }

    let message = update.message?;
    let text = message.text?;
    Some(InboundEvent::from_text(ChatId(message.chat.id), &text))
}

/// Exponential delay with jitter, capped at one minute.
fn retry_delay(failures: u32) -> Duration {
    let exp = failures.saturating_sub(1).min(10);
    let base = BASE_RETRY_DELAY_MS.saturating_mul(1u32 << exp);
    let jitter = rand::random::<u32>() % RETRY_JITTER_MS;
    Duration::from_millis(base.saturating_add(jitter).min(MAX_RETRY_DELAY_MS) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updates(json: &str) -> Vec<Update> {
        serde_json::from_str(json).unwrap()
    }

    fn poller() -> TelegramPoller {
        TelegramPoller::new(TelegramHttp::new("http://127.0.0.1:9", "t").unwrap())
    }

    #[test]
    fn test_text_and_command_updates() {
        let mut poller = poller();
        let events = poller.accept(updates(
            r#"[
                {"update_id": 10, "message": {"message_id": 1, "chat": {"id": 42}, "text": "/coin@bot eth"}},
                {"update_id": 11, "message": {"message_id": 2, "chat": {"id": 42}, "text": "0.5 ETH"}}
            ]"#,
        ));
        assert_eq!(
            events,
            vec![
                InboundEvent::Command {
                    chat: ChatId(42),
                    name: "coin".into(),
                    args: "eth".into()
                },
                InboundEvent::Text {
                    chat: ChatId(42),
                    text: "0.5 ETH".into()
                },
            ]
        );
        assert_eq!(poller.offset(), 12);
    }

    #[test]
    fn test_callback_update() {
        let mut poller = poller();
        let events = poller.accept(updates(
            r#"[{"update_id": 3, "callback_query": {
                "id": "cb-1",
                "data": "select_quote:USD",
                "message": {"message_id": 77, "chat": {"id": 9}}
            }}]"#,
        ));
        assert_eq!(
            events,
            vec![InboundEvent::Button {
                chat: ChatId(9),
                message_id: MessageId(77),
                callback_id: "cb-1".into(),
                data: "select_quote:USD".into()
            }]
        );
    }

    #[test]
    fn test_unsupported_updates_still_advance_offset() {
        let mut poller = poller();
        let events = poller.accept(updates(
            r#"[
                {"update_id": 20, "message": {"message_id": 1, "chat": {"id": 1}}},
                {"update_id": 21}
            ]"#,
        ));
        assert!(events.is_empty());
        assert_eq!(poller.offset(), 22);
    }

    #[test]
    fn test_retry_delay_bounds() {
        let first = retry_delay(1);
        assert!(first >= Duration::from_millis(1_000) && first < Duration::from_millis(1_500));
        assert_eq!(retry_delay(30), Duration::from_millis(60_000));
    }
}
