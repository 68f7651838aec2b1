//! `TelegramHttp` — Bot API calls and the [`ChatTransport`] implementation.

use super::wire::*;
use crate::error::TransportError;
use crate::network::LONG_POLL_TIMEOUT_SECS;
use crate::shared::{ChatId, MessageId};
use crate::transport::{ChatTransport, Keyboard, OutgoingMessage};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const PARSE_MODE: &str = "Markdown";

/// Bot API client. The token is part of every method URL.
#[derive(Clone)]
pub struct TelegramHttp {
    base_url: String,
    endpoint: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for TelegramHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramHttp")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TelegramHttp {
    pub fn new(base_url: &str, token: &str) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(LONG_POLL_TIMEOUT_SECS + 10))
            .build()?;
        Ok(Self {
            endpoint: format!("{}/bot{}", base_url, token),
            base_url,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Long-poll for updates with id `>= offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TransportError> {
        self.call(
            "getUpdates",
            &GetUpdatesRequest {
                offset,
                timeout: LONG_POLL_TIMEOUT_SECS,
                allowed_updates: vec!["message", "callback_query"],
            },
        )
        .await
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.endpoint, method);
        let response = self.client.post(&url).json(body).send().await?;
        let bytes = response.bytes().await?;

        let envelope: Envelope<R> =
            serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))?;
        if !envelope.ok {
            return Err(TransportError::Api {
                code: envelope.error_code,
                description: envelope.description.unwrap_or_default(),
            });
        }
        envelope
            .result
            .ok_or_else(|| TransportError::Decode(format!("{} returned no result", method)))
    }
}

#[async_trait]
impl ChatTransport for TelegramHttp {
    async fn send(&self, chat: ChatId, message: OutgoingMessage) -> Result<MessageId, TransportError> {
        let request = SendMessageRequest {
            chat_id: chat.0,
            parse_mode: message.markdown.then_some(PARSE_MODE),
            reply_markup: message.keyboard.as_ref().map(reply_markup),
            text: message.text,
        };
        let sent: SentMessage = self.call("sendMessage", &request).await?;
        Ok(MessageId(sent.message_id))
    }

    async fn edit(
        &self,
        chat: ChatId,
        message_id: MessageId,
        message: OutgoingMessage,
    ) -> Result<(), TransportError> {
        // Edits can only carry inline options.
        let reply_markup = match &message.keyboard {
            Some(Keyboard::Inline(rows)) => Some(inline_markup(rows)),
            _ => None,
        };
        let request = EditMessageTextRequest {
            chat_id: chat.0,
            message_id: message_id.0,
            parse_mode: message.markdown.then_some(PARSE_MODE),
            reply_markup,
            text: message.text,
        };
        let _: serde_json::Value = self.call("editMessageText", &request).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), TransportError> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id: callback_id.to_string(),
            text: text.map(str::to_string),
        };
        let _: bool = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }
}

// ─── Keyboard mapping ────────────────────────────────────────────────────────

pub(crate) fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Reply(rows) => ReplyMarkup::Reply(ReplyKeyboardMarkup {
            keyboard: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|text| KeyboardButton { text: text.clone() })
                        .collect()
                })
                .collect(),
            resize_keyboard: true,
        }),
        Keyboard::Inline(rows) => ReplyMarkup::Inline(inline_markup(rows)),
    }
}

fn inline_markup(rows: &[Vec<crate::transport::Button>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| InlineKeyboardButton {
                        text: button.label.clone(),
                        callback_data: button.data.clone(),
                    })
                    .collect()
            })
            .collect(),
    }
}
