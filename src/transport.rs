//! Chat transport port — what the conversation core needs from a chat platform.
//!
//! Inbound: commands, free text and button presses. Outbound: send a message,
//! edit one in place, acknowledge a button press. Messages may carry a set of
//! selectable options (a [`Keyboard`]).

use crate::error::TransportError;
use crate::shared::{ChatId, MessageId};

use async_trait::async_trait;

// ─── Inbound ─────────────────────────────────────────────────────────────────

/// One event from the chat platform, already stripped of transport detail.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// `/name args...`; `name` is lower-cased without the leading slash or `@bot` suffix.
    Command {
        chat: ChatId,
        name: String,
        args: String,
    },
    /// Any other text message.
    Text { chat: ChatId, text: String },
    /// Press of an inline option attached to `message_id`.
    Button {
        chat: ChatId,
        message_id: MessageId,
        callback_id: String,
        data: String,
    },
}

impl InboundEvent {
    /// Classify a text message as a command or free text.
    pub fn from_text(chat: ChatId, text: &str) -> Self {
        let trimmed = text.trim();
        if let Some(rest) = trimmed.strip_prefix('/') {
            let (head, args) = match rest.split_once(char::is_whitespace) {
                Some((head, args)) => (head, args.trim()),
                None => (rest, ""),
            };
            let name = head.split('@').next().unwrap_or_default();
            if !name.is_empty() {
                return InboundEvent::Command {
                    chat,
                    name: name.to_lowercase(),
                    args: args.to_string(),
                };
            }
        }
        InboundEvent::Text {
            chat,
            text: text.to_string(),
        }
    }

    pub fn chat(&self) -> ChatId {
        match self {
            InboundEvent::Command { chat, .. }
            | InboundEvent::Text { chat, .. }
            | InboundEvent::Button { chat, .. } => *chat,
        }
    }
}

// ─── Outbound ────────────────────────────────────────────────────────────────

/// A selectable inline option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    /// Opaque payload echoed back in [`InboundEvent::Button`].
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Options attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Persistent menu whose presses arrive as plain text.
    Reply(Vec<Vec<String>>),
    /// Options attached to the message whose presses arrive as buttons.
    Inline(Vec<Vec<Button>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub text: String,
    pub markdown: bool,
    pub keyboard: Option<Keyboard>,
}

impl OutgoingMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: false,
            keyboard: None,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: true,
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

// ─── Port ────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait ChatTransport: Send + Sync + 'static {
    /// Send a new message; returns its id.
    async fn send(&self, chat: ChatId, message: OutgoingMessage) -> Result<MessageId, TransportError>;

    /// Replace the text (and inline options) of an existing message.
    async fn edit(
        &self,
        chat: ChatId,
        message_id: MessageId,
        message: OutgoingMessage,
    ) -> Result<(), TransportError>;

    /// Acknowledge a button press, optionally with a short notice.
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), TransportError>;
}
