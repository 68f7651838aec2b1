//! Telegram Bot API adapter for the [`ChatTransport`](crate::transport::ChatTransport) port.

pub mod client;
pub mod poller;
pub mod wire;

pub use client::TelegramHttp;
pub use poller::TelegramPoller;
