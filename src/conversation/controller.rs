//! Conversation controller — the per-user state machine.
//!
//! `Idle → AwaitingAsset → AwaitingQuote → Idle`, plus the history shortcut
//! and the stand-alone `/coin` command. Rate fetches run on spawned tasks and
//! come back as [`FetchCompletion`]s, which are applied on the same loop as
//! inbound events so every store mutation has a single writer.

use super::input::parse_asset_input;
use super::keyboard::{self, menu_choice, CallbackData, MenuChoice};
use super::render;
use crate::client::RateClient;
use crate::domain::cooldown::{Admission, RateLimiter, COIN_COOLDOWN};
use crate::domain::history::HistoryStore;
use crate::domain::rate::{CoinStats, RateQuote};
use crate::domain::session::SessionStore;
use crate::error::{RateError, TransportError};
use crate::shared::{ChatId, MessageId, Pair};
use crate::transport::{ChatTransport, InboundEvent, OutgoingMessage};

use async_lock::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default quote currency for `/coin` when none is given.
pub const DEFAULT_FIAT: &str = "UAH";

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub default_fiat: String,
    pub coin_cooldown: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_fiat: DEFAULT_FIAT.to_string(),
            coin_cooldown: COIN_COOLDOWN,
        }
    }
}

/// The three per-user stores, each behind its own lock.
#[derive(Debug)]
pub struct Stores {
    pub sessions: SessionStore,
    pub history: HistoryStore,
    pub limiter: RateLimiter,
}

impl Stores {
    pub fn new(history: HistoryStore) -> Self {
        Self {
            sessions: SessionStore::new(),
            history,
            limiter: RateLimiter::new(),
        }
    }
}

/// A rate lookup for `amount` units of `pair.base`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRequest {
    pub pair: Pair,
    pub amount: f64,
}

/// What triggered a rate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Quote button at the end of the two-step selection.
    Selection,
    /// A history button.
    History,
}

/// Result of a spawned fetch, fed back into the controller loop.
#[derive(Debug, Clone)]
pub enum FetchCompletion {
    Rate {
        chat: ChatId,
        message_id: MessageId,
        callback_id: String,
        request: RateRequest,
        origin: FetchOrigin,
        result: Result<RateQuote, RateError>,
    },
    Stats {
        chat: ChatId,
        pair: Pair,
        result: Result<CoinStats, RateError>,
    },
}

pub struct ConversationController<T: ChatTransport> {
    transport: Arc<T>,
    rates: RateClient,
    stores: Stores,
    config: ControllerConfig,
    completion_tx: mpsc::UnboundedSender<FetchCompletion>,
    completion_rx: Mutex<mpsc::UnboundedReceiver<FetchCompletion>>,
}

impl<T: ChatTransport> ConversationController<T> {
    pub fn new(transport: Arc<T>, rates: RateClient, stores: Stores, config: ControllerConfig) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            transport,
            rates,
            stores,
            config,
            completion_tx,
            completion_rx: Mutex::new(completion_rx),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.stores.sessions
    }

    pub fn history(&self) -> &HistoryStore {
        &self.stores.history
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.stores.limiter
    }

    /// Consume inbound events and fetch completions until `inbound` closes.
    ///
    /// Transport failures are logged and do not stop the loop.
    pub async fn run(&self, mut inbound: mpsc::Receiver<InboundEvent>) {
        let mut completions = self.completion_rx.lock().await;
        loop {
            let outcome = tokio::select! {
                event = inbound.recv() => match event {
                    Some(event) => self.handle_inbound(event).await,
                    None => break,
                },
                Some(done) = completions.recv() => self.handle_completion(done).await,
            };
            if let Err(e) = outcome {
                tracing::error!("Failed to deliver reply: {}", e);
            }
        }
        tracing::info!("Inbound channel closed, controller stopping");
    }

    /// Wait for the next spawned fetch to finish. Not for use alongside [`run`](Self::run).
    pub async fn next_completion(&self) -> Option<FetchCompletion> {
        self.completion_rx.lock().await.recv().await
    }

    pub async fn handle_inbound(&self, event: InboundEvent) -> Result<(), TransportError> {
        match event {
            InboundEvent::Command { chat, name, args } => match name.as_str() {
                "start" => self.on_start(chat).await,
                "coin" => self.on_coin(chat, &args).await,
                other => {
                    tracing::debug!(%chat, "Ignoring unknown command /{}", other);
                    Ok(())
                }
            },
            InboundEvent::Text { chat, text } => self.on_text(chat, &text).await,
            InboundEvent::Button {
                chat,
                message_id,
                callback_id,
                data,
            } => self.on_button(chat, message_id, callback_id, &data).await,
        }
    }

    pub async fn handle_completion(&self, done: FetchCompletion) -> Result<(), TransportError> {
        match done {
            FetchCompletion::Rate {
                chat,
                message_id,
                callback_id,
                request,
                origin,
                result,
            } => {
                if origin == FetchOrigin::Selection {
                    self.stores
                        .sessions
                        .clear_if_asset(chat, &request.pair.base)
                        .await;
                }

                let (text, success) = match &result {
                    Ok(quote) => {
                        let pair = Pair::new(&quote.base, &quote.quote);
                        if let Err(e) = self.stores.history.record(chat, pair).await {
                            tracing::error!(%chat, "Failed to persist history: {}", e);
                        }
                        (render::rate_result(quote, request.amount), true)
                    }
                    Err(e) => {
                        tracing::warn!(%chat, "Rate lookup for {} failed: {}", request.pair, e);
                        (render::rate_failure(&request.pair, e), false)
                    }
                };

                let edited = self
                    .transport
                    .edit(chat, message_id, OutgoingMessage::markdown(text))
                    .await;
                // Acknowledge even if the edit failed so the client stops waiting.
                let answered = self
                    .transport
                    .answer_callback(&callback_id, Some(render::callback_ack(success)))
                    .await;
                edited.and(answered)
            }
            FetchCompletion::Stats { chat, pair, result } => {
                let text = match &result {
                    Ok(stats) => {
                        if let Some(warning) = &stats.warning {
                            tracing::debug!(%chat, "Stats for {} degraded: {}", pair, warning);
                        }
                        render::coin_stats(stats)
                    }
                    Err(e) => {
                        tracing::warn!(%chat, "Stats lookup for {} failed: {}", pair, e);
                        render::coin_failure(&pair, e)
                    }
                };
                self.reply(chat, OutgoingMessage::markdown(text)).await
            }
        }
    }

    // ─── Handlers ────────────────────────────────────────────────────────────

    async fn on_start(&self, chat: ChatId) -> Result<(), TransportError> {
        self.stores.sessions.clear(chat).await;
        self.reply(
            chat,
            OutgoingMessage::plain(render::welcome()).with_keyboard(keyboard::start_menu()),
        )
        .await
    }

    async fn on_coin(&self, chat: ChatId, args: &str) -> Result<(), TransportError> {
        if let Admission::Rejected { remaining } = self
            .stores
            .limiter
            .try_acquire(chat, self.config.coin_cooldown)
            .await
        {
            return self
                .reply(chat, OutgoingMessage::markdown(render::rate_limited(remaining)))
                .await;
        }

        let mut parts = args.split_whitespace();
        let Some(symbol) = parts.next() else {
            return self
                .reply(
                    chat,
                    OutgoingMessage::markdown(render::coin_usage(&self.config.default_fiat)),
                )
                .await;
        };
        let fiat = parts.next().unwrap_or(self.config.default_fiat.as_str());
        let pair = Pair::new(symbol, fiat);

        tracing::debug!(%chat, "Dispatching stats fetch for {}", pair);
        let rates = self.rates.clone();
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = rates.fetch_stats(&pair.base, &pair.quote).await;
            if tx.send(FetchCompletion::Stats { chat, pair, result }).is_err() {
                tracing::debug!("Controller gone, dropping stats result");
            }
        });
        Ok(())
    }

    async fn on_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        match menu_choice(text) {
            Some(MenuChoice::Rate) => {
                self.stores.sessions.begin(chat).await;
                self.reply(
                    chat,
                    OutgoingMessage::markdown(render::choose_asset())
                        .with_keyboard(keyboard::asset_selection()),
                )
                .await
            }
            Some(MenuChoice::History) => {
                let pairs = self.stores.history.list(chat).await;
                let message = if pairs.is_empty() {
                    OutgoingMessage::plain(render::history_empty())
                } else {
                    OutgoingMessage::plain(render::history_prompt())
                        .with_keyboard(keyboard::history(&pairs))
                };
                self.reply(chat, message).await
            }
            None if self.stores.sessions.is_awaiting_asset(chat).await => {
                match parse_asset_input(text) {
                    Some(input) => {
                        self.stores
                            .sessions
                            .set_selection(chat, &input.code, input.amount)
                            .await;
                        self.reply(
                            chat,
                            OutgoingMessage::markdown(render::asset_chosen(
                                &input.code,
                                Some(input.amount),
                            ))
                            .with_keyboard(keyboard::quote_selection()),
                        )
                        .await
                    }
                    None => {
                        self.reply(chat, OutgoingMessage::markdown(render::invalid_asset_input()))
                            .await
                    }
                }
            }
            None => {
                tracing::debug!(%chat, "Ignoring text outside a selection");
                Ok(())
            }
        }
    }

    async fn on_button(
        &self,
        chat: ChatId,
        message_id: MessageId,
        callback_id: String,
        data: &str,
    ) -> Result<(), TransportError> {
        let Some(callback) = CallbackData::parse(data) else {
            tracing::debug!(%chat, "Ignoring unknown button payload {:?}", data);
            return self.transport.answer_callback(&callback_id, None).await;
        };

        match callback {
            CallbackData::SelectAsset(code) => {
                self.stores.sessions.set_selection(chat, &code, 1.0).await;
                let edited = self
                    .transport
                    .edit(
                        chat,
                        message_id,
                        OutgoingMessage::markdown(render::asset_chosen(&code, None))
                            .with_keyboard(keyboard::quote_selection()),
                    )
                    .await;
                let answered = self.transport.answer_callback(&callback_id, None).await;
                edited.and(answered)
            }
            CallbackData::SelectQuote(quote) => {
                let session = self
                    .stores
                    .sessions
                    .get(chat)
                    .await
                    .filter(|s| !s.is_awaiting_asset());
                let Some(session) = session else {
                    self.reply(chat, OutgoingMessage::plain(render::no_asset_selected()))
                        .await?;
                    return self.transport.answer_callback(&callback_id, None).await;
                };
                let request = RateRequest {
                    pair: Pair::new(&session.asset, &quote),
                    amount: session.amount,
                };
                self.dispatch_rate(chat, message_id, callback_id, request, FetchOrigin::Selection);
                Ok(())
            }
            CallbackData::History(pair) => {
                // A history pick leaves any half-finished selection.
                self.stores.sessions.clear(chat).await;
                let request = RateRequest { pair, amount: 1.0 };
                self.dispatch_rate(chat, message_id, callback_id, request, FetchOrigin::History);
                Ok(())
            }
        }
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    fn dispatch_rate(
        &self,
        chat: ChatId,
        message_id: MessageId,
        callback_id: String,
        request: RateRequest,
        origin: FetchOrigin,
    ) {
        tracing::debug!(%chat, "Dispatching rate fetch for {} x{}", request.pair, request.amount);
        let rates = self.rates.clone();
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = rates.fetch_rate(&request.pair.base, &request.pair.quote).await;
            let done = FetchCompletion::Rate {
                chat,
                message_id,
                callback_id,
                request,
                origin,
                result,
            };
            if tx.send(done).is_err() {
                tracing::debug!("Controller gone, dropping rate result");
            }
        });
    }

    async fn reply(&self, chat: ChatId, message: OutgoingMessage) -> Result<(), TransportError> {
        self.transport.send(chat, message).await.map(|_| ())
    }
}
