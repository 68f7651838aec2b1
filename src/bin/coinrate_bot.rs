use coinrate_bot::prelude::*;

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const INBOUND_BUFFER: usize = 256;

#[tokio::main]
async fn main() -> Result<(), BotError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BotConfig::from_env()?;
    tracing::info!(?config, "Starting bot");

    let history = HistoryStore::open(&config.history_path).await;
    let rates = RateClient::builder()
        .base_url(&config.api_url)
        .api_key(&config.coinapi_key)
        .build()?;
    let telegram = Arc::new(TelegramHttp::new(&config.telegram_url, &config.telegram_token)?);

    let controller = ConversationController::new(
        telegram.clone(),
        rates,
        Stores::new(history),
        ControllerConfig {
            default_fiat: config.default_fiat.clone(),
            ..ControllerConfig::default()
        },
    );

    let (tx, rx) = mpsc::channel(INBOUND_BUFFER);
    let poller = tokio::spawn(TelegramPoller::new(telegram.as_ref().clone()).run(tx));

    tokio::select! {
        _ = controller.run(rx) => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                return Err(BotError::Other(format!("failed to listen for Ctrl-C: {}", e)));
            }
            tracing::info!("Ctrl-C received, shutting down");
        }
    }

    poller.abort();
    Ok(())
}
