mod common;

use coinrate_bot::prelude::*;
use common::{closed_base_url, StubServer, BTC_USD_RATE, DROP_CONNECTION};

fn client(base_url: &str) -> RateClient {
    RateClient::builder()
        .base_url(base_url)
        .api_key("test-key")
        .build()
        .unwrap()
}

// ─── fetch_rate ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_rate_success() {
    let server = StubServer::start(&[("/v1/exchangerate/BTC/USD", 200, BTC_USD_RATE)]).await;

    let quote = client(&server.base_url).fetch_rate("btc", "usd").await.unwrap();
    assert_eq!(quote.base, "BTC");
    assert_eq!(quote.quote, "USD");
    assert_eq!(quote.rate, 42000.5);
    assert_eq!(quote.time.as_deref(), Some("2024-01-15T10:00:00.0000000Z"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /v1/exchangerate/BTC/USD "));
    assert!(requests[0].to_lowercase().contains("x-coinapi-key: test-key"));
}

#[tokio::test]
async fn test_fetch_rate_unauthorized() {
    let server = StubServer::start(&[("/v1/exchangerate", 401, r#"{"error":"Invalid API key"}"#)]).await;

    let err = client(&server.base_url).fetch_rate("BTC", "USD").await.unwrap_err();
    assert_eq!(err, RateError::Auth { status: 401 });
}

#[tokio::test]
async fn test_fetch_rate_missing_rate_is_incomplete() {
    let server = StubServer::start(&[(
        "/v1/exchangerate",
        200,
        r#"{"asset_id_base":"BTC","asset_id_quote":"USD","time":"2024-01-15T10:00:00Z"}"#,
    )])
    .await;

    let err = client(&server.base_url).fetch_rate("BTC", "USD").await.unwrap_err();
    assert!(matches!(err, RateError::IncompleteData(ref m) if m.contains("rate")));
}

#[tokio::test]
async fn test_fetch_rate_bad_request_message() {
    let server = StubServer::start(&[(
        "/v1/exchangerate",
        400,
        r#"{"error":"Unknown asset: FOO"}"#,
    )])
    .await;

    let err = client(&server.base_url).fetch_rate("FOO", "USD").await.unwrap_err();
    assert_eq!(
        err,
        RateError::BadRequest {
            status: 400,
            message: "Unknown asset: FOO".into()
        }
    );
}

#[tokio::test]
async fn test_fetch_rate_not_found_falls_back() {
    // No route: the stub answers 404 with an empty body.
    let server = StubServer::start(&[]).await;

    let err = client(&server.base_url).fetch_rate("FOO", "BAR").await.unwrap_err();
    assert!(matches!(err, RateError::BadRequest { status: 404, .. }));
}

#[tokio::test]
async fn test_fetch_rate_unexpected_status() {
    let server = StubServer::start(&[("/v1/exchangerate", 503, "")]).await;

    let err = client(&server.base_url).fetch_rate("BTC", "USD").await.unwrap_err();
    assert_eq!(err, RateError::UnexpectedStatus(503));
}

#[tokio::test]
async fn test_fetch_rate_connection_refused() {
    let base_url = closed_base_url().await;

    let err = client(&base_url).fetch_rate("BTC", "USD").await.unwrap_err();
    assert!(matches!(err, RateError::Network(_)));
}

// ─── fetch_stats ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_stats_aggregated() {
    let server = StubServer::start(&[
        ("/v1/exchangerate/BTC/USD", 200, BTC_USD_RATE),
        (
            "/v1/ohlcv/BTC/USD/latest",
            200,
            r#"[{"rate_open":101,"rate_high":110,"rate_low":100,"rate_close":105}]"#,
        ),
    ])
    .await;

    let stats = client(&server.base_url).fetch_stats("BTC", "USD").await.unwrap();
    assert_eq!(stats.rate, 42000.5);
    assert_eq!(stats.min_24h, 100.0);
    assert_eq!(stats.max_24h, 110.0);
    assert_eq!(stats.aggregator, Aggregator::Aggregated);
    assert_eq!(stats.aggregator.label(), "aggregated");
    assert!(stats.warning.is_none());

    let requests = server.requests();
    assert!(requests
        .iter()
        .any(|r| r.starts_with("GET /v1/ohlcv/BTC/USD/latest?period_id=1DAY&limit=1 ")));
}

#[tokio::test]
async fn test_fetch_stats_empty_ohlcv_is_global_only() {
    let server = StubServer::start(&[
        ("/v1/exchangerate/BTC/USD", 200, BTC_USD_RATE),
        ("/v1/ohlcv", 200, "[]"),
    ])
    .await;

    let stats = client(&server.base_url).fetch_stats("BTC", "USD").await.unwrap();
    assert_eq!(stats.min_24h, 0.0);
    assert_eq!(stats.max_24h, 0.0);
    assert_eq!(stats.aggregator.label(), "global-only");
    assert!(stats.warning.is_none());
}

#[tokio::test]
async fn test_fetch_stats_failing_ohlcv_is_global_only() {
    let server = StubServer::start(&[
        ("/v1/exchangerate/BTC/USD", 200, BTC_USD_RATE),
        ("/v1/ohlcv", 500, r#"{"error":"boom"}"#),
    ])
    .await;

    let stats = client(&server.base_url).fetch_stats("BTC", "USD").await.unwrap();
    assert_eq!(stats.rate, 42000.5);
    assert_eq!((stats.min_24h, stats.max_24h), (0.0, 0.0));
    assert_eq!(stats.aggregator, Aggregator::GlobalOnly);
    assert!(stats.warning.is_none());
}

#[tokio::test]
async fn test_fetch_stats_ohlcv_network_failure_sets_warning() {
    let server = StubServer::start(&[
        ("/v1/exchangerate/BTC/USD", 200, BTC_USD_RATE),
        ("/v1/ohlcv", DROP_CONNECTION, ""),
    ])
    .await;

    let stats = client(&server.base_url).fetch_stats("BTC", "USD").await.unwrap();
    assert_eq!(stats.rate, 42000.5);
    assert_eq!((stats.min_24h, stats.max_24h), (0.0, 0.0));
    assert_eq!(stats.aggregator, Aggregator::GlobalOnly);
    let warning = stats.warning.expect("network failure should leave a warning");
    assert!(warning.starts_with("24h stats unavailable"));
}

#[tokio::test]
async fn test_fetch_stats_undecodable_ohlcv_is_global_only() {
    let server = StubServer::start(&[
        ("/v1/exchangerate/BTC/USD", 200, BTC_USD_RATE),
        ("/v1/ohlcv", 200, "not json"),
    ])
    .await;

    let stats = client(&server.base_url).fetch_stats("BTC", "USD").await.unwrap();
    assert_eq!(stats.aggregator, Aggregator::GlobalOnly);
}

#[tokio::test]
async fn test_fetch_stats_propagates_rate_error() {
    let server = StubServer::start(&[("/v1/exchangerate", 403, "")]).await;

    let err = client(&server.base_url).fetch_stats("BTC", "USD").await.unwrap_err();
    assert_eq!(err, RateError::Auth { status: 403 });
}
