//! HTTP layer — `CoinApiHttp`, one method per market-data endpoint.

pub mod client;

pub use client::CoinApiHttp;
