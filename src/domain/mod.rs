//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs` — Domain types
//! - `wire.rs` — Raw serde structs matching provider responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `state.rs` — Shared stores with their own locks
//! - `client.rs` — Operations on `RateClient`

pub mod cooldown;
pub mod history;
pub mod rate;
pub mod session;
