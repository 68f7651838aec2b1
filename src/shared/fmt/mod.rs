//! Human-readable formatting for numbers and provider timestamps.

pub mod num;
pub mod time;

pub use num::{fixed, grouped};
pub use time::kyiv_time;
