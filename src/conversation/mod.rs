//! Conversation core: input parsing, keyboards, texts and the controller.

pub mod controller;
pub mod input;
pub mod keyboard;
pub mod render;

pub use controller::{
    ControllerConfig, ConversationController, FetchCompletion, FetchOrigin, RateRequest, Stores,
};
pub use input::{parse_asset_input, AssetInput};
