//! Free-text asset input: `"<amount> <code>"` or `"<code>"`.

use regex::Regex;
use std::sync::LazyLock;

static ASSET_INPUT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d*\.?\d+)?\s*([a-zA-Z]{2,5})$").expect("Invalid regex"));

/// Parsed asset input.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetInput {
    pub amount: f64,
    /// Upper-cased, 2 to 5 bytes long.
    pub code: String,
}

/// Parse user text into an amount and an asset code.
///
/// Text that does not match the pattern is taken whole as the code with an
/// amount of 1; the length check then decides. So `"BTC123"` falls through,
/// becomes a 6-character code, and is rejected, while `"BT C"` is accepted.
/// Returns `None` for a code outside 2..=5 bytes or a zero amount.
pub fn parse_asset_input(text: &str) -> Option<AssetInput> {
    let input = text.trim();

    let (amount, code) = match ASSET_INPUT_REGEX.captures(input) {
        Some(caps) => {
            let amount = caps
                .get(1)
                .map(|m| m.as_str().parse::<f64>().unwrap_or(0.0))
                .unwrap_or(1.0);
            let code = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            (amount, code.to_uppercase())
        }
        None => (1.0, input.to_uppercase()),
    };

    if !(2..=5).contains(&code.len()) || amount == 0.0 {
        return None;
    }

    Some(AssetInput { amount, code })
}
