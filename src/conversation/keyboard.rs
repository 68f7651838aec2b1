//! Menus, option sets and the button payload format.

use crate::shared::Pair;
use crate::transport::{Button, Keyboard};

/// Start-menu label that begins a selection.
pub const MENU_RATE: &str = "Дізнатися курс 💰";
/// Start-menu label that lists recent queries.
pub const MENU_HISTORY: &str = "Останні запити ⏳";

pub const POPULAR_ASSETS: [&str; 10] = [
    "BTC", "ETH", "BNB", "XRP", "ADA", "DOGE", "SOL", "DOT", "MATIC", "LTC",
];

pub const QUOTE_CHOICES: [(&str, &str); 3] = [
    ("🇺🇦 Гривня (UAH)", "UAH"),
    ("🇪🇺 Євро (EUR)", "EUR"),
    ("🇺🇸 Долар (USD)", "USD"),
];

const ASSETS_PER_ROW: usize = 5;

/// Which start-menu entry a text message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Rate,
    History,
}

/// Match text against the start-menu labels. Clients that drop the emoji
/// still match, so only the word part is compared.
pub fn menu_choice(text: &str) -> Option<MenuChoice> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    [(MENU_RATE, MenuChoice::Rate), (MENU_HISTORY, MenuChoice::History)]
        .into_iter()
        .find(|(label, _)| {
            let words = label_words(label);
            text == *label || starts_with_words(text, words)
        })
        .map(|(_, choice)| choice)
}

/// `text` is `words`, optionally followed by whitespace and anything else.
fn starts_with_words(text: &str, words: &str) -> bool {
    match text.strip_prefix(words) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

fn label_words(label: &str) -> &str {
    label.trim_end_matches(|c: char| !c.is_alphanumeric()).trim_end()
}

// ─── Button payloads ─────────────────────────────────────────────────────────

/// Payload carried by inline options, encoded as `action:value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackData {
    SelectAsset(String),
    SelectQuote(String),
    History(Pair),
}

impl CallbackData {
    pub fn encode(&self) -> String {
        match self {
            CallbackData::SelectAsset(code) => format!("select_crypto:{}", code),
            CallbackData::SelectQuote(code) => format!("select_quote:{}", code),
            CallbackData::History(pair) => format!("history_req:{}", pair),
        }
    }

    /// `None` for anything that is not exactly `action:value` with a known action.
    pub fn parse(data: &str) -> Option<Self> {
        let mut parts = data.split(':');
        let (action, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(action), Some(value), None) => (action, value.trim()),
            _ => return None,
        };
        if value.is_empty() {
            return None;
        }

        match action {
            "select_crypto" => Some(CallbackData::SelectAsset(value.to_uppercase())),
            "select_quote" => Some(CallbackData::SelectQuote(value.to_uppercase())),
            "history_req" => value.parse().ok().map(CallbackData::History),
            _ => None,
        }
    }
}

// ─── Keyboards ───────────────────────────────────────────────────────────────

pub fn start_menu() -> Keyboard {
    Keyboard::Reply(vec![vec![MENU_RATE.to_string(), MENU_HISTORY.to_string()]])
}

pub fn asset_selection() -> Keyboard {
    Keyboard::Inline(
        POPULAR_ASSETS
            .chunks(ASSETS_PER_ROW)
            .map(|row| {
                row.iter()
                    .map(|code| {
                        Button::new(*code, CallbackData::SelectAsset(code.to_string()).encode())
                    })
                    .collect()
            })
            .collect(),
    )
}

pub fn quote_selection() -> Keyboard {
    Keyboard::Inline(vec![QUOTE_CHOICES
        .iter()
        .map(|(label, code)| {
            Button::new(*label, CallbackData::SelectQuote(code.to_string()).encode())
        })
        .collect()])
}

/// One pair per row, most recent first.
pub fn history(pairs: &[Pair]) -> Keyboard {
    Keyboard::Inline(
        pairs
            .iter()
            .map(|pair| {
                vec![Button::new(
                    pair.to_string(),
                    CallbackData::History(pair.clone()).encode(),
                )]
            })
            .collect(),
    )
}
