//! User-facing texts (Telegram legacy Markdown).

use crate::domain::rate::{CoinStats, RateQuote};
use crate::error::RateError;
use crate::shared::fmt::{fixed, kyiv_time};
use crate::shared::Pair;

use std::time::Duration;

pub fn welcome() -> &'static str {
    "Вітаю! Я допоможу вам дізнатися курс криптовалюти! 👋"
}

pub fn choose_asset() -> &'static str {
    "Оберіть криптовалюту або введіть свою (наприклад, *0.5 ETH*):"
}

pub fn invalid_asset_input() -> &'static str {
    "Введіть коректну валюту (наприклад, *BTC*) або суму та код (наприклад, *0.5 ETH*)."
}

pub fn no_asset_selected() -> &'static str {
    "Помилка: спершу оберіть криптовалюту."
}

pub fn history_empty() -> &'static str {
    "Ваша історія запитів порожня."
}

pub fn history_prompt() -> &'static str {
    "Оберіть запит з історії:"
}

pub fn callback_ack(success: bool) -> &'static str {
    if success {
        "✅ Курс отримано!"
    } else {
        "❌ Не вдалося отримати курс"
    }
}

/// Confirmation after the asset step. `amount` is shown only for typed input.
pub fn asset_chosen(code: &str, amount: Option<f64>) -> String {
    match amount {
        Some(amount) => format!(
            "Ви обрали *{} {}*. Тепер оберіть валюту:",
            fixed(amount, 2),
            escape_markdown(code)
        ),
        None => format!("Ви обрали *{}*. Тепер оберіть валюту:", escape_markdown(code)),
    }
}

pub fn rate_result(quote: &RateQuote, amount: f64) -> String {
    let base = escape_markdown(&quote.base);
    let quote_code = escape_markdown(&quote.quote);
    let amount_str = fixed(amount, 2);
    format!(
        "📊 Курс *{amount} {base}* до *{quote}*:\n\n*{amount} {base} = {total} {quote}*\n\n_Дані актуальні станом на {time}_",
        amount = amount_str,
        base = base,
        quote = quote_code,
        total = fixed(quote.rate * amount, 4),
        time = escape_markdown(&timestamp(quote.time.as_deref())),
    )
}

pub fn rate_failure(pair: &Pair, err: &RateError) -> String {
    format!(
        "❌ Помилка при отриманні курсу *{}*:\n{}",
        escape_markdown(&pair.to_string()),
        describe_error(err)
    )
}

pub fn coin_stats(stats: &CoinStats) -> String {
    let base = escape_markdown(&stats.base);
    let fiat = escape_markdown(&stats.quote);
    format!(
        "📊 *Курс {base}/{fiat}*\n\n\
         💰 Ціна зараз: *{rate} {fiat}*\n\
         📉 24h MIN: {min} {fiat}\n\
         📈 24h MAX: {max} {fiat}\n\n\
         🌐 Агрегатор: {aggregator}\n\
         ⏰ Оновлено: {time}",
        base = base,
        fiat = fiat,
        rate = fixed(stats.rate, 6),
        min = fixed(stats.min_24h, 6),
        max = fixed(stats.max_24h, 6),
        aggregator = escape_markdown(stats.aggregator.label()),
        time = escape_markdown(&timestamp(stats.time.as_deref())),
    )
}

pub fn coin_failure(pair: &Pair, err: &RateError) -> String {
    format!(
        "❌ *Помилка отримання курсу {}*:\n{}",
        escape_markdown(&pair.to_string()),
        describe_error(err)
    )
}

pub fn coin_usage(default_fiat: &str) -> String {
    format!(
        "Будь ласка, вкажіть символ. Наприклад: `/coin BTC {}`",
        default_fiat.replace('`', "")
    )
}

pub fn rate_limited(remaining: Duration) -> String {
    format!(
        "🛑 *Обмеження запитів*: Спробуйте знову через *{:.1} сек.*",
        remaining.as_secs_f64()
    )
}

/// One Ukrainian sentence per error kind.
pub fn describe_error(err: &RateError) -> String {
    match err {
        RateError::Auth { status } => {
            format!("Помилка авторизації (код {}). Перевірте API-ключ.", status)
        }
        RateError::BadRequest { status, message } => {
            format!("Помилка в даних (код {}). {}", status, escape_markdown(message))
        }
        RateError::IncompleteData(_) => "API повернуло неповні дані курсу.".to_string(),
        RateError::Network(_) => {
            "Помилка мережі при запиті до API. Спробуйте ще раз.".to_string()
        }
        RateError::UnexpectedStatus(code) => {
            format!("Непередбачена помилка API (код {}).", code)
        }
    }
}

fn timestamp(time: Option<&str>) -> String {
    time.map(kyiv_time).unwrap_or_else(|| "—".to_string())
}

/// Escape the characters legacy Markdown treats as markup.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
