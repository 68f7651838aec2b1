//! Number formatting for chat output.
//!
//! Rates span many orders of magnitude (BTC/UAH in the millions, SHIB/USD far
//! below one cent), so callers pick the precision and this module only groups
//! the integer part with spaces.

/// Group the integer part of an already formatted number in threes with spaces.
///
/// `"1234567.50"` → `"1 234 567.50"`. The sign and fractional part are kept as-is.
pub fn grouped(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let len = int_part.len();
    let mut out = String::with_capacity(formatted.len() + len / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Fixed-precision rendering with grouped thousands.
pub fn fixed(value: f64, decimals: usize) -> String {
    grouped(&format!("{:.1$}", value, decimals))
}
