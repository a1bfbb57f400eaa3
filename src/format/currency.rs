//! Currency text
//!
//! Canonical rendering is the currency symbol, the value to exactly two
//! decimals and a comma between every three integer digits.

use regex::Regex;
use std::sync::OnceLock;

/// Currency symbol used across the dashboard
pub const CURRENCY_SYMBOL: &str = "£";

/// Leading decimal number, the way page text is read before formatting
const LEADING_NUMBER: &str = r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?";

fn leading_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LEADING_NUMBER).expect("leading number pattern is valid"))
}

/// Format `value` with the dashboard currency symbol
///
/// ```
/// use bankdash::format::format_currency;
///
/// assert_eq!(format_currency(1234.5), "£1,234.50");
/// assert_eq!(format_currency(1000000.0), "£1,000,000.00");
/// ```
pub fn format_currency(value: f64) -> String {
    format_currency_with(value, CURRENCY_SYMBOL)
}

/// Format `value` with an explicit currency symbol.
///
/// The sign stays attached to the digits: `-1234.5` becomes `£-1,234.50`.
pub fn format_currency_with(value: f64, symbol: &str) -> String {
    let fixed = to_fixed_2(value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };

    match unsigned.split_once('.') {
        Some((integer, fraction)) => {
            format!("{}{}{}.{}", symbol, sign, group_thousands(integer), fraction)
        }
        None => format!("{}{}{}", symbol, sign, unsigned),
    }
}

/// Render `value` with exactly two decimals, rounded like the browser's
/// `Number.prototype.toFixed(2)`.
///
/// An exact tie between two pennies goes to the one further from zero
/// (`1.125` -> `1.13`), negative zero renders as `0.00` and non-finite values
/// render as `NaN`, `Infinity` or `-Infinity`.
pub fn to_fixed_2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0.00".to_string();
    }

    // A value exactly halfway between two pennies is an odd multiple of 1/8;
    // scaling by 8 is exact, so the check is too.
    let eighths = value.abs() * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths % 2.0 == 1.0;
    if !is_tie {
        return format!("{:.2}", value);
    }

    let pennies = (value.abs() * 100.0).ceil() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, pennies / 100, pennies % 100)
}

/// Insert a comma every three digits counting from the right
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Parse the number at the start of `text`.
///
/// Leading whitespace is skipped and trailing text ignored, so `" 12.5 GBP"`
/// reads as 12.5. Returns `None` when there is no leading number or the
/// result is not finite.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let matched = leading_number().find(trimmed)?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Canonical currency rendering of a currency-display element's text, or
/// `None` when the text should be left as it is.
///
/// `"Infinity"` does not count as a number here, so such text stays as written.
pub fn format_currency_text(text: &str, symbol: &str) -> Option<String> {
    parse_leading_float(text).map(|value| format_currency_with(value, symbol))
}
