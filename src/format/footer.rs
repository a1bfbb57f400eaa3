//! Footer year

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn four_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{4}").expect("year pattern is valid"))
}

/// Replace the first run of four digits in `text` with `year`.
/// Text without such a run is returned unchanged.
pub fn replace_first_year(text: &str, year: i32) -> Cow<'_, str> {
    four_digits().replacen(text, 1, year.to_string())
}
