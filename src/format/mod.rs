//! Page text formatting
//!
//! Pure text rules behind the page formatter: currency displays and the
//! footer year. The browser crate applies them to DOM nodes.

pub mod currency;
pub mod footer;

pub use currency::{
    format_currency, format_currency_text, format_currency_with, parse_leading_float, to_fixed_2,
    CURRENCY_SYMBOL,
};
pub use footer::replace_first_year;
