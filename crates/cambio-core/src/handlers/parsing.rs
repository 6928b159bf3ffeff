//! Locale-aware number parsing and small markup helpers shared by the handlers.

use std::str::FromStr;

use rust_decimal::Decimal;
use scraper::{ElementRef, Selector};

/// Parse a number written with a comma decimal separator and optional dot thousands
/// separators (`"1.234,56"`, `"58,0000"`).
pub fn parse_comma_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized: String = trimmed
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    Decimal::from_str(&normalized).ok()
}

/// Rewrite a dot-decimal number into the comma convention understood by
/// [`parse_comma_decimal`].
pub fn normalize_dot_decimal(raw: &str) -> String {
    raw.trim().replace('.', ",")
}

/// Parse a plain dot-decimal number, accepting scientific notation as a fallback.
pub(crate) fn parse_plain_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

pub(crate) fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|error| format!("invalid selector '{css}': {error}"))
}

/// Whitespace-trimmed text content of an element.
pub(crate) fn cell_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}
