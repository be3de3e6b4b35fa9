//! Price rendering for the hotel's configured currency.

use serde::{Deserialize, Serialize};

use crate::booking::Price;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("HUF")
    }
}

/// Where the currency symbol sits relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyStyle {
    pub symbol: String,
    pub position: SymbolPosition,
    pub grouping_separator: char,
    pub decimal_separator: char,
    pub minor_units: u8,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "HUF" => "Ft".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "HUF" | "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn style_for(code: &CurrencyCode) -> CurrencyStyle {
    let code = code.as_str();
    let symbol = symbol_for(code);
    match code {
        "HUF" => CurrencyStyle {
            symbol,
            position: SymbolPosition::Suffix,
            grouping_separator: ' ',
            decimal_separator: ',',
            minor_units: minor_units_for(code),
        },
        _ => CurrencyStyle {
            symbol,
            position: SymbolPosition::Prefix,
            grouping_separator: ',',
            decimal_separator: '.',
            minor_units: minor_units_for(code),
        },
    }
}

/// Renders a whole-unit price, e.g. `5 000 Ft` or `$5,000.00`.
pub fn format_price(price: Price, code: &CurrencyCode) -> String {
    let style = style_for(code);
    let mut body = group_digits(&price.to_string(), style.grouping_separator);
    if style.minor_units > 0 {
        body.push(style.decimal_separator);
        body.push_str(&"0".repeat(style.minor_units as usize));
    }
    match style.position {
        SymbolPosition::Suffix => format!("{} {}", body, style.symbol),
        SymbolPosition::Prefix if style.symbol.chars().all(char::is_alphabetic) => {
            format!("{} {}", style.symbol, body)
        }
        SymbolPosition::Prefix => format!("{}{}", style.symbol, body),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forint_uses_suffix_symbol_and_space_grouping() {
        assert_eq!(format_price(5000, &CurrencyCode::new("huf")), "5 000 Ft");
        assert_eq!(format_price(800, &CurrencyCode::default()), "800 Ft");
        assert_eq!(format_price(1_250_000, &CurrencyCode::default()), "1 250 000 Ft");
    }

    #[test]
    fn dollar_uses_prefix_symbol_and_cents() {
        assert_eq!(format_price(5000, &CurrencyCode::new("USD")), "$5,000.00");
    }

    #[test]
    fn unknown_code_is_spelled_out() {
        assert_eq!(format_price(12, &CurrencyCode::new("chf")), "CHF 12.00");
    }
}
