//! Decimal money helpers for display and form input.

#[cfg(test)]
#[path = "money_test.rs"]
mod money_test;

use std::str::FromStr;

use rust_decimal::RoundingStrategy;

pub use rust_decimal::Decimal;

/// Format an amount as en-US currency text without a symbol: `1,234.50`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// [`format_money`] with a leading dollar sign: `$1,234.50`, `-$3.00`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let text = format_money(amount);
    match text.strip_prefix('-') {
        Some(unsigned) => format!("-${unsigned}"),
        None => format!("${text}"),
    }
}

/// Parse a price typed into a form. Blank means zero; the result is rounded
/// to cents. Returns `None` for text that is not a decimal number.
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    match Decimal::from_str(trimmed) {
        Ok(value) => Some(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)),
        Err(_) => None,
    }
}
