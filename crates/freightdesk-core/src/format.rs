//! # Display Formatting
//!
//! Presentation helpers. Values are rounded here and nowhere else.

use crate::money::Money;
use crate::types::Currency;

/// Formats an amount with currency symbol and thousands separators.
///
/// ## Example
/// ```rust
/// use freightdesk_core::format::format_amount;
/// use freightdesk_core::{Currency, Money};
///
/// assert_eq!(format_amount(Money::from_cents(123450), Currency::Php), "₱1,234.50");
/// assert_eq!(format_amount(Money::from_cents(-99), Currency::Usd), "-$0.99");
/// ```
pub fn format_amount(amount: Money, currency: Currency) -> String {
    let plain = amount.abs().to_string();
    let (whole, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!(
        "{}{}{}.{}",
        if amount.round_for_display().is_negative() { "-" } else { "" },
        currency.symbol(),
        group_thousands(whole),
        frac
    )
}

/// Formats an amount with an ISO code instead of a symbol: `PHP 1,234.50`.
pub fn format_amount_with_code(amount: Money, currency: Currency) -> String {
    let plain = amount.abs().to_string();
    let (whole, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!(
        "{} {}{}.{}",
        currency.code(),
        if amount.round_for_display().is_negative() { "-" } else { "" },
        group_thousands(whole),
        frac
    )
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Money::from_decimal(dec!(1234.5)), Currency::Php), "₱1,234.50");
        assert_eq!(format_amount(Money::from_units(17400), Currency::Php), "₱17,400.00");
        assert_eq!(format_amount(Money::zero(), Currency::Eur), "€0.00");
        assert_eq!(format_amount(Money::from_units(-2120), Currency::Php), "-₱2,120.00");
    }

    #[test]
    fn test_format_rounds_for_display_only() {
        assert_eq!(format_amount(Money::from_decimal(dec!(1.2012)), Currency::Php), "₱1.20");
        assert_eq!(format_amount(Money::from_decimal(dec!(-0.001)), Currency::Php), "₱0.00");
    }

    #[test]
    fn test_format_amount_with_code() {
        assert_eq!(
            format_amount_with_code(Money::from_units(1370), Currency::Php),
            "PHP 1,370.00"
        );
        assert_eq!(
            format_amount_with_code(Money::from_cents(-150), Currency::Usd),
            "USD -1.50"
        );
    }
}
