//! Euro price display.
//!
//! Amounts are kept exact (`Decimal`) everywhere; rounding to two fraction
//! digits only happens when a price is rendered for people to read.

use rust_decimal::{Decimal, RoundingStrategy};

/// Symbol prefixed to every displayed price.
const CURRENCY_SYMBOL: &str = "€";

/// Number of fraction digits shown when a price is displayed.
const DISPLAY_SCALE: u32 = 2;

/// Render an amount as a euro price with exactly two fraction digits.
///
/// The amount is rounded half away from zero.
///
/// ```
/// use boutique_core::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(17998, 2)), "€179.98");
/// assert_eq!(format_currency(Decimal::ZERO), "€0.00");
/// ```
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    format!("{CURRENCY_SYMBOL}{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_pads_fraction_digits() {
        assert_eq!(format_currency(Decimal::new(5, 0)), "€5.00");
        assert_eq!(format_currency(Decimal::new(15, 1)), "€1.50");
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(Decimal::new(10_005, 3)), "€10.01");
        assert_eq!(format_currency(Decimal::new(10_004, 3)), "€10.00");
        assert_eq!(format_currency(Decimal::new(-10_005, 3)), "€-10.01");
    }

    #[test]
    fn test_format_currency_negative_amount() {
        assert_eq!(format_currency(Decimal::new(-250, 2)), "€-2.50");
    }
}
