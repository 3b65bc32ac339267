//! Shared helpers for currency arithmetic.

use rust_decimal::Decimal;

/// Rounds to two decimal places, half-up (midpoint away from zero).
///
/// Standard financial rounding: exactly 0.005 becomes 0.01.
///
/// ```
/// use rust_decimal_macros::dec;
/// use filing_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(4568.005)), dec!(4568.01));
/// assert_eq!(round_half_up(dec!(4568.004)), dec!(4568.00));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
