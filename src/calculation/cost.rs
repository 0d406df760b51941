//! Labor cost arithmetic and money rounding.
//!
//! Costs are computed unrounded so aggregates can sum exact components
//! and round a single time at the output edge. Rounding is half away
//! from zero, the convention payroll systems expect for currency.

use rust_decimal::{Decimal, RoundingStrategy};

/// Calculates the unrounded labor cost for a number of paid hours.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::shift_cost;
/// use rust_decimal::Decimal;
///
/// let paid = Decimal::new(75, 1); // 7.5 hours
/// let rate = Decimal::new(1200, 2); // 12.00 per hour
///
/// assert_eq!(shift_cost(paid, rate), Decimal::new(900000, 4)); // 90.0000
/// ```
pub fn shift_cost(paid_hours: Decimal, hourly_rate: Decimal) -> Decimal {
    paid_hours * hourly_rate
}

/// Rounds a currency amount to 2 decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(15015, 3)), Decimal::new(1502, 2)); // 15.015 -> 15.02
/// assert_eq!(round_money(Decimal::new(-15015, 3)), Decimal::new(-1502, 2)); // -15.015 -> -15.02
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
