//! Timesheet variance arithmetic and auto-classification.
//!
//! This module implements the reconciliation rule: the signed variance
//! between actual and scheduled hours in minutes, and the tolerance
//! check deciding whether a submission auto-approves or is held for
//! review.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::TimesheetStatus;

/// Default reconciliation tolerance in minutes.
///
/// A variance of exactly this magnitude is still within tolerance.
pub const DEFAULT_TOLERANCE_MINUTES: i64 = 15;

/// Calculates the signed variance between actual and scheduled hours.
///
/// The variance is `(actual - scheduled) * 60`, rounded to whole minutes
/// half away from zero. Positive means the staff member worked more than
/// scheduled.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::variance_minutes;
/// use rust_decimal::Decimal;
///
/// let scheduled = Decimal::new(75, 1); // 7.5 hours
/// let actual = Decimal::new(775, 2); // 7.75 hours
///
/// assert_eq!(variance_minutes(actual, scheduled), 15);
/// assert_eq!(variance_minutes(scheduled, actual), -15);
/// ```
pub fn variance_minutes(actual_hours: Decimal, scheduled_hours: Decimal) -> i64 {
    let exact = (actual_hours - scheduled_hours) * Decimal::new(60, 0);
    let rounded = exact.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    // Saturate pathological magnitudes rather than panic
    rounded.to_i64().unwrap_or_else(|| {
        if rounded.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// Classifies a variance against the tolerance.
///
/// The boundary is inclusive: a variance of exactly the tolerance
/// auto-approves.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::classify;
/// use roster_engine::models::TimesheetStatus;
///
/// assert_eq!(classify(15, 15), TimesheetStatus::Approved);
/// assert_eq!(classify(-15, 15), TimesheetStatus::Approved);
/// assert_eq!(classify(16, 15), TimesheetStatus::RequiresReview);
/// ```
pub fn classify(variance_minutes: i64, tolerance_minutes: i64) -> TimesheetStatus {
    let within = variance_minutes
        .checked_abs()
        .is_some_and(|v| v <= tolerance_minutes);

    if within {
        TimesheetStatus::Approved
    } else {
        TimesheetStatus::RequiresReview
    }
}
