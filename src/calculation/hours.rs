//! Shift duration and paid hours arithmetic.
//!
//! This module provides the wall-clock duration and paid hours functions
//! underlying every schedule and cost figure in the engine. All arithmetic
//! is exact decimal; hours never touch floating point.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Calculates the wall-clock duration of an interval in hours.
///
/// The difference is naive wall-clock time; daylight-saving transitions
/// are not adjusted for.
///
/// # Arguments
///
/// * `start` - The start of the interval
/// * `end` - The end of the interval, which must be after `start`
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when `end <= start`.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::duration_hours;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2024-12-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-12-02 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// assert_eq!(duration_hours(start, end).unwrap(), Decimal::new(80, 1)); // 8.0 hours
/// ```
pub fn duration_hours(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<Decimal> {
    if end <= start {
        return Err(EngineError::InvalidInterval { start, end });
    }

    let minutes = (end - start).num_minutes();
    Ok(Decimal::new(minutes, 0) / Decimal::new(60, 0))
}

/// Calculates the paid hours of an interval after an unpaid break.
///
/// Paid hours are the wall-clock duration minus the break, clamped at
/// zero so a break longer than the interval never produces negative
/// hours.
///
/// # Arguments
///
/// * `start` - The start of the interval
/// * `end` - The end of the interval, which must be after `start`
/// * `break_minutes` - Unpaid break time in minutes
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when `end <= start`.
///
/// # Examples
///
/// ## Standard shift with a meal break
///
/// ```
/// use roster_engine::calculation::paid_hours;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2024-12-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-12-02 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// assert_eq!(paid_hours(start, end, 30).unwrap(), Decimal::new(75, 1)); // 7.5 hours
/// ```
///
/// ## Break exceeding the interval
///
/// ```
/// use roster_engine::calculation::paid_hours;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2024-12-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-12-02 09:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// assert_eq!(paid_hours(start, end, 45).unwrap(), Decimal::ZERO);
/// ```
pub fn paid_hours(
    start: NaiveDateTime,
    end: NaiveDateTime,
    break_minutes: u32,
) -> EngineResult<Decimal> {
    if end <= start {
        return Err(EngineError::InvalidInterval { start, end });
    }

    let total_minutes = (end - start).num_minutes();
    let paid_minutes = (total_minutes - i64::from(break_minutes)).max(0);

    Ok(Decimal::new(paid_minutes, 0) / Decimal::new(60, 0))
}
