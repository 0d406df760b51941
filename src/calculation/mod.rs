//! Calculation logic for the roster engine.
//!
//! This module contains the pure arithmetic underlying scheduling and
//! reconciliation: wall-clock duration, paid hours after unpaid breaks,
//! labor cost and money rounding, and the timesheet variance rule with
//! its tolerance classification.

mod cost;
mod hours;
mod variance;

pub use cost::{round_money, shift_cost};
pub use hours::{duration_hours, paid_hours};
pub use variance::{DEFAULT_TOLERANCE_MINUTES, classify, variance_minutes};
