//! Timesheet model and reconciliation status.
//!
//! This module defines the Timesheet struct for representing actual-worked
//! submissions against scheduled shifts, and the status enum driving the
//! reconciliation state machine.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reconciliation status of a timesheet.
///
/// `Pending` exists only between creation and auto-classification;
/// `Approved` and `Rejected` are terminal. `RequiresReview` waits on a
/// reviewer decision or an amendment that brings the variance back
/// within tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetStatus {
    /// Submitted, not yet classified.
    Pending,
    /// Variance within tolerance, or reviewer approved. Terminal.
    Approved,
    /// Reviewer rejected. Terminal.
    Rejected,
    /// Variance outside tolerance; waiting on a reviewer.
    RequiresReview,
}

impl TimesheetStatus {
    /// Returns true for the terminal states (`Approved` and `Rejected`).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TimesheetStatus::Approved | TimesheetStatus::Rejected)
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimesheetStatus::Pending => write!(f, "pending"),
            TimesheetStatus::Approved => write!(f, "approved"),
            TimesheetStatus::Rejected => write!(f, "rejected"),
            TimesheetStatus::RequiresReview => write!(f, "requires_review"),
        }
    }
}

/// An actual-worked submission reconciled against a scheduled shift.
///
/// `scheduled_hours` is a snapshot of the shift's paid hours at
/// submission time and never changes afterwards, so later shift edits
/// cannot silently move an already-reviewed variance. `approved_rate`
/// is frozen the moment the sheet enters `Approved` and shields payroll
/// figures from later staff rate changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timesheet {
    /// Unique identifier for the timesheet.
    pub id: Uuid,
    /// The shift this submission reconciles against. One timesheet per shift.
    pub shift_id: Uuid,
    /// The staff member who worked the shift.
    pub staff_id: Uuid,
    /// Monday of the week the shift belonged to, snapshotted at submission.
    pub week_start: NaiveDate,
    /// Paid hours the shift was scheduled for, frozen at submission.
    pub scheduled_hours: Decimal,
    /// Hours the staff member reports having worked.
    pub actual_hours: Decimal,
    /// Clock-in time as submitted, if the device captured one.
    pub clock_in: Option<NaiveDateTime>,
    /// Clock-out time as submitted, if the device captured one.
    pub clock_out: Option<NaiveDateTime>,
    /// Signed variance in minutes. Positive means worked more than scheduled.
    pub variance_minutes: i64,
    /// Current reconciliation status.
    pub status: TimesheetStatus,
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
    /// Hourly rate frozen when the sheet entered `Approved`.
    pub approved_rate: Option<Decimal>,
}
