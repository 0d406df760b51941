//! Shift model and related types.
//!
//! This module defines the Shift struct for representing scheduled work
//! shifts, the lifecycle status enum, and the input types used to create
//! and patch shifts through the schedule store.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of a shift.
///
/// Shifts are created as drafts and become visible to staff-facing
/// collaborators only once published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Visible to schedulers only.
    #[default]
    Draft,
    /// Visible to assigned staff.
    Published,
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftStatus::Draft => write!(f, "draft"),
            ShiftStatus::Published => write!(f, "published"),
        }
    }
}

/// Represents a scheduled work shift.
///
/// `week_start` and `revision` are maintained by the store: the week is
/// re-derived from `start` on every write, and the revision counter is
/// bumped on every successful update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The staff member assigned to the shift.
    pub staff_id: Uuid,
    /// Role worked during the shift (may differ from the staff default).
    pub role: String,
    /// The start of the shift.
    pub start: NaiveDateTime,
    /// The end of the shift. Always after `start`.
    pub end: NaiveDateTime,
    /// Unpaid break time in minutes.
    pub break_minutes: u32,
    /// Lifecycle status.
    pub status: ShiftStatus,
    /// Monday of the week containing `start`.
    pub week_start: NaiveDate,
    /// Optimistic-concurrency counter.
    pub revision: u64,
}

impl Shift {
    /// Calculates the paid hours for the shift.
    ///
    /// Paid hours are the wall-clock duration minus the unpaid break,
    /// clamped at zero when the break exceeds the duration.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{Shift, ShiftStatus};
    /// use chrono::{NaiveDate, NaiveDateTime};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let shift = Shift {
    ///     id: Uuid::new_v4(),
    ///     staff_id: Uuid::new_v4(),
    ///     role: "Barista".to_string(),
    ///     start: NaiveDateTime::parse_from_str("2024-12-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end: NaiveDateTime::parse_from_str("2024-12-02 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     break_minutes: 30,
    ///     status: ShiftStatus::Draft,
    ///     week_start: NaiveDate::from_ymd_opt(2024, 12, 2).unwrap(),
    ///     revision: 0,
    /// };
    /// assert_eq!(shift.paid_hours(), Decimal::new(75, 1)); // 7.5 hours
    /// ```
    pub fn paid_hours(&self) -> Decimal {
        let total_minutes = (self.end - self.start).num_minutes();
        let paid_minutes = (total_minutes - i64::from(self.break_minutes)).max(0);

        // Convert minutes to hours as Decimal
        Decimal::new(paid_minutes, 0) / Decimal::new(60, 0)
    }

    /// Calculates the unrounded labor cost of the shift at the given rate.
    ///
    /// Aggregates sum these unrounded values and round once at output.
    pub fn cost(&self, hourly_rate: Decimal) -> Decimal {
        self.paid_hours() * hourly_rate
    }

    /// Returns true if the shift intersects the half-open interval
    /// `[start, end)`.
    ///
    /// Back-to-back shifts (one ending exactly when the other starts) do
    /// not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && self.end > start
    }

    /// Returns the calendar day the shift belongs to.
    ///
    /// An overnight shift counts toward the day its start falls on.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }
}

/// Returns the Monday of the week containing the given date.
///
/// # Examples
///
/// ```
/// use roster_engine::models::week_start_of;
/// use chrono::NaiveDate;
///
/// let wednesday = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
/// assert_eq!(week_start_of(wednesday), monday);
/// ```
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Input for creating a shift.
///
/// `week_start` is never accepted from input; the store derives it from
/// `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShift {
    /// The staff member to assign.
    pub staff_id: Uuid,
    /// Role for the shift. Defaults to the staff member's own role.
    #[serde(default)]
    pub role: Option<String>,
    /// The start of the shift.
    pub start: NaiveDateTime,
    /// The end of the shift.
    pub end: NaiveDateTime,
    /// Unpaid break time in minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// Initial lifecycle status.
    #[serde(default)]
    pub status: ShiftStatus,
}

/// A partial update to a shift.
///
/// Absent fields are left unchanged. When `expected_revision` is present
/// the update only applies if the stored revision matches, giving
/// compare-and-set semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftPatch {
    /// Reassign the shift to another staff member.
    #[serde(default)]
    pub staff_id: Option<Uuid>,
    /// New role label.
    #[serde(default)]
    pub role: Option<String>,
    /// New start time.
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    /// New end time.
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    /// New unpaid break in minutes.
    #[serde(default)]
    pub break_minutes: Option<u32>,
    /// New lifecycle status.
    #[serde(default)]
    pub status: Option<ShiftStatus>,
    /// Revision the caller last observed, for compare-and-set updates.
    #[serde(default)]
    pub expected_revision: Option<u64>,
}

/// A shift enriched with its derived paid hours and cost.
///
/// The derived figures are recomputed from the live shift and staff rate
/// on every read; they are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftView {
    /// The underlying shift.
    #[serde(flatten)]
    pub shift: Shift,
    /// Paid hours after the unpaid break.
    pub paid_hours: Decimal,
    /// Labor cost at the assigned staff member's current rate, rounded
    /// to 2 decimal places.
    pub cost: Decimal,
}

impl ShiftView {
    /// Derives the display view of a shift at the given hourly rate.
    pub fn derive(shift: Shift, hourly_rate: Decimal) -> Self {
        let paid_hours = shift.paid_hours();
        let cost = shift
            .cost(hourly_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            shift,
            paid_hours,
            cost,
        }
    }
}
