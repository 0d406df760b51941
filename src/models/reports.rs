//! Report row types produced by the labor cost aggregator.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::TimesheetStatus;

/// Projected labor totals for one scheduled week.
///
/// Sums cover every shift in the week, drafts included, at the assigned
/// staff members' current rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    /// Monday of the summarized week.
    pub week_start: NaiveDate,
    /// Total paid hours, summed unrounded and rounded once at output.
    pub total_hours: Decimal,
    /// Total projected cost, rounded to 2 decimal places at output.
    pub total_cost: Decimal,
}

/// Projected labor totals for one staff member across all weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffTotals {
    /// The staff member summarized.
    pub staff_id: Uuid,
    /// Total paid hours across the staff member's shifts.
    pub hours: Decimal,
    /// Total projected cost at the current rate.
    pub cost: Decimal,
}

/// One row of the timesheet export.
///
/// Field names and order are a contract with downstream payroll tooling
/// and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetRow {
    /// Display name of the staff member.
    pub staff_name: String,
    /// Paid hours the shift was scheduled for.
    pub scheduled_hours: Decimal,
    /// Hours reported as worked.
    pub actual_hours: Decimal,
    /// Signed variance in minutes.
    pub variance_minutes: i64,
    /// Reconciliation status at export time.
    pub status: TimesheetStatus,
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// EXP-001: export row field names and order are the payroll contract
    #[test]
    fn test_timesheet_row_field_names_and_order() {
        let row = TimesheetRow {
            staff_name: "Priya Sharma".to_string(),
            scheduled_hours: Decimal::new(75, 1),
            actual_hours: Decimal::new(775, 2),
            variance_minutes: 15,
            status: TimesheetStatus::Approved,
            submitted_at: Utc.with_ymd_and_hms(2024, 12, 2, 17, 15, 0).unwrap(),
        };

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            "{\"staffName\":\"Priya Sharma\",\
             \"scheduledHours\":\"7.5\",\
             \"actualHours\":\"7.75\",\
             \"varianceMinutes\":15,\
             \"status\":\"approved\",\
             \"submittedAt\":\"2024-12-02T17:15:00Z\"}"
        );
    }

    #[test]
    fn test_timesheet_row_round_trip() {
        let row = TimesheetRow {
            staff_name: "Priya Sharma".to_string(),
            scheduled_hours: Decimal::new(75, 1),
            actual_hours: Decimal::new(70, 1),
            variance_minutes: -30,
            status: TimesheetStatus::RequiresReview,
            submitted_at: Utc.with_ymd_and_hms(2024, 12, 2, 17, 15, 0).unwrap(),
        };

        let json = serde_json::to_string(&row).unwrap();
        let deserialized: TimesheetRow = serde_json::from_str(&json).unwrap();
        assert_eq!(row, deserialized);
    }

    #[test]
    fn test_weekly_totals_serialization() {
        let totals = WeeklyTotals {
            week_start: NaiveDate::from_ymd_opt(2024, 12, 2).unwrap(),
            total_hours: Decimal::new(225, 1),
            total_cost: Decimal::new(27000, 2),
        };

        let value: serde_json::Value = serde_json::to_value(&totals).unwrap();
        assert_eq!(value["week_start"], "2024-12-02");
        assert_eq!(value["total_hours"], "22.5");
        assert_eq!(value["total_cost"], "270.00");
    }
}
