//! Labor cost reporting over the schedule store.
//!
//! Two deliberately different figures live here: the projected cost of
//! the roster (live rates over scheduled shifts) and the payroll-facing
//! cost of approved timesheets (rates frozen at approval). Sums stay
//! unrounded until the single rounding at the output edge.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::calculation::round_money;
use crate::models::{StaffTotals, TimesheetRow, TimesheetStatus, WeeklyTotals, week_start_of};

use super::ScheduleStore;

impl ScheduleStore {
    /// Projected hours and cost for one week of the roster.
    ///
    /// Sums paid hours and cost over the week's shifts, drafts included,
    /// at the staff members' current rates. Any date within the week
    /// selects it. Totals are rounded once, at this edge.
    pub fn weekly_totals(&self, business_id: Uuid, week_start: NaiveDate) -> WeeklyTotals {
        let monday = week_start_of(week_start);
        let Some(entry) = self.existing_business(business_id) else {
            return WeeklyTotals {
                week_start: monday,
                total_hours: Decimal::ZERO,
                total_cost: Decimal::ZERO,
            };
        };
        let schedule = Self::lock_schedule(&entry);

        let mut total_hours = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;
        for shift in schedule
            .shifts
            .values()
            .filter(|shift| shift.week_start == monday)
        {
            let hours = shift.paid_hours();
            total_hours += hours;
            total_cost += hours * schedule.rate_of(shift.staff_id);
        }

        WeeklyTotals {
            week_start: monday,
            total_hours: total_hours
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            total_cost: round_money(total_cost),
        }
    }

    /// Scheduled hours and cost for one staff member across all weeks.
    ///
    /// An unknown staff member reports zero totals.
    pub fn per_staff_totals(&self, business_id: Uuid, staff_id: Uuid) -> StaffTotals {
        let Some(entry) = self.existing_business(business_id) else {
            return StaffTotals {
                staff_id,
                hours: Decimal::ZERO,
                cost: Decimal::ZERO,
            };
        };
        let schedule = Self::lock_schedule(&entry);
        let rate = schedule.rate_of(staff_id);

        let mut hours = Decimal::ZERO;
        for shift in schedule
            .shifts
            .values()
            .filter(|shift| shift.staff_id == staff_id)
        {
            hours += shift.paid_hours();
        }

        StaffTotals {
            staff_id,
            hours: hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            cost: round_money(hours * rate),
        }
    }

    /// Payroll cost of approved timesheets over an inclusive week range.
    ///
    /// Sums `actual_hours x approved_rate` over `Approved` sheets whose
    /// snapshot `week_start` falls in `[from, to]`. The frozen rates make
    /// this figure immune to later staff rate changes, so it diverges
    /// from [`ScheduleStore::weekly_totals`] on purpose.
    pub fn approved_labor_cost(&self, business_id: Uuid, from: NaiveDate, to: NaiveDate) -> Decimal {
        let Some(entry) = self.existing_business(business_id) else {
            return Decimal::ZERO;
        };
        let schedule = Self::lock_schedule(&entry);

        let total: Decimal = schedule
            .timesheets
            .values()
            .filter(|sheet| {
                sheet.status == TimesheetStatus::Approved
                    && sheet.week_start >= from
                    && sheet.week_start <= to
            })
            .map(|sheet| sheet.actual_hours * sheet.approved_rate.unwrap_or_default())
            .sum();
        round_money(total)
    }

    /// Export rows for every timesheet of a business, ordered by
    /// submission time.
    ///
    /// This is the reconciliation export contract; the row shape and its
    /// camelCase field names are fixed. Orphaned sheets whose shift was
    /// deleted still export.
    pub fn timesheet_rows(&self, business_id: Uuid) -> Vec<TimesheetRow> {
        let Some(entry) = self.existing_business(business_id) else {
            return Vec::new();
        };
        let schedule = Self::lock_schedule(&entry);

        let mut sheets: Vec<_> = schedule.timesheets.values().collect();
        sheets.sort_by_key(|sheet| (sheet.submitted_at, sheet.id));
        sheets
            .into_iter()
            .map(|sheet| TimesheetRow {
                staff_name: schedule.name_of(sheet.staff_id),
                scheduled_hours: sheet.scheduled_hours,
                actual_hours: sheet.actual_hours,
                variance_minutes: sheet.variance_minutes,
                status: sheet.status,
                submitted_at: sheet.submitted_at,
            })
            .collect()
    }
}
