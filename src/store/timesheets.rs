//! Timesheet reconciliation on the schedule store.
//!
//! Submissions snapshot the scheduled hours and week of their shift, get
//! auto-classified against the tolerance policy, and then move through a
//! small state machine: `Approved` and `Rejected` are terminal, reviewer
//! decisions resolve `RequiresReview`, and amendments re-run the
//! auto-classification against the frozen snapshot. Every transition is
//! check-then-set inside the business critical section.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::{classify, variance_minutes};
use crate::error::{EngineError, EngineResult};
use crate::models::{Timesheet, TimesheetStatus};

use super::ScheduleStore;

impl ScheduleStore {
    /// Submits actual worked hours against a shift.
    ///
    /// Snapshots `scheduled_hours` and `week_start` from the shift as it
    /// stands at submission; later shift edits never touch the snapshot.
    /// The sheet is auto-classified immediately: within tolerance it lands
    /// `Approved` with the staff member's current rate frozen on it,
    /// otherwise it waits in `RequiresReview`. Clock times are stored as
    /// submitted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShiftNotFound`] for a dangling shift id and
    /// [`EngineError::DuplicateSubmission`] when the shift already has a
    /// timesheet.
    pub fn submit_timesheet(
        &self,
        business_id: Uuid,
        shift_id: Uuid,
        actual_hours: Decimal,
        clock_in: Option<NaiveDateTime>,
        clock_out: Option<NaiveDateTime>,
    ) -> EngineResult<Timesheet> {
        let entry = self.business(business_id);
        let mut guard = Self::lock_schedule(&entry);
        let schedule = &mut *guard;

        let shift = schedule
            .shifts
            .get(&shift_id)
            .ok_or(EngineError::ShiftNotFound { shift_id })?;
        if schedule.timesheet_by_shift.contains_key(&shift_id) {
            return Err(EngineError::DuplicateSubmission { shift_id });
        }

        let scheduled_hours = shift.paid_hours();
        let variance = variance_minutes(actual_hours, scheduled_hours);
        let status = classify(variance, self.policy.tolerance_minutes);
        let approved_rate =
            (status == TimesheetStatus::Approved).then(|| schedule.rate_of(shift.staff_id));

        let sheet = Timesheet {
            id: Uuid::new_v4(),
            shift_id,
            staff_id: shift.staff_id,
            week_start: shift.week_start,
            scheduled_hours,
            actual_hours,
            clock_in,
            clock_out,
            variance_minutes: variance,
            status,
            submitted_at: Utc::now(),
            approved_rate,
        };

        schedule.timesheet_by_shift.insert(shift_id, sheet.id);
        schedule.timesheets.insert(sheet.id, sheet.clone());
        Ok(sheet)
    }

    /// Reviewer approval of a non-terminal timesheet.
    ///
    /// Freezes the staff member's rate in force at approval time; the
    /// frozen figure is what payroll reporting reads.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TimesheetNotFound`] for an unknown id and
    /// [`EngineError::AlreadyTerminal`] when the sheet is already
    /// `Approved` or `Rejected`.
    pub fn approve_timesheet(
        &self,
        business_id: Uuid,
        timesheet_id: Uuid,
    ) -> EngineResult<Timesheet> {
        let entry = self.business(business_id);
        let mut guard = Self::lock_schedule(&entry);
        let schedule = &mut *guard;

        let sheet = schedule
            .timesheets
            .get_mut(&timesheet_id)
            .ok_or(EngineError::TimesheetNotFound { timesheet_id })?;
        if sheet.status.is_terminal() {
            return Err(EngineError::AlreadyTerminal {
                timesheet_id,
                status: sheet.status,
            });
        }

        // Freeze the rate in force at approval time
        sheet.approved_rate = Some(
            schedule
                .staff
                .get(&sheet.staff_id)
                .map(|member| member.hourly_rate)
                .unwrap_or_default(),
        );
        sheet.status = TimesheetStatus::Approved;
        Ok(sheet.clone())
    }

    /// Reviewer rejection of a non-terminal timesheet.
    ///
    /// # Errors
    ///
    /// Same guards as [`ScheduleStore::approve_timesheet`].
    pub fn reject_timesheet(
        &self,
        business_id: Uuid,
        timesheet_id: Uuid,
    ) -> EngineResult<Timesheet> {
        let entry = self.business(business_id);
        let mut guard = Self::lock_schedule(&entry);
        let schedule = &mut *guard;

        let sheet = schedule
            .timesheets
            .get_mut(&timesheet_id)
            .ok_or(EngineError::TimesheetNotFound { timesheet_id })?;
        if sheet.status.is_terminal() {
            return Err(EngineError::AlreadyTerminal {
                timesheet_id,
                status: sheet.status,
            });
        }

        sheet.status = TimesheetStatus::Rejected;
        Ok(sheet.clone())
    }

    /// Corrects the actual hours on a non-terminal timesheet.
    ///
    /// Variance is always measured against the `scheduled_hours` frozen at
    /// submission, never against the shift as it stands now. The amendment
    /// re-runs auto-classification, which is the only automatic exit from
    /// `RequiresReview`; an amendment landing within tolerance approves
    /// and freezes the current rate.
    ///
    /// # Errors
    ///
    /// Same guards as [`ScheduleStore::approve_timesheet`].
    pub fn amend_timesheet(
        &self,
        business_id: Uuid,
        timesheet_id: Uuid,
        new_actual_hours: Decimal,
    ) -> EngineResult<Timesheet> {
        let entry = self.business(business_id);
        let mut guard = Self::lock_schedule(&entry);
        let schedule = &mut *guard;

        let sheet = schedule
            .timesheets
            .get_mut(&timesheet_id)
            .ok_or(EngineError::TimesheetNotFound { timesheet_id })?;
        if sheet.status.is_terminal() {
            return Err(EngineError::AlreadyTerminal {
                timesheet_id,
                status: sheet.status,
            });
        }

        sheet.actual_hours = new_actual_hours;
        sheet.variance_minutes = variance_minutes(new_actual_hours, sheet.scheduled_hours);
        sheet.status = classify(sheet.variance_minutes, self.policy.tolerance_minutes);
        if sheet.status == TimesheetStatus::Approved {
            sheet.approved_rate = Some(
                schedule
                    .staff
                    .get(&sheet.staff_id)
                    .map(|member| member.hourly_rate)
                    .unwrap_or_default(),
            );
        }
        Ok(sheet.clone())
    }
}
