//! Shift operations on the schedule store.
//!
//! Creation, patching, deletion, overlap queries, week listings, and the
//! bulk publish workflow. Every operation validates inside the business
//! critical section; `week_start` is always derived from the shift start
//! and never trusted from input.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::config::OverlapPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    NewShift, Shift, ShiftPatch, ShiftStatus, ShiftView, TimesheetStatus, week_start_of,
};

use super::{BusinessSchedule, ScheduleStore};

/// Ids of the staff member's shifts intersecting `[start, end)`, sorted
/// for a deterministic error payload.
fn conflicting_ids(
    schedule: &BusinessSchedule,
    staff_id: Uuid,
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude: Option<Uuid>,
) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = schedule
        .shifts
        .values()
        .filter(|shift| {
            shift.staff_id == staff_id && Some(shift.id) != exclude && shift.overlaps(start, end)
        })
        .map(|shift| shift.id)
        .collect();
    ids.sort();
    ids
}

/// A week's shifts ordered by start time, ties broken by staff name.
fn week_shifts(schedule: &BusinessSchedule, monday: NaiveDate) -> Vec<Shift> {
    let mut keyed: Vec<(String, Shift)> = schedule
        .shifts
        .values()
        .filter(|shift| shift.week_start == monday)
        .map(|shift| (schedule.name_of(shift.staff_id), shift.clone()))
        .collect();
    keyed.sort_by(|a, b| {
        a.1.start
            .cmp(&b.1.start)
            .then_with(|| a.0.cmp(&b.0))
            .then_with(|| a.1.id.cmp(&b.1.id))
    });
    keyed.into_iter().map(|(_, shift)| shift).collect()
}

impl ScheduleStore {
    /// Creates a shift on a business's schedule.
    ///
    /// The shift's `week_start` is derived from its start (Monday weeks)
    /// and its role defaults to the assigned staff member's own role.
    /// Under [`OverlapPolicy::Reject`] a double-booked staff member fails
    /// creation; under the default `Warn` policy the shift is created and
    /// conflicts surface through [`ScheduleStore::find_overlapping`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterval`] when `end <= start`,
    /// [`EngineError::UnknownStaff`] when the staff id does not resolve
    /// within the business, and [`EngineError::OverlappingShift`] under
    /// the reject policy.
    pub fn create_shift(&self, business_id: Uuid, input: NewShift) -> EngineResult<ShiftView> {
        let entry = self.business(business_id);
        let mut schedule = Self::lock_schedule(&entry);

        if input.end <= input.start {
            return Err(EngineError::InvalidInterval {
                start: input.start,
                end: input.end,
            });
        }

        let staff = schedule
            .staff
            .get(&input.staff_id)
            .ok_or(EngineError::UnknownStaff {
                staff_id: input.staff_id,
            })?;
        let role = input.role.unwrap_or_else(|| staff.role.clone());
        let hourly_rate = staff.hourly_rate;

        if self.policy.overlap == OverlapPolicy::Reject {
            let conflicting =
                conflicting_ids(&schedule, input.staff_id, input.start, input.end, None);
            if !conflicting.is_empty() {
                return Err(EngineError::OverlappingShift {
                    staff_id: input.staff_id,
                    conflicting,
                });
            }
        }

        let shift = Shift {
            id: Uuid::new_v4(),
            staff_id: input.staff_id,
            role,
            start: input.start,
            end: input.end,
            break_minutes: input.break_minutes,
            status: input.status,
            week_start: week_start_of(input.start.date()),
            revision: 0,
        };

        schedule.shifts.insert(shift.id, shift.clone());
        Ok(ShiftView::derive(shift, hourly_rate))
    }

    /// Applies a partial update to a shift.
    ///
    /// The patched shift is re-validated as a whole: the interval
    /// invariant, staff resolution, and (under the reject policy) double
    /// booking. `week_start` is re-derived and the revision counter is
    /// bumped. When the patch carries `expected_revision`, the update
    /// only applies if the stored revision matches.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ShiftNotFound`] for an absent shift,
    /// [`EngineError::ConcurrentModification`] on a revision mismatch,
    /// and the same validation errors as [`ScheduleStore::create_shift`].
    pub fn update_shift(
        &self,
        business_id: Uuid,
        shift_id: Uuid,
        patch: ShiftPatch,
    ) -> EngineResult<ShiftView> {
        let entry = self.business(business_id);
        let mut schedule = Self::lock_schedule(&entry);

        let current = schedule
            .shifts
            .get(&shift_id)
            .ok_or(EngineError::ShiftNotFound { shift_id })?;

        if let Some(expected) = patch.expected_revision {
            if current.revision != expected {
                return Err(EngineError::ConcurrentModification {
                    shift_id,
                    expected,
                    actual: current.revision,
                });
            }
        }

        let mut updated = current.clone();
        if let Some(staff_id) = patch.staff_id {
            updated.staff_id = staff_id;
        }
        if let Some(role) = patch.role {
            updated.role = role;
        }
        if let Some(start) = patch.start {
            updated.start = start;
        }
        if let Some(end) = patch.end {
            updated.end = end;
        }
        if let Some(break_minutes) = patch.break_minutes {
            updated.break_minutes = break_minutes;
        }
        if let Some(status) = patch.status {
            updated.status = status;
        }

        if updated.end <= updated.start {
            return Err(EngineError::InvalidInterval {
                start: updated.start,
                end: updated.end,
            });
        }
        if !schedule.staff.contains_key(&updated.staff_id) {
            return Err(EngineError::UnknownStaff {
                staff_id: updated.staff_id,
            });
        }
        if self.policy.overlap == OverlapPolicy::Reject {
            let conflicting = conflicting_ids(
                &schedule,
                updated.staff_id,
                updated.start,
                updated.end,
                Some(shift_id),
            );
            if !conflicting.is_empty() {
                return Err(EngineError::OverlappingShift {
                    staff_id: updated.staff_id,
                    conflicting,
                });
            }
        }

        updated.week_start = week_start_of(updated.start.date());
        updated.revision += 1;

        let hourly_rate = schedule.rate_of(updated.staff_id);
        schedule.shifts.insert(shift_id, updated.clone());
        Ok(ShiftView::derive(updated, hourly_rate))
    }

    /// Deletes a shift, returning whether anything was removed.
    ///
    /// Deletion is idempotent: an absent id is a successful no-op
    /// returning `false`. A `Pending` or `RequiresReview` timesheet is
    /// cascade-deleted with the shift; a `Rejected` timesheet is kept as
    /// an orphaned audit record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ApprovedTimesheet`] when an approved
    /// timesheet references the shift; approved sheets carry payroll
    /// figures and block deletion.
    pub fn delete_shift(&self, business_id: Uuid, shift_id: Uuid) -> EngineResult<bool> {
        let entry = self.business(business_id);
        let mut schedule = Self::lock_schedule(&entry);

        if !schedule.shifts.contains_key(&shift_id) {
            return Ok(false);
        }

        if let Some(&timesheet_id) = schedule.timesheet_by_shift.get(&shift_id) {
            let status = schedule
                .timesheets
                .get(&timesheet_id)
                .map(|sheet| sheet.status);
            match status {
                Some(TimesheetStatus::Approved) => {
                    return Err(EngineError::ApprovedTimesheet { shift_id });
                }
                Some(TimesheetStatus::Rejected) => {
                    // Keep the rejected sheet as an orphaned audit record
                    schedule.timesheet_by_shift.remove(&shift_id);
                }
                _ => {
                    schedule.timesheets.remove(&timesheet_id);
                    schedule.timesheet_by_shift.remove(&shift_id);
                }
            }
        }

        schedule.shifts.remove(&shift_id);
        Ok(true)
    }

    /// Returns a staff member's shifts intersecting `[start, end)`,
    /// ordered by start time.
    ///
    /// The store only reports conflicts; whether to act on them stays
    /// with the caller unless the policy says reject.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterval`] when `end <= start`.
    pub fn find_overlapping(
        &self,
        business_id: Uuid,
        staff_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> EngineResult<Vec<Shift>> {
        if end <= start {
            return Err(EngineError::InvalidInterval { start, end });
        }

        let Some(entry) = self.existing_business(business_id) else {
            return Ok(Vec::new());
        };
        let schedule = Self::lock_schedule(&entry);

        let mut shifts: Vec<Shift> = schedule
            .shifts
            .values()
            .filter(|shift| shift.staff_id == staff_id && shift.overlaps(start, end))
            .cloned()
            .collect();
        shifts.sort_by_key(|shift| (shift.start, shift.id));
        Ok(shifts)
    }

    /// Lists a week's shifts ordered by start time, ties broken by staff
    /// name.
    ///
    /// Any date within the week selects it; the store normalizes to the
    /// Monday.
    pub fn list_for_week(&self, business_id: Uuid, week_start: NaiveDate) -> Vec<Shift> {
        let Some(entry) = self.existing_business(business_id) else {
            return Vec::new();
        };
        let schedule = Self::lock_schedule(&entry);

        week_shifts(&schedule, week_start_of(week_start))
    }

    /// Lists the shifts intersecting one calendar day, ordered by start
    /// time.
    ///
    /// Includes overnight shifts that started the day before; the grid
    /// projection needs those for its early slots.
    pub fn shifts_for_day(&self, business_id: Uuid, day: NaiveDate) -> Vec<Shift> {
        let day_start = day.and_hms_opt(0, 0, 0).expect("Valid midnight time");
        let day_end = day_start + chrono::Duration::days(1);

        let Some(entry) = self.existing_business(business_id) else {
            return Vec::new();
        };
        let schedule = Self::lock_schedule(&entry);

        let mut shifts: Vec<Shift> = schedule
            .shifts
            .values()
            .filter(|shift| shift.overlaps(day_start, day_end))
            .cloned()
            .collect();
        shifts.sort_by_key(|shift| (shift.start, shift.id));
        shifts
    }

    /// Lists a week's shifts with their derived paid hours and costs.
    pub fn week_view(&self, business_id: Uuid, week_start: NaiveDate) -> Vec<ShiftView> {
        let Some(entry) = self.existing_business(business_id) else {
            return Vec::new();
        };
        let schedule = Self::lock_schedule(&entry);

        week_shifts(&schedule, week_start_of(week_start))
            .into_iter()
            .map(|shift| {
                let rate = schedule.rate_of(shift.staff_id);
                ShiftView::derive(shift, rate)
            })
            .collect()
    }

    /// Publishes a batch of draft shifts for a week, all or nothing.
    ///
    /// Every id must resolve to a shift of the given week or the whole
    /// batch fails with no status changed. Already-published ids are
    /// valid and counted as no-ops; the return value is the number of
    /// shifts newly published.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PartialPublish`] listing the ids that no
    /// longer exist or belong to a different week.
    pub fn publish_shifts(
        &self,
        business_id: Uuid,
        week_start: NaiveDate,
        shift_ids: &[Uuid],
    ) -> EngineResult<usize> {
        let entry = self.business(business_id);
        let mut schedule = Self::lock_schedule(&entry);
        let monday = week_start_of(week_start);

        // Validate the whole batch before touching any status
        let mut failed: Vec<Uuid> = shift_ids
            .iter()
            .copied()
            .filter(|id| {
                schedule
                    .shifts
                    .get(id)
                    .is_none_or(|shift| shift.week_start != monday)
            })
            .collect();
        if !failed.is_empty() {
            failed.sort();
            failed.dedup();
            return Err(EngineError::PartialPublish { failed });
        }

        let mut published = 0;
        for id in shift_ids {
            if let Some(shift) = schedule.shifts.get_mut(id) {
                if shift.status == ShiftStatus::Draft {
                    shift.status = ShiftStatus::Published;
                    shift.revision += 1;
                    published += 1;
                }
            }
        }
        Ok(published)
    }
}
