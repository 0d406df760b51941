//! Scheduling grid projection.
//!
//! This module projects a day's shifts onto the 48-slot half-hour grid
//! that rendering collaborators consume: slot timestamps and labels,
//! occupancy, the single anchor slot each shift renders from, and the
//! coarse coverage heuristic.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Shift;

/// Number of 30-minute slots in a day.
pub const SLOTS_PER_DAY: usize = 48;

/// Minutes covered by one grid slot.
pub const SLOT_MINUTES: u32 = 30;

/// Returns the 48 slot timestamps of a day, from 00:00 to 23:30.
///
/// The sequence is deterministic: the same day always yields the same
/// timestamps in the same order.
///
/// # Examples
///
/// ```
/// use roster_engine::grid::slots_for_day;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
/// let slots = slots_for_day(day);
///
/// assert_eq!(slots.len(), 48);
/// assert_eq!(slots[0], day.and_hms_opt(0, 0, 0).unwrap());
/// assert_eq!(slots[47], day.and_hms_opt(23, 30, 0).unwrap());
/// ```
pub fn slots_for_day(day: NaiveDate) -> Vec<NaiveDateTime> {
    (0..SLOTS_PER_DAY)
        .map(|index| {
            let minutes = index as u32 * SLOT_MINUTES;
            day.and_hms_opt(minutes / 60, minutes % 60, 0)
                .expect("Valid slot time")
        })
        .collect()
}

/// Renders a slot timestamp as its grid label, `HH:MM`.
pub fn slot_label(slot: NaiveDateTime) -> String {
    slot.format("%H:%M").to_string()
}

/// Returns the shifts occupying a slot.
///
/// A shift occupies every slot whose timestamp lies in `[start, end)`,
/// so the slot at the shift's exact end is free.
pub fn shifts_occupying<'a>(slot: NaiveDateTime, shifts: &'a [Shift]) -> Vec<&'a Shift> {
    shifts
        .iter()
        .filter(|shift| shift.start <= slot && slot < shift.end)
        .collect()
}

/// Returns the boundary of the 30-minute slot containing the shift's start.
///
/// Starts already aligned to a slot boundary anchor at that boundary;
/// off-grid starts floor to the preceding half hour. Every shift has
/// exactly one anchor.
///
/// # Examples
///
/// ```
/// use roster_engine::grid::anchor_slot;
/// use roster_engine::models::{Shift, ShiftStatus, week_start_of};
/// use chrono::NaiveDateTime;
/// use uuid::Uuid;
///
/// let start = NaiveDateTime::parse_from_str("2024-12-02 09:15:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let shift = Shift {
///     id: Uuid::new_v4(),
///     staff_id: Uuid::new_v4(),
///     role: "Barista".to_string(),
///     start,
///     end: NaiveDateTime::parse_from_str("2024-12-02 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     break_minutes: 0,
///     status: ShiftStatus::Draft,
///     week_start: week_start_of(start.date()),
///     revision: 0,
/// };
///
/// let expected = NaiveDateTime::parse_from_str("2024-12-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(anchor_slot(&shift), expected);
/// ```
pub fn anchor_slot(shift: &Shift) -> NaiveDateTime {
    let start = shift.start;
    let minute = if start.minute() >= SLOT_MINUTES { 30 } else { 0 };

    start
        .date()
        .and_hms_opt(start.hour(), minute, 0)
        .expect("Valid slot time")
}

/// Returns the number of slot units a shift renders across.
///
/// This is a presentation hint (`paid_hours * 2`); occupancy and the
/// anchor computation are what correctness rests on.
pub fn render_slot_span(shift: &Shift) -> Decimal {
    shift.paid_hours() * Decimal::new(2, 0)
}

/// Returns the day's coverage percentage.
///
/// Coverage is `min(100, shift_count * 25)` where a shift counts toward
/// the day its start falls on. A deliberately coarse heuristic; it is
/// not capacity-aware.
pub fn coverage(day: NaiveDate, shifts: &[Shift]) -> u8 {
    let count = shifts.iter().filter(|shift| shift.day() == day).count();

    (count * 25).min(100) as u8
}

/// One cell of the day grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotCell {
    /// The slot timestamp.
    pub time: NaiveDateTime,
    /// The `HH:MM` label the grid renders for this slot.
    pub label: String,
    /// Shifts occupying the slot.
    pub shift_ids: Vec<Uuid>,
    /// Shifts whose anchor is this slot.
    pub anchors: Vec<Uuid>,
}

/// A full day projected onto the 48-slot grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGrid {
    /// The projected day.
    pub day: NaiveDate,
    /// Coverage percentage for the day.
    pub coverage: u8,
    /// The 48 slot cells in chronological order.
    pub slots: Vec<SlotCell>,
}

/// Projects a day's shifts onto the grid in one call.
///
/// Bundles the 48 slot cells (occupying shift ids plus anchor flags)
/// with the coverage figure. An overnight shift from the previous day
/// occupies this day's early slots but anchors on its own start day.
pub fn project_day(day: NaiveDate, shifts: &[Shift]) -> DayGrid {
    let slots = slots_for_day(day)
        .into_iter()
        .map(|time| {
            let shift_ids = shifts_occupying(time, shifts)
                .iter()
                .map(|shift| shift.id)
                .collect();
            let anchors = shifts
                .iter()
                .filter(|shift| anchor_slot(shift) == time)
                .map(|shift| shift.id)
                .collect();

            SlotCell {
                time,
                label: slot_label(time),
                shift_ids,
                anchors,
            }
        })
        .collect();

    DayGrid {
        day,
        coverage: coverage(day, shifts),
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftStatus, week_start_of};

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_shift(start: NaiveDateTime, end: NaiveDateTime) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            staff_id: Uuid::new_v4(),
            role: "Barista".to_string(),
            start,
            end,
            break_minutes: 0,
            status: ShiftStatus::Draft,
            week_start: week_start_of(start.date()),
            revision: 0,
        }
    }

    // ==========================================================================
    // GRID-001: a day has 48 ordered slots
    // ==========================================================================
    #[test]
    fn test_grid_001_day_has_48_ordered_slots() {
        let slots = slots_for_day(make_date("2024-12-02"));

        assert_eq!(slots.len(), SLOTS_PER_DAY);
        assert_eq!(slots[0], make_datetime("2024-12-02", "00:00:00"));
        assert_eq!(slots[47], make_datetime("2024-12-02", "23:30:00"));
        assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
    }

    // ==========================================================================
    // GRID-002: slot labels render as HH:MM
    // ==========================================================================
    #[test]
    fn test_grid_002_slot_labels() {
        assert_eq!(slot_label(make_datetime("2024-12-02", "00:00:00")), "00:00");
        assert_eq!(slot_label(make_datetime("2024-12-02", "09:30:00")), "09:30");
        assert_eq!(slot_label(make_datetime("2024-12-02", "23:30:00")), "23:30");
    }

    // ==========================================================================
    // GRID-003: occupancy is half-open at the shift end
    // ==========================================================================
    #[test]
    fn test_grid_003_occupancy_half_open() {
        let shift = make_shift(
            make_datetime("2024-12-02", "09:00:00"),
            make_datetime("2024-12-02", "17:00:00"),
        );
        let shifts = vec![shift];

        // Occupied at the start and just before the end
        assert_eq!(
            shifts_occupying(make_datetime("2024-12-02", "09:00:00"), &shifts).len(),
            1
        );
        assert_eq!(
            shifts_occupying(make_datetime("2024-12-02", "16:30:00"), &shifts).len(),
            1
        );
        // Free at the exact end and before the start
        assert!(shifts_occupying(make_datetime("2024-12-02", "17:00:00"), &shifts).is_empty());
        assert!(shifts_occupying(make_datetime("2024-12-02", "08:30:00"), &shifts).is_empty());
    }

    // ==========================================================================
    // GRID-004: anchor floors the start to its half-hour boundary
    // ==========================================================================
    #[test]
    fn test_grid_004_anchor_floors_to_half_hour() {
        let cases = [
            ("09:00:00", "09:00:00"),
            ("09:15:00", "09:00:00"),
            ("09:30:00", "09:30:00"),
            ("09:45:00", "09:30:00"),
            ("09:29:59", "09:00:00"),
        ];

        for (start, expected) in cases {
            let shift = make_shift(
                make_datetime("2024-12-02", start),
                make_datetime("2024-12-02", "17:00:00"),
            );
            assert_eq!(
                anchor_slot(&shift),
                make_datetime("2024-12-02", expected),
                "start {}",
                start
            );
        }
    }

    // ==========================================================================
    // GRID-005: grid-aligned start anchors by exact timestamp equality
    // ==========================================================================
    #[test]
    fn test_grid_005_aligned_start_anchors_in_projection() {
        let shift = make_shift(
            make_datetime("2024-12-02", "09:00:00"),
            make_datetime("2024-12-02", "17:00:00"),
        );
        let id = shift.id;

        let grid = project_day(make_date("2024-12-02"), &[shift]);

        // 09:00 is slot index 18
        let cell = &grid.slots[18];
        assert_eq!(cell.label, "09:00");
        assert_eq!(cell.anchors, vec![id]);
        assert_eq!(cell.shift_ids, vec![id]);

        // Exactly one anchor across the whole grid
        let anchor_count: usize = grid.slots.iter().map(|cell| cell.anchors.len()).sum();
        assert_eq!(anchor_count, 1);
    }

    // ==========================================================================
    // GRID-006: render span is paid hours in slot units
    // ==========================================================================
    #[test]
    fn test_grid_006_render_span() {
        let mut shift = make_shift(
            make_datetime("2024-12-02", "09:00:00"),
            make_datetime("2024-12-02", "17:00:00"),
        );
        shift.break_minutes = 30;

        // 7.5 paid hours spans 15 slot units
        assert_eq!(render_slot_span(&shift), Decimal::new(15, 0));
    }

    // ==========================================================================
    // GRID-007: coverage is 25 per shift, capped at 100
    // ==========================================================================
    #[test]
    fn test_grid_007_coverage_heuristic() {
        let day = make_date("2024-12-02");
        let make_at = |hour: &str| {
            make_shift(
                make_datetime("2024-12-02", hour),
                make_datetime("2024-12-02", "23:00:00"),
            )
        };

        assert_eq!(coverage(day, &[]), 0);

        let shifts: Vec<Shift> = ["08:00:00", "09:00:00", "10:00:00", "11:00:00", "12:00:00"]
            .iter()
            .map(|hour| make_at(hour))
            .collect();

        assert_eq!(coverage(day, &shifts[..1]), 25);
        assert_eq!(coverage(day, &shifts[..2]), 50);
        assert_eq!(coverage(day, &shifts[..4]), 100);
        // Fifth shift is capped
        assert_eq!(coverage(day, &shifts), 100);
    }

    #[test]
    fn test_overnight_shift_counts_toward_start_day() {
        let shift = make_shift(
            make_datetime("2024-12-02", "22:00:00"),
            make_datetime("2024-12-03", "06:00:00"),
        );
        let shifts = vec![shift];

        assert_eq!(coverage(make_date("2024-12-02"), &shifts), 25);
        assert_eq!(coverage(make_date("2024-12-03"), &shifts), 0);
    }

    #[test]
    fn test_overnight_shift_occupies_next_day_slots_without_anchor() {
        let shift = make_shift(
            make_datetime("2024-12-02", "22:00:00"),
            make_datetime("2024-12-03", "06:00:00"),
        );
        let id = shift.id;

        let grid = project_day(make_date("2024-12-03"), &[shift]);

        // 00:00 through 05:30 occupied, 06:00 free
        assert_eq!(grid.slots[0].shift_ids, vec![id]);
        assert_eq!(grid.slots[11].shift_ids, vec![id]);
        assert!(grid.slots[12].shift_ids.is_empty());

        // The anchor lives on the start day's grid, not this one
        assert!(grid.slots.iter().all(|cell| cell.anchors.is_empty()));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let shift = make_shift(
            make_datetime("2024-12-02", "09:15:00"),
            make_datetime("2024-12-02", "13:00:00"),
        );
        let shifts = vec![shift];
        let day = make_date("2024-12-02");

        assert_eq!(project_day(day, &shifts), project_day(day, &shifts));
    }

    #[test]
    fn test_empty_day_projects_empty_cells() {
        let grid = project_day(make_date("2024-12-02"), &[]);

        assert_eq!(grid.coverage, 0);
        assert_eq!(grid.slots.len(), SLOTS_PER_DAY);
        assert!(grid
            .slots
            .iter()
            .all(|cell| cell.shift_ids.is_empty() && cell.anchors.is_empty()));
    }
}
