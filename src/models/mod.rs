//! Core data models for the roster engine.
//!
//! This module contains all the domain models used throughout the engine.

mod reports;
mod shift;
mod staff;
mod timesheet;

pub use reports::{StaffTotals, TimesheetRow, WeeklyTotals};
pub use shift::{NewShift, Shift, ShiftPatch, ShiftStatus, ShiftView, week_start_of};
pub use staff::{NewStaff, StaffMember, StaffPatch};
pub use timesheet::{Timesheet, TimesheetStatus};
