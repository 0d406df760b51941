//! Error types for the roster engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the scheduling and reconciliation operations can
//! produce. Each variant carries the identifier of the offending record so
//! callers can surface both the error kind and the id; the engine itself
//! never retries or logs around these errors.

use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

use crate::models::TimesheetStatus;

/// The main error type for the roster engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
/// use uuid::Uuid;
///
/// let error = EngineError::ShiftNotFound { shift_id: Uuid::nil() };
/// assert_eq!(
///     error.to_string(),
///     "Shift not found: 00000000-0000-0000-0000-000000000000"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A shift interval was invalid (end not after start).
    #[error("Invalid shift interval: end {end} is not after start {start}")]
    InvalidInterval {
        /// The start of the rejected interval.
        start: NaiveDateTime,
        /// The end of the rejected interval.
        end: NaiveDateTime,
    },

    /// A shift referenced a staff member that does not exist in the business.
    #[error("Unknown staff reference: {staff_id}")]
    UnknownStaff {
        /// The staff id that did not resolve.
        staff_id: Uuid,
    },

    /// A staff member was not found on update.
    #[error("Staff member not found: {staff_id}")]
    StaffNotFound {
        /// The staff id that was not found.
        staff_id: Uuid,
    },

    /// A staff member referenced by shifts was edited beyond the hourly rate.
    #[error("Staff member '{staff_id}' is rostered; only the hourly rate may change")]
    StaffInUse {
        /// The staff member whose edit was rejected.
        staff_id: Uuid,
    },

    /// A shift id did not resolve on update, delete, or submission.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift id that was not found.
        shift_id: Uuid,
    },

    /// A timesheet id did not resolve on a state transition.
    #[error("Timesheet not found: {timesheet_id}")]
    TimesheetNotFound {
        /// The timesheet id that was not found.
        timesheet_id: Uuid,
    },

    /// A second timesheet was submitted for a shift that already has one.
    #[error("Duplicate submission: shift '{shift_id}' already has a timesheet")]
    DuplicateSubmission {
        /// The shift that was submitted twice.
        shift_id: Uuid,
    },

    /// A transition was attempted on a timesheet already approved or rejected.
    #[error("Timesheet '{timesheet_id}' is already terminal ({status})")]
    AlreadyTerminal {
        /// The timesheet whose transition was refused.
        timesheet_id: Uuid,
        /// The terminal status the timesheet is in.
        status: TimesheetStatus,
    },

    /// A create or update would double-book a staff member while the
    /// overlap policy is set to reject.
    #[error("Staff '{staff_id}' is double-booked by {} existing shift(s)", .conflicting.len())]
    OverlappingShift {
        /// The staff member with conflicting shifts.
        staff_id: Uuid,
        /// The ids of the shifts that intersect the requested interval.
        conflicting: Vec<Uuid>,
    },

    /// Bulk publish validation failed; no shift was published.
    #[error("Publish rejected: {} shift(s) failed validation", .failed.len())]
    PartialPublish {
        /// The shift ids that failed validation.
        failed: Vec<Uuid>,
    },

    /// An optimistic update found a different revision than the caller saw.
    #[error("Concurrent modification of shift '{shift_id}': expected revision {expected}, found {actual}")]
    ConcurrentModification {
        /// The shift that was concurrently modified.
        shift_id: Uuid,
        /// The revision the caller based its patch on.
        expected: u64,
        /// The revision currently in the store.
        actual: u64,
    },

    /// A shift with an approved timesheet cannot be deleted.
    #[error("Shift '{shift_id}' has an approved timesheet and cannot be deleted")]
    ApprovedTimesheet {
        /// The shift whose deletion was blocked.
        shift_id: Uuid,
    },

    /// Policy file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Policy file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
