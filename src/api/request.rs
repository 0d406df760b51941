//! Request types for the scheduling API.
//!
//! Mutating endpoints take a JSON body carrying the `business_id`
//! alongside the domain payload; read endpoints address the business
//! through query parameters.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{NewShift, NewStaff, ShiftPatch, StaffPatch};

/// Request body for `POST /staff`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStaffRequest {
    /// The business the staff member belongs to.
    pub business_id: Uuid,
    /// The staff member to create.
    pub staff: NewStaff,
}

/// Request body for `PATCH /staff/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStaffRequest {
    /// The business the staff member belongs to.
    pub business_id: Uuid,
    /// The fields to change.
    pub patch: StaffPatch,
}

/// Request body for `POST /shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    /// The business the shift is scheduled for.
    pub business_id: Uuid,
    /// The shift to create.
    pub shift: NewShift,
}

/// Request body for `PATCH /shifts/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShiftRequest {
    /// The business the shift is scheduled for.
    pub business_id: Uuid,
    /// The fields to change.
    pub patch: ShiftPatch,
}

/// Request body for `POST /publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    /// The business whose week is being published.
    pub business_id: Uuid,
    /// Any date within the week to publish.
    pub week_start: NaiveDate,
    /// The draft shifts to publish.
    pub shift_ids: Vec<Uuid>,
}

/// Request body for `POST /timesheets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTimesheetRequest {
    /// The business the shift belongs to.
    pub business_id: Uuid,
    /// The shift the hours were worked against.
    pub shift_id: Uuid,
    /// Actual hours worked.
    pub actual_hours: Decimal,
    /// Clock-in time, if the till recorded one.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// Clock-out time, if the till recorded one.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
}

/// Request body for `POST /timesheets/:id/approve` and `.../reject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// The business the timesheet belongs to.
    pub business_id: Uuid,
}

/// Request body for `POST /timesheets/:id/amend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmendTimesheetRequest {
    /// The business the timesheet belongs to.
    pub business_id: Uuid,
    /// The corrected hours.
    pub actual_hours: Decimal,
}

/// Query parameters addressing a business.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessQuery {
    /// The business to operate on.
    pub business_id: Uuid,
}

/// Query parameters for week-scoped reads.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekQuery {
    /// The business to read.
    pub business_id: Uuid,
    /// Any date within the week.
    pub week_start: NaiveDate,
}

/// Query parameters for `GET /shifts/overlapping`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverlapQuery {
    /// The business to read.
    pub business_id: Uuid,
    /// The staff member to check.
    pub staff_id: Uuid,
    /// Interval start (inclusive).
    pub start: NaiveDateTime,
    /// Interval end (exclusive).
    pub end: NaiveDateTime,
}

/// Query parameters for `GET /grid`.
#[derive(Debug, Clone, Deserialize)]
pub struct DayQuery {
    /// The business to read.
    pub business_id: Uuid,
    /// The calendar day to project.
    pub day: NaiveDate,
}

/// Query parameters for `GET /reports/staff`.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffTotalsQuery {
    /// The business to read.
    pub business_id: Uuid,
    /// The staff member to total.
    pub staff_id: Uuid,
}

/// Query parameters for `GET /reports/approved`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovedRangeQuery {
    /// The business to read.
    pub business_id: Uuid,
    /// First week start of the range (inclusive).
    pub from: NaiveDate,
    /// Last week start of the range (inclusive).
    pub to: NaiveDate,
}
