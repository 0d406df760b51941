//! HTTP API module for the scheduling engine.
//!
//! This module provides the REST endpoints for rostering, timesheet
//! reconciliation, and labor cost reporting.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AmendTimesheetRequest, CreateShiftRequest, CreateStaffRequest, PublishRequest, ReviewRequest,
    SubmitTimesheetRequest, UpdateShiftRequest, UpdateStaffRequest,
};
pub use response::{ApiError, ApprovedCostResponse, PublishResponse};
pub use state::AppState;
