//! Response types for the scheduling API.
//!
//! This module defines the error response structures, the engine-error
//! to HTTP mapping, and the small bespoke success bodies that have no
//! model counterpart.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Success body for `POST /publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    /// How many shifts moved from draft to published.
    pub published: usize,
}

/// Success body for `GET /reports/approved`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedCostResponse {
    /// First week start of the range (inclusive).
    pub from: NaiveDate,
    /// Last week start of the range (inclusive).
    pub to: NaiveDate,
    /// Total approved labor cost over the range.
    pub total_cost: Decimal,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

fn join_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidInterval { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INTERVAL",
                    message,
                    "Shift and query intervals must end after they start",
                ),
            },
            EngineError::UnknownStaff { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNKNOWN_STAFF",
                    message,
                    "The staff id does not resolve within this business",
                ),
            },
            EngineError::StaffInUse { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "STAFF_IN_USE",
                    message,
                    "Only the hourly rate of a rostered staff member may change",
                ),
            },
            EngineError::OverlappingShift { conflicting, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "OVERLAPPING_SHIFT",
                    message,
                    format!("Conflicting shift ids: {}", join_ids(&conflicting)),
                ),
            },
            EngineError::StaffNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("STAFF_NOT_FOUND", message),
            },
            EngineError::ShiftNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SHIFT_NOT_FOUND", message),
            },
            EngineError::TimesheetNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("TIMESHEET_NOT_FOUND", message),
            },
            EngineError::DuplicateSubmission { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_SUBMISSION",
                    message,
                    "Each shift takes exactly one timesheet; amend the existing one",
                ),
            },
            EngineError::AlreadyTerminal { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "ALREADY_TERMINAL",
                    message,
                    "Approved and rejected timesheets cannot change state",
                ),
            },
            EngineError::ConcurrentModification { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "CONCURRENT_MODIFICATION",
                    message,
                    "Re-read the shift and retry with its current revision",
                ),
            },
            EngineError::ApprovedTimesheet { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "APPROVED_TIMESHEET",
                    message,
                    "Shifts with approved timesheets are part of payroll history",
                ),
            },
            EngineError::PartialPublish { failed } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "PARTIAL_PUBLISH",
                    message,
                    format!("Failed shift ids: {}", join_ids(&failed)),
                ),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}
