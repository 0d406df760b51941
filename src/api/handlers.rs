//! HTTP request handlers for the scheduling API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::grid::project_day;

use super::request::{
    AmendTimesheetRequest, ApprovedRangeQuery, BusinessQuery, CreateShiftRequest,
    CreateStaffRequest, DayQuery, OverlapQuery, PublishRequest, ReviewRequest,
    StaffTotalsQuery, SubmitTimesheetRequest, UpdateShiftRequest, UpdateStaffRequest, WeekQuery,
};
use super::response::{ApiError, ApiErrorResponse, ApprovedCostResponse, PublishResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/staff", post(create_staff_handler).get(list_staff_handler))
        .route("/staff/:staff_id", patch(update_staff_handler))
        .route("/shifts", post(create_shift_handler))
        .route("/shifts/overlapping", get(find_overlapping_handler))
        .route(
            "/shifts/:shift_id",
            patch(update_shift_handler).delete(delete_shift_handler),
        )
        .route("/schedule", get(schedule_handler))
        .route("/publish", post(publish_handler))
        .route(
            "/timesheets",
            post(submit_timesheet_handler).get(timesheet_rows_handler),
        )
        .route("/timesheets/:timesheet_id/approve", post(approve_timesheet_handler))
        .route("/timesheets/:timesheet_id/reject", post(reject_timesheet_handler))
        .route("/timesheets/:timesheet_id/amend", post(amend_timesheet_handler))
        .route("/grid", get(grid_handler))
        .route("/reports/week", get(weekly_totals_handler))
        .route("/reports/staff", get(staff_totals_handler))
        .route("/reports/approved", get(approved_cost_handler))
        .with_state(state)
}

/// Renders a JSON body rejection as the 400 error response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Renders a store error with its mapped status code.
fn error_response(error: EngineError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    let api_error: ApiErrorResponse = error.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Renders a success body as JSON.
fn ok_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /staff.
async fn create_staff_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateStaffRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let staff = state.store().create_staff(request.business_id, request.staff);
    info!(
        correlation_id = %correlation_id,
        business_id = %request.business_id,
        staff_id = %staff.id,
        "Staff member created"
    );
    ok_response(staff)
}

/// Handler for PATCH /staff/:staff_id.
async fn update_staff_handler(
    State(state): State<AppState>,
    Path(staff_id): Path<Uuid>,
    payload: Result<Json<UpdateStaffRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state
        .store()
        .update_staff(request.business_id, staff_id, request.patch)
    {
        Ok(staff) => {
            info!(
                correlation_id = %correlation_id,
                staff_id = %staff_id,
                "Staff member updated"
            );
            ok_response(staff)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /staff.
async fn list_staff_handler(
    State(state): State<AppState>,
    Query(query): Query<BusinessQuery>,
) -> impl IntoResponse {
    ok_response(state.store().list_staff(query.business_id))
}

/// Handler for POST /shifts.
async fn create_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShiftRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state.store().create_shift(request.business_id, request.shift) {
        Ok(view) => {
            info!(
                correlation_id = %correlation_id,
                business_id = %request.business_id,
                shift_id = %view.shift.id,
                paid_hours = %view.paid_hours,
                "Shift created"
            );
            ok_response(view)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for PATCH /shifts/:shift_id.
async fn update_shift_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    payload: Result<Json<UpdateShiftRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state
        .store()
        .update_shift(request.business_id, shift_id, request.patch)
    {
        Ok(view) => {
            info!(
                correlation_id = %correlation_id,
                shift_id = %shift_id,
                revision = view.shift.revision,
                "Shift updated"
            );
            ok_response(view)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for DELETE /shifts/:shift_id.
///
/// Responds 204 whether or not the shift existed; only a blocked
/// deletion is an error.
async fn delete_shift_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    Query(query): Query<BusinessQuery>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    match state.store().delete_shift(query.business_id, shift_id) {
        Ok(removed) => {
            info!(
                correlation_id = %correlation_id,
                shift_id = %shift_id,
                removed,
                "Shift deletion handled"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /shifts/overlapping.
async fn find_overlapping_handler(
    State(state): State<AppState>,
    Query(query): Query<OverlapQuery>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    match state.store().find_overlapping(
        query.business_id,
        query.staff_id,
        query.start,
        query.end,
    ) {
        Ok(shifts) => ok_response(shifts),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /schedule.
async fn schedule_handler(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> impl IntoResponse {
    ok_response(state.store().week_view(query.business_id, query.week_start))
}

/// Handler for POST /publish.
async fn publish_handler(
    State(state): State<AppState>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state.store().publish_shifts(
        request.business_id,
        request.week_start,
        &request.shift_ids,
    ) {
        Ok(published) => {
            info!(
                correlation_id = %correlation_id,
                business_id = %request.business_id,
                published,
                "Week published"
            );
            ok_response(PublishResponse { published })
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /timesheets.
async fn submit_timesheet_handler(
    State(state): State<AppState>,
    payload: Result<Json<SubmitTimesheetRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state.store().submit_timesheet(
        request.business_id,
        request.shift_id,
        request.actual_hours,
        request.clock_in,
        request.clock_out,
    ) {
        Ok(sheet) => {
            info!(
                correlation_id = %correlation_id,
                timesheet_id = %sheet.id,
                variance_minutes = sheet.variance_minutes,
                status = %sheet.status,
                "Timesheet submitted"
            );
            ok_response(sheet)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /timesheets/:timesheet_id/approve.
async fn approve_timesheet_handler(
    State(state): State<AppState>,
    Path(timesheet_id): Path<Uuid>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state
        .store()
        .approve_timesheet(request.business_id, timesheet_id)
    {
        Ok(sheet) => {
            info!(
                correlation_id = %correlation_id,
                timesheet_id = %timesheet_id,
                "Timesheet approved"
            );
            ok_response(sheet)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /timesheets/:timesheet_id/reject.
async fn reject_timesheet_handler(
    State(state): State<AppState>,
    Path(timesheet_id): Path<Uuid>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state
        .store()
        .reject_timesheet(request.business_id, timesheet_id)
    {
        Ok(sheet) => {
            info!(
                correlation_id = %correlation_id,
                timesheet_id = %timesheet_id,
                "Timesheet rejected"
            );
            ok_response(sheet)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /timesheets/:timesheet_id/amend.
async fn amend_timesheet_handler(
    State(state): State<AppState>,
    Path(timesheet_id): Path<Uuid>,
    payload: Result<Json<AmendTimesheetRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state.store().amend_timesheet(
        request.business_id,
        timesheet_id,
        request.actual_hours,
    ) {
        Ok(sheet) => {
            info!(
                correlation_id = %correlation_id,
                timesheet_id = %timesheet_id,
                status = %sheet.status,
                "Timesheet amended"
            );
            ok_response(sheet)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /timesheets.
async fn timesheet_rows_handler(
    State(state): State<AppState>,
    Query(query): Query<BusinessQuery>,
) -> impl IntoResponse {
    ok_response(state.store().timesheet_rows(query.business_id))
}

/// Handler for GET /grid.
async fn grid_handler(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> impl IntoResponse {
    let shifts = state.store().shifts_for_day(query.business_id, query.day);
    ok_response(project_day(query.day, &shifts))
}

/// Handler for GET /reports/week.
async fn weekly_totals_handler(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> impl IntoResponse {
    ok_response(state.store().weekly_totals(query.business_id, query.week_start))
}

/// Handler for GET /reports/staff.
async fn staff_totals_handler(
    State(state): State<AppState>,
    Query(query): Query<StaffTotalsQuery>,
) -> impl IntoResponse {
    ok_response(
        state
            .store()
            .per_staff_totals(query.business_id, query.staff_id),
    )
}

/// Handler for GET /reports/approved.
async fn approved_cost_handler(
    State(state): State<AppState>,
    Query(query): Query<ApprovedRangeQuery>,
) -> impl IntoResponse {
    let total_cost = state
        .store()
        .approved_labor_cost(query.business_id, query.from, query.to);
    ok_response(ApprovedCostResponse {
        from: query.from,
        to: query.to,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DayGrid;
    use crate::models::{NewShift, NewStaff, ShiftStatus, ShiftView, StaffMember, Timesheet};
    use crate::store::ScheduleStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(ScheduleStore::default())
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn staff_request(business_id: Uuid) -> CreateStaffRequest {
        CreateStaffRequest {
            business_id,
            staff: NewStaff {
                name: "Priya Sharma".to_string(),
                role: "Barista".to_string(),
                hourly_rate: dec("12.00"),
                color: "#0ea5e9".to_string(),
                preferred_hours: Decimal::new(30, 0),
            },
        }
    }

    fn shift_request(business_id: Uuid, staff_id: Uuid) -> CreateShiftRequest {
        CreateShiftRequest {
            business_id,
            shift: NewShift {
                staff_id,
                role: None,
                start: make_datetime("2024-12-02", "09:00:00"),
                end: make_datetime("2024-12-02", "17:00:00"),
                break_minutes: 30,
                status: ShiftStatus::Draft,
            },
        }
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, bytes)
    }

    #[tokio::test]
    async fn test_api_001_create_staff_and_shift() {
        let router = create_router(create_test_state());
        let business_id = Uuid::new_v4();

        let body = serde_json::to_string(&staff_request(business_id)).unwrap();
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/staff")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let staff: StaffMember = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(staff.name, "Priya Sharma");

        let body = serde_json::to_string(&shift_request(business_id, staff.id)).unwrap();
        let (status, bytes) = send(&router, "POST", "/shifts", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let view: ShiftView = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(view.paid_hours, dec("7.5"));
        assert_eq!(view.cost, dec("90.00"));
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let (status, bytes) = send(&router, "POST", "/shifts", Some("{invalid json".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_field_returns_400() {
        let router = create_router(create_test_state());

        // No staff payload at all
        let body = format!(r#"{{"business_id": "{}"}}"#, Uuid::new_v4());
        let (status, bytes) = send(&router, "POST", "/staff", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_api_004_unknown_staff_returns_400() {
        let router = create_router(create_test_state());
        let business_id = Uuid::new_v4();

        let body = serde_json::to_string(&shift_request(business_id, Uuid::new_v4())).unwrap();
        let (status, bytes) = send(&router, "POST", "/shifts", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "UNKNOWN_STAFF");
    }

    #[tokio::test]
    async fn test_api_005_delete_returns_204_either_way() {
        let router = create_router(create_test_state());
        let business_id = Uuid::new_v4();

        let (_, bytes) = send(
            &router,
            "POST",
            "/staff",
            Some(serde_json::to_string(&staff_request(business_id)).unwrap()),
        )
        .await;
        let staff: StaffMember = serde_json::from_slice(&bytes).unwrap();

        let (_, bytes) = send(
            &router,
            "POST",
            "/shifts",
            Some(serde_json::to_string(&shift_request(business_id, staff.id)).unwrap()),
        )
        .await;
        let view: ShiftView = serde_json::from_slice(&bytes).unwrap();

        let uri = format!("/shifts/{}?business_id={}", view.shift.id, business_id);
        let (status, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        // Repeating the deletion is still a 204
        let (status, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_api_006_duplicate_timesheet_returns_409() {
        let router = create_router(create_test_state());
        let business_id = Uuid::new_v4();

        let (_, bytes) = send(
            &router,
            "POST",
            "/staff",
            Some(serde_json::to_string(&staff_request(business_id)).unwrap()),
        )
        .await;
        let staff: StaffMember = serde_json::from_slice(&bytes).unwrap();

        let (_, bytes) = send(
            &router,
            "POST",
            "/shifts",
            Some(serde_json::to_string(&shift_request(business_id, staff.id)).unwrap()),
        )
        .await;
        let view: ShiftView = serde_json::from_slice(&bytes).unwrap();

        let submit = serde_json::to_string(&SubmitTimesheetRequest {
            business_id,
            shift_id: view.shift.id,
            actual_hours: dec("7.5"),
            clock_in: None,
            clock_out: None,
        })
        .unwrap();

        let (status, bytes) = send(&router, "POST", "/timesheets", Some(submit.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let sheet: Timesheet = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(sheet.variance_minutes, 0);

        let (status, bytes) = send(&router, "POST", "/timesheets", Some(submit)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "DUPLICATE_SUBMISSION");
    }

    #[tokio::test]
    async fn test_api_007_grid_projects_48_slots() {
        let router = create_router(create_test_state());
        let business_id = Uuid::new_v4();

        let uri = format!("/grid?business_id={}&day=2024-12-02", business_id);
        let (status, bytes) = send(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let grid: DayGrid = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(grid.slots.len(), 48);
        assert_eq!(grid.coverage, 0);
    }

    #[tokio::test]
    async fn test_api_008_unknown_shift_patch_returns_404() {
        let router = create_router(create_test_state());

        let body = serde_json::to_string(&UpdateShiftRequest {
            business_id: Uuid::new_v4(),
            patch: Default::default(),
        })
        .unwrap();
        let uri = format!("/shifts/{}", Uuid::new_v4());
        let (status, bytes) = send(&router, "PATCH", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "SHIFT_NOT_FOUND");
    }
}
