//! # REST API for the Attendance/Debt Grid
//!
//! The grid endpoint returns the whole display-ready table in one
//! response; the toggle endpoint advances a single cell.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use shared::ToggleAttendanceRequest;

use super::error_response;
use crate::AppState;

/// Full debt grid: events as columns, active players as rows
pub async fn get_debt_table(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/attendance/table");

    match state.attendance_service.debt_table().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to build debt table: {}", e);
            error_response(e)
        }
    }
}

/// Advance one cell to its next status. A busy cell answers 200 with
/// `applied: false` rather than an error.
pub async fn toggle_attendance(
    State(state): State<AppState>,
    Json(request): Json<ToggleAttendanceRequest>,
) -> impl IntoResponse {
    info!("POST /api/attendance/toggle - request: {:?}", request);

    match state.attendance_service.toggle_cell(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to toggle attendance cell: {}", e);
            error_response(e)
        }
    }
}
