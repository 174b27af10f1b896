//! # REST API for League Standings
//!
//! Endpoints for the per-group league table: ranked reads, row edits and
//! the wholesale round-by-round replacement.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use shared::{ReplaceStandingsRequest, UpsertStandingRowRequest};

use super::error_response;
use crate::AppState;

/// Ranked table for one group, with movement indicators
pub async fn get_standings(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/standings/{}", group);

    match state.standings_service.table(&group).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to build standings table: {}", e);
            error_response(e)
        }
    }
}

/// Insert or edit one standings row
pub async fn upsert_standing_row(
    State(state): State<AppState>,
    Json(request): Json<UpsertStandingRowRequest>,
) -> impl IntoResponse {
    info!("POST /api/standings/rows - request: {:?}", request);

    match state.standings_service.upsert_row(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to upsert standings row: {}", e);
            error_response(e)
        }
    }
}

/// Delete one standings row
pub async fn delete_standing_row(
    State(state): State<AppState>,
    Path(row_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/standings/rows/{}", row_id);

    match state.standings_service.delete_row(&row_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete standings row: {}", e);
            error_response(e)
        }
    }
}

/// Replace a group's table wholesale, archiving the outgoing rows
pub async fn replace_standings(
    State(state): State<AppState>,
    Path(group): Path<String>,
    Json(request): Json<ReplaceStandingsRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/standings/{}/replace - {} rows",
        group,
        request.rows.len()
    );

    match state.standings_service.replace_table(&group, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to replace standings: {}", e);
            error_response(e)
        }
    }
}
