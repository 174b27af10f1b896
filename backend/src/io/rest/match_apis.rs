//! # REST API for Match Management
//!
//! Endpoints for scheduling matches, recording scores, editing call-ups
//! and the upcoming/past split.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{error, info};

use shared::{CreateMatchRequest, SetCallUpsRequest, SetScoreRequest};

use super::error_response;
use crate::AppState;

/// Schedule a new match
pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<CreateMatchRequest>,
) -> impl IntoResponse {
    info!("POST /api/matches - request: {:?}", request);

    match state.match_service.create_match(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create match: {}", e);
            error_response(e)
        }
    }
}

/// List all matches, most recent first
pub async fn list_matches(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/matches");

    match state.match_service.list_matches().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list matches: {}", e);
            error_response(e)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleParams {
    /// Reference date for the upcoming/past split; today when absent
    pub date: Option<String>,
}

/// Matches split into upcoming and past around a reference date
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleParams>,
) -> impl IntoResponse {
    info!("GET /api/matches/schedule - params: {:?}", params);

    let reference = match &params.date {
        Some(date) => match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid date (expected YYYY-MM-DD): {}", date),
                )
                    .into_response()
            }
        },
        None => Utc::now().date_naive(),
    };

    match state.match_service.schedule(reference).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to build schedule: {}", e);
            error_response(e)
        }
    }
}

/// Record or correct a final score
pub async fn set_score(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<SetScoreRequest>,
) -> impl IntoResponse {
    info!("POST /api/matches/{}/score - request: {:?}", match_id, request);

    match state.match_service.set_score(&match_id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to set score: {}", e);
            error_response(e)
        }
    }
}

/// Replace a match's called-up list
pub async fn set_call_ups(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<SetCallUpsRequest>,
) -> impl IntoResponse {
    info!("POST /api/matches/{}/call-ups - request: {:?}", match_id, request);

    match state.match_service.set_call_ups(&match_id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to set call-ups: {}", e);
            error_response(e)
        }
    }
}

/// Delete a match
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/matches/{}", match_id);

    match state.match_service.delete_match(&match_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete match: {}", e);
            error_response(e)
        }
    }
}
