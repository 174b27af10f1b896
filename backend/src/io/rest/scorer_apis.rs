//! # REST API for Goal Scorers
//!
//! The table endpoint returns ranked scorers with movement indicators;
//! the goals endpoint sets one player's count.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use shared::UpdateGoalsRequest;

use super::error_response;
use crate::AppState;

/// Ranked top-scorer table over active players
pub async fn get_scorer_table(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/scorers");

    match state.scorer_service.scorer_table().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to build scorer table: {}", e);
            error_response(e)
        }
    }
}

/// Set a player's goal count
pub async fn update_goals(
    State(state): State<AppState>,
    Json(request): Json<UpdateGoalsRequest>,
) -> impl IntoResponse {
    info!("POST /api/scorers/goals - request: {:?}", request);

    match state.scorer_service.update_goals(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update goals: {}", e);
            error_response(e)
        }
    }
}
