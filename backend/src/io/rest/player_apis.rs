//! # REST API for Roster Management
//!
//! Endpoints for creating, updating, activating and deleting players.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use shared::{CreatePlayerRequest, SetPlayerActiveRequest, UpdatePlayerRequest};

use super::error_response;
use crate::AppState;

/// Create a new player
pub async fn create_player(
    State(state): State<AppState>,
    Json(request): Json<CreatePlayerRequest>,
) -> impl IntoResponse {
    info!("POST /api/players - request: {:?}", request);

    match state.player_service.create_player(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create player: {}", e);
            error_response(e)
        }
    }
}

/// List all players
pub async fn list_players(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/players");

    match state.player_service.list_players().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list players: {}", e);
            error_response(e)
        }
    }
}

/// Get a player by ID
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/players/{}", player_id);

    match state.player_service.get_player(&player_id).await {
        Ok(Some(player)) => (StatusCode::OK, Json(player)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Player not found").into_response(),
        Err(e) => {
            error!("Failed to get player: {}", e);
            error_response(e)
        }
    }
}

/// Update a player
pub async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<UpdatePlayerRequest>,
) -> impl IntoResponse {
    info!("PUT /api/players/{} - request: {:?}", player_id, request);

    match state.player_service.update_player(&player_id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update player: {}", e);
            error_response(e)
        }
    }
}

/// Activate or deactivate a player
pub async fn set_player_active(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<SetPlayerActiveRequest>,
) -> impl IntoResponse {
    info!("POST /api/players/{}/active - request: {:?}", player_id, request);

    match state
        .player_service
        .set_active(&player_id, request.active)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to set player active state: {}", e);
            error_response(e)
        }
    }
}

/// Hard-delete a player
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/players/{}", player_id);

    match state.player_service.delete_player(&player_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete player: {}", e);
            error_response(e)
        }
    }
}
