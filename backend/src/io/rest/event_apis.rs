//! # REST API for Event Management
//!
//! Endpoints for chargeable club events.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use shared::{CreateEventRequest, UpdateEventRequest};

use super::error_response;
use crate::AppState;

/// Create a new event
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> impl IntoResponse {
    info!("POST /api/events - request: {:?}", request);

    match state.event_service.create_event(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create event: {}", e);
            error_response(e)
        }
    }
}

/// List all events in date order
pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/events");

    match state.event_service.list_events().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list events: {}", e);
            error_response(e)
        }
    }
}

/// Update an event
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(request): Json<UpdateEventRequest>,
) -> impl IntoResponse {
    info!("PUT /api/events/{} - request: {:?}", event_id, request);

    match state.event_service.update_event(&event_id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update event: {}", e);
            error_response(e)
        }
    }
}

/// Delete an event
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/events/{}", event_id);

    match state.event_service.delete_event(&event_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete event: {}", e);
            error_response(e)
        }
    }
}
