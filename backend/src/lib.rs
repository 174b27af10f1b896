//! # Backend Module
//!
//! All non-UI logic for the club tracker.
//!
//! The backend is a thin service over a hosted document database and
//! follows a layered architecture:
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, pure computation)
//!     ↓
//! Storage Layer (document store, typed repositories)
//! ```
//!
//! All state lives in the store; the process itself only holds the
//! per-cell in-flight write guards.

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::{
    AttendanceService, EventService, MatchService, PlayerService, ScorerService, StandingsService,
};
use crate::storage::store::DocumentStore;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub player_service: PlayerService,
    pub event_service: EventService,
    pub attendance_service: AttendanceService,
    pub standings_service: StandingsService,
    pub scorer_service: ScorerService,
    pub match_service: MatchService,
}

/// Initialize the backend with all required services over one store
pub async fn initialize_backend(store: Arc<dyn DocumentStore>) -> Result<AppState> {
    info!("Setting up domain services");

    Ok(AppState {
        player_service: PlayerService::new(store.clone()),
        event_service: EventService::new(store.clone()),
        attendance_service: AttendanceService::new(store.clone()),
        standings_service: StandingsService::new(store.clone()),
        scorer_service: ScorerService::new(store.clone()),
        match_service: MatchService::new(store),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route("/players", get(io::list_players).post(io::create_player))
        .route(
            "/players/:player_id",
            get(io::get_player)
                .put(io::update_player)
                .delete(io::delete_player),
        )
        .route("/players/:player_id/active", post(io::set_player_active))
        .route("/events", get(io::list_events).post(io::create_event))
        .route(
            "/events/:event_id",
            put(io::update_event).delete(io::delete_event),
        )
        .route("/attendance/table", get(io::get_debt_table))
        .route("/attendance/toggle", post(io::toggle_attendance))
        .route("/standings/rows", post(io::upsert_standing_row))
        .route("/standings/rows/:row_id", delete(io::delete_standing_row))
        .route("/standings/:group", get(io::get_standings))
        .route("/standings/:group/replace", post(io::replace_standings))
        .route("/scorers", get(io::get_scorer_table))
        .route("/scorers/goals", post(io::update_goals))
        .route("/matches", get(io::list_matches).post(io::create_match))
        .route("/matches/schedule", get(io::get_schedule))
        .route("/matches/:match_id", delete(io::delete_match))
        .route("/matches/:match_id/score", post(io::set_score))
        .route("/matches/:match_id/call-ups", post(io::set_call_ups));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
