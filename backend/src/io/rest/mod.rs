//! # REST API Interface Layer
//!
//! HTTP endpoints for the club tracker. This layer handles:
//! - JSON request/response serialization
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! Handlers never contain business logic; they call one service method
//! and map the result.

pub mod attendance_apis;
pub mod event_apis;
pub mod match_apis;
pub mod player_apis;
pub mod scorer_apis;
pub mod standings_apis;

pub use attendance_apis::*;
pub use event_apis::*;
pub use match_apis::*;
pub use player_apis::*;
pub use scorer_apis::*;
pub use standings_apis::*;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::DomainError;

/// Map a domain error to its HTTP response
pub(crate) fn error_response(error: DomainError) -> Response {
    let status = match &error {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("dup"), StatusCode::CONFLICT),
            (DomainError::not_found("gone"), StatusCode::NOT_FOUND),
            (
                DomainError::Store(anyhow!("down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error_response(error).status(), status);
        }
    }
}
