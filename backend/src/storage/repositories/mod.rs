//! Typed repositories, one per persisted collection.
//!
//! Each repository owns the collection name and the serde round-trip
//! between domain models and document field maps; the domain services
//! never touch raw documents.

pub mod attendance_repository;
pub mod event_repository;
pub mod match_repository;
pub mod player_repository;
pub mod standings_repository;

pub use attendance_repository::AttendanceRepository;
pub use event_repository::EventRepository;
pub use match_repository::MatchRepository;
pub use player_repository::PlayerRepository;
pub use standings_repository::StandingsRepository;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::store::Document;

/// Serialize a model into a document field map
pub(crate) fn encode<T: Serialize>(model: &T) -> Result<Value> {
    serde_json::to_value(model).context("Failed to serialize document fields")
}

/// Deserialize a fetched document back into a model
pub(crate) fn decode<T: DeserializeOwned>(doc: Document) -> Result<T> {
    serde_json::from_value(doc.fields)
        .with_context(|| format!("Failed to deserialize document {}", doc.id))
}

pub(crate) fn decode_all<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>> {
    docs.into_iter().map(decode).collect()
}
