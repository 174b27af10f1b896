use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use shared::{AttendanceRecord, Event, Player};

use super::{decode, decode_all, encode};
use crate::storage::store::{CollectionQuery, DocumentStore, Filter, OrderBy};

pub const COLLECTION: &str = "attendance_records";

/// Repository for the `attendance_records` collection.
///
/// Records are keyed by the deterministic pair ID, so there is at most one
/// document per (player, event) pair by construction.
#[derive(Clone)]
pub struct AttendanceRepository {
    store: Arc<dyn DocumentStore>,
}

impl AttendanceRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Upsert the record for its pair. merge=true so a partial rewrite
    /// preserves fields the caller did not set.
    pub async fn upsert_record(&self, record: &AttendanceRecord) -> Result<()> {
        let id = AttendanceRecord::pair_id(&record.player_id, &record.event_id);
        self.store
            .upsert_document(COLLECTION, &id, encode(record)?, true)
            .await
    }

    /// Record for one (player, event) pair; None means implicit Absent
    pub async fn get_record(
        &self,
        player_id: &str,
        event_id: &str,
    ) -> Result<Option<AttendanceRecord>> {
        // The pair is unique by key; narrow on the event after the fetch.
        let query = CollectionQuery::all(COLLECTION)
            .filtered(Filter::Eq("player_id".into(), json!(player_id)));
        let docs = self.store.fetch_collection(&query).await?;
        for doc in docs {
            let record: AttendanceRecord = decode(doc)?;
            if record.event_id == event_id {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    pub async fn list_records(&self) -> Result<Vec<AttendanceRecord>> {
        decode_all(self.store.fetch_collection(&CollectionQuery::all(COLLECTION)).await?)
    }

    /// Batched load of everything the debt grid needs: active players
    /// (name ascending), events (date ascending) and all attendance
    /// records. All-or-nothing; a failed read fails the whole load.
    pub async fn load_grid_inputs(
        &self,
    ) -> Result<(Vec<Player>, Vec<Event>, Vec<AttendanceRecord>)> {
        let queries = [
            CollectionQuery::all(super::player_repository::COLLECTION)
                .filtered(Filter::Ne("active".into(), json!(false)))
                .ordered(OrderBy::asc("name")),
            CollectionQuery::all(super::event_repository::COLLECTION)
                .ordered(OrderBy::asc("date")),
            CollectionQuery::all(COLLECTION),
        ];
        let mut results = self.store.run_batch(&queries).await?;

        let records = decode_all(results.pop().unwrap_or_default())?;
        let events = decode_all(results.pop().unwrap_or_default())?;
        let players = decode_all(results.pop().unwrap_or_default())?;
        Ok((players, events, records))
    }
}
