use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use shared::TeamStandingRow;

use super::{decode, decode_all, encode};
use crate::storage::store::{CollectionQuery, DocumentStore, Filter};

pub const COLLECTION: &str = "standing_rows";
pub const PREVIOUS_COLLECTION: &str = "previous_standing_rows";

/// Repository for the league table and its previous-snapshot archive.
///
/// The archive exists solely to compute rank movement; it is rewritten
/// wholesale whenever the table is replaced.
#[derive(Clone)]
pub struct StandingsRepository {
    store: Arc<dyn DocumentStore>,
}

impl StandingsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn store_row(&self, row: &TeamStandingRow) -> Result<()> {
        self.store
            .upsert_document(COLLECTION, &row.id, encode(row)?, false)
            .await
    }

    pub async fn get_row(&self, row_id: &str) -> Result<Option<TeamStandingRow>> {
        let query = CollectionQuery::all(COLLECTION)
            .filtered(Filter::Eq("id".into(), json!(row_id)))
            .limited(1);
        let mut docs = self.store.fetch_collection(&query).await?;
        docs.pop().map(decode).transpose()
    }

    /// Rows of one group, unsorted; callers apply the standings order
    pub async fn list_group(&self, group: &str) -> Result<Vec<TeamStandingRow>> {
        let query = CollectionQuery::all(COLLECTION)
            .filtered(Filter::Eq("group".into(), json!(group)));
        decode_all(self.store.fetch_collection(&query).await?)
    }

    /// Previous-snapshot rows of one group
    pub async fn list_previous_group(&self, group: &str) -> Result<Vec<TeamStandingRow>> {
        let query = CollectionQuery::all(PREVIOUS_COLLECTION)
            .filtered(Filter::Eq("group".into(), json!(group)));
        decode_all(self.store.fetch_collection(&query).await?)
    }

    /// Current and previous rows of one group, as one all-or-nothing batch
    pub async fn load_group_with_previous(
        &self,
        group: &str,
    ) -> Result<(Vec<TeamStandingRow>, Vec<TeamStandingRow>)> {
        let queries = [
            CollectionQuery::all(COLLECTION).filtered(Filter::Eq("group".into(), json!(group))),
            CollectionQuery::all(PREVIOUS_COLLECTION)
                .filtered(Filter::Eq("group".into(), json!(group))),
        ];
        let mut results = self.store.run_batch(&queries).await?;
        let previous = decode_all(results.pop().unwrap_or_default())?;
        let current = decode_all(results.pop().unwrap_or_default())?;
        Ok((current, previous))
    }

    /// Find a group's row by team name, for the upsert-by-name path
    pub async fn find_by_team(&self, group: &str, team: &str) -> Result<Option<TeamStandingRow>> {
        // Single-field filters only, so narrow on team after the fetch
        let rows = self.list_group(group).await?;
        Ok(rows.into_iter().find(|row| row.team == team))
    }

    pub async fn delete_row(&self, row_id: &str) -> Result<()> {
        self.store.delete_document(COLLECTION, row_id).await
    }

    pub async fn store_previous_row(&self, row: &TeamStandingRow) -> Result<()> {
        self.store
            .upsert_document(PREVIOUS_COLLECTION, &row.id, encode(row)?, false)
            .await
    }

    pub async fn delete_previous_row(&self, row_id: &str) -> Result<()> {
        self.store.delete_document(PREVIOUS_COLLECTION, row_id).await
    }
}
