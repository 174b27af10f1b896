use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use shared::Match;

use super::{decode, decode_all, encode};
use crate::storage::store::{CollectionQuery, DocumentStore, Filter, OrderBy};

pub const COLLECTION: &str = "matches";

/// Repository for the `matches` collection
#[derive(Clone)]
pub struct MatchRepository {
    store: Arc<dyn DocumentStore>,
}

impl MatchRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn store_match(&self, match_entry: &Match) -> Result<()> {
        self.store
            .upsert_document(COLLECTION, &match_entry.id, encode(match_entry)?, false)
            .await
    }

    pub async fn get_match(&self, match_id: &str) -> Result<Option<Match>> {
        let query = CollectionQuery::all(COLLECTION)
            .filtered(Filter::Eq("id".into(), json!(match_id)))
            .limited(1);
        let mut docs = self.store.fetch_collection(&query).await?;
        docs.pop().map(decode).transpose()
    }

    /// All matches, most recent date first
    pub async fn list_matches(&self) -> Result<Vec<Match>> {
        let query = CollectionQuery::all(COLLECTION).ordered(OrderBy::desc("date"));
        decode_all(self.store.fetch_collection(&query).await?)
    }

    pub async fn delete_match(&self, match_id: &str) -> Result<()> {
        self.store.delete_document(COLLECTION, match_id).await
    }
}
