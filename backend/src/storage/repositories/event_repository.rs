use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use shared::Event;

use super::{decode, decode_all, encode};
use crate::storage::store::{CollectionQuery, DocumentStore, Filter, OrderBy};

pub const COLLECTION: &str = "events";

/// Repository for the `events` collection
#[derive(Clone)]
pub struct EventRepository {
    store: Arc<dyn DocumentStore>,
}

impl EventRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn store_event(&self, event: &Event) -> Result<()> {
        self.store
            .upsert_document(COLLECTION, &event.id, encode(event)?, false)
            .await
    }

    pub async fn get_event(&self, event_id: &str) -> Result<Option<Event>> {
        let query = CollectionQuery::all(COLLECTION)
            .filtered(Filter::Eq("id".into(), json!(event_id)))
            .limited(1);
        let mut docs = self.store.fetch_collection(&query).await?;
        docs.pop().map(decode).transpose()
    }

    /// List events by date; the ledger grid wants ascending, the
    /// management list wants most recent first
    pub async fn list_events(&self, newest_first: bool) -> Result<Vec<Event>> {
        let order = if newest_first {
            OrderBy::desc("date")
        } else {
            OrderBy::asc("date")
        };
        let query = CollectionQuery::all(COLLECTION).ordered(order);
        decode_all(self.store.fetch_collection(&query).await?)
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.store.delete_document(COLLECTION, event_id).await
    }
}
