use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use shared::Player;

use super::{decode, decode_all, encode};
use crate::storage::store::{CollectionQuery, DocumentStore, Filter, OrderBy};

pub const COLLECTION: &str = "players";

/// Repository for the `players` collection
#[derive(Clone)]
pub struct PlayerRepository {
    store: Arc<dyn DocumentStore>,
}

impl PlayerRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Store a new or updated player (wholesale replace)
    pub async fn store_player(&self, player: &Player) -> Result<()> {
        self.store
            .upsert_document(COLLECTION, &player.id, encode(player)?, false)
            .await
    }

    /// Retrieve a specific player by ID
    pub async fn get_player(&self, player_id: &str) -> Result<Option<Player>> {
        let query = CollectionQuery::all(COLLECTION)
            .filtered(Filter::Eq("id".into(), json!(player_id)))
            .limited(1);
        let mut docs = self.store.fetch_collection(&query).await?;
        docs.pop().map(decode).transpose()
    }

    /// List every player ordered by display name
    pub async fn list_players(&self) -> Result<Vec<Player>> {
        let query = CollectionQuery::all(COLLECTION).ordered(OrderBy::asc("name"));
        decode_all(self.store.fetch_collection(&query).await?)
    }

    /// List active players ordered by display name
    pub async fn list_active_players(&self) -> Result<Vec<Player>> {
        let query = CollectionQuery::all(COLLECTION)
            .filtered(Filter::Ne("active".into(), json!(false)))
            .ordered(OrderBy::asc("name"));
        decode_all(self.store.fetch_collection(&query).await?)
    }

    /// Find a player by exact display name, for duplicate checks
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Player>> {
        let query = CollectionQuery::all(COLLECTION)
            .filtered(Filter::Eq("name".into(), json!(name)))
            .limited(1);
        let mut docs = self.store.fetch_collection(&query).await?;
        docs.pop().map(decode).transpose()
    }

    /// Delete a player by ID
    pub async fn delete_player(&self, player_id: &str) -> Result<()> {
        self.store.delete_document(COLLECTION, player_id).await
    }
}
