//! In-memory [`DocumentStore`] implementation.
//!
//! Stands in for the hosted database in tests and local runs. Semantics
//! follow the hosted store: last write wins, shallow field merge, no
//! version checks.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::store::{CollectionQuery, Document, DocumentStore, Filter};

#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, BTreeMap<String, Value>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Field access with the missing-field-is-null rule used by `Filter::Ne`
fn field_value<'a>(fields: &'a Value, name: &str) -> &'a Value {
    fields.get(name).unwrap_or(&Value::Null)
}

/// Total order over the JSON values the models actually store
/// (nulls first, then booleans, numbers, strings).
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        // Mixed types: keep a stable, arbitrary order by type tag
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn matches_filter(fields: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(name, expected) => field_value(fields, name) == expected,
        Filter::Ne(name, expected) => field_value(fields, name) != expected,
    }
}

/// Shallow merge: top-level fields in `incoming` overwrite, everything
/// else in `existing` is preserved.
fn merge_fields(existing: &Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(old), Value::Object(new)) => {
            let mut merged = old.clone();
            for (key, value) in new {
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        (_, incoming) => incoming,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_collection(&self, query: &CollectionQuery) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut docs: Vec<Document> = collections
            .get(&query.collection)
            .map(|collection| {
                collection
                    .iter()
                    .filter(|(_, fields)| {
                        query
                            .filter
                            .as_ref()
                            .map_or(true, |filter| matches_filter(fields, filter))
                    })
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order_by {
            docs.sort_by(|a, b| {
                let ordering =
                    compare_values(field_value(&a.fields, &order.field), field_value(&b.fields, &order.field));
                if order.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }

        Ok(docs)
    }

    async fn upsert_document(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
        merge: bool,
    ) -> Result<()> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(collection.to_string()).or_default();

        let stored = if merge {
            match collection.get(id) {
                Some(existing) => merge_fields(existing, fields),
                None => fields,
            }
        } else {
            fields
        };

        collection.insert(id.to_string(), stored);
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        if let Some(collection) = collections.get_mut(collection) {
            collection.remove(id);
        }
        Ok(())
    }
}
