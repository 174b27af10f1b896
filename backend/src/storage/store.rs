//! # Document Store Abstraction
//!
//! The hosted document database is consumed through four operation shapes:
//! collection fetch (with optional filter/ordering/limit), merge-aware
//! upsert, delete, and an all-or-nothing batch of independent reads.
//! The domain layer only ever talks to this trait, so the hosted client
//! and the in-memory test store are interchangeable.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A stored document: its key plus a JSON field mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

/// Equality-style field filters, matching what the queries actually use
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the given value
    Eq(String, Value),
    /// Field differs from the given value (a missing field counts as null)
    Ne(String, Value),
}

/// Single-field ordering
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: false,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: true,
        }
    }
}

/// One collection read
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQuery {
    pub collection: String,
    pub filter: Option<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl CollectionQuery {
    pub fn all(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            filter: None,
            order_by: None,
            limit: None,
        }
    }

    pub fn filtered(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn ordered(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn limited(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Trait defining the interface to the hosted document store.
///
/// Writes are last-write-wins; the store performs no version checks and
/// the service deliberately adds none (low-concurrency admin tool).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the documents of a collection, filtered/ordered/limited
    async fn fetch_collection(&self, query: &CollectionQuery) -> Result<Vec<Document>>;

    /// Create or replace a document. With `merge` set, fields absent from
    /// `fields` keep their stored values; otherwise the document is
    /// replaced wholesale.
    async fn upsert_document(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
        merge: bool,
    ) -> Result<()>;

    /// Delete a document by key; deleting a missing document is not an error
    async fn delete_document(&self, collection: &str, id: &str) -> Result<()>;

    /// Run a set of independent reads, succeeding only if every read
    /// succeeds. Callers must discard partial results on failure.
    async fn run_batch(&self, queries: &[CollectionQuery]) -> Result<Vec<Vec<Document>>> {
        let mut results = Vec::with_capacity(queries.len());
        for query in queries {
            results.push(self.fetch_collection(query).await?);
        }
        Ok(results)
    }
}
