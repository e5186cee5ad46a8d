use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use super::manager::DatabaseError;

/// Outcome of an update, mirroring the driver's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Single-document operations the handlers need against a named collection.
///
/// Filters are plain equality documents. Updates are update documents using
/// `$set`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Up to `limit` documents matching `filter`, in store order
    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, DatabaseError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, DatabaseError>;

    /// Insert and return the id the store assigned
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, DatabaseError>;

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, DatabaseError>;

    /// Remove at most one match; returns the number removed
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
