use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document};
use mongodb::options::FindOptions;
use mongodb::Collection;
use tracing::debug;

use super::manager::{DatabaseError, DatabaseManager};
use super::store::{DocumentStore, UpdateOutcome};

/// `DocumentStore` over the shared MongoDB client
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoStore;

impl MongoStore {
    pub fn new() -> Self {
        Self
    }

    async fn collection(name: &str) -> Result<Collection<Document>, DatabaseError> {
        Ok(DatabaseManager::database().await?.collection::<Document>(name))
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, DatabaseError> {
        debug!(collection, %filter, limit, "find_many");
        let options = FindOptions::builder().limit(limit).build();
        let cursor = Self::collection(collection).await?.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, DatabaseError> {
        debug!(collection, %filter, "find_one");
        Ok(Self::collection(collection).await?.find_one(filter, None).await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, DatabaseError> {
        debug!(collection, "insert_one");
        let result = Self::collection(collection).await?.insert_one(document, None).await?;
        Ok(result.inserted_id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, DatabaseError> {
        debug!(collection, %filter, "update_one");
        let result = Self::collection(collection)
            .await?
            .update_one(filter, update, None)
            .await?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, DatabaseError> {
        debug!(collection, %filter, "delete_one");
        let result = Self::collection(collection).await?.delete_one(filter, None).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check().await
    }
}
