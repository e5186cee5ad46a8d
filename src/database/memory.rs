//! InMemoryStore - insertion-ordered document store for tests and local runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};

use super::manager::DatabaseError;
use super::store::{DocumentStore, UpdateOutcome};

/// In-memory store keyed by collection name.
///
/// Filters match on top-level field equality and updates support `$set`,
/// which covers every call the handlers make. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
    operations: Arc<AtomicUsize>,
    failure: Arc<RwLock<Option<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert documents directly, bypassing the operation counter.
    /// Documents without `_id` get a fresh ObjectId.
    pub fn seed(&self, collection: &str, documents: impl IntoIterator<Item = Document>) -> Vec<ObjectId> {
        let mut collections = match self.collections.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let docs = collections.entry(collection.to_string()).or_default();
        documents
            .into_iter()
            .map(|mut doc| {
                let id = match doc.get_object_id("_id") {
                    Ok(id) => id,
                    Err(_) => {
                        let id = ObjectId::new();
                        doc.insert("_id", id);
                        id
                    }
                };
                docs.push(doc);
                id
            })
            .collect()
    }

    /// Number of store calls made through the `DocumentStore` interface
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Number of documents currently held in `collection`
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Make every subsequent call fail with `message`; `None` restores normal behavior
    pub fn fail_with(&self, message: Option<&str>) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = message.map(str::to_string);
        }
    }

    fn begin(&self) -> Result<(), DatabaseError> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        let failure = self
            .failure
            .read()
            .map_err(|_| DatabaseError::Storage("lock poisoned".into()))?;
        match failure.as_ref() {
            Some(message) => Err(DatabaseError::Storage(message.clone())),
            None => Ok(()),
        }
    }

    fn matches(doc: &Document, filter: &Document) -> bool {
        filter.iter().all(|(key, value)| doc.get(key) == Some(value))
    }

    fn apply_update(doc: &mut Document, update: &Document) -> Result<bool, DatabaseError> {
        let mut modified = false;
        for (operator, fields) in update {
            if operator != "$set" {
                return Err(DatabaseError::Storage(format!(
                    "unsupported update operator: {}",
                    operator
                )));
            }
            let fields = fields
                .as_document()
                .ok_or_else(|| DatabaseError::Storage("$set expects a document".into()))?;
            for (key, value) in fields {
                if doc.get(key) != Some(value) {
                    doc.insert(key.clone(), value.clone());
                    modified = true;
                }
            }
        }
        Ok(modified)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, DatabaseError> {
        self.begin()?;
        let collections = self
            .collections
            .read()
            .map_err(|_| DatabaseError::Storage("lock poisoned".into()))?;
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| Self::matches(doc, &filter))
                    .take(take)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, DatabaseError> {
        self.begin()?;
        let collections = self
            .collections
            .read()
            .map_err(|_| DatabaseError::Storage("lock poisoned".into()))?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| Self::matches(doc, &filter)))
            .cloned())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<Bson, DatabaseError> {
        self.begin()?;
        let mut collections = self
            .collections
            .write()
            .map_err(|_| DatabaseError::Storage("lock poisoned".into()))?;
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };
        collections.entry(collection.to_string()).or_default().push(document);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, DatabaseError> {
        self.begin()?;
        let mut collections = self
            .collections
            .write()
            .map_err(|_| DatabaseError::Storage("lock poisoned".into()))?;
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| Self::matches(doc, &filter)));
        match target {
            Some(doc) => {
                let modified = Self::apply_update(doc, &update)?;
                Ok(UpdateOutcome {
                    matched_count: 1,
                    modified_count: u64::from(modified),
                })
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, DatabaseError> {
        self.begin()?;
        let mut collections = self
            .collections
            .write()
            .map_err(|_| DatabaseError::Storage("lock poisoned".into()))?;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|doc| Self::matches(doc, &filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.begin()
    }
}
