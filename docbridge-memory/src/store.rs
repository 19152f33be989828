//! Map-based storage implementation of the backend trait.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use mea::rwlock::RwLock;

use docbridge_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{AccessError, AccessResult},
    ident::ID_FIELD,
};

use crate::filter;

type CollectionMap = HashMap<String, Document>;
type StoreMap = HashMap<String, CollectionMap>;

/// Thread-safe in-memory document storage backend.
///
/// Documents are stored as BSON mappings indexed by the string form of their
/// identifier. The store is cloneable and uses an `Arc`-wrapped internal
/// state, so clones share the same underlying data across async tasks.
///
/// Queries scan every document in a collection; this is intended for tests
/// and development, not large datasets.
///
/// # Example
///
/// ```ignore
/// use docbridge_memory::MemoryStore;
/// use docbridge_core::backend::StoreBackend;
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryStore::new();
///     let inserted = store.insert_one("users", doc! { "name": "Alice" }).await?;
///     assert!(inserted.contains_key("_id"));
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct MemoryStore {
    store: Arc<RwLock<StoreMap>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::default()
    }

    /// Assigns an identifier when the document carries none, returning the
    /// document together with its string key.
    fn key_document(mut document: Document) -> AccessResult<(String, Document)> {
        let id = match document.get(ID_FIELD) {
            Some(Bson::ObjectId(id)) => *id,
            Some(other) => {
                return Err(AccessError::Store(format!(
                    "document carries a non-native identifier: {other}"
                )));
            }
            None => {
                let id = ObjectId::new();
                document.insert(ID_FIELD, id);
                id
            }
        };

        Ok((id.to_hex(), document))
    }
}

#[async_trait]
impl StoreBackend for MemoryStore {
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> AccessResult<Vec<Document>> {
        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        // Key everything up front so a malformed document fails the whole
        // batch before any write happens.
        let keyed = documents
            .into_iter()
            .map(Self::key_document)
            .collect::<AccessResult<Vec<_>>>()?;

        // A key already stored, or repeated within the batch itself, fails
        // the whole batch before any write happens.
        let mut seen = HashSet::new();

        for (key, _) in &keyed {
            if collection_map.contains_key(key) || !seen.insert(key) {
                return Err(AccessError::Store(format!(
                    "duplicate identifier {key} in collection {collection}"
                )));
            }
        }

        let mut inserted = Vec::with_capacity(keyed.len());

        for (key, document) in keyed {
            collection_map.insert(key, document.clone());
            inserted.push(document);
        }

        Ok(inserted)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> AccessResult<Document> {
        Ok(self
            .insert_many(collection, vec![document])
            .await?
            .remove(0))
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        projection: Document,
    ) -> AccessResult<Vec<Document>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        Ok(collection_map
            .values()
            .filter(|document| filter::matches(document, &filter))
            .map(|document| filter::project(document, &projection))
            .collect())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        projection: Document,
    ) -> AccessResult<Vec<Document>> {
        let store = self.store.read().await;

        Ok(store
            .get(collection)
            .and_then(|col| col.get(&id.to_hex()))
            .map(|document| filter::project(document, &projection))
            .into_iter()
            .collect())
    }

    async fn find_one_and_delete(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> AccessResult<Option<Document>> {
        let mut store = self.store.write().await;

        Ok(store
            .get_mut(collection)
            .and_then(|col| col.remove(&id.to_hex())))
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        id: ObjectId,
        update: Document,
        return_previous: bool,
    ) -> AccessResult<Option<Document>> {
        let mut store = self.store.write().await;
        let document = match store
            .get_mut(collection)
            .and_then(|col| col.get_mut(&id.to_hex()))
        {
            Some(document) => document,
            None => return Ok(None),
        };

        let previous = document.clone();

        // Partial merge: set only the given fields, keep the rest.
        for (field, value) in update {
            document.insert(field, value);
        }

        Ok(Some(if return_previous {
            previous
        } else {
            document.clone()
        }))
    }

    async fn drop_collection(&self, collection: &str) -> AccessResult<()> {
        // Removing an absent collection is a success: drops are idempotent.
        self.store.write().await.remove(collection);

        Ok(())
    }
}

/// Builder for constructing [`MemoryStore`] instances.
#[derive(Default)]
pub struct MemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for MemoryStoreBuilder {
    type Backend = MemoryStore;

    async fn build(self) -> AccessResult<Self::Backend> {
        Ok(MemoryStore::new())
    }
}
