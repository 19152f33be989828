//! Storage backend abstraction for the access layer.
//!
//! This module defines the trait seam between the envelope-returning
//! operation set and a concrete document store. Implementations exist for
//! MongoDB (persistent) and an in-memory map (testing, development); the
//! operation set in [`crate::access`] is generic over this trait, so tests
//! inject a fake handle without touching production code paths.
//!
//! # Contract
//!
//! All methods are async request/response round trips. Implementations must
//! be thread-safe (`Send + Sync`) and support concurrent access; no ordering
//! guarantee is made between concurrent operations. Errors are reported as
//! [`AccessError`](crate::error::AccessError) values, never panics. "Not
//! found" conditions are not errors: see the individual methods.

use std::fmt::Debug;

use async_trait::async_trait;
use bson::{Document, oid::ObjectId};

use crate::error::AccessResult;

/// Abstract interface for document storage backends.
///
/// Implementers provide the seven store-level primitives the access layer is
/// built from. Documents are schema-less BSON mappings; every persisted
/// document gains a unique native identifier under `_id` upon insertion.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts documents into a collection, assigning identifiers.
    ///
    /// Returns the inserted documents with their native identifiers set.
    /// Fails atomically per store semantics if any document is malformed.
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> AccessResult<Vec<Document>>;

    /// Inserts a single document, assigning an identifier.
    async fn insert_one(&self, collection: &str, document: Document) -> AccessResult<Document>;

    /// Finds documents matching `filter`, shaped by `projection`.
    ///
    /// An empty filter matches all documents; an empty projection includes
    /// all fields.
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        projection: Document,
    ) -> AccessResult<Vec<Document>>;

    /// Finds the document with the given native identifier.
    ///
    /// Returns zero or one documents.
    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        projection: Document,
    ) -> AccessResult<Vec<Document>>;

    /// Deletes the document with the given identifier, returning it.
    ///
    /// Returns `Ok(None)` when no document matched; this is not an error.
    async fn find_one_and_delete(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> AccessResult<Option<Document>>;

    /// Applies a partial update to the document with the given identifier.
    ///
    /// The update sets only the given fields, never replacing the whole
    /// document. Returns the document as it stood before the update when
    /// `return_previous` is true, after it otherwise, or `Ok(None)` when no
    /// document matched. The update payload is sanitized by the caller and
    /// must not contain the identifier field.
    async fn find_one_and_update(
        &self,
        collection: &str,
        id: ObjectId,
        update: Document,
        return_previous: bool,
    ) -> AccessResult<Option<Document>>;

    /// Drops a collection and all its documents.
    ///
    /// Dropping a collection that does not exist is a success (idempotent
    /// drop), not an error.
    async fn drop_collection(&self, collection: &str) -> AccessResult<()>;

    /// Cleanly shuts down the backend, releasing held connections.
    ///
    /// The default implementation is a no-op; backends with external
    /// connections should override this.
    async fn shutdown(self) -> AccessResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> AccessResult<Vec<Document>> {
        (*self).insert_many(collection, documents).await
    }

    async fn insert_one(&self, collection: &str, document: Document) -> AccessResult<Document> {
        (*self).insert_one(collection, document).await
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        projection: Document,
    ) -> AccessResult<Vec<Document>> {
        (*self).find(collection, filter, projection).await
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        projection: Document,
    ) -> AccessResult<Vec<Document>> {
        (*self)
            .find_by_id(collection, id, projection)
            .await
    }

    async fn find_one_and_delete(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> AccessResult<Option<Document>> {
        (*self)
            .find_one_and_delete(collection, id)
            .await
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        id: ObjectId,
        update: Document,
        return_previous: bool,
    ) -> AccessResult<Option<Document>> {
        (*self)
            .find_one_and_update(collection, id, update, return_previous)
            .await
    }

    async fn drop_collection(&self, collection: &str) -> AccessResult<()> {
        (*self).drop_collection(collection).await
    }
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> AccessResult<Self::Backend>;
}
