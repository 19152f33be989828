//! The CRUD operation set: envelope-returning primitives over a backend.
//!
//! [`DataAccess`] is the surface route handlers call. Every operation takes a
//! collection name plus operation-specific parameters, performs the store
//! operation through the injected [`StoreBackend`], and returns an
//! [`Envelope`]; no failure is ever allowed to propagate to the caller as a
//! raw error. Diagnostics (operation name, collection, message) are logged
//! only outside production and never surfaced in the envelope beyond the
//! message itself.
//!
//! # Example
//!
//! ```ignore
//! use docbridge_core::{access::DataAccess, config::Environment};
//! use bson::doc;
//!
//! let access = DataAccess::new(backend).with_environment(Environment::Production);
//! let envelope = access
//!     .find("users", Some(doc! { "username": "abc" }), None)
//!     .await;
//! ```

use std::time::Duration;

use bson::{Bson, Document};
use tokio::time::timeout;

use crate::{
    backend::StoreBackend,
    config::Environment,
    envelope::Envelope,
    error::{AccessError, AccessResult},
    ident::{self, externalize},
    sanitize::UpdateSanitizer,
};

/// The data access layer: collection-agnostic CRUD primitives returning
/// uniform envelopes.
///
/// Generic over the storage backend, so production code runs against MongoDB
/// while tests inject an in-memory store. Stateless apart from the backend's
/// own connection lifecycle; each operation is a single request/response
/// round trip.
#[derive(Debug)]
pub struct DataAccess<B: StoreBackend> {
    backend: B,
    environment: Environment,
    deadline: Option<Duration>,
}

impl<B: StoreBackend> DataAccess<B> {
    /// Creates an access layer over the given backend.
    ///
    /// Defaults: development environment (diagnostics on), no deadline
    /// (every call waits indefinitely for the store).
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            environment: Environment::default(),
            deadline: None,
        }
    }

    /// Sets the deployment environment; production silences diagnostics.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Arms a per-call deadline applied to every store operation.
    ///
    /// Elapsing yields an `Operation timed out` error envelope. Without a
    /// deadline, calls wait indefinitely for the store's response.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inserts a sequence of documents (without identifiers) into a
    /// collection.
    ///
    /// Success `data` is the sequence of inserted documents with their
    /// assigned identifiers surfaced as strings.
    pub async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Envelope<Vec<Bson>> {
        match self
            .run(self.backend.insert_many(collection, documents))
            .await
        {
            Ok(inserted) => Envelope::success(externalize_all(inserted)),
            Err(e) => self.failure("insert_many", collection, e),
        }
    }

    /// Inserts one document (without an identifier) into a collection.
    ///
    /// Success `data` is always a one-element sequence.
    pub async fn insert_one(&self, collection: &str, document: Document) -> Envelope<Vec<Bson>> {
        match self
            .run(self.backend.insert_one(collection, document))
            .await
        {
            Ok(inserted) => Envelope::success(vec![Bson::Document(externalize(inserted))]),
            Err(e) => self.failure("insert_one", collection, e),
        }
    }

    /// Finds documents matching `filter`, shaped by `projection`.
    ///
    /// Both default to match-all / all-fields when omitted. Identifiers in
    /// the result are always strings, never the native form.
    pub async fn find(
        &self,
        collection: &str,
        filter: Option<Document>,
        projection: Option<Document>,
    ) -> Envelope<Vec<Bson>> {
        let filter = filter.unwrap_or_default();
        let projection = projection.unwrap_or_default();

        match self
            .run(self.backend.find(collection, filter, projection))
            .await
        {
            Ok(found) => Envelope::success(externalize_all(found)),
            Err(e) => self.failure("find", collection, e),
        }
    }

    /// Finds the document with the given string identifier.
    ///
    /// Success `data` is a sequence of zero or one documents. A malformed
    /// identifier yields an `Invalid identifier` error envelope, not a
    /// panic.
    pub async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
        projection: Option<Document>,
    ) -> Envelope<Vec<Bson>> {
        let native = match ident::decode(id) {
            Ok(native) => native,
            Err(e) => return self.failure("find_by_id", collection, e),
        };
        let projection = projection.unwrap_or_default();

        match self
            .run(self.backend.find_by_id(collection, native, projection))
            .await
        {
            Ok(found) => Envelope::success(externalize_all(found)),
            Err(e) => self.failure("find_by_id", collection, e),
        }
    }

    /// Deletes the document with the given string identifier.
    ///
    /// Success `data` is a one-element sequence holding the deleted document,
    /// or null when no document matched; a missing document is not an error.
    pub async fn find_one_and_delete(&self, collection: &str, id: &str) -> Envelope<Vec<Bson>> {
        let native = match ident::decode(id) {
            Ok(native) => native,
            Err(e) => return self.failure("find_one_and_delete", collection, e),
        };

        match self
            .run(self.backend.find_one_and_delete(collection, native))
            .await
        {
            Ok(deleted) => Envelope::success(vec![externalize_or_null(deleted)]),
            Err(e) => self.failure("find_one_and_delete", collection, e),
        }
    }

    /// Applies a partial update to the document with the given string
    /// identifier.
    ///
    /// The update sets only the given fields, never replacing the document;
    /// an identifier field in the update is silently dropped. Success `data`
    /// is a one-element sequence holding the document as it stood before the
    /// update when `return_previous` is true, after it otherwise, or null
    /// when no document matched.
    pub async fn find_one_and_update(
        &self,
        collection: &str,
        id: &str,
        update: Document,
        return_previous: bool,
    ) -> Envelope<Vec<Bson>> {
        let native = match ident::decode(id) {
            Ok(native) => native,
            Err(e) => return self.failure("find_one_and_update", collection, e),
        };
        let update = UpdateSanitizer::strip_identifier(&update);

        match self
            .run(
                self.backend
                    .find_one_and_update(collection, native, update, return_previous),
            )
            .await
        {
            Ok(updated) => Envelope::success(vec![externalize_or_null(updated)]),
            Err(e) => self.failure("find_one_and_update", collection, e),
        }
    }

    /// Drops a collection and all its documents.
    ///
    /// Success `data` is `true`. Dropping a collection that does not exist is
    /// a success (idempotent drop), not an error.
    pub async fn drop_collection(&self, collection: &str) -> Envelope<bool> {
        match self
            .run(self.backend.drop_collection(collection))
            .await
        {
            Ok(()) => Envelope::success(true),
            Err(e) => self.failure("drop_collection", collection, e),
        }
    }

    /// Shuts down the access layer, releasing the backend's resources.
    pub async fn shutdown(self) -> AccessResult<()> {
        self.backend.shutdown().await
    }

    async fn run<T>(
        &self,
        operation: impl Future<Output = AccessResult<T>>,
    ) -> AccessResult<T> {
        match self.deadline {
            Some(limit) => timeout(limit, operation)
                .await
                .map_err(|_| AccessError::Timeout(limit))?,
            None => operation.await,
        }
    }

    fn failure<T>(&self, operation: &str, collection: &str, error: AccessError) -> Envelope<T> {
        if !self.environment.is_production() {
            tracing::error!(
                operation,
                collection,
                error = %error,
                "data access operation failed"
            );
        }

        Envelope::failure(error.to_string())
    }
}

fn externalize_all(documents: Vec<Document>) -> Vec<Bson> {
    documents
        .into_iter()
        .map(|document| Bson::Document(externalize(document)))
        .collect()
}

fn externalize_or_null(document: Option<Document>) -> Bson {
    match document {
        Some(document) => Bson::Document(externalize(document)),
        None => Bson::Null,
    }
}
