//! MongoDB implementation of the backend trait.
//!
//! The client is established lazily on first use and memoized; closing the
//! store is idempotent and returns it to the unconnected state.

use async_trait::async_trait;
use bson::{Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mea::rwlock::RwLock;
use mongodb::{
    Client, Collection as MongoCollection,
    error::{Error as MongoError, ErrorKind},
    options::{ClientOptions, FindOptions, ReturnDocument},
};

use docbridge_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::Config,
    error::{AccessError, AccessResult},
    ident::ID_FIELD,
};

/// MongoDB namespace-not-found server error code, raised when dropping a
/// collection that does not exist.
const NAMESPACE_NOT_FOUND: i32 = 26;

/// MongoDB storage backend with a lazily established, memoized client.
///
/// The first operation connects (logging the target); later operations reuse
/// the client. Concurrent first calls are serialized through a double-checked
/// write lock so only one client is ever created. [`MongoStore::close`]
/// resets the store to its unconnected state and is idempotent.
#[derive(Debug)]
pub struct MongoStore {
    uri: String,
    database: String,
    client: RwLock<Option<Client>>,
}

impl MongoStore {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            client: RwLock::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.uri, &config.database)
    }

    pub fn builder(uri: &str, database: &str) -> MongoStoreBuilder {
        MongoStoreBuilder::new(uri, database)
    }

    async fn client(&self) -> AccessResult<Client> {
        if let Some(client) = self.client.read().await.as_ref() {
            return Ok(client.clone());
        }

        let mut guard = self.client.write().await;

        // Another task may have connected while we waited for the write lock.
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        tracing::info!(
            uri = %self.uri,
            database = %self.database,
            "connecting to document store"
        );

        let options = ClientOptions::parse(&self.uri)
            .await
            .map_err(connection_error)?;
        let client = Client::with_options(options).map_err(connection_error)?;
        *guard = Some(client.clone());

        Ok(client)
    }

    async fn collection(&self, name: &str) -> AccessResult<MongoCollection<Document>> {
        Ok(self
            .client()
            .await?
            .database(&self.database)
            .collection(name))
    }

    /// Closes the underlying client if one exists and resets the store to
    /// its unconnected state. Calling it with no connection is a no-op.
    pub async fn close(&self) -> AccessResult<()> {
        if let Some(client) = self.client.write().await.take() {
            client.shutdown().await;
        }

        Ok(())
    }
}

#[async_trait]
impl StoreBackend for MongoStore {
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> AccessResult<Vec<Document>> {
        // Identifiers are assigned here rather than by the server so the
        // inserted documents can be handed back with their identifiers set.
        let documents: Vec<Document> = documents.into_iter().map(assign_id).collect();

        self.collection(collection)
            .await?
            .insert_many(&documents)
            .await
            .map_err(store_error)?;

        Ok(documents)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> AccessResult<Document> {
        let document = assign_id(document);

        self.collection(collection)
            .await?
            .insert_one(&document)
            .await
            .map_err(store_error)?;

        Ok(document)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        projection: Document,
    ) -> AccessResult<Vec<Document>> {
        let mut options = FindOptions::default();

        if !projection.is_empty() {
            options.projection = Some(projection);
        }

        self.collection(collection)
            .await?
            .find(filter)
            .with_options(options)
            .await
            .map_err(store_error)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(store_error)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        projection: Document,
    ) -> AccessResult<Vec<Document>> {
        self.find(collection, doc! { "_id": id }, projection)
            .await
    }

    async fn find_one_and_delete(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> AccessResult<Option<Document>> {
        self.collection(collection)
            .await?
            .find_one_and_delete(doc! { "_id": id })
            .await
            .map_err(store_error)
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        id: ObjectId,
        update: Document,
        return_previous: bool,
    ) -> AccessResult<Option<Document>> {
        self.collection(collection)
            .await?
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update })
            .return_document(if return_previous {
                ReturnDocument::Before
            } else {
                ReturnDocument::After
            })
            .await
            .map_err(store_error)
    }

    async fn drop_collection(&self, collection: &str) -> AccessResult<()> {
        match self
            .collection(collection)
            .await?
            .drop()
            .await
        {
            Ok(()) => Ok(()),
            // Dropping a collection that does not exist is a success; every
            // other failure still surfaces.
            Err(e) if is_namespace_not_found(&e) => Ok(()),
            Err(e) => Err(store_error(e)),
        }
    }

    async fn shutdown(self) -> AccessResult<()> {
        self.close().await
    }
}

fn assign_id(mut document: Document) -> Document {
    if !document.contains_key(ID_FIELD) {
        document.insert(ID_FIELD, ObjectId::new());
    }

    document
}

fn is_namespace_not_found(error: &MongoError) -> bool {
    matches!(*error.kind, ErrorKind::Command(ref command) if command.code == NAMESPACE_NOT_FOUND)
}

fn connection_error(error: MongoError) -> AccessError {
    AccessError::Connection(error.to_string())
}

fn store_error(error: MongoError) -> AccessError {
    AccessError::Store(error.to_string())
}

pub struct MongoStoreBuilder {
    uri: String,
    database: String,
}

impl MongoStoreBuilder {
    pub fn new(uri: &str, database: &str) -> Self {
        Self {
            uri: uri.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoStoreBuilder {
    type Backend = MongoStore;

    /// Validates the connection string eagerly; the connection itself stays
    /// lazy until the first operation.
    async fn build(self) -> AccessResult<Self::Backend> {
        ClientOptions::parse(&self.uri)
            .await
            .map_err(connection_error)?;

        Ok(MongoStore::new(self.uri, self.database))
    }
}
