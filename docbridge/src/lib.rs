//! Main docbridge crate providing a uniform data access layer for document
//! databases.
//!
//! This crate is the primary entry point for users of docbridge. It
//! re-exports the core types from the sub-crates and provides convenient
//! access to the storage backends.
//!
//! # Features
//!
//! - **Uniform envelopes** - Every operation returns `{data, error}`; callers
//!   never handle driver errors
//! - **Collection-agnostic CRUD** - Insert, find, find-by-id, delete, update
//!   and drop over any collection name
//! - **Pluggable backends** - MongoDB for production, an in-memory store for
//!   tests and development
//! - **String identifiers** - Identifiers cross the boundary as strings; the
//!   native form never leaks
//!
//! # Quick Start
//!
//! ```ignore
//! use docbridge::{access::DataAccess, memory::MemoryStore};
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let access = DataAccess::new(MemoryStore::new());
//!
//!     let inserted = access
//!         .insert_one("users", doc! { "email": "a@b.com", "username": "abc" })
//!         .await;
//!     assert!(inserted.is_success());
//!
//!     let users = access.find("users", None, None).await;
//!     println!("{users:?}");
//!
//!     access.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires the `mongodb` feature)

pub mod prelude;

pub use docbridge_core::{access, backend, config, envelope, error, ident, sanitize};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docbridge_memory::{MemoryStore, MemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docbridge_mongodb::{MongoStore, MongoStoreBuilder};
}
