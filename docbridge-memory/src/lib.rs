//! In-memory backend implementation for docbridge.
//!
//! This crate provides a map-based implementation of the `StoreBackend`
//! trait. It is primarily the injectable fake handle for testing the access
//! layer without a running database, and doubles as a lightweight store for
//! development.
//!
//! # Example
//!
//! ```ignore
//! use docbridge_core::access::DataAccess;
//! use docbridge_memory::MemoryStore;
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let access = DataAccess::new(MemoryStore::new());
//!     let envelope = access.insert_one("users", doc! { "name": "Alice" }).await;
//!     assert!(envelope.is_success());
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbridge_memory;

pub mod filter;
pub mod store;

pub use store::{MemoryStore, MemoryStoreBuilder};
