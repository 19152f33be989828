//! MongoDB backend implementation for docbridge.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend`
//! trait. The connection is established lazily on the first operation and
//! memoized for the life of the process; an explicit `close` tears it down.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docbridge = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use docbridge::{access::DataAccess, mongodb::MongoStore};
//! use docbridge_core::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let access = DataAccess::new(MongoStore::from_config(&config));
//!
//!     let users = access.find("users", None, None).await;
//!     println!("{users:?}");
//!
//!     access.shutdown().await?;
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbridge_mongodb;

pub mod store;

pub use store::{MongoStore, MongoStoreBuilder};
