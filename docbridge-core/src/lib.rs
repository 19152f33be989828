//! A collection-agnostic CRUD access layer for document databases.
//!
//! This crate is the core of the docbridge project and provides:
//!
//! - **Result envelope** ([`envelope`]) - The uniform `{data, error}` shape every operation returns
//! - **Error handling** ([`error`]) - The error taxonomy behind envelope messages
//! - **Identifier codec** ([`ident`]) - String to native identifier conversion
//! - **Update sanitizer** ([`sanitize`]) - Strips the identifier field from update payloads
//! - **Backend abstraction** ([`backend`]) - Trait seam for pluggable storage backends
//! - **CRUD operation set** ([`access`]) - The envelope-returning primitives callers use
//! - **Configuration** ([`config`]) - Connection string, database name and environment
//!
//! # Example
//!
//! ```ignore
//! use docbridge_core::access::DataAccess;
//! use bson::doc;
//!
//! let access = DataAccess::new(backend);
//! let envelope = access.insert_one("users", doc! { "email": "a@b.com" }).await;
//! assert!(envelope.is_success());
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbridge_core;

pub mod access;
pub mod backend;
pub mod config;
pub mod envelope;
pub mod error;
pub mod ident;
pub mod sanitize;
