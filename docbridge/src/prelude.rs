//! Convenient re-exports of commonly used types from docbridge.
//!
//! Import this prelude module to quickly access the most frequently used
//! types without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use docbridge::prelude::*;
//! ```

pub use docbridge_core::{
    access::DataAccess,
    backend::{StoreBackend, StoreBackendBuilder},
    config::{Config, Environment},
    envelope::Envelope,
    error::{AccessError, AccessResult},
    ident::ID_FIELD,
    sanitize::UpdateSanitizer,
};

pub use docbridge_memory::MemoryStore;
