//! Update payload sanitization.
//!
//! A partial update must never touch the reserved identifier field: mutating
//! a document's identity through an update would break every by-id lookup
//! that follows. The sanitizer removes the field before an update reaches a
//! storage backend.

use bson::Document;

use crate::ident::ID_FIELD;

/// Strips the reserved identifier field from update payloads.
pub struct UpdateSanitizer;

impl UpdateSanitizer {
    /// Returns a copy of `update` with the identifier field removed if
    /// present; a no-op otherwise. Pure function, no side effects.
    pub fn strip_identifier(update: &Document) -> Document {
        update
            .iter()
            .filter(|(key, _)| key.as_str() != ID_FIELD)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
