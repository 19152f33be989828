//! Identifier codec: opaque string identifiers to and from the store's
//! native form.
//!
//! Callers only ever see identifiers as strings; the native
//! [`ObjectId`] form stays below the envelope boundary. Malformed input is
//! rejected with [`AccessError::InvalidIdentifier`] rather than panicking.

use bson::{Bson, Document, oid::ObjectId};

use crate::error::{AccessError, AccessResult};

/// The reserved identifier field every persisted document carries.
pub const ID_FIELD: &str = "_id";

/// Decodes an opaque string identifier into its native form.
///
/// # Errors
///
/// Returns [`AccessError::InvalidIdentifier`] if the string is not a valid
/// identifier.
pub fn decode(raw: &str) -> AccessResult<ObjectId> {
    ObjectId::parse_str(raw)
        .map_err(|e| AccessError::InvalidIdentifier(format!("{raw:?}: {e}")))
}

/// Encodes a native identifier into its external string form.
pub fn encode(id: &ObjectId) -> String {
    id.to_hex()
}

/// Rewrites a document's native identifier into its string form.
///
/// Documents returned to callers always carry the identifier as a string,
/// never the native representation. Documents without a native identifier are
/// returned unchanged.
pub fn externalize(mut document: Document) -> Document {
    if let Some(Bson::ObjectId(id)) = document.get(ID_FIELD) {
        let external = encode(id);
        document.insert(ID_FIELD, Bson::String(external));
    }

    document
}
