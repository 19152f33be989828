//! Filter matching and projection shaping for the in-memory backend.
//!
//! A filter is a mapping of field name to expected value: a document matches
//! when every filter pair equals the document's top-level value for that
//! field, and the empty filter matches everything. Projections follow the
//! usual document store convention: truthy values select fields to include,
//! falsy values select fields to exclude, and the identifier field is
//! included by default.

use bson::{Bson, Document};

use docbridge_core::ident::ID_FIELD;

/// Returns whether `document` satisfies every pair of `filter`.
pub(crate) fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

/// Shapes `document` according to `projection`.
///
/// An empty projection includes all fields.
pub(crate) fn project(document: &Document, projection: &Document) -> Document {
    if projection.is_empty() {
        return document.clone();
    }

    let inclusion = projection.iter().any(|(_, value)| is_truthy(value));
    let include_id = match projection.get(ID_FIELD) {
        Some(value) => is_truthy(value),
        // Absent from an inclusion projection still means included.
        None => true,
    };

    document
        .iter()
        .filter(|(field, _)| {
            if field.as_str() == ID_FIELD {
                return include_id;
            }

            match projection.get(field) {
                Some(value) => is_truthy(value),
                None => !inclusion,
            }
        })
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}

fn is_truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(flag) => *flag,
        Bson::Int32(n) => *n != 0,
        Bson::Int64(n) => *n != 0,
        Bson::Double(n) => *n != 0.0,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn empty_filter_matches_everything() {
        assert!(matches(&doc! { "a": 1 }, &doc! {}));
        assert!(matches(&doc! {}, &doc! {}));
    }

    #[test]
    fn all_filter_pairs_must_match() {
        let document = doc! { "a": 1, "b": "x" };

        assert!(matches(&document, &doc! { "a": 1 }));
        assert!(matches(&document, &doc! { "a": 1, "b": "x" }));
        assert!(!matches(&document, &doc! { "a": 2 }));
        assert!(!matches(&document, &doc! { "a": 1, "c": true }));
    }

    #[test]
    fn empty_projection_keeps_all_fields() {
        let document = doc! { "_id": "x", "a": 1, "b": 2 };

        assert_eq!(project(&document, &doc! {}), document);
    }

    #[test]
    fn inclusion_projection_keeps_listed_fields_and_id() {
        let document = doc! { "_id": "x", "a": 1, "b": 2 };

        assert_eq!(
            project(&document, &doc! { "a": 1 }),
            doc! { "_id": "x", "a": 1 }
        );
    }

    #[test]
    fn inclusion_projection_can_drop_the_id() {
        let document = doc! { "_id": "x", "a": 1, "b": 2 };

        assert_eq!(
            project(&document, &doc! { "a": 1, "_id": 0 }),
            doc! { "a": 1 }
        );
    }

    #[test]
    fn exclusion_projection_drops_listed_fields() {
        let document = doc! { "_id": "x", "a": 1, "b": 2 };

        assert_eq!(
            project(&document, &doc! { "b": 0 }),
            doc! { "_id": "x", "a": 1 }
        );
    }
}
