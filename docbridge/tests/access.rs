//! End-to-end contracts of the access layer over the in-memory backend.
//!
//! These tests exercise the same surface a route layer would consume: the
//! envelope shape, string identifiers, partial updates, and idempotent
//! deletes and drops.

use bson::{Bson, doc};
use docbridge::{access::DataAccess, memory::MemoryStore, prelude::ID_FIELD};

fn access() -> DataAccess<MemoryStore> {
    DataAccess::new(MemoryStore::new())
}

/// Pulls the identifier string out of a one-document envelope payload.
fn id_of(data: &[Bson]) -> String {
    data[0]
        .as_document()
        .unwrap()
        .get_str(ID_FIELD)
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn inserted_document_is_findable_by_its_identifier() {
    let access = access();

    let inserted = access
        .insert_one("users", doc! { "email": "a@b.com", "username": "abc" })
        .await;
    assert!(inserted.is_success());

    let data = inserted.data().unwrap();
    assert_eq!(data.len(), 1);
    let id = id_of(data);

    let found = access.find_by_id("users", &id, None).await;
    let found_data = found.data().unwrap();
    assert_eq!(found_data.len(), 1);

    let document = found_data[0].as_document().unwrap();
    assert_eq!(document.get_str(ID_FIELD).unwrap(), id);
    assert_eq!(document.get_str("email").unwrap(), "a@b.com");
    assert_eq!(document.get_str("username").unwrap(), "abc");
}

#[tokio::test]
async fn insert_many_assigns_an_identifier_to_every_document() {
    let access = access();

    let inserted = access
        .insert_many(
            "users",
            vec![doc! { "username": "a" }, doc! { "username": "b" }],
        )
        .await;

    let data = inserted.data().unwrap();
    assert_eq!(data.len(), 2);
    for document in data {
        assert!(document.as_document().unwrap().get_str(ID_FIELD).is_ok());
    }
}

#[tokio::test]
async fn identifiers_are_surfaced_as_strings_never_native() {
    let access = access();

    access
        .insert_one("users", doc! { "username": "abc" })
        .await;

    let found = access.find("users", None, None).await;
    let document = found.data().unwrap()[0].as_document().unwrap();

    assert!(matches!(document.get(ID_FIELD), Some(Bson::String(_))));
}

#[tokio::test]
async fn malformed_identifier_yields_error_envelope_not_a_panic() {
    let access = access();

    for raw in ["", "not-an-id", "123", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
        let envelope = access.find_by_id("users", raw, None).await;

        assert_eq!(envelope.data(), None, "{raw}");
        assert!(
            envelope.error().unwrap().starts_with("Invalid identifier"),
            "{raw}"
        );
    }
}

#[tokio::test]
async fn find_filters_and_projects() {
    let access = access();

    access
        .insert_many(
            "users",
            vec![
                doc! { "username": "abc", "age": 30 },
                doc! { "username": "def", "age": 40 },
            ],
        )
        .await;

    let matching = access
        .find("users", Some(doc! { "username": "abc" }), None)
        .await;
    let data = matching.data().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(
        data[0].as_document().unwrap().get_str("username").unwrap(),
        "abc"
    );

    let projected = access
        .find(
            "users",
            Some(doc! { "username": "abc" }),
            Some(doc! { "age": 1, "_id": 0 }),
        )
        .await;
    assert_eq!(
        projected.data().unwrap()[0].as_document().unwrap(),
        &doc! { "age": 30 }
    );
}

#[tokio::test]
async fn find_on_missing_collection_is_an_empty_success() {
    let envelope = access().find("nowhere", None, None).await;

    assert_eq!(envelope.data(), Some(&vec![]));
    assert_eq!(envelope.error(), None);
}

#[tokio::test]
async fn delete_returns_the_deleted_document() {
    let access = access();

    let inserted = access
        .insert_one("users", doc! { "username": "abc" })
        .await;
    let id = id_of(inserted.data().unwrap());

    let deleted = access.find_one_and_delete("users", &id).await;
    let data = deleted.data().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(
        data[0].as_document().unwrap().get_str("username").unwrap(),
        "abc"
    );

    let gone = access.find_by_id("users", &id, None).await;
    assert!(gone.data().unwrap().is_empty());
}

#[tokio::test]
async fn delete_of_nonexistent_document_yields_null_element() {
    let access = access();
    let id = bson::oid::ObjectId::new().to_hex();

    let envelope = access.find_one_and_delete("users", &id).await;

    assert_eq!(envelope.data(), Some(&vec![Bson::Null]));
    assert_eq!(envelope.error(), None);
}

#[tokio::test]
async fn update_is_a_partial_merge_preserving_other_fields() {
    let access = access();

    let inserted = access
        .insert_one("users", doc! { "email": "a@b.com", "username": "abc" })
        .await;
    let id = id_of(inserted.data().unwrap());

    let updated = access
        .find_one_and_update("users", &id, doc! { "username": "new" }, false)
        .await;

    let document = updated.data().unwrap()[0].as_document().unwrap();
    assert_eq!(document.get_str("username").unwrap(), "new");
    assert_eq!(document.get_str("email").unwrap(), "a@b.com");
}

#[tokio::test]
async fn update_can_return_the_previous_version() {
    let access = access();

    let inserted = access
        .insert_one("users", doc! { "username": "abc" })
        .await;
    let id = id_of(inserted.data().unwrap());

    let previous = access
        .find_one_and_update("users", &id, doc! { "username": "new" }, true)
        .await;
    assert_eq!(
        previous.data().unwrap()[0]
            .as_document()
            .unwrap()
            .get_str("username")
            .unwrap(),
        "abc"
    );

    let current = access.find_by_id("users", &id, None).await;
    assert_eq!(
        current.data().unwrap()[0]
            .as_document()
            .unwrap()
            .get_str("username")
            .unwrap(),
        "new"
    );
}

#[tokio::test]
async fn update_cannot_mutate_the_identifier() {
    let access = access();

    let inserted = access
        .insert_one("users", doc! { "username": "abc" })
        .await;
    let id = id_of(inserted.data().unwrap());

    let smuggled = bson::oid::ObjectId::new();
    let updated = access
        .find_one_and_update(
            "users",
            &id,
            doc! { "_id": smuggled, "username": "new" },
            false,
        )
        .await;

    assert!(updated.is_success());
    assert_eq!(
        updated.data().unwrap()[0]
            .as_document()
            .unwrap()
            .get_str(ID_FIELD)
            .unwrap(),
        id
    );

    // Still addressable under the original identifier.
    let found = access.find_by_id("users", &id, None).await;
    assert_eq!(found.data().unwrap().len(), 1);
}

#[tokio::test]
async fn update_of_nonexistent_document_yields_null_element() {
    let access = access();
    let id = bson::oid::ObjectId::new().to_hex();

    let envelope = access
        .find_one_and_update("users", &id, doc! { "username": "new" }, false)
        .await;

    assert_eq!(envelope.data(), Some(&vec![Bson::Null]));
    assert_eq!(envelope.error(), None);
}

#[tokio::test]
async fn drop_collection_is_idempotent() {
    let access = access();

    // Never existed.
    let envelope = access.drop_collection("ghosts").await;
    assert_eq!(envelope.data(), Some(&true));
    assert_eq!(envelope.error(), None);

    access
        .insert_one("users", doc! { "username": "abc" })
        .await;

    let first = access.drop_collection("users").await;
    let second = access.drop_collection("users").await;
    assert_eq!(first.data(), Some(&true));
    assert_eq!(second.data(), Some(&true));

    let remaining = access.find("users", None, None).await;
    assert!(remaining.data().unwrap().is_empty());
}

#[tokio::test]
async fn envelope_serializes_to_the_wire_shape() {
    let access = access();

    let inserted = access
        .insert_one("users", doc! { "username": "abc" })
        .await;
    let wire = serde_json::to_value(&inserted).unwrap();

    assert!(wire.get("data").unwrap().is_array());
    assert!(wire.get("error").unwrap().is_null());

    let failed = access.find_by_id("users", "bad", None).await;
    let wire = serde_json::to_value(&failed).unwrap();

    assert!(wire.get("data").unwrap().is_null());
    assert!(wire.get("error").unwrap().is_string());
}
