//! Slot storage and local claim store tests for SqliteSlots

use folio_core::{
    import_batch, ClaimBuilder, ClaimInput, ClaimPatch, LocalClaimStore, ProfileSettings,
    ProfileStore, SlotStorage,
};
use folio_sqlite::SqliteSlots;
use pretty_assertions::assert_eq;

/// Helper to create a test claim input
fn create_test_input(statement: &str, stars: u8) -> ClaimInput {
    ClaimBuilder::new()
        .subject("example.com/alice")
        .claim_type("HAS_SKILL")
        .statement(statement)
        .effective_date("2024-01-01")
        .stars(stars)
        .aspect("skill")
        .build()
}

#[test]
fn test_write_and_read() {
    let slots = SqliteSlots::in_memory().unwrap();

    slots.write("a", "1").unwrap();
    assert_eq!(slots.read("a").unwrap().as_deref(), Some("1"));
    assert_eq!(slots.read("missing").unwrap(), None);
}

#[test]
fn test_overwrite_keeps_single_row() {
    let slots = SqliteSlots::in_memory().unwrap();

    slots.write("a", "1").unwrap();
    slots.write("a", "2").unwrap();

    assert_eq!(slots.read("a").unwrap().as_deref(), Some("2"));
    assert_eq!(slots.keys().unwrap(), vec!["a"]);
}

#[test]
fn test_remove() {
    let slots = SqliteSlots::in_memory().unwrap();
    slots.write("a", "1").unwrap();

    assert!(slots.remove("a").unwrap());
    assert!(!slots.remove("a").unwrap());
    assert!(!slots.contains("a").unwrap());
}

#[test]
fn test_keys_sorted() {
    let slots = SqliteSlots::in_memory().unwrap();
    slots.write("folio.profile", "{}").unwrap();
    slots.write("folio.claims", "[]").unwrap();

    assert_eq!(slots.keys().unwrap(), vec!["folio.claims", "folio.profile"]);
}

#[test]
fn test_claims_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("folio.db");

    let created = {
        let store = LocalClaimStore::new(SqliteSlots::open(&path).unwrap());
        store.create(create_test_input("Rust", 5)).unwrap()
    };

    let store = LocalClaimStore::new(SqliteSlots::open(&path).unwrap());
    let claims = store.list();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0], created);
    assert_eq!(claims[0].score, Some(1.0));
}

#[test]
fn test_update_and_delete_through_local_store() {
    let store = LocalClaimStore::new(SqliteSlots::in_memory().unwrap());
    let a = store.create(create_test_input("a", 2)).unwrap();
    let b = store.create(create_test_input("b", 3)).unwrap();

    let patch = ClaimPatch {
        stars: Some(4),
        ..Default::default()
    };
    assert!(store.update(a.id, &patch).unwrap());
    assert_eq!(store.get(a.id).unwrap().score, Some(0.6));

    assert!(store.delete(b.id).unwrap());
    assert_eq!(store.list().len(), 1);
}

#[test]
fn test_import_into_sqlite() {
    let store = LocalClaimStore::new(SqliteSlots::in_memory().unwrap());
    store.create(create_test_input("existing", 4)).unwrap();

    let raw = r#"[{"subject": "https://example.com/alice", "claimType": "HAS_SKILL",
                   "statement": "Imported", "effectiveDate": "2022-06-01", "stars": 3}]"#;
    let outcome = import_batch(&store, raw).unwrap();

    assert_eq!(outcome.total, 2);
    assert_eq!(store.list()[1].statement, "Imported");
}

#[test]
fn test_corrupt_row_reads_as_empty() {
    let slots = SqliteSlots::in_memory().unwrap();
    slots.write("folio.claims", "not json").unwrap();

    let store = LocalClaimStore::new(&slots);
    assert!(store.list().is_empty());
}

#[test]
fn test_profile_shares_database() {
    let slots = SqliteSlots::in_memory().unwrap();
    let claims = LocalClaimStore::new(&slots);
    let profile = ProfileStore::new(&slots);

    claims.create(create_test_input("a", 5)).unwrap();
    profile
        .save(&ProfileSettings {
            display_name: "Alice".into(),
            bio: "Engineer".into(),
        })
        .unwrap();

    assert_eq!(slots.keys().unwrap(), vec!["folio.claims", "folio.profile"]);
    assert_eq!(profile.load().display_name, "Alice");
    assert_eq!(claims.list().len(), 1);
}
