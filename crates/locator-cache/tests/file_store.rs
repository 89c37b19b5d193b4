//! Durable store behavior: load, flush, corruption handling

use locator_cache::{CacheEntry, CacheKey, CacheStore, FileStore};
use locator_engine::{LocatorStrategy, SelectorPayload};
use tempfile::TempDir;

fn entry(name: &str, payload: SelectorPayload, strategy: LocatorStrategy) -> CacheEntry {
    CacheEntry::new(name, strategy, payload)
}

#[test]
fn entries_survive_reopening() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("locators.json");

    {
        let store = FileStore::open(&path);
        store.record(
            CacheKey::new("Submit", "fp1"),
            entry(
                "Submit",
                SelectorPayload::Css("#submit".to_string()),
                LocatorStrategy::Css,
            ),
        );
        store.record(
            CacheKey::new("Place Order Button", "fp2"),
            entry(
                "Place Order Button",
                SelectorPayload::Text("Place Order".to_string()),
                LocatorStrategy::FuzzyText,
            ),
        );
    }

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.len(), 2);

    let cached = reopened
        .lookup(&CacheKey::new("Place Order Button", "fp2"))
        .unwrap();
    assert_eq!(cached.strategy, LocatorStrategy::FuzzyText);
    assert_eq!(
        cached.payload,
        SelectorPayload::Text("Place Order".to_string())
    );
}

#[test]
fn missing_document_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("does-not-exist.json"));
    assert!(store.is_empty());
}

#[test]
fn corrupt_document_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("locators.json");
    std::fs::write(&path, "{ not json at all").unwrap();

    let store = FileStore::open(&path);
    assert!(store.is_empty());

    // The store stays usable after swallowing the corrupt load.
    store.record(
        CacheKey::new("Submit", "fp1"),
        entry(
            "Submit",
            SelectorPayload::Css("#submit".to_string()),
            LocatorStrategy::Css,
        ),
    );
    assert_eq!(FileStore::open(&path).len(), 1);
}

#[test]
fn invalidate_is_flushed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("locators.json");

    let store = FileStore::open(&path);
    let key = CacheKey::new("Submit", "fp1");
    store.record(
        key.clone(),
        entry(
            "Submit",
            SelectorPayload::Css("#submit".to_string()),
            LocatorStrategy::Css,
        ),
    );
    store.invalidate(&key);

    assert!(FileStore::open(&path).is_empty());
}

#[test]
fn overwrite_persists_latest_resolution() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("locators.json");

    let store = FileStore::open(&path);
    let key = CacheKey::new("Confirm", "fp1");
    store.record(
        key.clone(),
        entry(
            "Confirm",
            SelectorPayload::Css("#confirm-old".to_string()),
            LocatorStrategy::Css,
        ),
    );
    store.record(
        key.clone(),
        entry(
            "Confirm",
            SelectorPayload::Role {
                role: "button".to_string(),
                name: Some("Confirm".to_string()),
            },
            LocatorStrategy::Role,
        ),
    );

    let reopened = FileStore::open(&path);
    let cached = reopened.lookup(&key).unwrap();
    assert_eq!(cached.strategy, LocatorStrategy::Role);
}
