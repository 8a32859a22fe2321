//! Persistent store tests: DirectoryBackend and TOML configuration
//!
//! Stores are reopened between writes and reads to prove data survives
//! the process-local state being dropped.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use tagkv::{
    key, DirectoryBackend, GetManyFilter, GetManyOptions, KeyPart, Storage, StorageAdapter,
    StoreConfig, Timestamp,
};

fn open_store(dir: &TempDir, prefix: &str) -> StorageAdapter {
    let backend = DirectoryBackend::open(dir.path()).unwrap();
    StorageAdapter::new(prefix, Arc::new(backend)).unwrap()
}

/// Write through the trait so any `Storage` implementation can be driven
fn record_visit<S: Storage>(store: &S, page: &str, at: Timestamp) -> tagkv::Result<()> {
    store.increment(&key!["visits", page], 1.0)?;
    store.set(&key!["last", page], Some(KeyPart::from(at)))
}

#[test]
fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let store = open_store(&temp_dir, "app");
        store.set(&key!["user", 1], Some(KeyPart::from("alice"))).unwrap();
        store.set(&key!["user", 2], Some(KeyPart::from("bob"))).unwrap();
        store.set(&key!["blob"], Some(KeyPart::from(vec![0u8, 1, 254, 255]))).unwrap();
    }

    let store = open_store(&temp_dir, "app");
    assert_eq!(store.get(&key!["user", 1]).unwrap(), Some(KeyPart::from("alice")));
    assert_eq!(
        store.get(&key!["blob"]).unwrap(),
        Some(KeyPart::from(vec![0u8, 1, 254, 255]))
    );

    let users: Vec<_> = store
        .get_many(GetManyFilter::prefix(key!["user"]), GetManyOptions::new().reversed())
        .unwrap()
        .map(|entry| entry.unwrap().1)
        .collect();
    assert_eq!(users, vec![KeyPart::from("bob"), KeyPart::from("alice")]);
}

#[test]
fn test_delete_removes_persisted_entry() {
    let temp_dir = TempDir::new().unwrap();
    open_store(&temp_dir, "app")
        .set(&key!["gone"], Some(KeyPart::from(true)))
        .unwrap();
    open_store(&temp_dir, "app").set(&key!["gone"], None).unwrap();

    assert_eq!(open_store(&temp_dir, "app").get(&key!["gone"]).unwrap(), None);
}

#[test]
fn test_namespaces_share_one_directory() {
    let temp_dir = TempDir::new().unwrap();
    let a = open_store(&temp_dir, "a");
    let b = open_store(&temp_dir, "b");
    let a_branch = a.branch("tenant1").unwrap();

    a.set(&key!["k"], Some(KeyPart::from(1))).unwrap();
    b.set(&key!["k"], Some(KeyPart::from(2))).unwrap();
    a_branch.set(&key!["k"], Some(KeyPart::from(3))).unwrap();

    let count = |store: &StorageAdapter| {
        store
            .get_many(GetManyFilter::prefix(key![]), GetManyOptions::new())
            .unwrap()
            .count()
    };
    assert_eq!(count(&a), 1);
    assert_eq!(count(&b), 1);
    assert_eq!(count(&a_branch), 1);
    assert_eq!(
        open_store(&temp_dir, "a").branch("tenant1").unwrap().get(&key!["k"]).unwrap(),
        Some(KeyPart::from(3))
    );
}

#[test]
fn test_generic_storage_usage() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir, "web");
    store.initialize().unwrap();
    assert!(!store.supports_files());

    let first = Timestamp::from_millis(1_700_000_000_000);
    let second = Timestamp::from_millis(1_700_000_060_000);
    record_visit(&store, "home", first).unwrap();
    record_visit(&store, "home", second).unwrap();
    record_visit(&store, "about", first).unwrap();

    let reopened = open_store(&temp_dir, "web");
    assert_eq!(reopened.get(&key!["visits", "home"]).unwrap(), Some(KeyPart::from(2)));
    assert_eq!(reopened.get(&key!["visits", "about"]).unwrap(), Some(KeyPart::from(1)));
    assert_eq!(
        reopened.get(&key!["last", "home"]).unwrap(),
        Some(KeyPart::Date(second))
    );
}

#[test]
fn test_store_opened_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("store");
    let config_path = temp_dir.path().join("tagkv.toml");
    fs::write(
        &config_path,
        format!(
            "prefix = \"cfg\"\n\n[backend]\nkind = \"directory\"\npath = {:?}\n",
            data_dir.to_string_lossy()
        ),
    )
    .unwrap();

    let store = StoreConfig::load(&config_path).unwrap().open().unwrap();
    store.set(&key!["answer"], Some(KeyPart::from(42))).unwrap();

    let direct = StorageAdapter::new("cfg", Arc::new(DirectoryBackend::open(&data_dir).unwrap()))
        .unwrap();
    assert_eq!(direct.get(&key!["answer"]).unwrap(), Some(KeyPart::from(42)));
}
