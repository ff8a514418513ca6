// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn file_store_set_get_remove() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::open(dir.path()).unwrap();

    assert_eq!(store.get("missing").await.unwrap(), None);

    store.set("greeting", "hello").await.unwrap();
    assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("hello"));

    store.set("greeting", "bye").await.unwrap();
    assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("bye"));

    store.remove("greeting").await.unwrap();
    assert_eq!(store.get("greeting").await.unwrap(), None);

    // Removing again is fine
    store.remove("greeting").await.unwrap();
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    {
        let store = FileKvStore::open(dir.path()).unwrap();
        store.set("last_notification_geofence_v1", "1000").await.unwrap();
    }

    let reopened = FileKvStore::open(dir.path()).unwrap();
    assert_eq!(
        reopened
            .get("last_notification_geofence_v1")
            .await
            .unwrap()
            .as_deref(),
        Some("1000")
    );
}

#[tokio::test]
async fn file_store_leaves_no_temp_files() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::open(dir.path()).unwrap();
    store.set("a", "1").await.unwrap();
    store.set("a", "2").await.unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a".to_string()]);
}

#[tokio::test]
async fn file_store_lists_keys_by_prefix() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::open(dir.path()).unwrap();
    store.set("last_notification_geofence_b", "2").await.unwrap();
    store.set("last_notification_geofence_a", "1").await.unwrap();
    store.set("dinnafind_geofences", "[]").await.unwrap();

    let keys = store.keys("last_notification_").await.unwrap();
    assert_eq!(
        keys,
        vec![
            "last_notification_geofence_a".to_string(),
            "last_notification_geofence_b".to_string(),
        ]
    );
}

#[tokio::test]
async fn file_store_round_trips_unusual_keys() {
    let dir = tempdir().unwrap();
    let store = FileKvStore::open(dir.path()).unwrap();
    let key = "last_notification_geofence_4b1/../é";
    store.set(key, "7").await.unwrap();

    assert_eq!(store.get(key).await.unwrap().as_deref(), Some("7"));
    assert_eq!(store.keys("last_").await.unwrap(), vec![key.to_string()]);
    // Nothing escaped the store directory
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn key_encoding_round_trips() {
    for key in ["plain_key-1", "with space", "slash/and.dot", "100%"] {
        let encoded = encode_key(key);
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('.'));
        assert_eq!(decode_key(&encoded).as_deref(), Some(key));
    }
}

#[tokio::test]
async fn memory_store_injects_failures() {
    let store = MemoryKvStore::new();
    store.set("k", "v").await.unwrap();

    store.set_fail_reads(true);
    let err = store.get("k").await.unwrap_err();
    assert!(err.is_read_error());

    store.set_fail_writes(true);
    let err = store.set("k", "w").await.unwrap_err();
    assert!(err.is_write_error());

    store.set_fail_reads(false);
    store.set_fail_writes(false);
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn memory_store_clones_share_state() {
    let store = MemoryKvStore::new();
    let other = store.clone();
    store.set("k", "v").await.unwrap();
    assert_eq!(other.raw("k").as_deref(), Some("v"));
}
