// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key-value storage substrate
//!
//! Both the region set and the last-notified table live here under
//! separate key namespaces. Every write is independently atomic.

use crate::StorageError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;

/// String key-value storage
#[async_trait]
pub trait KvStore: Clone + Send + Sync + 'static {
    /// Read a value; `None` if the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value at `key`
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key; absent keys are not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// All keys starting with `prefix`
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// One file per key in a directory.
///
/// Writes go to a temp file which is fsynced and renamed over the target,
/// so a reader never sees a partial value even after an abrupt exit.
#[derive(Clone, Debug)]
pub struct FileKvStore {
    dir: PathBuf,
    tmp_counter: Arc<AtomicU64>,
}

const TMP_SUFFIX: &str = ".tmp";

impl FileKvStore {
    /// Open or create a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StorageError::write(&dir.display().to_string(), e))?;
        Ok(Self {
            dir,
            tmp_counter: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(encode_key(key))
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::read(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let target = self.path_for(key);
        let n = self.tmp_counter.fetch_add(1, Ordering::SeqCst);
        let tmp = self
            .dir
            .join(format!("{}.{}{}", encode_key(key), n, TMP_SUFFIX));

        let write = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(value.as_bytes()).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, &target).await
        };

        if let Err(e) = write.await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StorageError::write(key, e));
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::write(key, e)),
        }
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| StorageError::read(prefix, e))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::read(prefix, e))?
        {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.ends_with(TMP_SUFFIX) {
                continue;
            }
            if let Some(key) = decode_key(name) {
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Map a key to a portable file name (`%XX` for anything outside `[A-Za-z0-9_-]`)
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Volatile in-memory store with failure injection.
///
/// Used in tests and by hosts that do not need durability.
#[derive(Clone, Debug, Default)]
pub struct MemoryKvStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail until cleared
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail until cleared
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw value at `key`, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Write a raw value, bypassing failure injection
    pub fn put_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_read(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::read(key, io::Error::other("injected read failure")));
        }
        Ok(())
    }

    fn check_write(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::write(key, io::Error::other("injected write failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_read(key)?;
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_write(key)?;
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_write(key)?;
        self.lock().remove(key);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.check_read(prefix)?;
        Ok(self
            .lock()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "kv_tests.rs"]
mod tests;
