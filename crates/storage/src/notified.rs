// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-region last-notification timestamps

use crate::{KvStore, StorageError};
use std::collections::HashSet;

/// Prefix of every last-notified key
pub const LAST_NOTIFIED_PREFIX: &str = "last_notification_";

pub fn last_notified_key(region_id: &str) -> String {
    format!("{}{}", LAST_NOTIFIED_PREFIX, region_id)
}

/// Table of epoch-millisecond timestamps keyed by region id
#[derive(Clone, Debug)]
pub struct NotificationLog<K> {
    kv: K,
}

impl<K: KvStore> NotificationLog<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Timestamp of the last notification for a region, if any
    pub async fn last_notified(&self, region_id: &str) -> Result<Option<u64>, StorageError> {
        let key = last_notified_key(region_id);
        let Some(raw) = self.kv.get(&key).await? else {
            return Ok(None);
        };
        match raw.trim().parse::<u64>() {
            Ok(ts) => Ok(Some(ts)),
            Err(_) => {
                // Garbage here only ever means "no usable record"
                tracing::warn!(key, raw, "ignoring unparseable last-notified value");
                Ok(None)
            }
        }
    }

    pub async fn set_last_notified(&self, region_id: &str, epoch_ms: u64) -> Result<(), StorageError> {
        self.kv
            .set(&last_notified_key(region_id), &epoch_ms.to_string())
            .await
    }

    /// Drop records for regions outside `active`; returns how many were removed
    pub async fn prune(&self, active: &HashSet<String>) -> Result<usize, StorageError> {
        let mut removed = 0;
        for key in self.kv.keys(LAST_NOTIFIED_PREFIX).await? {
            let Some(region_id) = key.strip_prefix(LAST_NOTIFIED_PREFIX) else {
                continue;
            };
            if !active.contains(region_id) {
                self.kv.remove(&key).await?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "notified_tests.rs"]
mod tests;
