// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-region notification cooldown

use df_core::duration_ms;
use df_storage::{KvStore, NotificationLog, StorageError};
use std::collections::HashSet;
use std::time::Duration;

/// Decides whether an entry into a region may notify again.
///
/// Check and record are separate calls; two concurrent events for the same
/// region can both pass the check.
#[derive(Clone, Debug)]
pub struct CooldownDecider<K> {
    log: NotificationLog<K>,
    cooldown: Duration,
}

impl<K: KvStore> CooldownDecider<K> {
    pub fn new(log: NotificationLog<K>, cooldown: Duration) -> Self {
        Self { log, cooldown }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// True when the region has no record or the cooldown has elapsed
    pub async fn may_notify(&self, region_id: &str, now_ms: u64) -> bool {
        let last = match self.log.last_notified(region_id).await {
            Ok(last) => last,
            Err(e) => {
                tracing::warn!(region_id, error = %e, "failed to read last notification, allowing");
                None
            }
        };

        match last {
            None => true,
            // A clock that went backwards saturates to zero and suppresses
            Some(last) => now_ms.saturating_sub(last) >= duration_ms(self.cooldown),
        }
    }

    /// Record a dispatched notification
    pub async fn record_notified(&self, region_id: &str, now_ms: u64) -> Result<(), StorageError> {
        self.log.set_last_notified(region_id, now_ms).await
    }

    /// Drop records for regions that are no longer tracked
    pub async fn prune(&self, active_region_ids: &HashSet<String>) -> usize {
        match self.log.prune(active_region_ids).await {
            Ok(removed) => {
                if removed > 0 {
                    tracing::debug!(removed, "pruned last-notified records");
                }
                removed
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to prune last-notified records");
                0
            }
        }
    }
}

#[cfg(test)]
#[path = "cooldown_tests.rs"]
mod tests;
