// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted region set

use crate::{KvStore, StorageError};
use df_core::Region;

/// Key holding the JSON array of active regions
pub const REGIONS_KEY: &str = "dinnafind_geofences";

/// Durable copy of the active region set.
///
/// The sole source of truth after a restart, and the only thing a region
/// event arriving in a fresh process can resolve against.
#[derive(Clone, Debug)]
pub struct RegionStore<K> {
    kv: K,
}

impl<K: KvStore> RegionStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Load the persisted regions; empty if nothing was ever saved
    pub async fn load_regions(&self) -> Result<Vec<Region>, StorageError> {
        let Some(json) = self.kv.get(REGIONS_KEY).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&json).map_err(|source| StorageError::Malformed {
            key: REGIONS_KEY.to_string(),
            source,
        })
    }

    /// Replace the persisted set in one write
    pub async fn save_regions(&self, regions: &[Region]) -> Result<(), StorageError> {
        let json = serde_json::to_string(regions).map_err(|source| StorageError::Malformed {
            key: REGIONS_KEY.to_string(),
            source,
        })?;
        self.kv.set(REGIONS_KEY, &json).await?;
        tracing::debug!(count = regions.len(), "saved regions");
        Ok(())
    }

    /// Resolve a region id against the persisted set
    pub async fn find_region(&self, region_id: &str) -> Result<Option<Region>, StorageError> {
        let regions = self.load_regions().await?;
        Ok(regions.into_iter().find(|r| r.id == region_id))
    }
}

#[cfg(test)]
#[path = "regions_tests.rs"]
mod tests;
