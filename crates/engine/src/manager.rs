// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Geofence lifecycle manager
//!
//! Owns the in-memory region set (one region per venue) and keeps the
//! persisted copy and the platform subscription in step with it. Every
//! mutation runs mutate, persist, resubscribe under one lock, so changes
//! from the sync coordinator and direct toggles never interleave.

use crate::GeofenceError;
use df_adapters::{NotifyAdapter, RegionMonitor};
use df_core::Region;
use df_storage::{KvStore, RegionStore};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct ManagerState {
    /// Keyed by venue id
    regions: BTreeMap<String, Region>,
    loaded: bool,
    initialized: bool,
}

impl ManagerState {
    fn snapshot(&self) -> Vec<Region> {
        self.regions.values().cloned().collect()
    }
}

/// Manages the active geofence set for one process
pub struct GeofenceManager<K, M> {
    store: RegionStore<K>,
    monitor: M,
    state: Mutex<ManagerState>,
}

impl<K, M> GeofenceManager<K, M>
where
    K: KvStore,
    M: RegionMonitor,
{
    pub fn new(store: RegionStore<K>, monitor: M) -> Self {
        Self {
            store,
            monitor,
            state: Mutex::new(ManagerState::default()),
        }
    }

    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    /// Restore the persisted set and start monitoring it.
    ///
    /// Runs once per process; later calls return the current count without
    /// touching storage or the platform. Notification permission is only
    /// warned about, location permission is fatal.
    pub async fn initialize<N: NotifyAdapter>(&self, notify: &N) -> Result<usize, GeofenceError> {
        let mut state = self.state.lock().await;
        if state.initialized {
            return Ok(state.regions.len());
        }

        self.ensure_loaded(&mut state).await;

        if !notify.permission_granted().await {
            tracing::warn!("notification permission not granted, alerts will not be shown");
        }

        self.monitor.ensure_permissions().await?;

        let regions = state.snapshot();
        if !regions.is_empty() {
            self.monitor.start_monitoring(&regions).await?;
        }

        state.initialized = true;
        tracing::info!(count = regions.len(), "geofencing initialized");
        Ok(regions.len())
    }

    /// Track a region, replacing any existing region for the same venue
    pub async fn add(&self, region: Region) -> Result<(), GeofenceError> {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state).await;

        tracing::info!(venue_id = %region.venue_id, region_id = %region.id, "adding geofence");
        state.regions.insert(region.venue_id.clone(), region);
        self.commit(&state).await
    }

    /// Stop tracking a venue; unknown venues still resubscribe
    pub async fn remove(&self, venue_id: &str) -> Result<(), GeofenceError> {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state).await;

        if state.regions.remove(venue_id).is_some() {
            tracing::info!(venue_id, "removed geofence");
        } else {
            tracing::debug!(venue_id, "no geofence to remove");
        }
        self.commit(&state).await
    }

    /// Replace the whole set with `regions`
    pub async fn replace_all(&self, regions: Vec<Region>) -> Result<(), GeofenceError> {
        let mut state = self.state.lock().await;

        state.regions = regions
            .into_iter()
            .map(|region| (region.venue_id.clone(), region))
            .collect();
        // A full replacement supersedes whatever was persisted
        state.loaded = true;

        tracing::info!(count = state.regions.len(), "replacing geofences");
        self.commit(&state).await
    }

    /// Remove every region
    pub async fn clear(&self) -> Result<(), GeofenceError> {
        self.replace_all(Vec::new()).await
    }

    /// Stop monitoring and subscribe the current set again
    pub async fn restart(&self) -> Result<(), GeofenceError> {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state).await;

        self.monitor.stop_monitoring().await?;
        let regions = state.snapshot();
        if !regions.is_empty() {
            self.monitor.start_monitoring(&regions).await?;
        }
        tracing::info!(count = regions.len(), "geofencing restarted");
        Ok(())
    }

    /// Snapshot of the active set, ordered by venue id
    pub async fn regions(&self) -> Vec<Region> {
        let state = self.state.lock().await;
        let regions = state.snapshot();
        for region in &regions {
            tracing::debug!(
                region_id = %region.id,
                name = %region.name,
                radius_meters = region.radius_meters,
                "active geofence"
            );
        }
        regions
    }

    pub async fn is_initialized(&self) -> bool {
        self.state.lock().await.initialized
    }

    /// Load the persisted set on first use; a failed read counts as empty
    async fn ensure_loaded(&self, state: &mut ManagerState) {
        if state.loaded {
            return;
        }

        match self.store.load_regions().await {
            Ok(regions) => {
                for region in regions {
                    state.regions.insert(region.venue_id.clone(), region);
                }
                tracing::debug!(count = state.regions.len(), "loaded persisted geofences");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted geofences, starting empty");
            }
        }
        state.loaded = true;
    }

    /// Persist then resubscribe the full set.
    ///
    /// A failed write leaves memory authoritative: the subscription is still
    /// replaced, and the storage error is returned afterwards.
    async fn commit(&self, state: &ManagerState) -> Result<(), GeofenceError> {
        let regions = state.snapshot();

        let persisted = self.store.save_regions(&regions).await;
        if let Err(e) = &persisted {
            tracing::warn!(error = %e, "failed to persist geofences");
        }

        self.monitor.start_monitoring(&regions).await?;
        persisted?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
