// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake region monitor for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LocationPermissions, MonitorError, RegionMonitor};
use async_trait::async_trait;
use df_core::{Region, GEOFENCE_TASK_NAME};
use std::sync::{Arc, Mutex};

/// Recorded monitor call (only calls the fake accepted)
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorCall {
    Start { task: String, regions: Vec<Region> },
    Stop,
}

#[derive(Default)]
struct FakeMonitorState {
    calls: Vec<MonitorCall>,
    active: Option<Vec<Region>>,
    permissions: LocationPermissions,
    fail_next: Option<String>,
}

/// Fake region monitor for testing
#[derive(Clone, Default)]
pub struct FakeRegionMonitor {
    inner: Arc<Mutex<FakeMonitorState>>,
}

impl FakeRegionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<MonitorCall> {
        self.lock().calls.clone()
    }

    /// Number of accepted `start_monitoring` calls
    pub fn start_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, MonitorCall::Start { .. }))
            .count()
    }

    /// Regions in the current subscription (empty when stopped)
    pub fn active_regions(&self) -> Vec<Region> {
        self.lock().active.clone().unwrap_or_default()
    }

    pub fn is_monitoring(&self) -> bool {
        self.lock().active.is_some()
    }

    pub fn set_permissions(&self, permissions: LocationPermissions) {
        self.lock().permissions = permissions;
    }

    /// Make the next start call fail with a platform error
    pub fn fail_next_start(&self, message: impl Into<String>) {
        self.lock().fail_next = Some(message.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeMonitorState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RegionMonitor for FakeRegionMonitor {
    async fn ensure_permissions(&self) -> Result<(), MonitorError> {
        self.lock().permissions.check()
    }

    async fn start_monitoring(&self, regions: &[Region]) -> Result<(), MonitorError> {
        if regions.is_empty() {
            return self.stop_monitoring().await;
        }

        let mut state = self.lock();
        state.permissions.check()?;
        if let Some(message) = state.fail_next.take() {
            return Err(MonitorError::Platform(message));
        }

        state.calls.push(MonitorCall::Start {
            task: GEOFENCE_TASK_NAME.to_string(),
            regions: regions.to_vec(),
        });
        state.active = Some(regions.to_vec());
        Ok(())
    }

    async fn stop_monitoring(&self) -> Result<(), MonitorError> {
        let mut state = self.lock();
        state.calls.push(MonitorCall::Stop);
        state.active = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
