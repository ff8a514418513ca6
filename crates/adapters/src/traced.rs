// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::monitor::{MonitorError, RegionMonitor};
use crate::notify::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use df_core::{Notification, Region};
use tracing::Instrument;

/// Wrapper that adds tracing to any RegionMonitor
#[derive(Clone)]
pub struct TracedRegionMonitor<M> {
    inner: M,
}

impl<M> TracedRegionMonitor<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

#[async_trait]
impl<M: RegionMonitor> RegionMonitor for TracedRegionMonitor<M> {
    async fn ensure_permissions(&self) -> Result<(), MonitorError> {
        let result = self.inner.ensure_permissions().await;
        match &result {
            Ok(()) => tracing::trace!("location permissions granted"),
            Err(e) => tracing::warn!(error = %e, "location permissions missing"),
        }
        result
    }

    async fn start_monitoring(&self, regions: &[Region]) -> Result<(), MonitorError> {
        let span = tracing::info_span!("monitor.start", count = regions.len());

        async {
            tracing::info!(
                task = df_core::GEOFENCE_TASK_NAME,
                "replacing region subscription"
            );

            let start = std::time::Instant::now();
            let result = self.inner.start_monitoring(regions).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "monitoring started"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "start failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn stop_monitoring(&self) -> Result<(), MonitorError> {
        let span = tracing::info_span!("monitor.stop");

        async {
            let result = self.inner.stop_monitoring().await;
            match &result {
                Ok(()) => tracing::info!("monitoring stopped"),
                Err(e) => tracing::warn!(error = %e, "stop failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        let span = tracing::info_span!(
            "notify.deliver",
            venue_id = %notification.data.venue_id,
            event = %notification.data.event_type,
        );

        async {
            tracing::debug!(body = %notification.body, "delivering");
            let result = self.inner.deliver(notification).await;

            match &result {
                Ok(()) => tracing::info!("notification delivered"),
                Err(e) => tracing::error!(error = %e, "delivery failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn permission_granted(&self) -> bool {
        let granted = self.inner.permission_granted().await;
        tracing::trace!(granted, "checked notification permission");
        granted
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
