// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Debounced sync between application state and the active geofences.
//!
//! Hosts signal every tracking change; after the debounce window closes
//! without further signals, the coordinator reads a fresh snapshot of the
//! bucket list and replaces the manager's set with it. One task owns the
//! timer, so at most one resync runs at a time and signals arriving during
//! a resync open a new window afterwards.

use crate::{CooldownDecider, GeofenceManager};
use async_trait::async_trait;
use df_adapters::{Permission, RegionMonitor};
use df_core::{BucketList, TrackingEvent};
use df_storage::KvStore;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Host-owned application state the coordinator reads on every resync
#[async_trait]
pub trait VenueSource: Clone + Send + Sync + 'static {
    async fn snapshot(&self) -> BucketList;
}

/// Bucket list shared between the host and the coordinator
#[derive(Clone, Debug, Default)]
pub struct SharedBucketList {
    inner: Arc<RwLock<BucketList>>,
}

impl SharedBucketList {
    pub fn new(list: BucketList) -> Self {
        Self {
            inner: Arc::new(RwLock::new(list)),
        }
    }

    pub fn apply(&self, event: &TrackingEvent) {
        self.inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .apply(event);
    }

    pub fn get(&self) -> BucketList {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl VenueSource for SharedBucketList {
    async fn snapshot(&self) -> BucketList {
        self.get()
    }
}

/// Outcome of the most recent resync
#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    /// No resync has run yet
    Idle,
    Synced { regions: usize, generation: u64 },
    /// Monitoring is blocked until the user grants the permission
    PermissionDenied(Permission),
    /// The resync completed with a recoverable error
    Degraded { reason: String },
}

enum Command {
    Signal(&'static str),
    Flush(oneshot::Sender<SyncStatus>),
    Shutdown,
}

/// Handle to a running coordinator task
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<SyncStatus>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Note a tracking change; (re)starts the debounce window
    pub fn signal(&self, event: &TrackingEvent) {
        if self.tx.send(Command::Signal(event.name())).is_err() {
            tracing::warn!(event = event.name(), "sync coordinator has stopped");
        }
    }

    /// Run any pending resync now and return the resulting status
    pub async fn flush(&self) -> SyncStatus {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::Flush(reply)).is_err() {
            return self.status();
        }
        rx.await.unwrap_or_else(|_| self.status())
    }

    pub fn status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    /// Watch status changes (e.g. to surface permission problems)
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.status.clone()
    }

    /// Flush a pending window and stop the task
    pub async fn shutdown(self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "sync coordinator task failed");
        }
    }
}

/// Debounced resync loop
pub struct SyncCoordinator<K, M, S> {
    manager: Arc<GeofenceManager<K, M>>,
    source: S,
    cooldown: CooldownDecider<K>,
    debounce: Duration,
    status: watch::Sender<SyncStatus>,
    generation: u64,
}

impl<K, M, S> SyncCoordinator<K, M, S>
where
    K: KvStore,
    M: RegionMonitor,
    S: VenueSource,
{
    /// Spawn the coordinator on the current runtime
    pub fn spawn(
        manager: Arc<GeofenceManager<K, M>>,
        source: S,
        cooldown: CooldownDecider<K>,
        debounce: Duration,
    ) -> SyncHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let (status, status_rx) = watch::channel(SyncStatus::Idle);

        let coordinator = Self {
            manager,
            source,
            cooldown,
            debounce,
            status,
            generation: 0,
        };
        let task = tokio::spawn(coordinator.run(rx));

        SyncHandle {
            tx,
            status: status_rx,
            task,
        }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        let mut deadline: Option<Instant> = None;

        loop {
            let command = match deadline {
                Some(at) => tokio::select! {
                    command = rx.recv() => command,
                    _ = tokio::time::sleep_until(at) => {
                        deadline = None;
                        self.resync().await;
                        continue;
                    }
                },
                None => rx.recv().await,
            };

            match command {
                Some(Command::Signal(event)) => {
                    tracing::debug!(event, "tracking change, debouncing");
                    deadline = Some(Instant::now() + self.debounce);
                }
                Some(Command::Flush(reply)) => {
                    if deadline.take().is_some() {
                        self.resync().await;
                    }
                    let _ = reply.send(self.status.borrow().clone());
                }
                Some(Command::Shutdown) | None => {
                    if deadline.take().is_some() {
                        self.resync().await;
                    }
                    tracing::debug!("sync coordinator stopped");
                    return;
                }
            }
        }
    }

    async fn resync(&mut self) {
        let snapshot = self.source.snapshot().await;
        let regions = snapshot.desired_regions();
        let count = regions.len();
        let active: HashSet<String> = regions.iter().map(|r| r.id.clone()).collect();

        self.generation += 1;
        let generation = self.generation;
        tracing::info!(count, generation, "resyncing geofences");

        let status = match self.manager.replace_all(regions).await {
            Ok(()) => {
                self.cooldown.prune(&active).await;
                SyncStatus::Synced {
                    regions: count,
                    generation,
                }
            }
            Err(e) => match e.permission_denied() {
                Some(permission) => {
                    tracing::error!(error = %e, "geofence resync blocked");
                    SyncStatus::PermissionDenied(permission)
                }
                None => {
                    tracing::warn!(error = %e, "geofence resync degraded");
                    SyncStatus::Degraded {
                        reason: e.to_string(),
                    }
                }
            },
        };

        self.status.send_replace(status);
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
