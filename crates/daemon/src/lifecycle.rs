// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, request handling, shutdown.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use df_adapters::{
    ChannelNotifier, DesktopNotifier, LocationPermissions, NotifyAdapter, NotifyError,
    PositionFeedMonitor, SharedPosition, TracedNotifyAdapter, TracedRegionMonitor,
};
use df_core::{
    BucketList, ConfigError, GeofenceSettings, Notification, RegionTransition, SystemClock,
};
use df_engine::{
    handle_region_event, AlertContext, AlertOutcome, CooldownDecider, GeofenceError,
    GeofenceManager, SharedBucketList, SyncCoordinator, SyncHandle, SyncStatus,
};
use df_storage::{FileKvStore, KvStore, NotificationLog, RegionStore, StorageError};
use fs2::FileExt;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::protocol::{Output, Request};

/// Key holding the host's last bucket list snapshot
pub const BUCKET_LIST_KEY: &str = "dinnafind_bucket_list";

pub type DaemonMonitor = TracedRegionMonitor<PositionFeedMonitor>;
pub type DaemonManager = GeofenceManager<FileKvStore, DaemonMonitor>;
pub type DaemonAlerts =
    AlertContext<FileKvStore, TracedNotifyAdapter<DaemonNotifier>, SharedPosition, SystemClock>;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub state_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    pub log_path: PathBuf,
    /// Optional TOML settings file
    pub settings_path: PathBuf,
    /// Directory of the persistent key-value store
    pub store_path: PathBuf,
    /// Also show notifications on the desktop
    pub desktop: bool,
}

impl Config {
    /// Config rooted at `state_dir`, or the default state directory
    pub fn load(state_dir: Option<PathBuf>, desktop: bool) -> Result<Self, LifecycleError> {
        let state_dir = match state_dir {
            Some(dir) => dir,
            None => default_state_dir()?,
        };

        Ok(Self {
            lock_path: state_dir.join("dfd.pid"),
            log_path: state_dir.join("dfd.log"),
            settings_path: state_dir.join("config.toml"),
            store_path: state_dir.join("store"),
            state_dir,
            desktop,
        })
    }
}

/// Notifier writing to stdout through the main loop, optionally mirrored to the desktop
#[derive(Clone)]
pub struct DaemonNotifier {
    channel: ChannelNotifier,
    desktop: Option<DesktopNotifier>,
}

#[async_trait]
impl NotifyAdapter for DaemonNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.channel.deliver(notification).await?;
        if let Some(desktop) = &self.desktop {
            if let Err(e) = desktop.deliver(notification).await {
                warn!(error = %e, "desktop notification failed");
            }
        }
        Ok(())
    }
}

/// Daemon state during operation
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    kv: FileKvStore,
    feed: PositionFeedMonitor,
    position: SharedPosition,
    venues: SharedBucketList,
    manager: Arc<DaemonManager>,
    alerts: DaemonAlerts,
    sync: Option<SyncHandle>,
    /// Region transitions from the position feed
    pub transitions: mpsc::UnboundedReceiver<RegionTransition>,
    /// Notifications ready to be written out
    pub notifications: mpsc::UnboundedReceiver<Notification>,
    /// Resync outcomes
    pub sync_status: watch::Receiver<SyncStatus>,
    /// Regions restored at startup
    pub restored: usize,
    pub shutdown_requested: bool,
}

impl DaemonState {
    /// Handle one host request; returns any output to write
    pub async fn handle_request(&mut self, request: Request) -> Option<Output> {
        if let Some(position) = request.position() {
            self.position.set(position);
            let transitions = self.feed.observe(position);
            debug!(count = transitions.len(), "position observed");
            return None;
        }

        let events = request.tracking_events();
        if !events.is_empty() {
            for event in &events {
                self.venues.apply(event);
            }
            self.save_bucket_list().await;
            if let Some(sync) = &self.sync {
                for event in &events {
                    sync.signal(event);
                }
            }
            return None;
        }

        match request {
            Request::Permissions {
                foreground,
                background,
            } => self.set_permissions(LocationPermissions {
                foreground,
                background,
            })
            .await,
            Request::Flush => {
                if let Some(sync) = &self.sync {
                    sync.flush().await;
                }
                let status = self.take_status();
                Some(self.status_output(&status).await)
            }
            Request::Status => {
                let status = self.take_status();
                Some(self.status_output(&status).await)
            }
            Request::Shutdown => {
                self.shutdown_requested = true;
                Some(Output::ShuttingDown)
            }
            Request::BucketList { .. }
            | Request::Toggle { .. }
            | Request::AlertRadius { .. }
            | Request::Position { .. } => None,
        }
    }

    /// Resolve a region transition into at most one notification
    pub async fn handle_transition(&self, transition: RegionTransition) -> AlertOutcome {
        let outcome = handle_region_event(&self.alerts, transition).await;
        debug!(?outcome, "region event handled");
        outcome
    }

    pub fn current_status(&self) -> SyncStatus {
        self.sync_status.borrow().clone()
    }

    /// Current status, marked as already reported to the host
    fn take_status(&mut self) -> SyncStatus {
        self.sync_status.borrow_and_update().clone()
    }

    pub async fn status_output(&self, status: &SyncStatus) -> Output {
        let regions = self
            .manager
            .regions()
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        Output::status(status, regions)
    }

    /// Flush pending work and release resources
    pub async fn shutdown(&mut self) {
        info!("Shutting down daemon...");

        if let Some(sync) = self.sync.take() {
            sync.shutdown().await;
        }

        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        info!("Daemon shutdown complete");
    }

    async fn set_permissions(&mut self, permissions: LocationPermissions) -> Option<Output> {
        let previously_missing = self.feed.permissions().missing().is_some();
        self.feed.set_permissions(permissions);

        if let Some(permission) = permissions.missing() {
            warn!(%permission, "location permission revoked");
            return Some(Output::error(format!(
                "{} permission not granted",
                permission
            )));
        }

        if previously_missing {
            // Subscriptions were refused while permission was missing
            if let Err(e) = self.manager.restart().await {
                return Some(Output::error(e.to_string()));
            }
        }
        None
    }

    async fn save_bucket_list(&self) {
        let list = self.venues.get();
        let json = match serde_json::to_string(&list) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to encode bucket list");
                return;
            }
        };
        if let Err(e) = self.kv.set(BUCKET_LIST_KEY, &json).await {
            warn!(error = %e, "failed to persist bucket list");
        }
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Geofence error: {0}")]
    Geofence(#[from] GeofenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub async fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    match startup_inner(config).await {
        Ok(state) => Ok(state),
        Err(e) => {
            // The lock file belongs to the running daemon when locking failed
            if !matches!(e, LifecycleError::LockFailed(_)) {
                cleanup_on_failure(config);
            }
            Err(e)
        }
    }
}

/// Inner startup logic - cleanup_on_failure called if this fails
async fn startup_inner(config: &Config) -> Result<DaemonState, LifecycleError> {
    // 1. Create state directory
    std::fs::create_dir_all(&config.state_dir)?;

    // 2. Acquire lock file FIRST - prevents two daemons sharing one store
    let lock_file = File::create(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    use std::io::Write;
    let mut lock_file = lock_file;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    // 3. Settings (missing file means defaults)
    let settings = GeofenceSettings::load(&config.settings_path)?;
    info!(
        cooldown = ?settings.cooldown,
        debounce = ?settings.debounce,
        alert_distance_miles = settings.alert_distance_miles,
        "Loaded settings"
    );

    // 4. Durable store
    let kv = FileKvStore::open(&config.store_path)?;
    let venues = SharedBucketList::new(load_bucket_list(&kv, &settings).await);

    // 5. Adapters (wrapped with tracing for observability)
    let (transition_tx, transitions) = mpsc::unbounded_channel();
    let feed = PositionFeedMonitor::new(transition_tx);
    let monitor = TracedRegionMonitor::new(feed.clone());

    let (notification_tx, notifications) = mpsc::unbounded_channel();
    let notifier = TracedNotifyAdapter::new(DaemonNotifier {
        channel: ChannelNotifier::new(notification_tx),
        desktop: config.desktop.then(DesktopNotifier::new),
    });
    let position = SharedPosition::new();

    // 6. Restore the persisted region set and start monitoring it
    let manager = Arc::new(GeofenceManager::new(RegionStore::new(kv.clone()), monitor));
    let restored = manager.initialize(&notifier).await?;
    info!(regions = restored, "Restored geofences");

    // 7. Region event handling and debounced sync
    let cooldown = CooldownDecider::new(NotificationLog::new(kv.clone()), settings.cooldown);
    let alerts = AlertContext {
        regions: RegionStore::new(kv.clone()),
        cooldown: cooldown.clone(),
        notify: notifier,
        location: position.clone(),
        clock: SystemClock,
        location_timeout: settings.location_timeout,
    };
    let sync = SyncCoordinator::spawn(
        Arc::clone(&manager),
        venues.clone(),
        cooldown,
        settings.debounce,
    );
    let sync_status = sync.subscribe();

    info!("Daemon started in {}", config.state_dir.display());

    Ok(DaemonState {
        config: config.clone(),
        lock_file,
        kv,
        feed,
        position,
        venues,
        manager,
        alerts,
        sync: Some(sync),
        transitions,
        notifications,
        sync_status,
        restored,
        shutdown_requested: false,
    })
}

/// Last bucket list the host sent, or an empty one at the configured distance
async fn load_bucket_list<K: KvStore>(kv: &K, settings: &GeofenceSettings) -> BucketList {
    let fresh = || BucketList::new(Vec::new(), settings.alert_distance_miles);

    match kv.get(BUCKET_LIST_KEY).await {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring malformed bucket list");
            fresh()
        }),
        Ok(None) => fresh(),
        Err(e) => {
            warn!(error = %e, "failed to read bucket list");
            fresh()
        }
    }
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

/// State directory: `DINNAFIND_STATE_DIR`, the platform state dir, or ~/.local/state
fn default_state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("DINNAFIND_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }

    if let Some(dir) = dirs::state_dir() {
        return Ok(dir.join("dinnafind"));
    }

    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/dinnafind"))
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
