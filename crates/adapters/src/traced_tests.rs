// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::monitor::{FakeRegionMonitor, LocationPermissions, MonitorCall};
use crate::notify::FakeNotifyAdapter;
use df_core::{Coordinates, NotificationEvent, RegionEventKind};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

fn region(venue_id: &str) -> Region {
    Region::for_venue(venue_id, "Uchi", Coordinates::new(30.2575, -97.7614), 4828.02)
}

fn notification() -> Notification {
    Notification::proximity(
        &NotificationEvent::new(&region("v1"), RegionEventKind::Enter, 1),
        Some("2.4 mi"),
    )
}

// =============================================================================
// Tracing output verification tests
// =============================================================================

#[test]
fn traced_monitor_start_logs_entry_and_completion() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedRegionMonitor::new(FakeRegionMonitor::new());
        traced.start_monitoring(&[region("v1"), region("v2")]).await
    });

    assert!(result.is_ok(), "start should succeed: {:?}", result);
    assert!(logs.contains("monitor.start"), "Logs:\n{}", logs);
    assert!(logs.contains("count=2"), "Logs:\n{}", logs);
    assert!(logs.contains("DINNAFIND_GEOFENCE_TASK"), "Logs:\n{}", logs);
    assert!(logs.contains("monitoring started"), "Logs:\n{}", logs);
    assert!(logs.contains("elapsed_ms"), "Logs:\n{}", logs);
}

#[test]
fn traced_monitor_start_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeRegionMonitor::new();
        fake.fail_next_start("platform unavailable");
        TracedRegionMonitor::new(fake)
            .start_monitoring(&[region("v1")])
            .await
    });

    assert!(result.is_err());
    assert!(logs.contains("start failed"), "Logs:\n{}", logs);
    assert!(logs.contains("platform unavailable"), "Logs:\n{}", logs);
}

#[test]
fn traced_monitor_logs_missing_permissions() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeRegionMonitor::new();
        fake.set_permissions(LocationPermissions {
            foreground: true,
            background: false,
        });
        TracedRegionMonitor::new(fake).ensure_permissions().await
    });

    assert!(result.unwrap_err().is_permission_denied());
    assert!(logs.contains("background location"), "Logs:\n{}", logs);
}

#[test]
fn traced_notify_logs_venue_and_outcome() {
    let (logs, result) = with_tracing(|| async {
        TracedNotifyAdapter::new(FakeNotifyAdapter::new())
            .deliver(&notification())
            .await
    });

    assert!(result.is_ok());
    assert!(logs.contains("notify.deliver"), "Logs:\n{}", logs);
    assert!(logs.contains("venue_id=v1"), "Logs:\n{}", logs);
    assert!(logs.contains("notification delivered"), "Logs:\n{}", logs);
}

// =============================================================================
// Delegation tests - verify traced wrapper delegates to inner adapter
// =============================================================================

#[tokio::test]
async fn traced_monitor_delegates_to_inner() {
    let fake = FakeRegionMonitor::new();
    let traced = TracedRegionMonitor::new(fake.clone());

    traced.start_monitoring(&[region("v1")]).await.unwrap();
    traced.stop_monitoring().await.unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        MonitorCall::Start { task, regions } => {
            assert_eq!(task, df_core::GEOFENCE_TASK_NAME);
            assert_eq!(regions, &vec![region("v1")]);
        }
        other => panic!("Expected Start call, got {:?}", other),
    }
    assert_eq!(calls[1], MonitorCall::Stop);
}

#[tokio::test]
async fn traced_notify_delegates_to_inner() {
    let fake = FakeNotifyAdapter::new();
    let traced = TracedNotifyAdapter::new(fake.clone());

    traced.deliver(&notification()).await.unwrap();
    fake.set_permission(false);
    assert!(matches!(
        traced.deliver(&notification()).await,
        Err(NotifyError::PermissionDenied)
    ));

    assert_eq!(fake.delivered(), vec![notification()]);
    assert!(!traced.permission_granted().await);
}
