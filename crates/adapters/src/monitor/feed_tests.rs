// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use df_core::RegionEventKind;

const FRANKLIN: Coordinates = Coordinates {
    latitude: 30.2701,
    longitude: -97.7313,
};

fn franklin_region() -> Region {
    Region::for_venue("v1", "Franklin Barbecue", FRANKLIN, 200.0)
}

fn far_away() -> Coordinates {
    Coordinates::new(30.40, -97.70)
}

fn setup() -> (PositionFeedMonitor, mpsc::UnboundedReceiver<RegionTransition>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PositionFeedMonitor::new(tx), rx)
}

#[tokio::test]
async fn enter_then_exit() {
    let (monitor, mut rx) = setup();
    monitor.start_monitoring(&[franklin_region()]).await.unwrap();

    assert!(monitor.observe(far_away()).is_empty());

    let entered = monitor.observe(FRANKLIN);
    assert_eq!(entered, vec![RegionTransition::enter("geofence_v1")]);
    assert_eq!(rx.recv().await.unwrap().kind, RegionEventKind::Enter);

    // Jitter inside the region is not a new crossing
    assert!(monitor
        .observe(Coordinates::new(FRANKLIN.latitude + 0.0001, FRANKLIN.longitude))
        .is_empty());

    let exited = monitor.observe(far_away());
    assert_eq!(exited, vec![RegionTransition::exit("geofence_v1")]);
}

#[tokio::test]
async fn registering_while_inside_reports_enter() {
    let (monitor, mut rx) = setup();
    monitor.observe(FRANKLIN);

    monitor.start_monitoring(&[franklin_region()]).await.unwrap();

    assert_eq!(rx.recv().await.unwrap(), RegionTransition::enter("geofence_v1"));
}

#[tokio::test]
async fn resubscribing_same_region_does_not_reannounce() {
    let (monitor, _rx) = setup();
    monitor.start_monitoring(&[franklin_region()]).await.unwrap();
    monitor.observe(FRANKLIN);

    monitor.start_monitoring(&[franklin_region()]).await.unwrap();
    assert!(monitor.observe(FRANKLIN).is_empty());
}

#[tokio::test]
async fn changed_radius_resets_state() {
    let (monitor, _rx) = setup();
    monitor.start_monitoring(&[franklin_region()]).await.unwrap();
    monitor.observe(FRANKLIN);

    monitor
        .start_monitoring(&[franklin_region().with_radius(500.0)])
        .await
        .unwrap();
    // Treated as a new registration, so being inside is announced again
    assert_eq!(monitor.observe(FRANKLIN).len(), 1);
}

#[tokio::test]
async fn start_replaces_whole_set() {
    let (monitor, _rx) = setup();
    let uchi = Region::for_venue("v2", "Uchi", Coordinates::new(30.2574, -97.7617), 200.0);
    monitor
        .start_monitoring(&[franklin_region(), uchi.clone()])
        .await
        .unwrap();
    monitor.start_monitoring(&[uchi.clone()]).await.unwrap();

    assert_eq!(monitor.regions(), vec![uchi]);
    assert!(monitor.observe(FRANKLIN).is_empty());
}

#[tokio::test]
async fn empty_start_stops_monitoring() {
    let (monitor, _rx) = setup();
    monitor.start_monitoring(&[franklin_region()]).await.unwrap();
    assert!(monitor.is_monitoring());

    monitor.start_monitoring(&[]).await.unwrap();
    assert!(!monitor.is_monitoring());
    assert!(monitor.regions().is_empty());
}

#[tokio::test]
async fn stop_without_task_is_ok() {
    let (monitor, _rx) = setup();
    monitor.stop_monitoring().await.unwrap();
    monitor.stop_monitoring().await.unwrap();
}

#[tokio::test]
async fn missing_background_permission_is_denied() {
    let (monitor, _rx) = setup();
    let monitor = monitor.with_permissions(LocationPermissions {
        foreground: true,
        background: false,
    });

    let err = monitor.start_monitoring(&[franklin_region()]).await.unwrap_err();
    assert!(matches!(
        err,
        MonitorError::PermissionDenied(crate::monitor::Permission::BackgroundLocation)
    ));
    assert!(monitor.ensure_permissions().await.is_err());
    assert!(!monitor.is_monitoring());
}

#[tokio::test]
async fn revoked_permission_silences_transitions() {
    let (monitor, _rx) = setup();
    monitor.start_monitoring(&[franklin_region()]).await.unwrap();
    monitor.set_permissions(LocationPermissions::DENIED);

    assert!(monitor.observe(FRANKLIN).is_empty());
}
