// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use df_core::{Coordinates, NotificationEvent, Region, RegionEventKind};

fn notification(name: &str) -> Notification {
    let region = Region::for_venue("v1", name, Coordinates::new(30.0, -97.0), 10.0);
    Notification::proximity(&NotificationEvent::new(&region, RegionEventKind::Enter, 1), None)
}

#[tokio::test]
async fn fake_notify_records_deliveries() {
    let adapter = FakeNotifyAdapter::new();

    adapter.deliver(&notification("Uchi")).await.unwrap();
    adapter.deliver(&notification("Franklin Barbecue")).await.unwrap();

    let delivered = adapter.delivered();
    assert_eq!(delivered.len(), 2);
    assert_eq!(delivered[0].data.name, "Uchi");
}

#[tokio::test]
async fn fake_notify_injected_failure() {
    let adapter = FakeNotifyAdapter::new();
    assert!(adapter.permission_granted().await);

    adapter.set_failing(true);
    assert!(matches!(
        adapter.deliver(&notification("Uchi")).await,
        Err(NotifyError::Failed(_))
    ));
    assert!(adapter.delivered().is_empty());
}

#[tokio::test]
async fn fake_notify_refuses_without_permission() {
    let adapter = FakeNotifyAdapter::new();
    adapter.set_permission(false);

    assert!(!adapter.permission_granted().await);
    assert!(matches!(
        adapter.deliver(&notification("Uchi")).await,
        Err(NotifyError::PermissionDenied)
    ));
    assert!(adapter.delivered().is_empty());
}
