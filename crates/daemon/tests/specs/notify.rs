// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Proximity notification specs

use crate::prelude::*;

#[test]
fn entering_a_tracked_venue_notifies() {
    let state = StateDir::empty();

    let run = state.run(&[FRANKLIN, FLUSH, AT_FRANKLIN]).passes();

    let notifications = run.outputs("notification");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["title"], "DinnaFind! 🍽️");
    assert_eq!(
        notifications[0]["body"],
        "You're 0 ft from Franklin Barbecue. Time to check it out!"
    );
    assert_eq!(notifications[0]["data"]["venueId"], "v1");
    assert_eq!(notifications[0]["data"]["eventType"], "enter");
}

#[test]
fn repeated_entries_within_cooldown_notify_once() {
    let state = StateDir::empty();

    let run = state
        .run(&[FRANKLIN, FLUSH, AT_FRANKLIN, FAR_AWAY, AT_FRANKLIN])
        .passes();

    assert_eq!(run.outputs("notification").len(), 1);
}

#[test]
fn untracked_venues_never_notify() {
    let state = StateDir::empty();
    let untracked = FRANKLIN.replace(
        r#""notificationsEnabled":true"#,
        r#""notificationsEnabled":false"#,
    );

    state
        .run(&[&untracked, FLUSH, AT_FRANKLIN])
        .passes()
        .stdout_lacks(r#""type":"notification""#);
}

#[test]
fn toggling_off_stops_notifications() {
    let state = StateDir::empty();

    state
        .run(&[
            FRANKLIN,
            r#"{"type":"toggle","venueId":"v1","enabled":false}"#,
            FLUSH,
            AT_FRANKLIN,
        ])
        .passes()
        .stdout_lacks(r#""type":"notification""#);
}

#[test]
fn revoked_background_permission_is_reported() {
    let state = StateDir::empty();

    let run = state
        .run(&[
            r#"{"type":"permissions","foreground":true,"background":false}"#,
            FRANKLIN,
            FLUSH,
        ])
        .passes();

    assert_eq!(run.outputs("error").len(), 1);
    let statuses = run.outputs("status");
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0]["sync"], "permission_denied");
    assert_eq!(
        statuses[0]["detail"],
        "background location permission not granted"
    );
}
