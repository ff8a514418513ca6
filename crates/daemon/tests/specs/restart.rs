// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Continuity across daemon restarts

use crate::prelude::*;

#[test]
fn regions_survive_a_restart() {
    let state = StateDir::empty();
    state.run(&[FRANKLIN, FLUSH]).passes();

    let run = state.run(&[AT_FRANKLIN]).passes();

    assert_eq!(run.outputs("ready")[0]["regions"], 1);
    assert_eq!(run.outputs("notification").len(), 1);
}

#[test]
fn cooldown_survives_a_restart() {
    let state = StateDir::empty();
    state
        .run(&[FRANKLIN, FLUSH, AT_FRANKLIN])
        .passes()
        .stdout_has(r#""type":"notification""#);

    state
        .run(&[AT_FRANKLIN])
        .passes()
        .stdout_lacks(r#""type":"notification""#);
}

#[test]
fn pending_changes_are_flushed_on_exit() {
    let state = StateDir::empty();
    // No flush: stdin closes while the debounce window is open
    state.run(&[FRANKLIN]).passes();

    state
        .run(&[STATUS])
        .passes()
        .stdout_has(r#""regions":["geofence_v1"]"#);
}

#[test]
fn startup_is_logged() {
    let state = StateDir::empty();
    state.run(&[]).passes();

    let log = state.read("dfd.log");
    assert!(log.contains("--- dfd: starting (pid: "), "log:\n{}", log);
    assert!(log.contains("Daemon ready"), "log:\n{}", log);
}
