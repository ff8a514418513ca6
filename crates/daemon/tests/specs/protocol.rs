// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request handling specs

use crate::prelude::*;

#[test]
fn ready_is_the_first_line() {
    let state = StateDir::empty();

    let run = state.run(&[]).passes();

    let lines = run.lines();
    assert_eq!(lines[0]["type"], "ready");
    assert_eq!(lines[0]["regions"], 0);
}

#[test]
fn malformed_requests_are_reported_and_skipped() {
    let state = StateDir::empty();

    let run = state.run(&["{nope", FRANKLIN, FLUSH]).passes();

    let errors = run.outputs("error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid request"));
    assert_eq!(run.outputs("status").last().unwrap()["sync"], "synced");
}

#[test]
fn each_status_is_reported_once() {
    let state = StateDir::empty();

    let run = state.run(&[FRANKLIN, FLUSH, STATUS]).passes();

    assert_eq!(run.outputs("status").len(), 2);
}

#[test]
fn shutdown_request_stops_the_daemon() {
    let state = StateDir::empty();

    state
        .run(&[r#"{"type":"shutdown"}"#, FRANKLIN, FLUSH])
        .passes()
        .stdout_has(r#""type":"shutting_down""#)
        .stdout_lacks(r#""sync":"synced""#);
}

#[test]
fn settings_file_sets_alert_distance() {
    let state = StateDir::empty();
    state.file("config.toml", "alert_distance_miles = 0.01\n");
    // ~0.5 mi from the venue, outside a 0.01 mi radius
    let nearby = r#"{"type":"position","latitude":30.2773,"longitude":-97.7313}"#;

    state
        .run(&[FRANKLIN, FLUSH, nearby])
        .passes()
        .stdout_lacks(r#""type":"notification""#);
}

#[test]
fn invalid_settings_fail_startup() {
    let state = StateDir::empty();
    state.file("config.toml", "cooldown = \"0s\"\n");

    state.dfd().write_stdin("").assert().failure();

    assert!(state.read("dfd.log").contains("Failed to start daemon"));
    assert!(!state.path().join("dfd.pid").exists());
}
