// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Software region monitor driven by position fixes.
//!
//! Stands in for an OS geofencing service: the host feeds it positions,
//! and it reports boundary crossings over a channel carrying only the
//! region id, the same shape a platform callback has.

use super::{LocationPermissions, MonitorError, RegionMonitor};
use async_trait::async_trait;
use df_core::distance::distance_meters;
use df_core::{Coordinates, Region, RegionTransition, GEOFENCE_TASK_NAME};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug)]
struct Watched {
    region: Region,
    /// `None` until the first position after registration
    inside: Option<bool>,
}

#[derive(Debug, Default)]
struct FeedState {
    permissions: LocationPermissions,
    task: Option<&'static str>,
    watched: Vec<Watched>,
    last_position: Option<Coordinates>,
}

/// Region monitor computing enter/exit transitions from a position feed
#[derive(Clone, Debug)]
pub struct PositionFeedMonitor {
    state: Arc<Mutex<FeedState>>,
    events: mpsc::UnboundedSender<RegionTransition>,
}

impl PositionFeedMonitor {
    /// Create a monitor reporting transitions on `events`
    pub fn new(events: mpsc::UnboundedSender<RegionTransition>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedState::default())),
            events,
        }
    }

    pub fn with_permissions(self, permissions: LocationPermissions) -> Self {
        self.set_permissions(permissions);
        self
    }

    /// Update the permission state (e.g. the user revoked background location)
    pub fn set_permissions(&self, permissions: LocationPermissions) {
        self.lock().permissions = permissions;
    }

    pub fn permissions(&self) -> LocationPermissions {
        self.lock().permissions
    }

    pub fn is_monitoring(&self) -> bool {
        self.lock().task.is_some()
    }

    /// Regions currently registered
    pub fn regions(&self) -> Vec<Region> {
        self.lock().watched.iter().map(|w| w.region.clone()).collect()
    }

    /// Feed a position fix; returns the transitions it produced.
    ///
    /// Transitions are also sent on the events channel. Nothing is
    /// reported while location permission is missing.
    pub fn observe(&self, position: Coordinates) -> Vec<RegionTransition> {
        let transitions = {
            let mut state = self.lock();
            state.last_position = Some(position);
            if state.permissions.missing().is_some() || state.task.is_none() {
                return Vec::new();
            }
            evaluate(&mut state.watched, position)
        };
        self.emit(&transitions);
        transitions
    }

    fn emit(&self, transitions: &[RegionTransition]) {
        for transition in transitions {
            tracing::debug!(
                region_id = %transition.region_id,
                kind = %transition.kind,
                "region transition"
            );
            if self.events.send(transition.clone()).is_err() {
                tracing::debug!("transition receiver dropped");
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Update inside/outside flags and collect crossings
fn evaluate(watched: &mut [Watched], position: Coordinates) -> Vec<RegionTransition> {
    let mut transitions = Vec::new();
    for w in watched.iter_mut() {
        let inside = distance_meters(position, w.region.center()) <= w.region.radius_meters;
        match (w.inside, inside) {
            (Some(false) | None, true) => {
                transitions.push(RegionTransition::enter(&w.region.id));
            }
            (Some(true), false) => {
                transitions.push(RegionTransition::exit(&w.region.id));
            }
            _ => {}
        }
        w.inside = Some(inside);
    }
    transitions
}

fn same_geometry(a: &Region, b: &Region) -> bool {
    a.latitude == b.latitude && a.longitude == b.longitude && a.radius_meters == b.radius_meters
}

#[async_trait]
impl RegionMonitor for PositionFeedMonitor {
    async fn ensure_permissions(&self) -> Result<(), MonitorError> {
        self.lock().permissions.check()
    }

    async fn start_monitoring(&self, regions: &[Region]) -> Result<(), MonitorError> {
        if regions.is_empty() {
            return self.stop_monitoring().await;
        }

        let transitions = {
            let mut state = self.lock();
            state.permissions.check()?;

            // Unchanged regions keep their inside/outside state so a
            // resubscription does not re-announce an enter
            let mut previous = std::mem::take(&mut state.watched);
            let watched: Vec<Watched> = regions
                .iter()
                .map(|region| {
                    let inside = previous
                        .iter()
                        .position(|w| w.region.id == region.id && same_geometry(&w.region, region))
                        .and_then(|i| previous.swap_remove(i).inside);
                    Watched {
                        region: region.clone(),
                        inside,
                    }
                })
                .collect();

            state.watched = watched;
            state.task = Some(GEOFENCE_TASK_NAME);

            match state.last_position {
                Some(position) => evaluate(&mut state.watched, position),
                None => Vec::new(),
            }
        };

        self.emit(&transitions);
        Ok(())
    }

    async fn stop_monitoring(&self) -> Result<(), MonitorError> {
        let mut state = self.lock();
        if state.task.take().is_none() {
            tracing::debug!(task = GEOFENCE_TASK_NAME, "no task registered");
        }
        state.watched.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
