// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitored regions and the transitions reported for them

use crate::distance::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix joining a venue id to its region id
pub const REGION_ID_PREFIX: &str = "geofence_";

/// Name under which the single platform monitoring task is registered
pub const GEOFENCE_TASK_NAME: &str = "DINNAFIND_GEOFENCE_TASK";

/// Region id for a tracked venue
pub fn region_id_for(venue_id: &str) -> String {
    format!("{}{}", REGION_ID_PREFIX, venue_id)
}

/// A circular geofence around one tracked venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    pub venue_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

impl Region {
    /// Build the region for a venue; the id is derived from `venue_id`
    pub fn for_venue(
        venue_id: impl Into<String>,
        name: impl Into<String>,
        center: Coordinates,
        radius_meters: f64,
    ) -> Self {
        let venue_id = venue_id.into();
        Self {
            id: region_id_for(&venue_id),
            venue_id,
            name: name.into(),
            latitude: center.latitude,
            longitude: center.longitude,
            radius_meters,
        }
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn with_radius(mut self, radius_meters: f64) -> Self {
        self.radius_meters = radius_meters;
        self
    }
}

/// Direction of a region boundary crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionEventKind {
    Enter,
    Exit,
}

impl fmt::Display for RegionEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionEventKind::Enter => write!(f, "enter"),
            RegionEventKind::Exit => write!(f, "exit"),
        }
    }
}

/// A boundary crossing as delivered by the platform.
///
/// Carries only the opaque region id; everything else must be resolved
/// from persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTransition {
    pub region_id: String,
    pub kind: RegionEventKind,
}

impl RegionTransition {
    pub fn enter(region_id: impl Into<String>) -> Self {
        Self {
            region_id: region_id.into(),
            kind: RegionEventKind::Enter,
        }
    }

    pub fn exit(region_id: impl Into<String>) -> Self {
        Self {
            region_id: region_id.into(),
            kind: RegionEventKind::Exit,
        }
    }
}

/// A resolved region event on its way to the cooldown decider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub region_id: String,
    pub venue_id: String,
    pub name: String,
    pub event_type: RegionEventKind,
    pub timestamp: u64,
}

impl NotificationEvent {
    pub fn new(region: &Region, event_type: RegionEventKind, timestamp: u64) -> Self {
        Self {
            region_id: region.id.clone(),
            venue_id: region.venue_id.clone(),
            name: region.name.clone(),
            event_type,
            timestamp,
        }
    }
}

#[cfg(test)]
#[path = "region_tests.rs"]
mod tests;
