// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The user's saved venues, as seen by the geofence engine.
//!
//! This is the application state the sync coordinator recomputes the
//! desired region set from. It is owned by the host; the engine only
//! reads snapshots of it.

use crate::distance::{miles_to_meters, Coordinates};
use crate::event::TrackingEvent;
use crate::region::Region;
use serde::{Deserialize, Serialize};

/// Alert distance used when the user has not picked one
pub const DEFAULT_ALERT_DISTANCE_MILES: f64 = 3.0;

/// A venue saved to the bucket list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedVenue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub notifications_enabled: bool,
}

impl SavedVenue {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates: Some(coordinates),
            notifications_enabled: false,
        }
    }

    pub fn tracked(mut self) -> Self {
        self.notifications_enabled = true;
        self
    }

    /// Notifications on and a usable location
    pub fn is_trackable(&self) -> bool {
        self.notifications_enabled && self.coordinates.is_some_and(|c| c.is_valid())
    }
}

/// Saved venues plus the alert distance preference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketList {
    pub items: Vec<SavedVenue>,
    pub alert_distance_miles: f64,
}

impl Default for BucketList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            alert_distance_miles: DEFAULT_ALERT_DISTANCE_MILES,
        }
    }
}

impl BucketList {
    pub fn new(items: Vec<SavedVenue>, alert_distance_miles: f64) -> Self {
        Self {
            items,
            alert_distance_miles,
        }
    }

    /// Apply a tracking event to the saved state
    pub fn apply(&mut self, event: &TrackingEvent) {
        match event {
            TrackingEvent::VenueTrackingToggled { venue_id, enabled } => {
                if let Some(item) = self.items.iter_mut().find(|i| &i.id == venue_id) {
                    item.notifications_enabled = *enabled;
                }
            }
            TrackingEvent::BucketListChanged { items } => {
                self.items = items.clone();
            }
            TrackingEvent::AlertRadiusChanged { miles } => {
                // Non-positive distances would register zero-size regions
                if miles.is_finite() && *miles > 0.0 {
                    self.alert_distance_miles = *miles;
                }
            }
        }
    }

    /// Radius applied to every region, from the alert distance preference
    pub fn radius_meters(&self) -> f64 {
        miles_to_meters(self.alert_distance_miles)
    }

    /// Regions for every trackable item, one per venue id (first wins)
    pub fn desired_regions(&self) -> Vec<Region> {
        let radius = self.radius_meters();
        let mut regions: Vec<Region> = Vec::new();

        for item in self.items.iter().filter(|i| i.is_trackable()) {
            let Some(center) = item.coordinates else {
                continue;
            };
            if regions.iter().any(|r| r.venue_id == item.id) {
                continue;
            }
            regions.push(Region::for_venue(&item.id, &item.name, center, radius));
        }

        regions
    }
}

#[cfg(test)]
#[path = "bucket_list_tests.rs"]
mod tests;
