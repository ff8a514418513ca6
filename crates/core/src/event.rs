// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application-state signals that change the tracked venue set

use crate::bucket_list::SavedVenue;
use serde::{Deserialize, Serialize};

/// A change in what the user wants tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackingEvent {
    /// Proximity alerts switched on or off for one venue
    VenueTrackingToggled { venue_id: String, enabled: bool },
    /// The saved list was added to, removed from, or bulk-updated
    BucketListChanged { items: Vec<SavedVenue> },
    /// The global alert distance preference changed
    AlertRadiusChanged { miles: f64 },
}

impl TrackingEvent {
    /// Event name in `category:action` form, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            TrackingEvent::VenueTrackingToggled { .. } => "venue:toggled",
            TrackingEvent::BucketListChanged { .. } => "bucket_list:changed",
            TrackingEvent::AlertRadiusChanged { .. } => "alert_radius:changed",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
