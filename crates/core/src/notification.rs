// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local notification payloads

use crate::region::{NotificationEvent, RegionEventKind};
use serde::{Deserialize, Serialize};

/// Branded title shown on every proximity alert
pub const NOTIFICATION_TITLE: &str = "DinnaFind! 🍽️";

/// Data attached to a notification for the host to route taps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub venue_id: String,
    pub name: String,
    pub event_type: RegionEventKind,
}

/// A notification to display immediately
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub data: NotificationData,
}

impl Notification {
    /// Proximity alert for a resolved region event.
    ///
    /// `distance` is a rendered distance string when a position fix was
    /// at hand; otherwise the body falls back to a static phrase.
    pub fn proximity(event: &NotificationEvent, distance: Option<&str>) -> Self {
        let body = match distance {
            Some(distance) => format!(
                "You're {} from {}. Time to check it out!",
                distance, event.name
            ),
            None => format!("You're near {}. Time to check it out!", event.name),
        };

        Self {
            title: NOTIFICATION_TITLE.to_string(),
            body,
            data: NotificationData {
                venue_id: event.venue_id.clone(),
                name: event.name.clone(),
                event_type: event.event_type,
            },
        }
    }
}
