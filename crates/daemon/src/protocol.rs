// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line protocol between the host and dfd.
//!
//! Requests arrive one JSON object per line on stdin; every output is one
//! JSON object per line on stdout. Both are tagged by `type`.

use df_core::{Coordinates, Notification, SavedVenue, TrackingEvent};
use df_engine::SyncStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] serde_json::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Request from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Replace the saved venues (and optionally the alert distance)
    BucketList {
        items: Vec<SavedVenue>,
        #[serde(default, rename = "alertDistanceMiles")]
        alert_distance_miles: Option<f64>,
    },
    /// Turn notifications for one venue on or off
    Toggle {
        #[serde(rename = "venueId")]
        venue_id: String,
        enabled: bool,
    },
    AlertRadius { miles: f64 },
    /// A position fix from the device
    Position { latitude: f64, longitude: f64 },
    Permissions { foreground: bool, background: bool },
    /// Run any pending resync now
    Flush,
    Status,
    Shutdown,
}

impl Request {
    /// Tracking events carried by this request, in application order
    pub fn tracking_events(&self) -> Vec<TrackingEvent> {
        match self {
            Request::BucketList {
                items,
                alert_distance_miles,
            } => {
                let mut events = vec![TrackingEvent::BucketListChanged {
                    items: items.clone(),
                }];
                if let Some(miles) = alert_distance_miles {
                    events.push(TrackingEvent::AlertRadiusChanged { miles: *miles });
                }
                events
            }
            Request::Toggle { venue_id, enabled } => vec![TrackingEvent::VenueTrackingToggled {
                venue_id: venue_id.clone(),
                enabled: *enabled,
            }],
            Request::AlertRadius { miles } => {
                vec![TrackingEvent::AlertRadiusChanged { miles: *miles }]
            }
            _ => Vec::new(),
        }
    }

    pub fn position(&self) -> Option<Coordinates> {
        match self {
            Request::Position {
                latitude,
                longitude,
            } => Some(Coordinates::new(*latitude, *longitude)),
            _ => None,
        }
    }
}

/// Sync state as reported to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Idle,
    Synced,
    PermissionDenied,
    Degraded,
}

/// Output line for the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Output {
    Ready {
        regions: usize,
    },
    Notification(Notification),
    Status {
        sync: SyncState,
        /// Region ids currently monitored
        regions: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    Error {
        message: String,
    },
    ShuttingDown,
}

impl Output {
    pub fn status(status: &SyncStatus, regions: Vec<String>) -> Self {
        let (sync, detail) = match status {
            SyncStatus::Idle => (SyncState::Idle, None),
            SyncStatus::Synced { generation, .. } => {
                (SyncState::Synced, Some(format!("generation {}", generation)))
            }
            SyncStatus::PermissionDenied(permission) => (
                SyncState::PermissionDenied,
                Some(format!("{} permission not granted", permission)),
            ),
            SyncStatus::Degraded { reason } => (SyncState::Degraded, Some(reason.clone())),
        };
        Output::Status {
            sync,
            regions,
            detail,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Output::Error {
            message: message.into(),
        }
    }
}

pub fn decode(line: &str) -> Result<Request, ProtocolError> {
    serde_json::from_str(line).map_err(ProtocolError::InvalidRequest)
}

/// Encode an output as a single JSON line (without the newline)
pub fn encode(output: &Output) -> Result<String, ProtocolError> {
    serde_json::to_string(output).map_err(ProtocolError::Encode)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
