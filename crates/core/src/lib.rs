// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! df-core: Core types for the DinnaFind geofence engine
//!
//! This crate provides:
//! - Regions, transitions and notification payloads
//! - The bucket list model the tracked set is derived from
//! - Haversine distance helpers
//! - Clock abstraction and TOML settings

pub mod bucket_list;
pub mod clock;
pub mod distance;
pub mod event;
pub mod notification;
pub mod region;
pub mod settings;

pub use bucket_list::{BucketList, SavedVenue, DEFAULT_ALERT_DISTANCE_MILES};
pub use clock::{duration_ms, Clock, FakeClock, SystemClock};
pub use distance::{distance_miles, distance_string, format_distance, miles_to_meters, Coordinates};
pub use event::TrackingEvent;
pub use notification::{Notification, NotificationData, NOTIFICATION_TITLE};
pub use region::{
    region_id_for, NotificationEvent, Region, RegionEventKind, RegionTransition,
    GEOFENCE_TASK_NAME,
};
pub use settings::{ConfigError, GeofenceSettings, DEFAULT_NOTIFICATION_COOLDOWN};
