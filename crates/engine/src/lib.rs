// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! DinnaFind geofence engine

mod alert;
mod cooldown;
mod coordinator;
mod error;
mod manager;

pub use alert::{handle_region_event, AlertContext, AlertOutcome};
pub use cooldown::CooldownDecider;
pub use coordinator::{SharedBucketList, SyncCoordinator, SyncHandle, SyncStatus, VenueSource};
pub use error::GeofenceError;
pub use manager::GeofenceManager;
