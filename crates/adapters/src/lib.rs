// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for platform I/O: region monitoring, notifications, location

pub mod location;
pub mod monitor;
pub mod notify;
pub mod traced;

pub use location::{LocationProvider, NoLocation, SharedPosition};
pub use monitor::{
    LocationPermissions, MonitorError, Permission, PositionFeedMonitor, RegionMonitor,
};
pub use notify::{ChannelNotifier, DesktopNotifier, NotifyAdapter, NotifyError};
pub use traced::{TracedNotifyAdapter, TracedRegionMonitor};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use monitor::{FakeRegionMonitor, MonitorCall};
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
