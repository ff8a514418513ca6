// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Region monitoring adapters
//!
//! The platform primitive only supports replacing the whole subscription,
//! so the contract is wholesale: `start_monitoring` takes the complete
//! region list every time.

mod feed;

pub use feed::PositionFeedMonitor;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRegionMonitor, MonitorCall};

use async_trait::async_trait;
use df_core::Region;
use std::fmt;
use thiserror::Error;

/// A permission region monitoring depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ForegroundLocation,
    BackgroundLocation,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::ForegroundLocation => write!(f, "foreground location"),
            Permission::BackgroundLocation => write!(f, "background location"),
        }
    }
}

/// Location permissions as granted by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationPermissions {
    pub foreground: bool,
    pub background: bool,
}

impl LocationPermissions {
    pub const GRANTED: Self = Self {
        foreground: true,
        background: true,
    };

    pub const DENIED: Self = Self {
        foreground: false,
        background: false,
    };

    /// The first missing permission, if any
    pub fn missing(&self) -> Option<Permission> {
        if !self.foreground {
            Some(Permission::ForegroundLocation)
        } else if !self.background {
            Some(Permission::BackgroundLocation)
        } else {
            None
        }
    }

    pub fn check(&self) -> Result<(), MonitorError> {
        match self.missing() {
            Some(permission) => Err(MonitorError::PermissionDenied(permission)),
            None => Ok(()),
        }
    }
}

impl Default for LocationPermissions {
    fn default() -> Self {
        Self::GRANTED
    }
}

/// Errors from region monitoring
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("{0} permission not granted")]
    PermissionDenied(Permission),
    #[error("region monitoring failed: {0}")]
    Platform(String),
}

impl MonitorError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, MonitorError::PermissionDenied(_))
    }
}

/// Adapter around the host's region-monitoring primitive.
///
/// All regions are registered under `df_core::GEOFENCE_TASK_NAME`.
#[async_trait]
pub trait RegionMonitor: Clone + Send + Sync + 'static {
    /// Verify the location permissions monitoring needs
    async fn ensure_permissions(&self) -> Result<(), MonitorError>;

    /// Replace the subscription with exactly `regions`; empty means stop
    async fn start_monitoring(&self, regions: &[Region]) -> Result<(), MonitorError>;

    /// Stop monitoring; succeeds when nothing is registered
    async fn stop_monitoring(&self) -> Result<(), MonitorError>;
}
