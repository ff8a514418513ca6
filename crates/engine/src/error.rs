// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the geofence engine

use df_adapters::{MonitorError, Permission};
use df_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by geofence lifecycle operations
#[derive(Debug, Error)]
pub enum GeofenceError {
    #[error("monitor error: {0}")]
    Monitor(#[from] MonitorError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl GeofenceError {
    /// Fatal errors must reach the user; everything else is logged and absorbed
    pub fn is_fatal(&self) -> bool {
        self.permission_denied().is_some()
    }

    pub fn permission_denied(&self) -> Option<Permission> {
        match self {
            GeofenceError::Monitor(MonitorError::PermissionDenied(p)) => Some(*p),
            _ => None,
        }
    }
}
