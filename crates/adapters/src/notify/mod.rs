// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification delivery adapters

mod channel;
mod desktop;

pub use channel::ChannelNotifier;
pub use desktop::DesktopNotifier;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifyAdapter;

use async_trait::async_trait;
use df_core::Notification;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Failed(String),
    #[error("notification permission not granted")]
    PermissionDenied,
    #[error("osascript error: {0}")]
    Osascript(String),
}

/// Adapter trait for local notification delivery
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Display a notification immediately
    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError>;

    /// Whether the user allows notifications
    async fn permission_granted(&self) -> bool {
        true
    }
}
