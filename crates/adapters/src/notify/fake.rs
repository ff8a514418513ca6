// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use df_core::Notification;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Fake notification adapter for testing
#[derive(Clone)]
pub struct FakeNotifyAdapter {
    delivered: Arc<Mutex<Vec<Notification>>>,
    granted: Arc<AtomicBool>,
    failing: Arc<AtomicBool>,
}

impl Default for FakeNotifyAdapter {
    fn default() -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            granted: Arc::new(AtomicBool::new(true)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl FakeNotifyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all delivered notifications
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_permission(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }

    /// Make deliveries fail until cleared
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl NotifyAdapter for FakeNotifyAdapter {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        if !self.granted.load(Ordering::SeqCst) {
            return Err(NotifyError::PermissionDenied);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Failed("injected delivery failure".to_string()));
        }
        self.delivered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
        Ok(())
    }

    async fn permission_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
