// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notifier handing notifications to the host over a channel

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use df_core::Notification;
use tokio::sync::mpsc;

/// Delivers notifications into an mpsc channel for the host to display
#[derive(Clone, Debug)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl NotifyAdapter for ChannelNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.tx
            .send(notification.clone())
            .map_err(|_| NotifyError::Failed("notification sink closed".to_string()))
    }
}
