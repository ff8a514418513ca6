// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! macOS desktop notifications via osascript

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use df_core::Notification;
use tokio::process::Command;

/// macOS notification via osascript
#[derive(Clone, Debug)]
pub struct DesktopNotifier {
    sound: bool,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self { sound: true }
    }

    pub fn silent() -> Self {
        Self { sound: false }
    }

    fn build_script(&self, notification: &Notification) -> String {
        let mut script = format!(
            r#"display notification "{}" with title "{}""#,
            escape_applescript(&notification.body),
            escape_applescript(&notification.title),
        );

        if self.sound {
            script.push_str(r#" sound name "default""#);
        }

        script
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        let script = self.build_script(notification);

        let output = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output()
            .await
            .map_err(|e| NotifyError::Failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NotifyError::Osascript(stderr.to_string()));
        }

        Ok(())
    }
}

/// Escape special characters for AppleScript strings
fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "desktop_tests.rs"]
mod tests;
