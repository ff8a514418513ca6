// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Last-known position lookups used to enrich notifications

use async_trait::async_trait;
use df_core::Coordinates;
use std::sync::{Arc, RwLock};

/// Source of the device's last known position
#[async_trait]
pub trait LocationProvider: Clone + Send + Sync + 'static {
    /// Most recent fix, if any; must not block for a fresh one
    async fn last_known_position(&self) -> Option<Coordinates>;
}

/// Provider that never has a fix
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn last_known_position(&self) -> Option<Coordinates> {
        None
    }
}

/// Position shared between the host's feed and the alert path
#[derive(Clone, Debug, Default)]
pub struct SharedPosition {
    inner: Arc<RwLock<Option<Coordinates>>>,
}

impl SharedPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, position: Coordinates) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(position);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn get(&self) -> Option<Coordinates> {
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl LocationProvider for SharedPosition {
    async fn last_known_position(&self) -> Option<Coordinates> {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shared_position_tracks_latest_fix() {
        let position = SharedPosition::new();
        let reader = position.clone();
        assert_eq!(reader.last_known_position().await, None);

        position.set(Coordinates::new(30.2672, -97.7431));
        position.set(Coordinates::new(30.2701, -97.7313));
        assert_eq!(
            reader.last_known_position().await,
            Some(Coordinates::new(30.2701, -97.7313))
        );

        position.clear();
        assert_eq!(reader.last_known_position().await, None);
    }

    #[tokio::test]
    async fn no_location_has_no_fix() {
        assert_eq!(NoLocation.last_known_position().await, None);
    }
}
