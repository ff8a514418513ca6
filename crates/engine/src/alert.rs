// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Region event handling
//!
//! The platform may deliver a region event to a freshly started process
//! in which no manager exists yet, so the handler is a free function over
//! durable handles only: the persisted region set, the last-notified
//! table, and the adapters.

use crate::CooldownDecider;
use df_adapters::{LocationProvider, NotifyAdapter};
use df_core::{
    distance_string, Clock, Notification, NotificationEvent, RegionEventKind, RegionTransition,
};
use df_storage::{KvStore, RegionStore};
use std::time::Duration;

/// Everything `handle_region_event` needs, all cheap to clone
#[derive(Clone)]
pub struct AlertContext<K, N, L, C> {
    pub regions: RegionStore<K>,
    pub cooldown: CooldownDecider<K>,
    pub notify: N,
    pub location: L,
    pub clock: C,
    /// Upper bound on waiting for a last-known position
    pub location_timeout: Duration,
}

/// What happened to a region event
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    Notified(Notification),
    CooldownActive,
    IgnoredExit,
    UnknownRegion,
    DeliveryFailed,
}

/// Turn a platform region transition into at most one notification
pub async fn handle_region_event<K, N, L, C>(
    ctx: &AlertContext<K, N, L, C>,
    transition: RegionTransition,
) -> AlertOutcome
where
    K: KvStore,
    N: NotifyAdapter,
    L: LocationProvider,
    C: Clock,
{
    let region_id = transition.region_id.as_str();

    if transition.kind == RegionEventKind::Exit {
        tracing::info!(region_id, "exited region");
        return AlertOutcome::IgnoredExit;
    }

    let region = match ctx.regions.find_region(region_id).await {
        Ok(Some(region)) => region,
        Ok(None) => {
            tracing::debug!(region_id, "region event for untracked region");
            return AlertOutcome::UnknownRegion;
        }
        Err(e) => {
            tracing::warn!(region_id, error = %e, "could not resolve region");
            return AlertOutcome::UnknownRegion;
        }
    };

    let now = ctx.clock.epoch_ms();
    if !ctx.cooldown.may_notify(region_id, now).await {
        tracing::info!(region_id, venue = %region.name, "cooldown active, skipping notification");
        return AlertOutcome::CooldownActive;
    }

    let distance = match tokio::time::timeout(
        ctx.location_timeout,
        ctx.location.last_known_position(),
    )
    .await
    {
        Ok(Some(position)) => Some(distance_string(position, region.center())),
        Ok(None) => None,
        Err(_) => {
            tracing::debug!(region_id, "timed out waiting for position");
            None
        }
    };

    let event = NotificationEvent::new(&region, RegionEventKind::Enter, now);
    let notification = Notification::proximity(&event, distance.as_deref());

    if let Err(e) = ctx.notify.deliver(&notification).await {
        tracing::error!(region_id, error = %e, "failed to deliver notification");
        return AlertOutcome::DeliveryFailed;
    }

    if let Err(e) = ctx.cooldown.record_notified(region_id, now).await {
        tracing::warn!(region_id, error = %e, "failed to record notification time");
    }

    tracing::info!(region_id, venue = %region.name, "notified");
    AlertOutcome::Notified(notification)
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
