// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable storage for the region set and notification history

mod error;
mod kv;
mod notified;
mod regions;

pub use error::StorageError;
pub use kv::{FileKvStore, KvStore, MemoryKvStore};
pub use notified::{last_notified_key, NotificationLog, LAST_NOTIFIED_PREFIX};
pub use regions::{RegionStore, REGIONS_KEY};
