// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage error types

use std::io;
use thiserror::Error;

/// Errors that can occur reading or writing durable state
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed data at {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub(crate) fn read(key: &str, source: io::Error) -> Self {
        StorageError::Read {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn write(key: &str, source: io::Error) -> Self {
        StorageError::Write {
            key: key.to_string(),
            source,
        }
    }

    /// Storage was unreadable or held data we could not decode
    pub fn is_read_error(&self) -> bool {
        matches!(self, StorageError::Read { .. } | StorageError::Malformed { .. })
    }

    pub fn is_write_error(&self) -> bool {
        matches!(self, StorageError::Write { .. })
    }
}
