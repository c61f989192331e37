// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for quire-core operations.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors raised by the local page store.
#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("{0}")]
    InvalidInput(String),
}

/// A specialized Result type for page store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a load, mediation or reconciliation step.
///
/// Cloneable so one in-flight mediation can hand the same outcome to every
/// coalesced caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Network failure or timeout. Retrying is up to the caller.
    #[error("transport error: {0}")]
    Transport(String),

    /// Malformed remote payload. Never retried automatically.
    #[error("decode error: {0}")]
    Decode(String),

    /// Local persistence failure. Nothing was applied.
    #[error("storage error: {0}")]
    Storage(String),
}

impl SyncError {
    /// True when the failure came from the remote side (transport or decode).
    pub fn is_remote(&self) -> bool {
        matches!(self, SyncError::Transport(_) | SyncError::Decode(_))
    }
}

impl From<Error> for SyncError {
    fn from(e: Error) -> Self {
        SyncError::Storage(e.to_string())
    }
}

impl From<FetchError> for SyncError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Transport(msg) => SyncError::Transport(msg),
            FetchError::Decode(msg) => SyncError::Decode(msg),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
