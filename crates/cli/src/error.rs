// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use quire_core::{FetchError, SyncError};

/// All possible errors that can occur in the quirers library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'quire init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("invalid feed: '{0}'\n  hint: valid feeds are forum:<id>, timeline:<id>, thread:<id>[:po], subscriptions")]
    InvalidFeed(String),

    #[error("invalid remote URL '{0}'\n  hint: the remote must be a ws:// or wss:// URL")]
    InvalidRemoteUrl(String),

    #[error("no remote configured\n  hint: add a [remote] section to .quire/config.toml or run 'quire init --remote <url>'")]
    NoRemote,

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("transport error: {0}\n  hint: cached data is still available with --offline")]
    Transport(String),

    #[error("remote sent malformed data: {0}")]
    Decode(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("corrupted data in cache: {0}")]
    CorruptedData(String),

    #[error("{0}")]
    InvalidInput(String),
}

/// A specialized Result type for quirers operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<quire_core::Error> for Error {
    fn from(e: quire_core::Error) -> Self {
        match e {
            quire_core::Error::Database(e) => Error::Database(e),
            quire_core::Error::Io(e) => Error::Io(e),
            quire_core::Error::Json(e) => Error::Json(e),
            quire_core::Error::CorruptedData(s) => Error::CorruptedData(s),
            quire_core::Error::InvalidInput(s) => Error::InvalidInput(s),
        }
    }
}

impl From<SyncError> for Error {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Transport(msg) => Error::Transport(msg),
            SyncError::Decode(msg) => Error::Decode(msg),
            SyncError::Storage(msg) => Error::Storage(msg),
        }
    }
}

impl From<FetchError> for Error {
    fn from(e: FetchError) -> Self {
        SyncError::from(e).into()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
