// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Freshness policy: when cached content must be re-fetched before use.
//!
//! Paged lists pick a [`FreshnessMode`] per call site. Singleton resources
//! (category lists, daily notices) sit behind a [`TtlGate`] that reads
//! `last_fetched_at` back from the store on every check, so the decision
//! survives process restarts.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::clock::ClockSource;
use crate::error::{Error, Result, SyncError};
use crate::fetch::RemotePageFetcher;
use crate::page::{Item, Row};
use crate::query::LogicalQuery;
use crate::store::{PageStore, PageWrite, Position, WriteMode};

/// Default time-to-live for singleton resources.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Whether a paging source re-validates against the remote on Refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessMode {
    /// Cached pages are served as-is; the remote only backfills pages never
    /// seen locally. For content that does not change once created.
    CacheFirst,
    /// Every Refresh replaces the cached list with the remote's first page.
    #[default]
    ApiFirst,
}

impl FreshnessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessMode::CacheFirst => "cache_first",
            FreshnessMode::ApiFirst => "api_first",
        }
    }
}

impl fmt::Display for FreshnessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FreshnessMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cache_first" => Ok(FreshnessMode::CacheFirst),
            "api_first" => Ok(FreshnessMode::ApiFirst),
            _ => Err(Error::InvalidInput(format!("unknown freshness mode '{s}'"))),
        }
    }
}

/// Time-to-live check against a persisted fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlGate {
    ttl: Duration,
}

impl TtlGate {
    pub fn new(ttl: Duration) -> Self {
        TtlGate { ttl }
    }

    pub fn hours(hours: i64) -> Self {
        TtlGate::new(Duration::hours(hours))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True when nothing was ever fetched or the last fetch is at least one
    /// TTL old.
    pub fn is_stale(&self, last_fetched_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_fetched_at {
            None => true,
            Some(at) => now.signed_duration_since(at) >= self.ttl,
        }
    }
}

impl Default for TtlGate {
    fn default() -> Self {
        TtlGate::hours(DEFAULT_TTL_HOURS)
    }
}

/// A non-paged list cached under one implicit query and refreshed as a whole.
pub struct CachedResource<T> {
    store: Arc<PageStore>,
    fetcher: Arc<dyn RemotePageFetcher<T>>,
    clock: Arc<dyn ClockSource>,
    query: LogicalQuery,
    gate: TtlGate,
}

impl<T: Item> CachedResource<T> {
    pub fn new(
        store: Arc<PageStore>,
        fetcher: Arc<dyn RemotePageFetcher<T>>,
        clock: Arc<dyn ClockSource>,
        query: LogicalQuery,
        gate: TtlGate,
    ) -> Self {
        CachedResource {
            store,
            fetcher,
            clock,
            query,
            gate,
        }
    }

    pub fn query(&self) -> &LogicalQuery {
        &self.query
    }

    /// When the resource was last fetched, read from the store.
    pub fn last_fetched_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .store
            .read_remote_key(&self.query)?
            .map(|key| key.last_fetched_at))
    }

    /// Return the resource, fetching it first if the TTL has expired.
    ///
    /// If that fetch fails while a cached copy exists, the stale copy is
    /// served instead.
    pub async fn get(&self) -> std::result::Result<Vec<T>, SyncError> {
        let last = self.last_fetched_at()?;
        if !self.gate.is_stale(last, self.clock.now()) {
            debug!(query = %self.query, "serving cached resource");
            return Ok(self.cached()?);
        }

        match self.fetch_and_replace().await {
            Ok(items) => Ok(items),
            Err(e) if e.is_remote() && last.is_some() => {
                warn!(query = %self.query, error = %e, "refresh failed, serving stale resource");
                Ok(self.cached()?)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch and replace regardless of the TTL.
    pub async fn refresh(&self) -> std::result::Result<Vec<T>, SyncError> {
        self.fetch_and_replace().await
    }

    async fn fetch_and_replace(&self) -> std::result::Result<Vec<T>, SyncError> {
        debug!(query = %self.query, "fetching resource");
        let page = self.fetcher.fetch(&self.query, None).await?;
        let write = PageWrite {
            mode: WriteMode::Replace,
            items: page.items,
            prev_token: None,
            next_token: None,
            fetched_at: self.clock.now(),
        };
        self.store.write_page(&self.query, &write)?;
        Ok(self.cached()?)
    }

    fn cached(&self) -> Result<Vec<T>> {
        let rows: Vec<Row<T>> = self.store.read_page(&self.query, Position::Start, usize::MAX)?;
        Ok(rows.into_iter().map(|row| row.item).collect())
    }
}

#[cfg(test)]
#[path = "freshness_tests.rs"]
mod tests;
