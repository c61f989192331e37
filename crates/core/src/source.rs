// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Paging source: serves pages of one query from the store.
//!
//! Keys handed to the caller are store ordinals. A source with a mediator
//! attached asks it for more data when the freshness mode requires it, or
//! when the local rows run out before the requested page is full.

use futures_util::stream::{self, Stream};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::freshness::FreshnessMode;
use crate::mediator::RemoteMediator;
use crate::page::{Item, Row};
use crate::query::{Direction, LogicalQuery};
use crate::store::{PageStore, Position};

/// What to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadParams {
    /// Reload from `anchor` (or the start of the list).
    Refresh {
        anchor: Option<i64>,
        load_size: usize,
    },
    /// Rows with ordinal at or after `key`.
    Append { key: i64, load_size: usize },
    /// Rows with ordinal before `key`.
    Prepend { key: i64, load_size: usize },
}

impl LoadParams {
    pub fn direction(&self) -> Direction {
        match self {
            LoadParams::Refresh { .. } => Direction::Refresh,
            LoadParams::Append { .. } => Direction::Append,
            LoadParams::Prepend { .. } => Direction::Prepend,
        }
    }

    pub fn load_size(&self) -> usize {
        match *self {
            LoadParams::Refresh { load_size, .. }
            | LoadParams::Append { load_size, .. }
            | LoadParams::Prepend { load_size, .. } => load_size,
        }
    }
}

/// Outcome of one load. Errors are values, never panics or early returns
/// across the source boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult<T> {
    Page {
        data: Vec<T>,
        /// Key for the rows before this page; `None` at the start of the list.
        prev_key: Option<i64>,
        /// Key for the rows after this page; `None` at the end of the list.
        next_key: Option<i64>,
    },
    Error(SyncError),
}

/// Serves pages of any query from the store, optionally backed by a mediator.
pub struct PagingSource<T> {
    store: Arc<PageStore>,
    mediator: Option<RemoteMediator<T>>,
    mode: FreshnessMode,
}

impl<T> Clone for PagingSource<T> {
    fn clone(&self) -> Self {
        PagingSource {
            store: Arc::clone(&self.store),
            mediator: self.mediator.clone(),
            mode: self.mode,
        }
    }
}

impl<T: Item> PagingSource<T> {
    /// A source backed by a mediator.
    pub fn new(mediator: RemoteMediator<T>, mode: FreshnessMode) -> Self {
        PagingSource {
            store: Arc::clone(mediator.store()),
            mediator: Some(mediator),
            mode,
        }
    }

    /// A source that only reads what is already cached.
    pub fn offline(store: Arc<PageStore>) -> Self {
        PagingSource {
            store,
            mediator: None,
            mode: FreshnessMode::CacheFirst,
        }
    }

    pub fn mode(&self) -> FreshnessMode {
        self.mode
    }

    pub fn store(&self) -> &Arc<PageStore> {
        &self.store
    }

    pub async fn load(&self, query: &LogicalQuery, params: LoadParams) -> LoadResult<T> {
        match self.try_load(query, params).await {
            Ok(result) => result,
            Err(error) => {
                debug!(query = %query, direction = %params.direction(), error = %error, "load failed");
                LoadResult::Error(error)
            }
        }
    }

    async fn try_load(
        &self,
        query: &LogicalQuery,
        params: LoadParams,
    ) -> Result<LoadResult<T>, SyncError> {
        let load_size = params.load_size();
        let (position, at) = match params {
            LoadParams::Refresh { anchor, .. } => {
                (anchor.map_or(Position::Start, Position::From), anchor.unwrap_or(0))
            }
            LoadParams::Append { key, .. } => (Position::From(key), key),
            LoadParams::Prepend { key, .. } => (Position::Before(key), key),
        };

        if let (LoadParams::Refresh { .. }, Some(mediator)) = (params, &self.mediator) {
            if self.refresh_needs_remote(query)? {
                mediator.mediate(query, Direction::Refresh).await?;
            }
            let rows = self.store.read_page(query, position, load_size)?;
            return self.page(query, rows, at);
        }

        let mut rows: Vec<Row<T>> = self.store.read_page(query, position, load_size)?;
        if let Some(mediator) = &self.mediator {
            let direction = params.direction();
            if direction != Direction::Refresh
                && rows.len() < load_size
                && self.remote_may_have_more(query, direction)?
            {
                debug!(query = %query, %direction, local = rows.len(), "local rows short, mediating");
                mediator.mediate(query, direction).await?;
                rows = self.store.read_page(query, position, load_size)?;
            }
        }
        self.page(query, rows, at)
    }

    fn refresh_needs_remote(&self, query: &LogicalQuery) -> Result<bool, SyncError> {
        Ok(match self.mode {
            FreshnessMode::ApiFirst => true,
            FreshnessMode::CacheFirst => self.store.read_remote_key(query)?.is_none(),
        })
    }

    fn remote_may_have_more(
        &self,
        query: &LogicalQuery,
        direction: Direction,
    ) -> Result<bool, SyncError> {
        let Some(key) = self.store.read_remote_key(query)? else {
            return Ok(true);
        };
        Ok(match direction {
            Direction::Prepend => key.prev_token.is_some(),
            Direction::Refresh | Direction::Append => key.next_token.is_some(),
        })
    }

    /// Build the result for `rows` read at key `at`.
    ///
    /// An empty read is only terminal in a direction when no local rows lie
    /// that way and the remote key holds no token for it; otherwise the
    /// requested key is handed back so the caller can ask again.
    fn page(
        &self,
        query: &LogicalQuery,
        rows: Vec<Row<T>>,
        at: i64,
    ) -> Result<LoadResult<T>, SyncError> {
        // Without a mediator only local rows count.
        let remote_key = match self.mediator {
            Some(_) => self.store.read_remote_key(query)?,
            None => None,
        };

        let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
            let more_after = self.store.has_rows_after(query, at - 1)?
                || remote_key.as_ref().is_some_and(|k| k.next_token.is_some());
            let more_before = self.store.has_rows_before(query, at)?
                || remote_key.as_ref().is_some_and(|k| k.prev_token.is_some());
            return Ok(LoadResult::Page {
                data: Vec::new(),
                prev_key: more_before.then_some(at),
                next_key: more_after.then_some(at),
            });
        };

        let more_after = self.store.has_rows_after(query, last.ordinal)?
            || remote_key.as_ref().is_some_and(|k| k.next_token.is_some());
        let more_before = self.store.has_rows_before(query, first.ordinal)?
            || remote_key.as_ref().is_some_and(|k| k.prev_token.is_some());

        Ok(LoadResult::Page {
            prev_key: more_before.then_some(first.ordinal),
            next_key: more_after.then_some(last.ordinal + 1),
            data: rows.into_iter().map(|row| row.item).collect(),
        })
    }

    /// Observe the first `load_size` rows of a query.
    ///
    /// Lazy: nothing runs until the stream is polled. The first item is a
    /// Refresh load; every later item is a local re-read after a commit to
    /// that query. Each call returns an independent stream.
    pub fn observe(
        &self,
        query: LogicalQuery,
        load_size: usize,
    ) -> impl Stream<Item = LoadResult<T>> + Send + 'static {
        let initial: Option<watch::Receiver<u64>> = None;
        stream::unfold(
            (self.clone(), query, initial),
            move |(source, query, commits)| async move {
                let (result, commits) = match commits {
                    None => {
                        // Subscribe first so no commit after the load is missed.
                        let commits = source.store.subscribe(&query);
                        let params = LoadParams::Refresh {
                            anchor: None,
                            load_size,
                        };
                        (source.load(&query, params).await, commits)
                    }
                    Some(mut commits) => {
                        commits.changed().await.ok()?;
                        let result = source
                            .store
                            .read_page(&query, Position::Start, load_size)
                            .map_err(SyncError::from)
                            .and_then(|rows| source.page(&query, rows, 0))
                            .unwrap_or_else(LoadResult::Error);
                        (result, commits)
                    }
                };
                Some((result, (source, query, Some(commits))))
            },
        )
    }
}

/// Load state of a [`Pager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading(Direction),
    Error {
        direction: Direction,
        error: SyncError,
    },
}

/// Accumulates pages of one query for a single consumer.
///
/// `Idle → Loading(direction) → Idle` on success, `→ Error` on failure;
/// [`Pager::retry`] re-issues the failed direction.
pub struct Pager<T> {
    source: PagingSource<T>,
    query: LogicalQuery,
    load_size: usize,
    items: Vec<T>,
    prev_key: Option<i64>,
    next_key: Option<i64>,
    loaded: bool,
    state: LoadState,
}

impl<T: Item> Pager<T> {
    pub fn new(source: PagingSource<T>, query: LogicalQuery, load_size: usize) -> Self {
        Pager {
            source,
            query,
            load_size,
            items: Vec::new(),
            prev_key: None,
            next_key: None,
            loaded: false,
            state: LoadState::Idle,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn query(&self) -> &LogicalQuery {
        &self.query
    }

    /// True once a load confirmed there is nothing after the loaded window.
    pub fn end_reached(&self) -> bool {
        self.loaded && self.next_key.is_none()
    }

    /// True once a load confirmed there is nothing before the loaded window.
    pub fn start_reached(&self) -> bool {
        self.loaded && self.prev_key.is_none()
    }

    /// Reload from the start of the list, discarding the loaded window.
    pub async fn refresh(&mut self) -> &LoadState {
        self.run(Direction::Refresh).await
    }

    /// Load the next page. Refreshes first if nothing is loaded yet.
    pub async fn append(&mut self) -> &LoadState {
        if !self.loaded {
            return self.run(Direction::Refresh).await;
        }
        self.run(Direction::Append).await
    }

    /// Load the page before the loaded window.
    pub async fn prepend(&mut self) -> &LoadState {
        if !self.loaded {
            return self.run(Direction::Refresh).await;
        }
        self.run(Direction::Prepend).await
    }

    /// Re-issue the load that failed; a no-op unless in the error state.
    pub async fn retry(&mut self) -> &LoadState {
        match self.state {
            LoadState::Error { direction, .. } => self.run(direction).await,
            _ => &self.state,
        }
    }

    async fn run(&mut self, direction: Direction) -> &LoadState {
        let load_size = self.load_size;
        let params = match direction {
            Direction::Refresh => LoadParams::Refresh {
                anchor: None,
                load_size,
            },
            Direction::Append => match self.next_key {
                Some(key) => LoadParams::Append { key, load_size },
                None => return &self.state,
            },
            Direction::Prepend => match self.prev_key {
                Some(key) => LoadParams::Prepend { key, load_size },
                None => return &self.state,
            },
        };

        self.state = LoadState::Loading(direction);
        match self.source.load(&self.query, params).await {
            LoadResult::Page {
                data,
                prev_key,
                next_key,
            } => {
                match direction {
                    Direction::Refresh => {
                        self.items = data;
                        self.prev_key = prev_key;
                        self.next_key = next_key;
                    }
                    Direction::Append => {
                        self.items.extend(data);
                        self.next_key = next_key;
                    }
                    Direction::Prepend => {
                        self.items.splice(0..0, data);
                        self.prev_key = prev_key;
                    }
                }
                self.loaded = true;
                self.state = LoadState::Idle;
            }
            LoadResult::Error(error) => {
                warn!(query = %self.query, %direction, error = %error, "page load failed");
                self.state = LoadState::Error { direction, error };
            }
        }
        &self.state
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
