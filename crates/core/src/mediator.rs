// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote mediator: brings the page store up to date with the remote API.
//!
//! One mediation reads the query's [`RemoteKey`](crate::RemoteKey), picks the
//! token for the requested direction, fetches one page and commits it with
//! the new key in a single store transaction. A fetch failure never touches
//! the store.
//!
//! Concurrent calls for the same query and direction share one in-flight
//! future. A per-query async lock orders mediations across directions, so
//! every Append sees the key written by the previous one.

use futures_util::future::{FutureExt, Shared};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::clock::ClockSource;
use crate::error::SyncError;
use crate::fetch::{BoxFuture, RemotePageFetcher};
use crate::page::Item;
use crate::query::{Direction, LogicalQuery};
use crate::store::{lock, PageStore, PageWrite, WriteMode};

/// Outcome of a successful mediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mediation {
    /// The remote has nothing more in the mediated direction.
    pub end_reached: bool,
}

/// Result handed to every caller of one mediation.
pub type MediationResult = Result<Mediation, SyncError>;

type InFlightKey = (LogicalQuery, Direction);

struct InFlight {
    id: u64,
    future: Shared<BoxFuture<'static, MediationResult>>,
    waiters: usize,
}

struct Inner<T> {
    store: Arc<PageStore>,
    fetcher: Arc<dyn RemotePageFetcher<T>>,
    clock: Arc<dyn ClockSource>,
    in_flight: Mutex<HashMap<InFlightKey, InFlight>>,
    write_locks: Mutex<HashMap<LogicalQuery, Arc<tokio::sync::Mutex<()>>>>,
    next_id: AtomicU64,
}

/// Refreshes the page store from a remote page fetcher on demand.
///
/// Cheap to clone; clones share coalescing state.
pub struct RemoteMediator<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for RemoteMediator<T> {
    fn clone(&self) -> Self {
        RemoteMediator {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Item> RemoteMediator<T> {
    pub fn new(
        store: Arc<PageStore>,
        fetcher: Arc<dyn RemotePageFetcher<T>>,
        clock: Arc<dyn ClockSource>,
    ) -> Self {
        RemoteMediator {
            inner: Arc::new(Inner {
                store,
                fetcher,
                clock,
                in_flight: Mutex::new(HashMap::new()),
                write_locks: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn store(&self) -> &Arc<PageStore> {
        &self.inner.store
    }

    /// Fetch one page in `direction` and commit it.
    ///
    /// Joins an identical in-flight mediation instead of issuing a second
    /// request. Dropping every caller of an in-flight mediation cancels its
    /// network call; a store write that already started still commits or
    /// rolls back as a whole.
    pub async fn mediate(&self, query: &LogicalQuery, direction: Direction) -> MediationResult {
        let key: InFlightKey = (query.clone(), direction);
        let (id, future) = {
            let mut in_flight = lock(&self.inner.in_flight);
            match in_flight.get_mut(&key) {
                Some(entry) => {
                    entry.waiters += 1;
                    debug!(query = %query, %direction, "joining in-flight mediation");
                    (entry.id, entry.future.clone())
                }
                None => {
                    let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
                    let future = Inner::spawn_unit(Arc::clone(&self.inner), key.clone(), id);
                    in_flight.insert(
                        key.clone(),
                        InFlight {
                            id,
                            future: future.clone(),
                            waiters: 1,
                        },
                    );
                    (id, future)
                }
            }
        };

        let _waiter = Waiter {
            inner: &self.inner,
            key,
            id,
        };
        future.await
    }
}

impl<T: Item> Inner<T> {
    /// Build the shared unit of work for one mediation. It unregisters
    /// itself from the in-flight map when it completes.
    fn spawn_unit(
        inner: Arc<Self>,
        key: InFlightKey,
        id: u64,
    ) -> Shared<BoxFuture<'static, MediationResult>> {
        let unit: BoxFuture<'static, MediationResult> = Box::pin(async move {
            let result = inner.run(&key.0, key.1).await;
            let finished = {
                let mut in_flight = lock(&inner.in_flight);
                match in_flight.get(&key) {
                    Some(entry) if entry.id == id => in_flight.remove(&key),
                    _ => None,
                }
            };
            drop(finished);
            result
        });
        unit.shared()
    }

    fn write_lock(&self, query: &LogicalQuery) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = lock(&self.write_locks);
        Arc::clone(locks.entry(query.clone()).or_default())
    }

    async fn run(&self, query: &LogicalQuery, requested: Direction) -> MediationResult {
        let _write = self.write_lock(query).lock_owned().await;

        let remote_key = self.store.read_remote_key(query)?;
        let direction = match remote_key {
            None => Direction::Refresh,
            Some(_) => requested,
        };

        let token = match (direction, &remote_key) {
            (Direction::Append, Some(key)) => match &key.next_token {
                Some(token) => Some(token.clone()),
                None => {
                    debug!(query = %query, "end of list already reached, skipping fetch");
                    return Ok(Mediation { end_reached: true });
                }
            },
            (Direction::Prepend, Some(key)) => match &key.prev_token {
                Some(token) => Some(token.clone()),
                None => {
                    debug!(query = %query, "start of list already reached, skipping fetch");
                    return Ok(Mediation { end_reached: true });
                }
            },
            _ => None,
        };

        debug!(query = %query, %direction, token = ?token, "fetching page");
        let page = self
            .fetcher
            .fetch(query, token.as_ref())
            .await
            .map_err(|e| {
                warn!(query = %query, %direction, error = %e, "fetch failed, cache left untouched");
                SyncError::from(e)
            })?;

        let end_reached = match direction {
            Direction::Prepend => page.prev_token.is_none(),
            Direction::Refresh | Direction::Append => page.next_token.is_none(),
        };
        let mode = match direction {
            Direction::Refresh => WriteMode::Replace,
            Direction::Append => WriteMode::Append,
            Direction::Prepend => WriteMode::Prepend,
        };

        let write = PageWrite::from_page(mode, page, self.clock.now());
        let summary = self.store.write_page(query, &write)?;
        debug!(
            query = %query,
            %direction,
            inserted = summary.inserted,
            updated = summary.updated,
            end_reached,
            "page committed"
        );
        Ok(Mediation { end_reached })
    }
}

/// Registration of one caller on an in-flight mediation. The last caller to
/// leave before completion removes the entry, dropping the network future.
struct Waiter<'a, T> {
    inner: &'a Inner<T>,
    key: InFlightKey,
    id: u64,
}

impl<T> Drop for Waiter<'_, T> {
    fn drop(&mut self) {
        let abandoned = {
            let mut in_flight = lock(&self.inner.in_flight);
            let last = match in_flight.get_mut(&self.key) {
                Some(entry) if entry.id == self.id => {
                    entry.waiters = entry.waiters.saturating_sub(1);
                    entry.waiters == 0
                }
                _ => false,
            };
            if last {
                debug!(query = %self.key.0, direction = %self.key.1, "mediation abandoned");
                in_flight.remove(&self.key)
            } else {
                None
            }
        };
        drop(abandoned);
    }
}

#[cfg(test)]
#[path = "mediator_tests.rs"]
mod tests;
