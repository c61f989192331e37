// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription reconciliation.
//!
//! Subscribe and unsubscribe act on the local list immediately and leave a
//! pending mutation behind. [`Reconciler::push_pending`] replays those
//! mutations against the remote in sequence order; failures stay queued for
//! the next push. Until a mutation is confirmed, refreshes of the list keep
//! showing the local intent.

use chrono::{DateTime, Utc};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clock::ClockSource;
use crate::error::{Result, SyncError};
use crate::fetch::{BoxFuture, FetchResult};
use crate::mediator::RemoteMediator;
use crate::mutation::{MutationAction, PendingMutation};
use crate::page::Item;
use crate::query::{Direction, LogicalQuery};
use crate::store::PageStore;

/// Remote add/remove endpoints for the subscription list.
///
/// Must be idempotent: a mutation may be delivered more than once.
pub trait SubscriptionApi: Send + Sync {
    fn add<'a>(&'a self, id: &'a str) -> BoxFuture<'a, FetchResult<()>>;
    fn remove<'a>(&'a self, id: &'a str) -> BoxFuture<'a, FetchResult<()>>;
}

impl<A: SubscriptionApi + ?Sized> SubscriptionApi for Arc<A> {
    fn add<'a>(&'a self, id: &'a str) -> BoxFuture<'a, FetchResult<()>> {
        (**self).add(id)
    }

    fn remove<'a>(&'a self, id: &'a str) -> BoxFuture<'a, FetchResult<()>> {
        (**self).remove(id)
    }
}

/// A user action on the subscription list.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionChange<T> {
    Subscribe(T),
    Unsubscribe(String),
}

/// Outcome of one push pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Mutations confirmed by the remote.
    pub pushed: usize,
    /// Mutations that failed and stay queued.
    pub deferred: usize,
}

/// Keeps one remote subscription list consistent with local intent.
pub struct Reconciler<T> {
    store: Arc<PageStore>,
    api: Arc<dyn SubscriptionApi>,
    clock: Arc<dyn ClockSource>,
    query: LogicalQuery,
    _item: PhantomData<fn() -> T>,
}

impl<T: Item> Reconciler<T> {
    pub fn new(
        store: Arc<PageStore>,
        api: Arc<dyn SubscriptionApi>,
        clock: Arc<dyn ClockSource>,
        query: LogicalQuery,
    ) -> Self {
        Reconciler {
            store,
            api,
            clock,
            query,
            _item: PhantomData,
        }
    }

    pub fn query(&self) -> &LogicalQuery {
        &self.query
    }

    /// Apply a subscribe/unsubscribe locally and queue it for the remote.
    ///
    /// Replaces any earlier pending action on the same id. Returns the new
    /// mutation's sequence number.
    pub fn toggle(&self, change: SubscriptionChange<T>) -> Result<i64> {
        let now: DateTime<Utc> = self.clock.now();
        let seq = match &change {
            SubscriptionChange::Subscribe(item) => {
                let payload = serde_json::to_string(item)?;
                self.store.apply_local_mutation(
                    &self.query,
                    &item.item_id(),
                    MutationAction::Subscribe,
                    Some(&payload),
                    now,
                )?
            }
            SubscriptionChange::Unsubscribe(id) => self.store.apply_local_mutation(
                &self.query,
                id,
                MutationAction::Unsubscribe,
                None,
                now,
            )?,
        };
        debug!(query = %self.query, seq, "queued local subscription change");
        Ok(seq)
    }

    /// True if any local change is waiting to be pushed.
    pub fn has_pending_local(&self) -> Result<bool> {
        self.store.has_pending(&self.query)
    }

    pub fn pending(&self) -> Result<Vec<PendingMutation>> {
        self.store.pending_mutations(&self.query)
    }

    /// Push queued changes in sequence order.
    ///
    /// A confirmed change is dequeued unless a newer action on the same id
    /// replaced it meanwhile. Remote failures are logged and deferred; only
    /// local storage failures abort the pass.
    pub async fn push_pending(&self) -> std::result::Result<PushReport, SyncError> {
        let pending = self.store.pending_mutations(&self.query)?;
        let mut report = PushReport::default();

        for mutation in pending {
            let result = match mutation.action {
                MutationAction::Subscribe => self.api.add(&mutation.target_id).await,
                MutationAction::Unsubscribe => self.api.remove(&mutation.target_id).await,
            };
            match result {
                Ok(()) => {
                    if !self.store.delete_pending(mutation.seq)? {
                        debug!(seq = mutation.seq, "pushed mutation was superseded");
                    }
                    report.pushed += 1;
                }
                Err(e) => {
                    warn!(
                        target_id = %mutation.target_id,
                        action = %mutation.action,
                        error = %e,
                        "push deferred"
                    );
                    report.deferred += 1;
                }
            }
        }

        if report.pushed > 0 || report.deferred > 0 {
            info!(query = %self.query, pushed = report.pushed, deferred = report.deferred, "push complete");
        }
        Ok(report)
    }

    /// Push local intent, then pull the remote list.
    pub async fn sync(&self, mediator: &RemoteMediator<T>) -> std::result::Result<PushReport, SyncError> {
        let report = if self.has_pending_local()? {
            self.push_pending().await?
        } else {
            PushReport::default()
        };
        mediator.mediate(&self.query, Direction::Refresh).await?;
        Ok(report)
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
