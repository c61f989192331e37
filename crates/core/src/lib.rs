// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! quire-core: offline-first paginated synchronization engine.
//!
//! Paged lists are served from a local SQLite [`PageStore`] while a
//! [`RemoteMediator`] refreshes that store from a remote paged API:
//!
//! ```text
//! ┌──────────────┐ load  ┌─────────────┐ mediate ┌────────────────┐ fetch ┌─────────┐
//! │ PagingSource │──────►│  PageStore  │◄────────│ RemoteMediator │──────►│ Fetcher │
//! │   (Pager)    │◄──────│  (SQLite)   │  write  │  (coalescing)  │◄──────│ (remote)│
//! └──────────────┘ rows  └─────────────┘         └────────────────┘ page  └─────────┘
//!                               ▲
//!                               │ pending overlay
//!                        ┌──────────────┐ add/remove ┌─────────────────┐
//!                        │  Reconciler  │───────────►│ SubscriptionApi │
//!                        └──────────────┘            └─────────────────┘
//! ```
//!
//! Freshness is decided per call site ([`FreshnessMode`]) or by a TTL gate
//! ([`CachedResource`]) that reads `last_fetched_at` back from the store.

pub mod clock;
pub mod error;
pub mod fetch;
pub mod freshness;
pub mod mediator;
pub mod mutation;
pub mod page;
pub mod query;
pub mod reconcile;
pub mod source;
pub mod store;

#[cfg(test)]
mod test_support;

pub use clock::{ClockSource, SystemClock};
pub use error::{Error, Result, SyncError};
pub use fetch::{
    BoxFuture, FetchError, FetchResult, MappedFetcher, Mapper, RemoteApiClient, RemotePageFetcher,
};
pub use freshness::{CachedResource, FreshnessMode, TtlGate, DEFAULT_TTL_HOURS};
pub use mediator::{Mediation, MediationResult, RemoteMediator};
pub use mutation::{MutationAction, PendingMutation};
pub use page::{Item, Page, RemoteKey, Row, Token};
pub use query::{Direction, LogicalQuery};
pub use reconcile::{PushReport, Reconciler, SubscriptionApi, SubscriptionChange};
pub use source::{LoadParams, LoadResult, LoadState, Pager, PagingSource};
pub use store::{PageStore, PageWrite, Position, QuerySummary, WriteMode, WriteSummary};
