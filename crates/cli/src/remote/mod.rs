// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote forum access.
//!
//! - [`protocol`]: JSON messages exchanged with the server
//! - [`transport`]: WebSocket transport and its trait seam
//! - [`client`]: request/reply client implementing the engine's remote traits

mod client;
pub mod protocol;
mod transport;

pub use client::WebSocketClient;
pub use transport::{Transport, TransportError, TransportResult, WebSocketTransport};

use serde_json::Value;

use quire_core::{
    BoxFuture, FetchError, FetchResult, LogicalQuery, Page, RemoteApiClient, SubscriptionApi, Token,
};

/// Everything the commands need from a remote: paged lists and the
/// subscription endpoints.
pub trait ForumRemote: RemoteApiClient<Raw = Value> + SubscriptionApi {}

impl<R: RemoteApiClient<Raw = Value> + SubscriptionApi> ForumRemote for R {}

/// Stand-in remote for workspaces without a `[remote]` section.
///
/// Every call fails as a transport error, so cached data is still served
/// and local subscription changes stay queued.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

const OFFLINE: &str = "no remote configured";

impl RemoteApiClient for Offline {
    type Raw = Value;

    fn fetch_page<'a>(
        &'a self,
        _endpoint: &'a LogicalQuery,
        _token: Option<&'a Token>,
        _page_size: usize,
    ) -> BoxFuture<'a, FetchResult<Page<Value>>> {
        Box::pin(async { Err(FetchError::Transport(OFFLINE.to_string())) })
    }
}

impl SubscriptionApi for Offline {
    fn add<'a>(&'a self, _id: &'a str) -> BoxFuture<'a, FetchResult<()>> {
        Box::pin(async { Err(FetchError::Transport(OFFLINE.to_string())) })
    }

    fn remove<'a>(&'a self, _id: &'a str) -> BoxFuture<'a, FetchResult<()>> {
        Box::pin(async { Err(FetchError::Transport(OFFLINE.to_string())) })
    }
}
