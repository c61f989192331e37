// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request/reply client for the forum remote.
//!
//! Connects lazily on the first request and keeps the connection for later
//! ones. Requests are serialized over the single connection; each one is
//! bounded by the request timeout, connect included. Any transport failure
//! drops the connection so the next request starts from a fresh one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use quire_core::{
    BoxFuture, FetchError, FetchResult, LogicalQuery, Page, RemoteApiClient, SubscriptionApi, Token,
};

use super::protocol::{ClientMessage, ServerMessage};
use super::transport::{Transport, WebSocketTransport};

/// Client for the forum remote over a [`Transport`].
pub struct WebSocketClient<T: Transport = WebSocketTransport> {
    url: String,
    timeout: Duration,
    next_request_id: AtomicU64,
    transport: tokio::sync::Mutex<T>,
}

impl WebSocketClient<WebSocketTransport> {
    /// Create a client with the default WebSocket transport.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        WebSocketClient::with_transport(url, timeout, WebSocketTransport::new())
    }
}

impl<T: Transport> WebSocketClient<T> {
    /// Create a client with a custom transport (for testing).
    pub fn with_transport(url: impl Into<String>, timeout: Duration, transport: T) -> Self {
        WebSocketClient {
            url: url.into(),
            timeout,
            next_request_id: AtomicU64::new(1),
            transport: tokio::sync::Mutex::new(transport),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_id(&self) -> u64 {
        self.next_request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Send one request and wait for its reply.
    async fn request(&self, msg: ClientMessage) -> FetchResult<ServerMessage> {
        let request_id = msg.request_id();
        let mut transport = self.transport.lock().await;

        let result = transport.round_trip(&self.url, msg, self.timeout).await;
        match result {
            Ok(reply) => Ok(reply),
            Err(e) => {
                warn!(url = %self.url, request_id, error = %e, "request failed, dropping connection");
                // Best effort: the connection is discarded either way.
                let _ = transport.disconnect().await;
                Err(e.into())
            }
        }
    }

    async fn expect_ack(&self, msg: ClientMessage) -> FetchResult<()> {
        match self.request(msg).await? {
            ServerMessage::Ack { .. } => Ok(()),
            ServerMessage::Error { message, .. } => Err(FetchError::Transport(message)),
            ServerMessage::Page { .. } => Err(FetchError::Decode(
                "expected an ack, got a page".to_string(),
            )),
        }
    }
}

impl<T: Transport> RemoteApiClient for WebSocketClient<T> {
    type Raw = Value;

    fn fetch_page<'a>(
        &'a self,
        endpoint: &'a LogicalQuery,
        token: Option<&'a Token>,
        page_size: usize,
    ) -> BoxFuture<'a, FetchResult<Page<Value>>> {
        Box::pin(async move {
            let msg = ClientMessage::FetchPage {
                request_id: self.request_id(),
                endpoint: endpoint.to_string(),
                token: token.cloned(),
                page_size,
            };
            match self.request(msg).await? {
                ServerMessage::Page {
                    items,
                    prev_token,
                    next_token,
                    ..
                } => {
                    debug!(%endpoint, items = items.len(), "page received");
                    Ok(Page::new(items, prev_token, next_token))
                }
                ServerMessage::Error { message, .. } => Err(FetchError::Transport(message)),
                ServerMessage::Ack { .. } => Err(FetchError::Decode(
                    "expected a page, got an ack".to_string(),
                )),
            }
        })
    }
}

impl<T: Transport> SubscriptionApi for WebSocketClient<T> {
    fn add<'a>(&'a self, id: &'a str) -> BoxFuture<'a, FetchResult<()>> {
        Box::pin(self.expect_ack(ClientMessage::Subscribe {
            request_id: self.request_id(),
            id: id.to_string(),
        }))
    }

    fn remove<'a>(&'a self, id: &'a str) -> BoxFuture<'a, FetchResult<()>> {
        Box::pin(self.expect_ack(ClientMessage::Unsubscribe {
            request_id: self.request_id(),
            id: id.to_string(),
        }))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
