// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Page, row and remote-key data types.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::query::LogicalQuery;

/// A domain item that can be cached in the page store.
///
/// The natural id is the upsert key within one query: re-fetching an item
/// with the same id updates it in place.
pub trait Item: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn item_id(&self) -> String;
}

/// Opaque cursor returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Token(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token(s)
    }
}

/// One fetch result. Transient: decomposed into row and remote-key writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Token for the page before this one; `None` means start of list.
    pub prev_token: Option<Token>,
    /// Token for the page after this one; `None` means end of list.
    pub next_token: Option<Token>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, prev_token: Option<Token>, next_token: Option<Token>) -> Self {
        Page {
            items,
            prev_token,
            next_token,
        }
    }

    /// A page with no items and no further pages in either direction.
    pub fn empty() -> Self {
        Page::new(Vec::new(), None, None)
    }

    /// Maps every item, stopping at the first failure.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            items,
            prev_token: self.prev_token,
            next_token: self.next_token,
        })
    }
}

/// One persisted result item.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub query: LogicalQuery,
    pub ordinal: i64,
    pub item: T,
}

/// Per-query pagination bookkeeping.
///
/// A `None` token is terminal: the remote confirmed there is nothing more in
/// that direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteKey {
    pub prev_token: Option<Token>,
    pub next_token: Option<Token>,
    pub last_fetched_at: DateTime<Utc>,
}

impl RemoteKey {
    /// True when the remote confirmed the end of the list.
    pub fn end_reached(&self) -> bool {
        self.next_token.is_none()
    }

    /// True when the remote confirmed the start of the list.
    pub fn start_reached(&self) -> bool {
        self.prev_token.is_none()
    }
}
