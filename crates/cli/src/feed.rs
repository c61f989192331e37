// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Feed names accepted on the command line.
//!
//! A feed maps to one [`LogicalQuery`] and the freshness mode used when
//! reading it:
//!
//! | Feed | Query | Mode |
//! |---|---|---|
//! | `forum:<id>` | `forum/id=<id>` | api first |
//! | `timeline:<id>` | `timeline/id=<id>` | api first |
//! | `thread:<id>[:po]` | `thread/id=<id>/po=<bool>` | cache first |
//! | `subscriptions` | `subscriptions` | api first |
//!
//! Thread replies never change once posted, so cached thread pages are only
//! backfilled, never refetched.

use std::fmt;
use std::str::FromStr;

use quire_core::{FreshnessMode, LogicalQuery};

use crate::error::Error;

/// One paged list the CLI can read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Forum(String),
    Timeline(String),
    Thread { id: String, po_only: bool },
    Subscriptions,
}

impl Feed {
    pub fn query(&self) -> LogicalQuery {
        match self {
            Feed::Forum(id) => LogicalQuery::new("forum").with("id", id),
            Feed::Timeline(id) => LogicalQuery::new("timeline").with("id", id),
            Feed::Thread { id, po_only } => LogicalQuery::new("thread")
                .with("id", id)
                .with("po", po_only),
            Feed::Subscriptions => subscriptions_query(),
        }
    }

    pub fn mode(&self) -> FreshnessMode {
        match self {
            Feed::Thread { .. } => FreshnessMode::CacheFirst,
            Feed::Forum(_) | Feed::Timeline(_) | Feed::Subscriptions => FreshnessMode::ApiFirst,
        }
    }

    /// True for the list whose local edits are pushed before refreshing.
    pub fn is_reconciled(&self) -> bool {
        matches!(self, Feed::Subscriptions)
    }
}

/// Query of the user's subscription list.
pub fn subscriptions_query() -> LogicalQuery {
    LogicalQuery::new("subscriptions")
}

/// Query of the forum category list.
pub fn categories_query() -> LogicalQuery {
    LogicalQuery::new("categories")
}

/// Query of the daily notice.
pub fn notice_query() -> LogicalQuery {
    LogicalQuery::new("notice")
}

impl FromStr for Feed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFeed(s.to_string());
        let mut parts = s.split(':');
        let kind = parts.next().unwrap_or_default();
        let id = parts.next().map(str::trim);
        let flag = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        let feed = match (kind, id, flag) {
            ("subscriptions", None, None) => Feed::Subscriptions,
            ("forum", Some(id), None) if !id.is_empty() => Feed::Forum(id.to_string()),
            ("timeline", Some(id), None) if !id.is_empty() => Feed::Timeline(id.to_string()),
            ("thread", Some(id), None) if !id.is_empty() => Feed::Thread {
                id: id.to_string(),
                po_only: false,
            },
            ("thread", Some(id), Some("po")) if !id.is_empty() => Feed::Thread {
                id: id.to_string(),
                po_only: true,
            },
            _ => return Err(invalid()),
        };
        Ok(feed)
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Forum(id) => write!(f, "forum:{}", id),
            Feed::Timeline(id) => write!(f, "timeline:{}", id),
            Feed::Thread { id, po_only: false } => write!(f, "thread:{}", id),
            Feed::Thread { id, po_only: true } => write!(f, "thread:{}:po", id),
            Feed::Subscriptions => f.write_str("subscriptions"),
        }
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
