// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::warn;

use quire_core::{LoadParams, LoadResult, PagingSource};

use super::Workspace;
use crate::error::Result;
use crate::feed::Feed;
use crate::models::Post;

/// One page of a feed as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub feed: Feed,
    pub items: Vec<Post>,
    /// More rows exist after this page, locally or remotely.
    pub more: bool,
    /// Set when the remote failed and cached rows were served instead.
    pub stale: Option<String>,
}

/// Load the first page of a feed.
///
/// If the remote fails, the cached copy is served with a warning; the error
/// is only returned when nothing is cached either.
pub async fn read(ws: &Workspace, feed: &Feed, limit: usize, offline: bool) -> Result<Listing> {
    let params = LoadParams::Refresh {
        anchor: None,
        load_size: limit,
    };
    let query = feed.query();

    match ws.source(feed, offline).load(&query, params).await {
        LoadResult::Page { data, next_key, .. } => Ok(listing(feed, data, next_key, None)),
        LoadResult::Error(e) if e.is_remote() => {
            warn!(feed = %feed, error = %e, "remote unavailable, serving cache");
            let cached = PagingSource::offline(ws.store().clone())
                .load(&query, params)
                .await;
            match cached {
                LoadResult::Page { data, next_key, .. } if !data.is_empty() => {
                    Ok(listing(feed, data, next_key, Some(e.to_string())))
                }
                _ => Err(e.into()),
            }
        }
        LoadResult::Error(e) => Err(e.into()),
    }
}

/// Load the page after the last cached row, fetching it if needed.
///
/// Falls back to [`read`] when nothing is cached yet.
pub async fn more(ws: &Workspace, feed: &Feed, limit: usize, offline: bool) -> Result<Listing> {
    let query = feed.query();
    let Some((_, last)) = ws.store().bounds(&query)? else {
        return read(ws, feed, limit, offline).await;
    };

    let params = LoadParams::Append {
        key: last + 1,
        load_size: limit,
    };
    match ws.source(feed, offline).load(&query, params).await {
        LoadResult::Page { data, next_key, .. } => Ok(listing(feed, data, next_key, None)),
        LoadResult::Error(e) => Err(e.into()),
    }
}

fn listing(feed: &Feed, items: Vec<Post>, next_key: Option<i64>, stale: Option<String>) -> Listing {
    Listing {
        feed: feed.clone(),
        items,
        more: next_key.is_some(),
        stale,
    }
}

#[cfg(test)]
#[path = "read_tests.rs"]
mod tests;
