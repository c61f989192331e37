// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use quire_core::{Direction, PushReport};

use super::Workspace;
use crate::error::Result;
use crate::feed::Feed;

/// Outcome of a pull to refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    /// Rows cached for the feed after the refresh.
    pub rows: usize,
    pub end_reached: bool,
    /// Local subscription changes pushed first, for the reconciled feed.
    pub push: Option<PushReport>,
}

/// Replace the cached first page of a feed with a fresh one.
///
/// The subscription list pushes pending local changes before pulling.
pub async fn refresh(ws: &Workspace, feed: &Feed) -> Result<RefreshReport> {
    ws.require_remote()?;
    let query = feed.query();
    let mediator = ws.mediator();

    let push = if feed.is_reconciled() {
        Some(ws.reconciler().sync(&mediator).await?)
    } else {
        mediator.mediate(&query, Direction::Refresh).await?;
        None
    };

    let end_reached = ws
        .store()
        .read_remote_key(&query)?
        .is_some_and(|key| key.end_reached());
    Ok(RefreshReport {
        rows: ws.store().read_count(&query)?,
        end_reached,
        push,
    })
}

/// Drop every cached row and the paging state of a feed.
///
/// Returns the number of rows removed.
pub fn clear(ws: &Workspace, feed: &Feed) -> Result<usize> {
    let query = feed.query();
    let rows = ws.store().read_count(&query)?;
    ws.store().invalidate(&query)?;
    Ok(rows)
}

#[cfg(test)]
#[path = "refresh_tests.rs"]
mod tests;
