// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use quire_core::{PushReport, SubscriptionChange};

use super::Workspace;
use crate::error::{Error, Result};
use crate::models::Post;

fn validate_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::FieldEmpty { field: "id" });
    }
    Ok(id)
}

/// Subscribe locally and queue the change for the remote.
///
/// The list shows the thread at once, using its cached copy from any feed
/// when there is one.
pub fn subscribe(ws: &Workspace, id: &str) -> Result<i64> {
    let id = validate_id(id)?;
    let post = ws
        .store()
        .find_item::<Post>(id)?
        .unwrap_or_else(|| Post::placeholder(id));
    Ok(ws.reconciler().toggle(SubscriptionChange::Subscribe(post))?)
}

/// Unsubscribe locally and queue the change for the remote.
pub fn unsubscribe(ws: &Workspace, id: &str) -> Result<i64> {
    let id = validate_id(id)?;
    Ok(ws
        .reconciler()
        .toggle(SubscriptionChange::Unsubscribe(id.to_string()))?)
}

/// Push queued subscription changes. Failed ones stay queued.
pub async fn push(ws: &Workspace) -> Result<PushReport> {
    ws.require_remote()?;
    Ok(ws.reconciler().push_pending().await?)
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
