// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use quire_core::{PendingMutation, QuerySummary};

use super::Workspace;
use crate::error::Result;
use crate::feed::subscriptions_query;

/// What is cached locally and what is waiting to be pushed.
#[derive(Debug, Clone)]
pub struct Status {
    pub remote: Option<String>,
    pub queries: Vec<QuerySummary>,
    pub pending: Vec<PendingMutation>,
}

pub fn status(ws: &Workspace) -> Result<Status> {
    Ok(Status {
        remote: ws.config.remote.as_ref().map(|remote| remote.url.clone()),
        queries: ws.store().summaries()?,
        pending: ws.store().pending_mutations(&subscriptions_query())?,
    })
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
