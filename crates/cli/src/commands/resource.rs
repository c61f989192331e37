// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::de::DeserializeOwned;

use quire_core::{Item, LogicalQuery};

use super::Workspace;
use crate::error::Result;
use crate::feed::{categories_query, notice_query};
use crate::models::{Category, Notice};

/// Forum categories, refetched once the TTL has expired.
pub async fn categories(ws: &Workspace, force: bool) -> Result<Vec<Category>> {
    load(ws, categories_query(), force).await
}

/// Today's notice, refetched once the TTL has expired.
pub async fn notice(ws: &Workspace, force: bool) -> Result<Vec<Notice>> {
    load(ws, notice_query(), force).await
}

async fn load<T: Item + DeserializeOwned>(
    ws: &Workspace,
    query: LogicalQuery,
    force: bool,
) -> Result<Vec<T>> {
    let resource = ws.resource::<T>(query);
    let items = if force {
        ws.require_remote()?;
        resource.refresh().await?
    } else {
        resource.get().await?
    };
    Ok(items)
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
