// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Domain items served by the forum remote.
//!
//! Every item arrives as a JSON object and is decoded by [`decode`], which
//! doubles as the [`Mapper`](quire_core::Mapper) for the remote client.

mod post;
mod resource;

pub use post::Post;
pub use resource::{Category, Notice};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use quire_core::{FetchError, FetchResult, Item};

/// Decodes one wire item, rejecting items without a usable id.
pub fn decode<T: Item + DeserializeOwned>(raw: Value) -> FetchResult<T> {
    let item: T = serde_json::from_value(raw).map_err(|e| FetchError::Decode(e.to_string()))?;
    if item.item_id().trim().is_empty() {
        return Err(FetchError::Decode("item has an empty id".to_string()));
    }
    Ok(item)
}

/// Accepts ids sent either as strings or as numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
