// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quire_core::Item;

/// A thread, reply or timeline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<u32>,
}

impl Post {
    /// A post known only by id, shown until the remote list supplies the rest.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Post {
            id: id.into(),
            title: None,
            author: None,
            body: String::new(),
            posted_at: None,
            reply_count: None,
        }
    }
}

impl Item for Post {
    fn item_id(&self) -> String {
        self.id.clone()
    }
}
