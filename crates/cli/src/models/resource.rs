// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use quire_core::Item;

/// A forum category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Item for Category {
    fn item_id(&self) -> String {
        self.id.clone()
    }
}

/// The daily notice, delivered as a list of dated entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    pub text: String,
}

impl Item for Notice {
    fn item_id(&self) -> String {
        self.id.clone()
    }
}
