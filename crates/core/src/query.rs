// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Logical query keys and load directions.
//!
//! A [`LogicalQuery`] names one paged list instance, e.g. "thread 12345,
//! PO-only=false". It scopes row storage, remote-key bookkeeping, change
//! notification and in-flight coalescing.
//!
//! Canonical form: `{kind}` followed by `/{name}={value}` for each parameter,
//! parameters sorted by name. Reserved characters (`%`, `/`, `=`) in names
//! and values are percent-escaped, so two queries built from the same
//! parameters in any order compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::Error;

/// Opaque, hashable, immutable key identifying one paged list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogicalQuery {
    key: Arc<str>,
}

impl LogicalQuery {
    /// Creates a query of the given kind with no parameters.
    pub fn new(kind: &str) -> Self {
        LogicalQuery {
            key: Arc::from(escape(kind)),
        }
    }

    /// Returns a new query with `name` set to `value`.
    ///
    /// Setting a name twice keeps the last value.
    #[must_use]
    pub fn with(&self, name: &str, value: impl fmt::Display) -> Self {
        let mut params: Vec<(String, String)> = self
            .params()
            .filter(|(n, _)| n != name)
            .collect();
        params.push((name.to_string(), value.to_string()));
        params.sort();

        let mut key = escape(&self.kind());
        for (n, v) in &params {
            key.push('/');
            key.push_str(&escape(n));
            key.push('=');
            key.push_str(&escape(v));
        }
        LogicalQuery {
            key: Arc::from(key),
        }
    }

    /// The query kind (the first segment).
    pub fn kind(&self) -> String {
        let raw = self.key.split('/').next().unwrap_or_default();
        unescape(raw)
    }

    /// Looks up a parameter value by name.
    pub fn param(&self, name: &str) -> Option<String> {
        self.params().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterates over `(name, value)` pairs in canonical order.
    pub fn params(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.key.split('/').skip(1).filter_map(|segment| {
            let (n, v) = segment.split_once('=')?;
            Some((unescape(n), unescape(v)))
        })
    }

    /// The canonical string form, used as the storage key.
    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for LogicalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl FromStr for LogicalQuery {
    type Err = Error;

    /// Parses a canonical key back into a query (e.g. from the store).
    fn from_str(s: &str) -> Result<Self, Error> {
        let mut segments = s.split('/');
        let kind = segments.next().unwrap_or_default();
        if kind.is_empty() {
            return Err(Error::InvalidInput(format!("empty query kind in '{s}'")));
        }

        let mut query = LogicalQuery::new(&unescape(kind));
        for segment in segments {
            let (n, v) = segment.split_once('=').ok_or_else(|| {
                Error::InvalidInput(format!("malformed query segment '{segment}' in '{s}'"))
            })?;
            query = query.with(&unescape(n), unescape(v));
        }
        Ok(query)
    }
}

impl TryFrom<String> for LogicalQuery {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl From<LogicalQuery> for String {
    fn from(q: LogicalQuery) -> Self {
        q.key.to_string()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(s: &str) -> String {
    s.replace("%2F", "/").replace("%3D", "=").replace("%25", "%")
}

/// Direction of a load or mediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Initial or forced reload from the start of the list.
    Refresh,
    /// Load beyond the last loaded item.
    Append,
    /// Load before the first loaded item.
    Prepend,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Refresh => "refresh",
            Direction::Append => "append",
            Direction::Prepend => "prepend",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
