// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending local mutations awaiting remote confirmation.
//!
//! A pending mutation is created when the user subscribes or unsubscribes
//! before the remote API has confirmed it, and deleted once a push succeeds.
//! It is never edited: a new action on the same target replaces the row and
//! takes a fresh sequence number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::query::LogicalQuery;

/// The intended remote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationAction {
    Subscribe,
    Unsubscribe,
}

impl MutationAction {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationAction::Subscribe => "subscribe",
            MutationAction::Unsubscribe => "unsubscribe",
        }
    }
}

impl fmt::Display for MutationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MutationAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "subscribe" => Ok(MutationAction::Subscribe),
            "unsubscribe" => Ok(MutationAction::Unsubscribe),
            _ => Err(Error::CorruptedData(format!("invalid mutation action '{s}'"))),
        }
    }
}

/// A local-only marker for an unconfirmed subscribe/unsubscribe.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    /// Monotonically increasing local sequence number.
    pub seq: i64,
    /// The list the mutation applies to.
    pub query: LogicalQuery,
    pub target_id: String,
    pub action: MutationAction,
    /// Serialized item shown while a Subscribe is pending.
    pub payload: Option<String>,
    pub created_at: DateTime<Utc>,
}
