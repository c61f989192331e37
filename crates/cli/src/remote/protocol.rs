// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages for the forum remote.
//!
//! One JSON object per text frame, tagged by `type`. Every request carries a
//! client-chosen `request_id` that the matching reply echoes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use quire_core::Token;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Request one page of a list.
    FetchPage {
        request_id: u64,
        /// Canonical form of the logical query.
        endpoint: String,
        /// `None` asks for the start of the list.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<Token>,
        page_size: usize,
    },

    /// Add an item to the subscription list.
    Subscribe { request_id: u64, id: String },

    /// Remove an item from the subscription list.
    Unsubscribe { request_id: u64, id: String },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Reply to `fetch_page`.
    Page {
        request_id: u64,
        items: Vec<Value>,
        #[serde(default)]
        prev_token: Option<Token>,
        #[serde(default)]
        next_token: Option<Token>,
    },

    /// Reply to `subscribe` / `unsubscribe`.
    Ack { request_id: u64 },

    /// The request failed. Without a `request_id` it refers to the
    /// connection as a whole.
    Error {
        #[serde(default)]
        request_id: Option<u64>,
        message: String,
    },
}

impl ClientMessage {
    pub fn request_id(&self) -> u64 {
        match self {
            ClientMessage::FetchPage { request_id, .. }
            | ClientMessage::Subscribe { request_id, .. }
            | ClientMessage::Unsubscribe { request_id, .. } => *request_id,
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// True if this message replies to the request with `request_id`.
    pub fn answers(&self, request_id: u64) -> bool {
        match self {
            ServerMessage::Page { request_id: id, .. } | ServerMessage::Ack { request_id: id } => {
                *id == request_id
            }
            ServerMessage::Error { request_id: id, .. } => id.is_none_or(|id| id == request_id),
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
