// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::collections::{BTreeSet, HashMap};
use std::sync::{mpsc, Arc, Mutex};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;

use quire_core::Token;
use quirers::remote::protocol::{ClientMessage, ServerMessage};
use quirers::Feed;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn quire() -> Command {
    cargo_bin_cmd!("quire")
}

/// Helper to create an initialized temp directory without a remote
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    quire()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Helper to create a temp directory bound to `url`
pub fn init_temp_remote(url: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    quire()
        .args(["init", "--remote", url])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// A ws:// URL nothing is listening on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("ws://{}", addr)
}

#[derive(Default)]
struct ForumState {
    lists: HashMap<String, Vec<Value>>,
    subscriptions: BTreeSet<String>,
}

/// In-process forum server speaking the quire WebSocket protocol.
///
/// Runs on its own thread and runtime for the lifetime of the test binary.
#[derive(Clone)]
pub struct ForumServer {
    pub url: String,
    state: Arc<Mutex<ForumState>>,
}

impl ForumServer {
    pub fn start() -> Self {
        let state = Arc::new(Mutex::new(ForumState::default()));
        let (tx, rx) = mpsc::channel();
        let server_state = Arc::clone(&state);

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                loop {
                    let Ok((stream, _)) = listener.accept().await else {
                        break;
                    };
                    let state = Arc::clone(&server_state);
                    tokio::spawn(async move {
                        let _ = handle_connection(stream, state).await;
                    });
                }
            });
        });

        let addr = rx.recv().unwrap();
        ForumServer {
            url: format!("ws://{}", addr),
            state,
        }
    }

    /// Publish posts with ids `1..=count` on a feed.
    pub fn publish(&self, feed: &str, count: usize) {
        let feed: Feed = feed.parse().unwrap();
        let items = (1..=count)
            .map(|i| json!({ "id": i, "title": format!("Post {i}"), "author": "alice" }))
            .collect();
        self.publish_raw(&feed.query().to_string(), items);
    }

    pub fn publish_raw(&self, endpoint: &str, items: Vec<Value>) {
        self.state
            .lock()
            .unwrap()
            .lists
            .insert(endpoint.to_string(), items);
    }

    pub fn set_subscribed(&self, ids: &[&str]) {
        self.state.lock().unwrap().subscriptions = ids.iter().map(|s| s.to_string()).collect();
    }

    pub fn subscribed(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .subscriptions
            .iter()
            .cloned()
            .collect()
    }
}

async fn handle_connection(
    stream: TcpStream,
    state: Arc<Mutex<ForumState>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    let (mut sink, mut stream) = ws_stream.split();

    while let Some(msg) = stream.next().await {
        let text = match msg? {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };
        let reply = reply_to(ClientMessage::from_json(&text)?, &state);
        sink.send(Message::Text(reply.to_json()?.into())).await?;
    }
    Ok(())
}

fn reply_to(msg: ClientMessage, state: &Mutex<ForumState>) -> ServerMessage {
    let mut state = state.lock().unwrap();
    match msg {
        ClientMessage::FetchPage {
            request_id,
            endpoint,
            token,
            page_size,
        } => {
            let items: Vec<Value> = if endpoint == "subscriptions" {
                state
                    .subscriptions
                    .iter()
                    .map(|id| json!({ "id": id, "title": format!("Thread {id}") }))
                    .collect()
            } else {
                state.lists.get(&endpoint).cloned().unwrap_or_default()
            };
            let start: usize = token.map_or(0, |t| t.as_str().parse().unwrap());
            let end = (start + page_size).min(items.len());
            ServerMessage::Page {
                request_id,
                items: items[start.min(end)..end].to_vec(),
                prev_token: (start > 0).then(|| Token::new(start.saturating_sub(page_size).to_string())),
                next_token: (end < items.len()).then(|| Token::new(end.to_string())),
            }
        }
        ClientMessage::Subscribe { request_id, id } => {
            state.subscriptions.insert(id);
            ServerMessage::Ack { request_id }
        }
        ClientMessage::Unsubscribe { request_id, id } => {
            state.subscriptions.remove(&id);
            ServerMessage::Ack { request_id }
        }
    }
}
