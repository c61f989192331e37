// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Frame pipe to the forum remote.
//!
//! The forum speaks one JSON text frame per message. A [`Transport`] moves
//! those frames; [`Transport::round_trip`] layers the request/reply rule on
//! top: connect on demand, send one request, wait for the frame that answers
//! it, all under a single deadline.

use std::time::Duration;

use tracing::debug;

use quire_core::{BoxFuture, FetchError};

use super::protocol::{ClientMessage, ServerMessage};

/// Why a frame could not be moved, or a reply never came.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("could not connect: {0}")]
    Connect(String),

    /// The forum hung up, or no connection was open.
    #[error("connection closed by the forum")]
    Closed,

    #[error("send failed: {0}")]
    Send(String),

    #[error("receive failed: {0}")]
    Receive(String),

    #[error("no reply within {0:?}")]
    TimedOut(Duration),

    /// A frame that is not a valid protocol message.
    #[error("malformed frame: {0}")]
    Malformed(String),
}

pub type TransportResult<T> = Result<T, TransportError>;

impl TransportError {
    /// True when the link worked but the bytes on it made no sense.
    pub fn is_malformed(&self) -> bool {
        matches!(self, TransportError::Malformed(_))
    }
}

impl From<TransportError> for FetchError {
    fn from(e: TransportError) -> Self {
        if e.is_malformed() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

pub trait Transport: Send + Sync {
    fn connect(&mut self, url: &str) -> BoxFuture<'_, TransportResult<()>>;

    /// Close the connection if one is open. Never fails on an absent one.
    fn disconnect(&mut self) -> BoxFuture<'_, TransportResult<()>>;

    fn send(&mut self, msg: ClientMessage) -> BoxFuture<'_, TransportResult<()>>;

    /// Next protocol frame, or `None` once the forum closes the connection.
    fn recv(&mut self) -> BoxFuture<'_, TransportResult<Option<ServerMessage>>>;

    fn is_connected(&self) -> bool;

    /// Send `msg` to `url` and wait for its reply.
    ///
    /// Frames answering other requests are skipped. Connecting counts
    /// against `limit`.
    fn round_trip<'a>(
        &'a mut self,
        url: &'a str,
        msg: ClientMessage,
        limit: Duration,
    ) -> BoxFuture<'a, TransportResult<ServerMessage>> {
        Box::pin(async move {
            let request_id = msg.request_id();
            let exchange = async {
                if !self.is_connected() {
                    debug!(url, "connecting");
                    self.connect(url).await?;
                }
                self.send(msg).await?;
                loop {
                    match self.recv().await? {
                        Some(reply) if reply.answers(request_id) => return Ok(reply),
                        Some(other) => debug!(request_id, ?other, "skipping unrelated frame"),
                        None => return Err(TransportError::Closed),
                    }
                }
            };
            tokio::time::timeout(limit, exchange)
                .await
                .unwrap_or(Err(TransportError::TimedOut(limit)))
        })
    }
}

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;
type WsSink = futures_util::stream::SplitSink<WsStream, tokio_tungstenite::tungstenite::Message>;

/// [`Transport`] over tokio-tungstenite.
#[derive(Default)]
pub struct WebSocketTransport {
    link: Option<(WsSink, futures_util::stream::SplitStream<WsStream>)>,
}

impl WebSocketTransport {
    pub fn new() -> Self {
        WebSocketTransport::default()
    }
}

impl Transport for WebSocketTransport {
    fn connect(&mut self, url: &str) -> BoxFuture<'_, TransportResult<()>> {
        let url = url.to_string();
        Box::pin(async move {
            use futures_util::StreamExt;

            let (socket, _) = tokio_tungstenite::connect_async(&url)
                .await
                .map_err(|e| TransportError::Connect(e.to_string()))?;
            self.link = Some(socket.split());
            Ok(())
        })
    }

    fn disconnect(&mut self) -> BoxFuture<'_, TransportResult<()>> {
        Box::pin(async move {
            if let Some((mut sink, _)) = self.link.take() {
                use futures_util::SinkExt;
                let _ = sink.close().await;
            }
            Ok(())
        })
    }

    fn send(&mut self, msg: ClientMessage) -> BoxFuture<'_, TransportResult<()>> {
        Box::pin(async move {
            use futures_util::SinkExt;
            use tokio_tungstenite::tungstenite::Message;

            let json = msg
                .to_json()
                .map_err(|e| TransportError::Malformed(e.to_string()))?;
            let (sink, _) = self.link.as_mut().ok_or(TransportError::Closed)?;
            if let Err(e) = sink.send(Message::Text(json.into())).await {
                self.link = None;
                return Err(TransportError::Send(e.to_string()));
            }
            Ok(())
        })
    }

    fn recv(&mut self) -> BoxFuture<'_, TransportResult<Option<ServerMessage>>> {
        Box::pin(async move {
            use futures_util::StreamExt;
            use tokio_tungstenite::tungstenite::Message;

            let (_, stream) = self.link.as_mut().ok_or(TransportError::Closed)?;
            let frame = loop {
                match stream.next().await {
                    Some(Ok(Message::Text(text))) => break text,
                    Some(Ok(Message::Close(_))) | None => {
                        self.link = None;
                        return Ok(None);
                    }
                    // ping, pong, binary
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        self.link = None;
                        return Err(TransportError::Receive(e.to_string()));
                    }
                }
            };
            ServerMessage::from_json(&frame)
                .map(Some)
                .map_err(|e| TransportError::Malformed(e.to_string()))
        })
    }

    fn is_connected(&self) -> bool {
        self.link.is_some()
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
pub(crate) mod tests;
