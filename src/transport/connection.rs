//! WebSocket connection adapter.
//!
//! Turns a WebSocket stream into whole-frame send/receive. One outbound
//! frame carries one SP message; one inbound binary (or text) frame becomes
//! one message body.
//!
//! The stream is split once at construction. The write half and the read
//! half each sit behind their own async mutex so a sender and a receiver
//! never wait on each other. With one writer and one reader per pipe the
//! locks are never contended.

// ============================================================================
// Imports
// ============================================================================

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex as AsyncMutex;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};

// ============================================================================
// Types
// ============================================================================

/// Client-side WebSocket stream produced by a dial.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// Connection
// ============================================================================

/// Message-oriented view of one WebSocket stream.
pub struct Connection {
    /// Write half.
    sink: AsyncMutex<SplitSink<WsStream, WsMessage>>,
    /// Read half.
    stream: AsyncMutex<SplitStream<WsStream>>,
    /// Receive ceiling in bytes.
    max_recv_size: usize,
}

impl Connection {
    /// Wraps an established WebSocket stream.
    pub(crate) fn new(ws_stream: WsStream, max_recv_size: usize) -> Self {
        let (sink, stream) = ws_stream.split();
        Self {
            sink: AsyncMutex::new(sink),
            stream: AsyncMutex::new(stream),
            max_recv_size,
        }
    }

    /// Writes `data` as a single binary frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WebSocket`] with the underlying error unmodified.
    pub async fn send_frame(&self, data: Vec<u8>) -> Result<()> {
        let len = data.len();
        let mut sink = self.sink.lock().await;
        sink.send(WsMessage::Binary(data.into())).await?;

        trace!(len, "Frame sent");
        Ok(())
    }

    /// Waits for the next data frame and returns its payload.
    ///
    /// Ping, pong and raw frames are skipped. Payloads longer than the
    /// receive ceiling are cut down to it.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] if the peer sent a close frame or the
    ///   stream ended
    /// - [`Error::WebSocket`] with the underlying read error unmodified
    pub async fn recv_frame(&self) -> Result<Vec<u8>> {
        let mut stream = self.stream.lock().await;

        loop {
            match stream.next().await {
                Some(Ok(WsMessage::Binary(data))) => {
                    return Ok(self.clamp(Vec::from(data)));
                }

                Some(Ok(WsMessage::Text(text))) => {
                    return Ok(self.clamp(text.as_str().as_bytes().to_vec()));
                }

                Some(Ok(WsMessage::Close(frame))) => {
                    debug!(?frame, "WebSocket closed by remote");
                    return Err(Error::ConnectionClosed);
                }

                Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_))) => {}

                Some(Err(e)) => return Err(Error::WebSocket(e)),

                None => {
                    debug!("WebSocket stream ended");
                    return Err(Error::ConnectionClosed);
                }
            }
        }
    }

    /// Sends a close frame and flushes the write half.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WebSocket`] if the close frame cannot be written.
    pub async fn close(&self) -> Result<()> {
        let mut sink = self.sink.lock().await;
        sink.close().await?;
        Ok(())
    }

    /// Applies the receive ceiling.
    fn clamp(&self, mut payload: Vec<u8>) -> Vec<u8> {
        if payload.len() > self.max_recv_size {
            warn!(
                len = payload.len(),
                max = self.max_recv_size,
                "Inbound frame truncated to receive ceiling"
            );
            payload.truncate(self.max_recv_size);
        }

        trace!(len = payload.len(), "Frame received");
        payload
    }
}

// ============================================================================
// Tests
// ============================================================================
