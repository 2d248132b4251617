//! WebSocket dialer.
//!
//! Holds the target URL, the owning socket's protocol metadata and the
//! transport configuration. Each [`Dialer::dial`] opens one fresh
//! connection and hands it to a new [`WsPipe`].
//!
//! # Handshake
//!
//! The dial offers exactly one WebSocket subprotocol,
//! `<peer_name>.sp.nanomsg.org`, so that a server only completes the
//! handshake with a compatible SP peer.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tokio_tungstenite::connect_async_with_config;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::protocol::ProtocolInfo;

use super::api::{Dialer, OptionValue, Pipe};
use super::config::WsConfig;
use super::connection::Connection;
use super::pipe::WsPipe;

// ============================================================================
// WsDialer
// ============================================================================

/// Dialer for `ws://` addresses.
///
/// Immutable after construction; option calls are rejected.
#[derive(Debug, Clone)]
pub struct WsDialer {
    /// Target URL.
    url: String,
    /// Protocol metadata copied from the owning socket.
    proto: ProtocolInfo,
    /// Transport configuration.
    config: WsConfig,
}

impl WsDialer {
    /// Creates a dialer. Performs no I/O.
    pub(crate) fn new(url: impl Into<String>, proto: ProtocolInfo, config: WsConfig) -> Self {
        Self {
            url: url.into(),
            proto,
            config,
        }
    }

    /// Returns the protocol metadata pipes will be created with.
    #[inline]
    #[must_use]
    pub fn protocol_info(&self) -> &ProtocolInfo {
        &self.proto
    }

    /// Returns the subprotocol token offered during the handshake.
    #[inline]
    #[must_use]
    pub fn subprotocol(&self) -> String {
        self.proto.subprotocol()
    }

    /// Builds the client handshake request.
    fn handshake_request(&self) -> Result<Request> {
        let mut request = self.url.as_str().into_client_request().map_err(Error::Dial)?;

        let subprotocol = self.subprotocol();
        let value = HeaderValue::from_str(&subprotocol).map_err(|e| {
            Error::config(format!("invalid subprotocol '{subprotocol}': {e}"))
        })?;
        request.headers_mut().insert(SEC_WEBSOCKET_PROTOCOL, value);

        Ok(request)
    }
}

#[async_trait]
impl Dialer for WsDialer {
    fn address(&self) -> &str {
        &self.url
    }

    async fn dial(&self) -> Result<Box<dyn Pipe>> {
        let request = self.handshake_request()?;
        debug!(url = %self.url, subprotocol = %self.subprotocol(), "Dialing");

        let handshake =
            connect_async_with_config(request, Some(self.config.websocket_config()), false);
        let result = match self.config.handshake_timeout_ms {
            Some(timeout_ms) => {
                let limit = Duration::from_millis(timeout_ms);
                timeout(limit, handshake).await.map_err(|_| {
                    warn!(url = %self.url, timeout_ms, "WebSocket handshake timed out");
                    Error::connection_timeout(timeout_ms)
                })?
            }
            None => handshake.await,
        };

        let (ws_stream, _response) = result.map_err(|e| {
            warn!(url = %self.url, error = %e, "Failed to establish websocket");
            Error::Dial(e)
        })?;

        let pipe = WsPipe::new(
            Connection::new(ws_stream, self.config.max_recv_size),
            self.proto.clone(),
        );
        debug!(url = %self.url, pipe_id = %pipe.id(), "Pipe open");

        Ok(Box::new(pipe))
    }

    fn set_option(&self, name: &str, _value: OptionValue) -> Result<()> {
        Err(Error::bad_option(name))
    }

    fn get_option(&self, name: &str) -> Result<OptionValue> {
        Err(Error::bad_option(name))
    }
}

// ============================================================================
// Tests
// ============================================================================
