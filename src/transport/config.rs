//! WebSocket transport configuration.
//!
//! Dial parameters are fixed when the transport is constructed. Dialers and
//! pipes reject runtime option calls, so anything tunable lives here.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use sp_websocket::{WsConfig, WsTransport};
//!
//! let config = WsConfig::new()
//!     .with_max_recv_size(64 * 1024)
//!     .with_handshake_timeout(Duration::from_secs(5));
//!
//! let transport = WsTransport::with_config(config)?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default receive ceiling per inbound frame (1 MiB).
pub const DEFAULT_MAX_RECV_SIZE: usize = 1024 * 1024;

// ============================================================================
// WsConfig
// ============================================================================

/// Out-of-band configuration for the WebSocket transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WsConfig {
    /// Receive ceiling in bytes. Larger inbound frames are truncated.
    ///
    /// The WebSocket layer itself enforces no frame or message limit, so an
    /// oversized frame is buffered whole before it is cut down. Peers can
    /// therefore make a pipe hold one frame of any size in memory for the
    /// duration of a receive.
    pub max_recv_size: usize,

    /// Handshake deadline in milliseconds. `None` waits until the
    /// handshake completes or fails on its own.
    pub handshake_timeout_ms: Option<u64>,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl WsConfig {
    /// Creates a configuration with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_recv_size: DEFAULT_MAX_RECV_SIZE,
            handshake_timeout_ms: None,
        }
    }

    /// Parses a configuration from JSON. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON is malformed or invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("invalid transport config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl WsConfig {
    /// Sets the receive ceiling in bytes.
    #[inline]
    #[must_use]
    pub const fn with_max_recv_size(mut self, bytes: usize) -> Self {
        self.max_recv_size = bytes;
        self
    }

    /// Sets the handshake deadline.
    #[inline]
    #[must_use]
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the WebSocket protocol settings used when dialing.
    ///
    /// Frame and message limits are lifted so that the receive ceiling is
    /// the only size policy applied to inbound frames.
    #[must_use]
    pub fn websocket_config(&self) -> WebSocketConfig {
        WebSocketConfig::default()
            .max_frame_size(None)
            .max_message_size(None)
    }

    /// Returns the handshake deadline, if any.
    #[inline]
    #[must_use]
    pub fn handshake_timeout(&self) -> Option<Duration> {
        self.handshake_timeout_ms.map(Duration::from_millis)
    }
}

// ============================================================================
// Validation
// ============================================================================

impl WsConfig {
    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero receive ceiling or a zero
    /// handshake timeout.
    pub fn validate(&self) -> Result<()> {
        if self.max_recv_size == 0 {
            return Err(Error::config("max_recv_size must be greater than zero"));
        }

        if self.handshake_timeout_ms == Some(0) {
            return Err(Error::config(
                "handshake_timeout_ms must be greater than zero; omit it to wait indefinitely",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WsConfig::default();
        assert_eq!(config.max_recv_size, 1_048_576);
        assert!(config.handshake_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = WsConfig::new()
            .with_max_recv_size(4096)
            .with_handshake_timeout(Duration::from_millis(1500));

        assert_eq!(config.max_recv_size, 4096);
        assert_eq!(config.handshake_timeout_ms, Some(1500));
        assert_eq!(config.handshake_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_zero_recv_size_rejected() {
        let err = WsConfig::new().with_max_recv_size(0).validate().unwrap_err();
        assert!(err.to_string().contains("max_recv_size"));
    }

    #[test]
    fn test_websocket_limits_lifted() {
        for size in [DEFAULT_MAX_RECV_SIZE, 128 << 20, usize::MAX] {
            let config = WsConfig::new().with_max_recv_size(size);
            assert!(config.validate().is_ok());

            let ws = config.websocket_config();
            assert_eq!(ws.max_frame_size, None);
            assert_eq!(ws.max_message_size, None);
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = WsConfig {
            handshake_timeout_ms: Some(0),
            ..WsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = WsConfig::from_json(r#"{"handshake_timeout_ms": 250}"#).expect("parse");
        assert_eq!(config.max_recv_size, DEFAULT_MAX_RECV_SIZE);
        assert_eq!(config.handshake_timeout_ms, Some(250));
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = WsConfig::from_json("{}").expect("parse");
        assert_eq!(config, WsConfig::default());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(WsConfig::from_json(r#"{"max_recv_size": 0}"#).is_err());
        assert!(WsConfig::from_json("not json").is_err());
    }
}
