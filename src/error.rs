//! Error types for the SP WebSocket transport.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use sp_websocket::{Pipe, Result};
//!
//! async fn ping(pipe: &dyn Pipe) -> Result<()> {
//!     pipe.send(Message::from_body(b"ping".to_vec())).await?;
//!     let reply = pipe.recv().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Capability | [`Error::Unsupported`], [`Error::BadOption`], [`Error::BadProperty`] |
//! | Configuration | [`Error::Config`], [`Error::InvalidUrl`], [`Error::UnknownScheme`] |
//! | Dial | [`Error::Dial`], [`Error::ConnectionTimeout`] |
//! | I/O | [`Error::WebSocket`], [`Error::ConnectionClosed`] |
//!
//! Errors coming from the WebSocket layer are carried unmodified. The
//! transport never retries and never classifies them further; that is the
//! owning socket's decision.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Capability Errors
    // ========================================================================
    /// Operation is structurally unsupported by this transport.
    ///
    /// Returned for every listen attempt on the WebSocket transport.
    /// Permanent: retrying the same call can never succeed.
    #[error("Operation not supported: {operation}")]
    Unsupported {
        /// The rejected operation.
        operation: String,
    },

    /// Option is not recognized.
    #[error("Bad option: {name}")]
    BadOption {
        /// Option name that was rejected.
        name: String,
    },

    /// Property is not recognized.
    #[error("Bad property: {name}")]
    BadProperty {
        /// Property name that was rejected.
        name: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when transport configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Address could not be parsed or has the wrong scheme.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The offending address.
        url: String,
        /// Why it was rejected.
        message: String,
    },

    /// No transport is registered for the scheme.
    #[error("No transport registered for scheme: {scheme}")]
    UnknownScheme {
        /// The URL scheme that was looked up.
        scheme: String,
    },

    // ========================================================================
    // Dial Errors
    // ========================================================================
    /// WebSocket handshake or TCP connect failed.
    #[error("Dial failed: {0}")]
    Dial(#[source] WsError),

    /// Handshake did not complete within the configured timeout.
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// Pipe was closed locally or by the peer.
    #[error("Connection closed")]
    ConnectionClosed,

    /// WebSocket error on an established connection.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an unsupported operation error.
    #[inline]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Creates a bad option error.
    #[inline]
    pub fn bad_option(name: impl Into<String>) -> Self {
        Self::BadOption { name: name.into() }
    }

    /// Creates a bad property error.
    #[inline]
    pub fn bad_property(name: impl Into<String>) -> Self {
        Self::BadProperty { name: name.into() }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid URL error.
    #[inline]
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown scheme error.
    #[inline]
    pub fn unknown_scheme(scheme: impl Into<String>) -> Self {
        Self::UnknownScheme {
            scheme: scheme.into(),
        }
    }

    /// Creates a connection timeout error.
    #[inline]
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        Self::ConnectionTimeout { timeout_ms }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the operation is structurally unsupported.
    ///
    /// These errors are permanent for a given call.
    #[inline]
    #[must_use]
    pub fn is_capability_error(&self) -> bool {
        matches!(
            self,
            Self::Unsupported { .. } | Self::BadOption { .. } | Self::BadProperty { .. }
        )
    }

    /// Returns `true` if this error came out of a dial attempt.
    #[inline]
    #[must_use]
    pub fn is_dial_error(&self) -> bool {
        matches!(self, Self::Dial(_) | Self::ConnectionTimeout { .. })
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Dial(_)
                | Self::ConnectionTimeout { .. }
                | Self::ConnectionClosed
                | Self::WebSocket(_)
        )
    }

    /// Returns `true` if a fresh attempt by the caller may succeed.
    ///
    /// The transport itself never retries.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.is_connection_error()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unsupported("listen");
        assert_eq!(err.to_string(), "Operation not supported: listen");

        let err = Error::bad_option("MAX-RCV-SIZE");
        assert_eq!(err.to_string(), "Bad option: MAX-RCV-SIZE");
    }

    #[test]
    fn test_invalid_url_display() {
        let err = Error::invalid_url("tcp://x", "expected ws scheme");
        assert_eq!(err.to_string(), "Invalid URL 'tcp://x': expected ws scheme");
    }

    #[test]
    fn test_is_capability_error() {
        assert!(Error::unsupported("listen").is_capability_error());
        assert!(Error::bad_option("x").is_capability_error());
        assert!(Error::bad_property("x").is_capability_error());
        assert!(!Error::ConnectionClosed.is_capability_error());
    }

    #[test]
    fn test_capability_errors_not_recoverable() {
        assert!(!Error::unsupported("listen").is_recoverable());
        assert!(!Error::bad_option("x").is_recoverable());
        assert!(!Error::config("x").is_recoverable());
    }

    #[test]
    fn test_is_dial_error() {
        let dial = Error::Dial(WsError::ConnectionClosed);
        assert!(dial.is_dial_error());
        assert!(dial.is_connection_error());
        assert!(Error::connection_timeout(100).is_dial_error());
        assert!(!Error::ConnectionClosed.is_dial_error());
    }

    #[test]
    fn test_is_connection_error() {
        assert!(Error::ConnectionClosed.is_connection_error());
        assert!(Error::WebSocket(WsError::AlreadyClosed).is_connection_error());
        assert!(!Error::unknown_scheme("tcp").is_connection_error());
    }

    #[test]
    fn test_from_ws_error_is_io_category() {
        let err: Error = WsError::AlreadyClosed.into();
        assert!(matches!(err, Error::WebSocket(_)));
        assert!(!err.is_dial_error());
    }
}
