//! Transport contracts seen by the messaging library.
//!
//! A socket owns a set of [`Transport`]s keyed by URL scheme. To connect it
//! asks the transport for a [`Dialer`], calls [`Dialer::dial`] and then
//! exchanges whole messages over the returned [`Pipe`] until it closes it.
//!
//! Listening is a capability a transport may lack: [`Transport::new_listener`]
//! answers with [`ListenerSupport`] rather than a concrete listener type.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::identifiers::PipeId;
use crate::protocol::{Message, Socket};

// ============================================================================
// Option Names
// ============================================================================

/// Maximum receive size in bytes.
pub const OPTION_MAX_RECV_SIZE: &str = "MAX-RCV-SIZE";

/// Disable Nagle's algorithm on the underlying TCP connection.
pub const OPTION_NO_DELAY: &str = "NO-DELAY";

/// Enable TCP keep-alive.
pub const OPTION_KEEP_ALIVE: &str = "KEEP-ALIVE";

/// TLS client configuration.
pub const OPTION_TLS_CONFIG: &str = "TLS-CONFIG";

/// Check the `Origin` header during the WebSocket handshake.
pub const OPTION_WEBSOCKET_CHECK_ORIGIN: &str = "WEBSOCKET-CHECK-ORIGIN";

// ============================================================================
// OptionValue
// ============================================================================

/// Value carried by option and property calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Byte count.
    Size(usize),
    /// Time span.
    Duration(Duration),
    /// Free-form string.
    String(String),
}

// ============================================================================
// Transport
// ============================================================================

/// A scheme-specific factory producing dialers and, where supported,
/// listeners.
pub trait Transport: Send + Sync {
    /// Returns the URL scheme this transport answers to.
    fn scheme(&self) -> &'static str;

    /// Creates a dialer bound to `url` and to the protocol of `socket`.
    ///
    /// Performs no network I/O.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` does not belong to this
    /// transport.
    fn new_dialer(&self, url: &str, socket: &dyn Socket) -> Result<Box<dyn Dialer>>;

    /// Creates a listener bound to `addr`, if the transport can listen.
    fn new_listener(&self, addr: &str, socket: &dyn Socket) -> ListenerSupport;
}

// ============================================================================
// Dialer
// ============================================================================

/// Creates outbound connections to one configured address.
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Returns the address this dialer connects to.
    fn address(&self) -> &str;

    /// Connects to the remote peer and returns an open pipe.
    ///
    /// Suspends the calling task until the connection is established or
    /// fails. Never retries; retry policy belongs to the caller.
    async fn dial(&self) -> Result<Box<dyn Pipe>>;

    /// Sets a local option on the dialer.
    fn set_option(&self, name: &str, value: OptionValue) -> Result<()>;

    /// Reads a local option from the dialer.
    fn get_option(&self, name: &str) -> Result<OptionValue>;
}

// ============================================================================
// Listener
// ============================================================================

/// Accepts inbound connections on one bound address.
#[async_trait]
pub trait Listener: Send + Sync {
    /// Returns the bound address.
    fn address(&self) -> &str;

    /// Waits for the next inbound connection.
    async fn accept(&self) -> Result<Box<dyn Pipe>>;

    /// Stops accepting connections.
    async fn close(&self) -> Result<()>;
}

/// Outcome of asking a transport for a listener.
pub enum ListenerSupport {
    /// The transport listens; here is the listener.
    Supported(Box<dyn Listener>),
    /// The transport cannot accept inbound connections, for any address.
    Unsupported,
}

impl ListenerSupport {
    /// Returns `true` if a listener was produced.
    #[inline]
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported(_))
    }

    /// Converts into a result, mapping [`ListenerSupport::Unsupported`] to
    /// [`Error::Unsupported`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when the transport cannot listen.
    pub fn into_result(self, scheme: &str) -> Result<Box<dyn Listener>> {
        match self {
            Self::Supported(listener) => Ok(listener),
            Self::Unsupported => Err(Error::unsupported(format!("listen on {scheme}://"))),
        }
    }
}

impl fmt::Debug for ListenerSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supported(listener) => f
                .debug_tuple("Supported")
                .field(&listener.address())
                .finish(),
            Self::Unsupported => f.write_str("Unsupported"),
        }
    }
}

// ============================================================================
// Pipe
// ============================================================================

/// One established, message-framed connection.
///
/// At most one task sends and at most one task receives at a time. The two
/// directions may run concurrently.
#[async_trait]
pub trait Pipe: Send + Sync {
    /// Returns the pipe's identity.
    fn id(&self) -> PipeId;

    /// Sends a complete message.
    ///
    /// The message is released when the call returns.
    async fn send(&self, msg: Message) -> Result<()>;

    /// Receives a complete message.
    async fn recv(&self) -> Result<Message>;

    /// Closes the pipe.
    async fn close(&self) -> Result<()>;

    /// Local SP protocol number.
    fn local_protocol(&self) -> u16;

    /// Remote SP protocol number.
    fn remote_protocol(&self) -> u16;

    /// Returns `true` until the pipe is closed.
    fn is_open(&self) -> bool;

    /// Reads a transport-specific, read-only connection property.
    fn get_prop(&self, name: &str) -> Result<OptionValue>;

    /// Reads a pipe option.
    fn get_option(&self, name: &str) -> Result<OptionValue>;
}

// ============================================================================
// Tests
// ============================================================================
