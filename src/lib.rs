//! SP WebSocket - dial-only WebSocket transport for Scalable Protocols sockets.
//!
//! This library lets an SP messaging socket (request/reply, pub/sub, ...)
//! carry its messages over a WebSocket connection that it dials out. It is
//! meant for hosts that cannot open listening sockets.
//!
//! # Architecture
//!
//! The transport is a stack of four small pieces:
//!
//! - **Transport**: [`WsTransport`], registered under `ws` in a
//!   [`TransportRegistry`]; makes dialers, refuses to make listeners
//! - **Dialer**: [`WsDialer`], performs the WebSocket handshake
//! - **Pipe**: [`WsPipe`], exchanges whole messages, caches protocol numbers
//! - **Connection**: frame-level adapter over the WebSocket stream
//!
//! Key design principles:
//!
//! - One WebSocket binary frame carries one SP message (`header || body`)
//! - Subprotocol `<peer>.sp.nanomsg.org` is offered during the handshake
//! - Errors from the WebSocket layer are returned as is, never retried
//! - No global state: registries are explicit objects
//!
//! # Quick Start
//!
//! ```no_run
//! use sp_websocket::{Message, Protocol, Result, TransportRegistry, WsTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let registry = TransportRegistry::new();
//!     WsTransport::new().register(&registry);
//!
//!     let dialer = registry.new_dialer("ws://localhost:8080/req", &Protocol::Req)?;
//!     let pipe = dialer.dial().await?;
//!
//!     pipe.send(Message::from_body("Hello")).await?;
//!     let reply = pipe.recv().await?;
//!     println!("{}", String::from_utf8_lossy(&reply.body));
//!
//!     pipe.close().await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | SP protocol metadata and [`Message`] |
//! | [`transport`] | Transport contracts and the WebSocket implementation |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// SP protocol metadata and message type.
pub mod protocol;

/// Transport contracts and the WebSocket transport.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::PipeId;

// Protocol types
pub use protocol::{Message, Protocol, ProtocolInfo, SUBPROTOCOL_SUFFIX, Socket};

// Transport types
pub use transport::{
    Dialer, Listener, ListenerSupport, OptionValue, Pipe, Transport, TransportRegistry, WsConfig,
    WsDialer, WsPipe, WsTransport,
};
