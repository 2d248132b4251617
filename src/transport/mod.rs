//! WebSocket transport layer.
//!
//! This module bridges SP sockets onto WebSocket connections dialed from
//! environments that cannot listen (browser-hosted runtimes and the like).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  SP socket      │                              │  SP peer        │
//! │  (req, sub...)  │         WebSocket            │  (rep, pub...)  │
//! │                 │─────────────────────────────►│                 │
//! │  WsPipe         │   subprotocol <peer>.sp...   │  WebSocket      │
//! │  → Connection   │   1 binary frame = 1 msg     │  server         │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `TransportRegistry::new_dialer` - Resolve `ws://` to [`WsTransport`]
//! 2. `WsTransport::new_dialer` - Store URL and protocol metadata
//! 3. `WsDialer::dial` - WebSocket handshake, returns an open [`WsPipe`]
//! 4. `WsPipe::send` / `WsPipe::recv` - Exchange whole messages
//! 5. `WsPipe::close` - Send close frame; the pipe is done
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `api` | [`Transport`], [`Dialer`], [`Pipe`], [`Listener`] contracts |
//! | `config` | Out-of-band [`WsConfig`] |
//! | `connection` | Frame-level adapter over the WebSocket stream |
//! | `dialer` | [`WsDialer`] |
//! | `pipe` | [`WsPipe`] |
//! | `registry` | Scheme-keyed [`TransportRegistry`] |
//! | `ws` | [`WsTransport`] |

// ============================================================================
// Submodules
// ============================================================================

/// Transport, dialer, listener and pipe contracts.
pub mod api;

/// Transport configuration.
pub mod config;

/// WebSocket connection adapter.
pub mod connection;

/// WebSocket dialer.
pub mod dialer;

/// WebSocket pipe.
pub mod pipe;

/// Scheme-keyed transport registry.
pub mod registry;

/// The `ws://` transport.
pub mod ws;

#[cfg(test)]
pub(crate) mod test_server;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::{
    Dialer, Listener, ListenerSupport, OPTION_KEEP_ALIVE, OPTION_MAX_RECV_SIZE, OPTION_NO_DELAY,
    OPTION_TLS_CONFIG, OPTION_WEBSOCKET_CHECK_ORIGIN, OptionValue, Pipe, Transport,
};
pub use config::{DEFAULT_MAX_RECV_SIZE, WsConfig};
pub use connection::Connection;
pub use dialer::WsDialer;
pub use pipe::WsPipe;
pub use registry::TransportRegistry;
pub use ws::{WS_SCHEME, WsTransport};
