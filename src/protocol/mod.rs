//! SP protocol-side types consumed by the transport.
//!
//! The transport never implements an SP protocol itself. It only needs to
//! know which protocol the owning socket speaks (to negotiate the WebSocket
//! subprotocol and to report protocol numbers on each pipe) and what a
//! message looks like on the way in and out.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `info` | Protocol numbers, [`ProtocolInfo`], the [`Socket`] seam |
//! | `message` | [`Message`] and its wire serialization |

// ============================================================================
// Submodules
// ============================================================================

/// Protocol numbers and socket metadata.
pub mod info;

/// Message type and wire serialization.
pub mod message;

// ============================================================================
// Re-exports
// ============================================================================

pub use info::{Protocol, ProtocolInfo, SUBPROTOCOL_SUFFIX, Socket};
pub use message::Message;
