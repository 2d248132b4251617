//! WebSocket pipe.
//!
//! The object the messaging library exchanges whole messages through. A pipe
//! exclusively owns one [`Connection`] and a copy of the socket's protocol
//! metadata.
//!
//! # Lifecycle
//!
//! Open on return from a successful dial, closed after the first
//! [`Pipe::close`]. Closed is terminal. I/O errors do not close the pipe;
//! the owning socket decides that.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::identifiers::PipeId;
use crate::protocol::{Message, ProtocolInfo};

use super::api::{OptionValue, Pipe};
use super::connection::Connection;

// ============================================================================
// WsPipe
// ============================================================================

/// Pipe over a dialed WebSocket connection.
pub struct WsPipe {
    /// Pipe identity.
    id: PipeId,
    /// The connection this pipe owns.
    connection: Connection,
    /// Protocol metadata copied from the dialer.
    proto: ProtocolInfo,
    /// Cleared exactly once, by the first close.
    open: AtomicBool,
}

impl WsPipe {
    /// Creates an open pipe owning `connection`.
    pub(crate) fn new(connection: Connection, proto: ProtocolInfo) -> Self {
        Self {
            id: PipeId::generate(),
            connection,
            proto,
            open: AtomicBool::new(true),
        }
    }

    /// Returns the protocol metadata this pipe was created with.
    #[inline]
    #[must_use]
    pub fn protocol_info(&self) -> &ProtocolInfo {
        &self.proto
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(Error::ConnectionClosed)
        }
    }
}

#[async_trait]
impl Pipe for WsPipe {
    fn id(&self) -> PipeId {
        self.id
    }

    async fn send(&self, msg: Message) -> Result<()> {
        self.ensure_open()?;

        if msg.is_expired() {
            trace!(pipe_id = %self.id, "Dropping expired message");
            return Ok(());
        }

        self.connection.send_frame(msg.into_wire()).await
    }

    async fn recv(&self) -> Result<Message> {
        self.ensure_open()?;

        let body = self.connection.recv_frame().await?;
        Ok(Message::from_body(body))
    }

    async fn close(&self) -> Result<()> {
        if !self.open.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        debug!(pipe_id = %self.id, "Closing pipe");
        self.connection.close().await
    }

    fn local_protocol(&self) -> u16 {
        self.proto.number
    }

    fn remote_protocol(&self) -> u16 {
        self.proto.peer_number
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn get_prop(&self, name: &str) -> Result<OptionValue> {
        Err(Error::bad_property(name))
    }

    fn get_option(&self, name: &str) -> Result<OptionValue> {
        Err(Error::bad_option(name))
    }
}

impl fmt::Debug for WsPipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WsPipe")
            .field("id", &self.id)
            .field("proto", &self.proto)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
