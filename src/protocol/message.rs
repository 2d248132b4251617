//! SP message type.
//!
//! A message is a header (protocol framing such as request IDs, owned by the
//! protocol layer) followed by a body (application payload). On the wire the
//! two are simply concatenated; the receiving side gets everything back as
//! the body and the protocol layer re-parses its header from there.

// ============================================================================
// Imports
// ============================================================================

use std::time::Instant;

// ============================================================================
// Message
// ============================================================================

/// One SP message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Protocol header bytes.
    pub header: Vec<u8>,
    /// Payload bytes.
    pub body: Vec<u8>,
    /// Deadline after which the message is no longer worth sending.
    pub expire_at: Option<Instant>,
}

impl Message {
    /// Creates a message with an empty header.
    #[inline]
    #[must_use]
    pub fn from_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            header: Vec::new(),
            body: body.into(),
            expire_at: None,
        }
    }

    /// Creates a message with both header and body.
    #[inline]
    #[must_use]
    pub fn with_header(header: impl Into<Vec<u8>>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
            expire_at: None,
        }
    }

    /// Sets the expiry deadline.
    #[inline]
    #[must_use]
    pub fn expires_at(mut self, deadline: Instant) -> Self {
        self.expire_at = Some(deadline);
        self
    }

    /// Returns `true` once the expiry deadline has passed.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expire_at.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Total number of bytes this message occupies on the wire.
    #[inline]
    #[must_use]
    pub fn wire_len(&self) -> usize {
        self.header.len() + self.body.len()
    }

    /// Consumes the message, producing the single buffer sent as one frame.
    ///
    /// Header then body. With an empty header the body buffer is returned
    /// as is, without copying.
    #[must_use]
    pub fn into_wire(self) -> Vec<u8> {
        if self.header.is_empty() {
            return self.body;
        }

        let mut buf = Vec::with_capacity(self.wire_len());
        buf.extend_from_slice(&self.header);
        buf.extend_from_slice(&self.body);
        buf
    }
}

// ============================================================================
// Tests
// ============================================================================
