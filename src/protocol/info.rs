//! SP protocol numbers and socket metadata.
//!
//! Every SP socket speaks one protocol and expects its peer to speak a
//! matching one (`req` talks to `rep`, `pub` to `sub`, ...). The numbers are
//! the 16-bit identifiers assigned by the SP family; the peer name doubles as
//! the WebSocket subprotocol token prefix.

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Suffix appended to the peer protocol name to form the WebSocket
/// subprotocol token.
pub const SUBPROTOCOL_SUFFIX: &str = ".sp.nanomsg.org";

// ============================================================================
// Protocol
// ============================================================================

/// Well-known SP protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// One-to-one bidirectional.
    Pair,
    /// Publisher.
    Pub,
    /// Subscriber.
    Sub,
    /// Requester.
    Req,
    /// Replier.
    Rep,
    /// Pipeline producer.
    Push,
    /// Pipeline consumer.
    Pull,
    /// Survey initiator.
    Surveyor,
    /// Survey responder.
    Respondent,
    /// Many-to-many bus.
    Bus,
}

impl Protocol {
    /// All known protocols.
    pub const ALL: [Protocol; 10] = [
        Protocol::Pair,
        Protocol::Pub,
        Protocol::Sub,
        Protocol::Req,
        Protocol::Rep,
        Protocol::Push,
        Protocol::Pull,
        Protocol::Surveyor,
        Protocol::Respondent,
        Protocol::Bus,
    ];

    /// Returns the 16-bit protocol number.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u16 {
        match self {
            Self::Pair => 0x10,
            Self::Pub => 0x20,
            Self::Sub => 0x21,
            Self::Req => 0x30,
            Self::Rep => 0x31,
            Self::Push => 0x50,
            Self::Pull => 0x51,
            Self::Surveyor => 0x62,
            Self::Respondent => 0x63,
            Self::Bus => 0x70,
        }
    }

    /// Returns the canonical lowercase protocol name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pair => "pair",
            Self::Pub => "pub",
            Self::Sub => "sub",
            Self::Req => "req",
            Self::Rep => "rep",
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Surveyor => "surveyor",
            Self::Respondent => "respondent",
            Self::Bus => "bus",
        }
    }

    /// Returns the protocol a socket of this kind must be connected to.
    #[inline]
    #[must_use]
    pub const fn peer(self) -> Protocol {
        match self {
            Self::Pair => Self::Pair,
            Self::Pub => Self::Sub,
            Self::Sub => Self::Pub,
            Self::Req => Self::Rep,
            Self::Rep => Self::Req,
            Self::Push => Self::Pull,
            Self::Pull => Self::Push,
            Self::Surveyor => Self::Respondent,
            Self::Respondent => Self::Surveyor,
            Self::Bus => Self::Bus,
        }
    }

    /// Looks a protocol up by its number.
    #[must_use]
    pub fn from_number(number: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.number() == number)
    }

    /// Looks a protocol up by its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Builds the metadata a socket of this protocol exposes.
    #[must_use]
    pub fn info(self) -> ProtocolInfo {
        let peer = self.peer();
        ProtocolInfo {
            number: self.number(),
            name: Cow::Borrowed(self.name()),
            peer_number: peer.number(),
            peer_name: Cow::Borrowed(peer.name()),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// ProtocolInfo
// ============================================================================

/// Protocol metadata of a socket: its own number and name, and its peer's.
///
/// Copied out of the owning socket when a dialer is created; every pipe the
/// dialer produces carries its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolInfo {
    /// Local protocol number.
    pub number: u16,
    /// Local protocol name.
    pub name: Cow<'static, str>,
    /// Peer protocol number.
    pub peer_number: u16,
    /// Peer protocol name.
    pub peer_name: Cow<'static, str>,
}

impl ProtocolInfo {
    /// Creates protocol metadata from explicit values.
    #[must_use]
    pub fn new(
        number: u16,
        name: impl Into<Cow<'static, str>>,
        peer_number: u16,
        peer_name: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            peer_number,
            peer_name: peer_name.into(),
        }
    }

    /// Returns the WebSocket subprotocol token presented when dialing.
    ///
    /// Format: `<peer_name>.sp.nanomsg.org`
    #[must_use]
    pub fn subprotocol(&self) -> String {
        format!("{}{}", self.peer_name, SUBPROTOCOL_SUFFIX)
    }
}

impl From<Protocol> for ProtocolInfo {
    fn from(protocol: Protocol) -> Self {
        protocol.info()
    }
}

// ============================================================================
// Socket
// ============================================================================

/// The part of an SP socket a transport needs to see.
///
/// Implemented by the messaging library's socket type; transports only read
/// the protocol metadata when creating dialers.
pub trait Socket: Send + Sync {
    /// Returns the socket's protocol metadata.
    fn protocol_info(&self) -> ProtocolInfo;
}

impl Socket for ProtocolInfo {
    fn protocol_info(&self) -> ProtocolInfo {
        self.clone()
    }
}

impl Socket for Protocol {
    fn protocol_info(&self) -> ProtocolInfo {
        self.info()
    }
}

// ============================================================================
// Tests
// ============================================================================
