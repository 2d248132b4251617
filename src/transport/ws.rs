//! The `ws://` transport.
//!
//! Dial-only: the hosts this transport targets cannot accept inbound
//! connections, so asking it for a listener always yields
//! [`ListenerSupport::Unsupported`].

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::Socket;

use super::api::{Dialer, ListenerSupport, Transport};
use super::config::WsConfig;
use super::dialer::WsDialer;
use super::registry::TransportRegistry;

// ============================================================================
// Constants
// ============================================================================

/// URL scheme handled by [`WsTransport`].
pub const WS_SCHEME: &str = "ws";

// ============================================================================
// WsTransport
// ============================================================================

/// WebSocket transport factory.
#[derive(Debug, Clone, Default)]
pub struct WsTransport {
    config: WsConfig,
}

impl WsTransport {
    /// Creates a transport with default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `config` fails validation.
    pub fn with_config(config: WsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the transport configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WsConfig {
        &self.config
    }

    /// Installs this transport into `registry`.
    ///
    /// Returns `false` if a `ws` transport was already registered; the
    /// existing one is kept.
    pub fn register(self, registry: &TransportRegistry) -> bool {
        registry.register(Arc::new(self))
    }

    /// Checks that `url` is a well-formed `ws://` address.
    fn parse_url(url: &str) -> Result<Url> {
        let parsed = Url::parse(url).map_err(|e| Error::invalid_url(url, e.to_string()))?;

        if parsed.scheme() != WS_SCHEME {
            return Err(Error::invalid_url(
                url,
                format!("expected {WS_SCHEME}:// scheme, got {}://", parsed.scheme()),
            ));
        }

        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(Error::invalid_url(url, "missing host"));
        }

        Ok(parsed)
    }
}

impl Transport for WsTransport {
    fn scheme(&self) -> &'static str {
        WS_SCHEME
    }

    fn new_dialer(&self, url: &str, socket: &dyn Socket) -> Result<Box<dyn Dialer>> {
        Self::parse_url(url)?;

        let proto = socket.protocol_info();
        debug!(url, protocol = %proto.name, peer = %proto.peer_name, "Dialer created");

        Ok(Box::new(WsDialer::new(url, proto, self.config.clone())))
    }

    fn new_listener(&self, addr: &str, _socket: &dyn Socket) -> ListenerSupport {
        debug!(addr, "Listen requested on dial-only transport");
        ListenerSupport::Unsupported
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::protocol::{Message, Protocol, ProtocolInfo};
    use crate::transport::test_server::TestServer;

    #[test]
    fn test_scheme() {
        assert_eq!(WsTransport::new().scheme(), "ws");
    }

    #[test]
    fn test_new_listener_always_unsupported() {
        let transport = WsTransport::new();
        let addrs = [
            "ws://localhost:8080/req",
            "ws://0.0.0.0:0/",
            "tcp://127.0.0.1:5555",
            "",
            "not a url",
        ];

        for addr in addrs {
            for protocol in Protocol::ALL {
                let support = transport.new_listener(addr, &protocol);
                assert!(!support.is_supported());
                let err = support.into_result("ws").err().expect("must fail");
                assert!(matches!(err, Error::Unsupported { .. }));
            }
        }
    }

    #[test]
    fn test_new_dialer_stores_inputs() {
        let transport = WsTransport::new();
        let dialer = transport
            .new_dialer("ws://localhost:8080/req", &Protocol::Req)
            .expect("dialer");
        assert_eq!(dialer.address(), "ws://localhost:8080/req");
    }

    #[test]
    fn test_new_dialer_copies_protocol() {
        let info = ProtocolInfo::new(0x30, "req", 0x31, "rep");
        let transport = WsTransport::new();
        assert!(transport.new_dialer("ws://127.0.0.1:1/x", &info).is_ok());
    }

    #[test]
    fn test_new_dialer_rejects_bad_urls() {
        let transport = WsTransport::new();
        for url in ["wss://localhost/req", "http://localhost/", "localhost:8080", ""] {
            let err = transport
                .new_dialer(url, &Protocol::Req)
                .err()
                .expect("must be rejected");
            assert!(matches!(err, Error::InvalidUrl { .. }), "{url}: {err}");
        }
    }

    #[test]
    fn test_with_config_validates() {
        assert!(WsTransport::with_config(WsConfig::new().with_max_recv_size(0)).is_err());

        let transport = WsTransport::with_config(WsConfig::new().with_max_recv_size(512))
            .expect("valid config");
        assert_eq!(transport.config().max_recv_size, 512);
    }

    #[test]
    fn test_register() {
        let registry = TransportRegistry::new();
        assert!(WsTransport::new().register(&registry));
        assert!(!WsTransport::new().register(&registry));
        assert!(registry.contains("ws"));
    }

    #[tokio::test]
    async fn test_dial_through_transport() {
        let server = TestServer::echo().await;
        let transport = WsTransport::new();
        let dialer = transport
            .new_dialer(&server.ws_url(), &Protocol::Req)
            .expect("dialer");

        let pipe = dialer.dial().await.expect("dial");
        pipe.send(Message::from_body("Hello")).await.expect("send");
        assert_eq!(pipe.recv().await.expect("recv").body, b"Hello");
        pipe.close().await.expect("close");
    }
}
