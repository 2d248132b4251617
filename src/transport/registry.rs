//! Transport registry.
//!
//! Maps URL schemes to transports. A socket owns (or is handed) one registry
//! and resolves every dial/listen address through it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │           TransportRegistry               │
//! │  ┌─────────────────────────────────────┐  │
//! │  │ "ws"  → WsTransport                 │  │
//! │  │ ...   → (other transports)          │  │
//! │  └─────────────────────────────────────┘  │
//! └───────────────────────────────────────────┘
//!          │ new_dialer("ws://host/path")
//!          ▼
//!      WsDialer ──dial()──► WsPipe
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::Socket;

use super::api::{Dialer, Listener, Transport};

// ============================================================================
// TransportRegistry
// ============================================================================

/// Scheme-keyed set of transports.
///
/// Thread-safe; registration and lookup may happen from any task.
#[derive(Default)]
pub struct TransportRegistry {
    /// Installed transports by scheme.
    transports: RwLock<FxHashMap<String, Arc<dyn Transport>>>,
}

impl TransportRegistry {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `transport` under its scheme.
    ///
    /// Idempotent: if the scheme is already taken the existing transport is
    /// kept and `false` is returned.
    pub fn register(&self, transport: Arc<dyn Transport>) -> bool {
        let scheme = transport.scheme();
        let mut transports = self.transports.write();

        if transports.contains_key(scheme) {
            debug!(scheme, "Transport already registered");
            return false;
        }

        transports.insert(scheme.to_owned(), transport);
        debug!(scheme, "Transport registered");
        true
    }

    /// Returns the transport for `scheme`.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<Arc<dyn Transport>> {
        self.transports.read().get(scheme).cloned()
    }

    /// Returns `true` if a transport is registered for `scheme`.
    #[must_use]
    pub fn contains(&self, scheme: &str) -> bool {
        self.transports.read().contains_key(scheme)
    }

    /// Returns registered schemes, sorted.
    #[must_use]
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.transports.read().keys().cloned().collect();
        schemes.sort_unstable();
        schemes
    }

    /// Returns the number of registered transports.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.transports.read().len()
    }

    /// Returns `true` if nothing is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transports.read().is_empty()
    }

    /// Creates a dialer for `url` through the transport matching its scheme.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if `url` cannot be parsed
    /// - [`Error::UnknownScheme`] if no transport handles the scheme
    /// - whatever the transport's `new_dialer` returns
    pub fn new_dialer(&self, url: &str, socket: &dyn Socket) -> Result<Box<dyn Dialer>> {
        self.resolve(url)?.new_dialer(url, socket)
    }

    /// Creates a listener for `url` through the transport matching its
    /// scheme.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if `url` cannot be parsed
    /// - [`Error::UnknownScheme`] if no transport handles the scheme
    /// - [`Error::Unsupported`] if that transport cannot listen
    pub fn new_listener(&self, url: &str, socket: &dyn Socket) -> Result<Box<dyn Listener>> {
        let transport = self.resolve(url)?;
        transport
            .new_listener(url, socket)
            .into_result(transport.scheme())
    }

    /// Looks up the transport responsible for `url`.
    fn resolve(&self, url: &str) -> Result<Arc<dyn Transport>> {
        let parsed = Url::parse(url).map_err(|e| Error::invalid_url(url, e.to_string()))?;
        let scheme = parsed.scheme();

        self.get(scheme).ok_or_else(|| {
            warn!(url, scheme, "No transport registered for scheme");
            Error::unknown_scheme(scheme)
        })
    }
}

impl fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
