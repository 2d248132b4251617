//! Shared utilities for demos.
//!
//! Provides common functionality used by both demo binaries:
//! - Command-line argument parsing
//! - Logging initialization
//! - Fatal error exit

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::fmt::Display;

use tracing::error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

/// Port used when `--port` is not given.
pub const DEFAULT_PORT: u16 = 8080;

/// HTTP path the request/reply endpoint is served on.
pub const REQ_PATH: &str = "/req";

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments for demos.
#[derive(Debug, Clone)]
pub struct Args {
    pub debug: bool,
    pub port: u16,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let port = args
            .iter()
            .position(|a| a == "--port")
            .and_then(|i| args.get(i + 1))
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            debug: args.iter().any(|a| a == "--debug"),
            port,
        }
    }

    /// Returns the request endpoint URL for this port.
    pub fn req_url(&self) -> String {
        format!("ws://localhost:{}{REQ_PATH}", self.port)
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize tracing/logging.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        "sp_websocket=debug,rep_server=debug,req_client=debug"
    } else {
        "sp_websocket=info,rep_server=info,req_client=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Log `context` and `err`, then terminate the process.
pub fn die(context: &str, err: impl Display) -> ! {
    error!(error = %err, "{context}");
    eprintln!("\n[ERROR] {context}: {err}");
    std::process::exit(1);
}
