//! SP request client dialing over WebSocket.
//!
//! Demonstrates:
//! - Registering the `ws` transport in an explicit registry
//! - Dialing with the `req` protocol (offers `rep.sp.nanomsg.org`)
//! - Sending `Hello` behind a request-ID header and printing the reply
//!
//! Start `rep_server` first, then:
//!   cargo run --example req_client
//!   cargo run --example req_client -- --port 9000 --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use sp_websocket::{Message, Protocol, Result, TransportRegistry, WsTransport};
use tracing::info;

// ============================================================================
// Constants
// ============================================================================

/// Request ID of the single request; the high bit marks the end of the
/// SP backtrace.
const REQUEST_ID: u32 = 0x8000_0001;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    match run(&args).await {
        Ok(reply) => println!("{reply}"),
        Err(e) => common::die("Request failed", e),
    }
}

async fn run(args: &Args) -> Result<String> {
    let registry = TransportRegistry::new();
    WsTransport::new().register(&registry);

    let url = args.req_url();
    info!(%url, "Start dial");
    let dialer = registry.new_dialer(&url, &Protocol::Req)?;
    let pipe = dialer.dial().await?;
    info!(pipe_id = %pipe.id(), "Dialed");

    info!("Start sending Hello");
    pipe.send(Message::with_header(REQUEST_ID.to_be_bytes(), "Hello"))
        .await?;

    info!("Start waiting for reply");
    let reply = pipe.recv().await?;
    pipe.close().await?;

    let id_len = REQUEST_ID.to_be_bytes().len();
    let (header, body) = reply.body.split_at(reply.body.len().min(id_len));
    if header != REQUEST_ID.to_be_bytes() {
        info!(?header, "Reply carries an unexpected request ID");
    }

    info!("Received reply");
    Ok(String::from_utf8_lossy(body).into_owned())
}
