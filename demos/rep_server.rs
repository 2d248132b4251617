//! Minimal SP reply server reachable over WebSocket.
//!
//! Demonstrates:
//! - Accepting WebSocket clients on `/req`
//! - Negotiating the `rep.sp.nanomsg.org` subprotocol
//! - Answering each request with `REPLY #<n> <unix-time>`, echoing the
//!   request-ID header so the requester can match the reply
//!
//! Usage:
//!   cargo run --example rep_server
//!   cargo run --example rep_server -- --port 9000 --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use common::{Args, REQ_PATH};
use futures_util::{SinkExt, StreamExt};
use sp_websocket::{Protocol, SUBPROTOCOL_SUFFIX};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tokio_tungstenite::tungstenite::http::{HeaderValue, StatusCode};
use tracing::{debug, info, warn};

// ============================================================================
// Constants
// ============================================================================

/// Length of the SP request-ID header carried in front of each request.
const REQUEST_ID_LEN: usize = 4;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => common::die("Cannot bind listener", e),
    };

    info!(%addr, path = REQ_PATH, "Serving SP rep over WebSocket");

    let counter = Arc::new(AtomicU64::new(0));
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => common::die("Server died", e),
        };
        debug!(%peer, "TCP connection accepted");
        tokio::spawn(serve(stream, Arc::clone(&counter)));
    }
}

// ============================================================================
// Connection Handling
// ============================================================================

async fn serve(stream: TcpStream, counter: Arc<AtomicU64>) {
    let expected = format!("{}{SUBPROTOCOL_SUFFIX}", Protocol::Rep.name());

    let negotiate = move |req: &Request, mut response: Response| -> Result<Response, ErrorResponse> {
        if req.uri().path() != REQ_PATH {
            return Err(reject(StatusCode::NOT_FOUND, "no such endpoint"));
        }

        let offered = req
            .headers()
            .get(SEC_WEBSOCKET_PROTOCOL)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !offered.split(',').any(|p| p.trim() == expected) {
            return Err(reject(StatusCode::BAD_REQUEST, "incompatible SP protocol"));
        }

        match HeaderValue::from_str(&expected) {
            Ok(value) => {
                response.headers_mut().insert(SEC_WEBSOCKET_PROTOCOL, value);
                Ok(response)
            }
            Err(_) => Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "bad subprotocol")),
        }
    };

    let mut ws = match accept_hdr_async(stream, negotiate).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!(error = %e, "WebSocket handshake rejected");
            return;
        }
    };

    while let Some(frame) = ws.next().await {
        let request = match frame {
            Ok(WsMessage::Binary(data)) => data,
            Ok(_) => continue,
            Err(e) => {
                debug!(error = %e, "Client went away");
                return;
            }
        };

        if request.len() < REQUEST_ID_LEN {
            warn!(len = request.len(), "Request without request-ID header dropped");
            continue;
        }

        let (header, body) = request.split_at(REQUEST_ID_LEN);
        info!(request = %String::from_utf8_lossy(body), "Received request");

        let count = counter.fetch_add(1, Ordering::Relaxed);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let mut reply = header.to_vec();
        reply.extend_from_slice(format!("REPLY #{count} {now}").as_bytes());

        if let Err(e) = ws.send(WsMessage::binary(reply)).await {
            warn!(error = %e, "Cannot send reply");
            return;
        }
    }
}

fn reject(status: StatusCode, reason: &str) -> ErrorResponse {
    let mut response = ErrorResponse::new(Some(reason.to_owned()));
    *response.status_mut() = status;
    response
}
