//! Loopback WebSocket peer for tests.
//!
//! Binds to `127.0.0.1:0`, accepts any number of clients, negotiates
//! whatever subprotocol the client offers and then either echoes every data
//! frame back or plays a fixed script of frames.

// ============================================================================
// Imports
// ============================================================================

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone)]
enum Mode {
    Echo,
    Scripted(Vec<WsMessage>),
}

#[derive(Default)]
struct Recorded {
    subprotocols: Vec<String>,
    frames: Vec<Vec<u8>>,
}

// ============================================================================
// TestServer
// ============================================================================

pub(crate) struct TestServer {
    port: u16,
    recorded: Arc<Mutex<Recorded>>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Echoes every binary or text frame back to the sender.
    pub(crate) async fn echo() -> Self {
        Self::start(Mode::Echo).await
    }

    /// Sends `frames` to each client right after the handshake.
    pub(crate) async fn scripted(frames: Vec<WsMessage>) -> Self {
        Self::start(Mode::Scripted(frames)).await
    }

    pub(crate) fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/req", self.port)
    }

    /// Subprotocol header values offered by clients, in connect order.
    pub(crate) fn subprotocols(&self) -> Vec<String> {
        self.recorded.lock().subprotocols.clone()
    }

    /// Payloads of every data frame received so far.
    pub(crate) fn received(&self) -> Vec<Vec<u8>> {
        self.recorded.lock().frames.clone()
    }

    /// Returns a URL on which nothing is listening.
    pub(crate) async fn unreachable_url() -> String {
        let listener = TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0))
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);
        format!("ws://127.0.0.1:{port}/req")
    }

    async fn start(mode: Mode) -> Self {
        let listener = TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0))
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();
        let recorded = Arc::new(Mutex::new(Recorded::default()));

        let task = tokio::spawn({
            let recorded = Arc::clone(&recorded);
            async move {
                while let Ok((stream, _)) = listener.accept().await {
                    tokio::spawn(serve(stream, mode.clone(), Arc::clone(&recorded)));
                }
            }
        });

        Self {
            port,
            recorded,
            task,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(stream: TcpStream, mode: Mode, recorded: Arc<Mutex<Recorded>>) {
    let negotiate = {
        let recorded = Arc::clone(&recorded);
        move |req: &Request, mut response: Response| -> Result<Response, ErrorResponse> {
            if let Some(offered) = req.headers().get(SEC_WEBSOCKET_PROTOCOL) {
                if let Ok(value) = offered.to_str() {
                    recorded.lock().subprotocols.push(value.to_owned());
                }
                response
                    .headers_mut()
                    .insert(SEC_WEBSOCKET_PROTOCOL, offered.clone());
            }
            Ok(response)
        }
    };

    let Ok(mut ws) = accept_hdr_async(stream, negotiate).await else {
        return;
    };

    if let Mode::Scripted(frames) = &mode {
        for frame in frames.iter().cloned() {
            if ws.send(frame).await.is_err() {
                return;
            }
        }
    }

    // Keep reading until the client goes away so close handshakes complete.
    while let Some(Ok(msg)) = ws.next().await {
        let payload = match &msg {
            WsMessage::Binary(data) => data.to_vec(),
            WsMessage::Text(text) => text.as_str().as_bytes().to_vec(),
            _ => continue,
        };
        recorded.lock().frames.push(payload);

        if matches!(mode, Mode::Echo) && ws.send(msg).await.is_err() {
            return;
        }
    }
}
