//! Pipe round-trip benchmark suite.
//!
//! Sends one message through a dialed pipe to a loopback echo peer and
//! waits for it to come back, at several payload sizes, with and without a
//! header.
//!
//! Run with: cargo bench --bench pipe_roundtrip
//! Results saved to: target/criterion/

use std::net::{Ipv4Addr, SocketAddr};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use futures_util::{SinkExt, StreamExt};
use sp_websocket::{Message, Pipe, Protocol, TransportRegistry, WsTransport};
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Runtime;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;

// ============================================================================
// Benchmark Parameters
// ============================================================================

const PAYLOAD_SIZES: &[usize] = &[16, 1024, 64 * 1024, 1024 * 1024];

const REQUEST_ID: [u8; 4] = [0x80, 0, 0, 1];

// ============================================================================
// Benchmark: Round Trip
// ============================================================================

fn bench_roundtrip(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime");
    let pipe = rt.block_on(async {
        let url = start_echo_peer().await;
        dial(&url).await
    });
    let pipe = &*pipe;

    let mut group = c.benchmark_group("pipe_roundtrip");

    for &size in PAYLOAD_SIZES {
        let body = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("body_only", size), &body, |b, body| {
            b.to_async(&rt).iter(|| async move {
                pipe.send(Message::from_body(body.clone())).await.expect("send");
                pipe.recv().await.expect("recv")
            });
        });

        group.bench_with_input(BenchmarkId::new("with_header", size), &body, |b, body| {
            b.to_async(&rt).iter(|| async move {
                pipe.send(Message::with_header(REQUEST_ID, body.clone()))
                    .await
                    .expect("send");
                pipe.recv().await.expect("recv")
            });
        });
    }

    group.finish();
    rt.block_on(pipe.close()).ok();
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn dial(url: &str) -> Box<dyn Pipe> {
    let registry = TransportRegistry::new();
    WsTransport::new().register(&registry);

    registry
        .new_dialer(url, &Protocol::Req)
        .expect("dialer")
        .dial()
        .await
        .expect("dial")
}

async fn start_echo_peer() -> String {
    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .expect("bind");
    let port = listener.local_addr().expect("addr").port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(echo(stream));
        }
    });

    format!("ws://127.0.0.1:{port}/req")
}

async fn echo(stream: TcpStream) {
    let negotiate = |req: &Request, mut response: Response| -> Result<Response, ErrorResponse> {
        if let Some(offered) = req.headers().get(SEC_WEBSOCKET_PROTOCOL) {
            response
                .headers_mut()
                .insert(SEC_WEBSOCKET_PROTOCOL, offered.clone());
        }
        Ok(response)
    };

    let Ok(mut ws) = accept_hdr_async(stream, negotiate).await else {
        return;
    };

    while let Some(Ok(msg)) = ws.next().await {
        if (msg.is_binary() || msg.is_text()) && ws.send(msg).await.is_err() {
            return;
        }
    }
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
