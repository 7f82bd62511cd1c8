//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Notify};

use upstream_relay::relay::HttpUpstream;
use upstream_relay::{HttpServer, Relay, RelayConfig};

/// What a mock backend sends back for one request.
#[derive(Clone)]
pub struct MockReply {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub chunks: Vec<Vec<u8>>,
    /// Use chunked transfer encoding instead of Content-Length.
    pub chunked: bool,
    /// When set, the backend waits on this after the first chunk.
    pub hold_after_first: Option<Arc<Notify>>,
    /// Content-Length to declare instead of the real body length.
    pub declared_length: Option<usize>,
}

impl MockReply {
    pub fn new(status: u16, content_type: Option<&'static str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type,
            chunks: vec![body.into()],
            chunked: false,
            hold_after_first: None,
            declared_length: None,
        }
    }

    pub fn chunked(content_type: Option<&'static str>, chunks: Vec<&'static str>) -> Self {
        Self {
            status: 200,
            content_type,
            chunks: chunks.into_iter().map(|c| c.as_bytes().to_vec()).collect(),
            chunked: true,
            hold_after_first: None,
            declared_length: None,
        }
    }
}

/// A running raw-TCP backend and the request lines it has seen.
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a backend that picks its reply from the request line
/// (e.g. `GET /v1/models HTTP/1.1`).
pub async fn start_programmable_backend<F>(f: F) -> MockBackend
where
    F: Fn(&str) -> MockReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        serve_one(socket, f.as_ref(), &seen).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, requests }
}

/// Start a backend that answers every request with `200 text/plain`.
#[allow(dead_code)]
pub async fn start_mock_backend(body: &'static str) -> MockBackend {
    start_programmable_backend(move |_| MockReply::new(200, Some("text/plain"), body)).await
}

async fn serve_one<F>(mut socket: TcpStream, f: &F, seen: &Mutex<Vec<String>>)
where
    F: Fn(&str) -> MockReply,
{
    let Some(head) = read_head(&mut socket).await else {
        return;
    };
    let request_line = head.lines().next().unwrap_or_default().to_string();
    seen.lock().unwrap().push(request_line.clone());

    let reply = f(&request_line);
    let reason = StatusCode::from_u16(reply.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");

    let mut head = format!("HTTP/1.1 {} {}\r\nConnection: close\r\n", reply.status, reason);
    if let Some(ct) = reply.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    if reply.chunked {
        head.push_str("Transfer-Encoding: chunked\r\n");
    } else {
        let len = reply
            .declared_length
            .unwrap_or_else(|| reply.chunks.iter().map(Vec::len).sum());
        head.push_str(&format!("Content-Length: {}\r\n", len));
    }
    head.push_str("\r\n");
    if socket.write_all(head.as_bytes()).await.is_err() {
        return;
    }

    for (i, chunk) in reply.chunks.iter().enumerate() {
        let written = if reply.chunked {
            let mut frame = format!("{:x}\r\n", chunk.len()).into_bytes();
            frame.extend_from_slice(chunk);
            frame.extend_from_slice(b"\r\n");
            socket.write_all(&frame).await
        } else {
            socket.write_all(chunk).await
        };
        if written.is_err() {
            return;
        }
        let _ = socket.flush().await;

        if i == 0 {
            if let Some(gate) = &reply.hold_after_first {
                gate.notified().await;
            }
        }
    }

    if reply.chunked {
        let _ = socket.write_all(b"0\r\n\r\n").await;
    }
    let _ = socket.shutdown().await;
}

async fn read_head(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8(buf).ok()
}

/// An origin nothing is listening on.
#[allow(dead_code)]
pub async fn unreachable_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Start the relay in front of `origin`. The server stops when the returned
/// sender fires or is dropped, so keep it alive for the length of the test.
pub async fn start_relay(origin: &str) -> (SocketAddr, oneshot::Sender<()>) {
    let upstream = HttpUpstream::with_client(
        reqwest::Client::builder().no_proxy().build().unwrap(),
    );
    let relay = Relay::new(origin, Arc::new(upstream));

    let mut config = RelayConfig::default();
    config.upstream.origin = origin.to_string();
    let server = HttpServer::with_relay(config, relay);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, stopped) = oneshot::channel();

    tokio::spawn(async move {
        let _ = server
            .run(listener, async move {
                let _ = stopped.await;
            })
            .await;
    });

    (addr, shutdown)
}

/// Client that bypasses any system proxy and never reuses connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
