//! Local test server for strategy integration tests
//!
//! Serves a fixed status on every route, counts requests, and tracks the
//! peak number of concurrently in-flight handlers so tests can observe
//! concurrency caps from the server side.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::any;
use axum::Router;
use tokio::runtime::Handle;

#[derive(Clone)]
struct ServerState {
    hits: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    status: StatusCode,
    delay: Duration,
}

pub struct TestServer {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Total requests that reached the handler
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Highest number of handlers observed in flight at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

async fn handler(State(state): State<ServerState>) -> (StatusCode, &'static str) {
    let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.peak.fetch_max(now, Ordering::SeqCst);
    state.hits.fetch_add(1, Ordering::SeqCst);

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    state.in_flight.fetch_sub(1, Ordering::SeqCst);
    (state.status, "OK")
}

/// Spawn a server that answers 200 immediately
pub fn spawn(handle: &Handle) -> TestServer {
    spawn_with(handle, StatusCode::OK, Duration::ZERO)
}

/// Spawn a server with a fixed status and per-request delay
pub fn spawn_with(handle: &Handle, status: StatusCode, delay: Duration) -> TestServer {
    let state = ServerState {
        hits: Arc::new(AtomicUsize::new(0)),
        in_flight: Arc::new(AtomicUsize::new(0)),
        peak: Arc::new(AtomicUsize::new(0)),
        status,
        delay,
    };
    let hits = Arc::clone(&state.hits);
    let peak = Arc::clone(&state.peak);

    let app = Router::new().route("/", any(handler)).with_state(state);

    let addr = handle.block_on(async {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });
        addr
    });

    TestServer { addr, hits, peak }
}
