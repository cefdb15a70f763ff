//! Concurrency strategies under comparison
//!
//! Each strategy issues one batch of requests per `run()` and verifies the
//! batch before returning. The five strategies cover a semaphore-bounded
//! async fetch, a pooled client with a fixed in-flight cap, a fixed thread
//! pool of blocking clients, a manual non-blocking socket loop, and one OS
//! thread per request.

mod bounded;
mod pooled;
mod readiness;
mod thread_per_request;
mod thread_pool;

pub use bounded::BoundedFetch;
pub use pooled::PooledFetch;
pub use readiness::ReadinessLoop;
pub use thread_per_request::ThreadPerRequest;
pub use thread_pool::ThreadPoolFetch;

use std::net::SocketAddr;

use tokio::runtime::Handle;

use crate::config::HarnessConfig;
use crate::error::CaseError;
use crate::runner::BenchmarkCase;

/// A benchmark body: one invocation issues a full batch of requests and
/// verifies the outcomes.
pub trait Strategy: Send + Sync {
    fn run(&self) -> Result<(), CaseError>;
}

/// Build the ordered case registry: HTTP-client strategies first, then the
/// raw-socket strategies, each with its timing windows from the config.
pub fn registry(config: &HarnessConfig, handle: Handle) -> Vec<BenchmarkCase> {
    let n = config.iterations;

    vec![
        BenchmarkCase::new(
            format!("bounded-async/{n}"),
            config.http_warmup,
            config.http_measure,
            Box::new(BoundedFetch::new(config, handle.clone())),
        ),
        BenchmarkCase::new(
            format!("pooled-client/{n}"),
            config.http_warmup,
            config.http_measure,
            Box::new(PooledFetch::new(config, handle)),
        ),
        BenchmarkCase::new(
            format!("thread-pool/{n}"),
            config.http_warmup,
            config.http_measure,
            Box::new(ThreadPoolFetch::new(config)),
        ),
        BenchmarkCase::new(
            format!("readiness-loop/{n}"),
            config.socket_warmup,
            config.socket_measure,
            Box::new(ReadinessLoop::new(config)),
        ),
        BenchmarkCase::new(
            format!("thread-per-request/{n}"),
            config.socket_warmup,
            config.socket_measure,
            Box::new(ThreadPerRequest::new(config)),
        ),
    ]
}

/// Fixed request bytes written by the raw-socket strategies. Connection:
/// close makes read-to-EOF terminate against a keep-alive server.
pub(crate) fn raw_request(addr: &SocketAddr) -> Vec<u8> {
    format!("GET / HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n").into_bytes()
}
