//! Harness configuration
//!
//! Targets and timing windows are fixed at construction; there are no CLI
//! flags and no environment variables feeding the benchmark parameters.
//! Tests use the builder methods to point the harness at a local server.

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Endpoint hit by the HTTP-client strategies
pub const DEFAULT_HTTP_TARGET: &str = "https://1060ki.com";

/// Default batch size per invocation
pub const DEFAULT_ITERATIONS: usize = 10;

/// Default cap on concurrently outstanding requests
pub const DEFAULT_IN_FLIGHT_CAP: usize = 50;

/// Default worker count for the thread-pool strategy
pub const DEFAULT_POOL_WORKERS: usize = 8;

/// Harness configuration shared by the runner and all strategies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// URL hit by the bounded, pooled, and thread-pool strategies
    pub http_target: String,

    /// Address hit by the raw-socket strategies
    pub socket_target: SocketAddr,

    /// Requests issued per invocation
    pub iterations: usize,

    /// Maximum concurrently outstanding requests for the capped strategies
    pub in_flight_cap: usize,

    /// Worker thread count for the thread-pool strategy
    pub pool_workers: usize,

    /// Warmup window for the HTTP-client cases (results discarded)
    pub http_warmup: Duration,

    /// Measured window for the HTTP-client cases
    pub http_measure: Duration,

    /// Warmup window for the raw-socket cases
    pub socket_warmup: Duration,

    /// Measured window for the raw-socket cases
    pub socket_measure: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            http_target: DEFAULT_HTTP_TARGET.to_string(),
            socket_target: SocketAddr::from(([127, 0, 0, 1], 3000)),
            iterations: DEFAULT_ITERATIONS,
            in_flight_cap: DEFAULT_IN_FLIGHT_CAP,
            pool_workers: DEFAULT_POOL_WORKERS,
            http_warmup: Duration::from_secs(2),
            http_measure: Duration::from_secs(10),
            socket_warmup: Duration::from_secs(2),
            socket_measure: Duration::from_secs(5),
        }
    }
}

impl HarnessConfig {
    /// Set the HTTP endpoint
    pub fn with_http_target(mut self, target: impl Into<String>) -> Self {
        self.http_target = target.into();
        self
    }

    /// Set the raw-socket address
    pub fn with_socket_target(mut self, addr: SocketAddr) -> Self {
        self.socket_target = addr;
        self
    }

    /// Set the batch size per invocation
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the in-flight cap (at least 1)
    pub fn with_in_flight_cap(mut self, cap: usize) -> Self {
        self.in_flight_cap = cap.max(1);
        self
    }

    /// Set the thread-pool worker count (at least 1)
    pub fn with_pool_workers(mut self, workers: usize) -> Self {
        self.pool_workers = workers.max(1);
        self
    }

    /// Set warmup and measured windows for the HTTP-client cases
    pub fn with_http_timing(mut self, warmup: Duration, measure: Duration) -> Self {
        self.http_warmup = warmup;
        self.http_measure = measure;
        self
    }

    /// Set warmup and measured windows for the raw-socket cases
    pub fn with_socket_timing(mut self, warmup: Duration, measure: Duration) -> Self {
        self.socket_warmup = warmup;
        self.socket_measure = measure;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.http_target, DEFAULT_HTTP_TARGET);
        assert_eq!(config.socket_target.port(), 3000);
        assert_eq!(config.iterations, 10);
        assert_eq!(config.in_flight_cap, 50);
        assert_eq!(config.pool_workers, 8);
        assert_eq!(config.http_warmup, Duration::from_secs(2));
        assert_eq!(config.http_measure, Duration::from_secs(10));
        assert_eq!(config.socket_measure, Duration::from_secs(5));
    }

    #[test]
    fn test_builders() {
        let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
        let config = HarnessConfig::default()
            .with_http_target("http://127.0.0.1:8080")
            .with_socket_target(addr)
            .with_iterations(25)
            .with_in_flight_cap(4)
            .with_pool_workers(2)
            .with_http_timing(Duration::from_millis(50), Duration::from_millis(200))
            .with_socket_timing(Duration::from_millis(10), Duration::from_millis(100));

        assert_eq!(config.http_target, "http://127.0.0.1:8080");
        assert_eq!(config.socket_target, addr);
        assert_eq!(config.iterations, 25);
        assert_eq!(config.in_flight_cap, 4);
        assert_eq!(config.pool_workers, 2);
        assert_eq!(config.http_measure, Duration::from_millis(200));
        assert_eq!(config.socket_measure, Duration::from_millis(100));
    }

    #[test]
    fn test_caps_clamped_to_one() {
        let config = HarnessConfig::default()
            .with_in_flight_cap(0)
            .with_pool_workers(0);
        assert_eq!(config.in_flight_cap, 1);
        assert_eq!(config.pool_workers, 1);
    }
}
