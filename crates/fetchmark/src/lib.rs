//! # Fetchmark
//!
//! A benchmark harness comparing concurrency strategies for issuing a fixed
//! batch of HTTP requests against a single endpoint.
//!
//! ## Strategies
//!
//! - **bounded-async**: semaphore-gated tasks on a shared tokio runtime
//! - **pooled-client**: a connection-pooling client with a fixed in-flight cap
//! - **thread-pool**: a fixed pool of OS threads issuing blocking requests
//! - **readiness-loop**: raw non-blocking sockets driven by a poll loop
//! - **thread-per-request**: one OS thread per raw-socket request
//!
//! Each invocation issues the whole batch, verifies the response count and
//! statuses, and only then counts toward the measured rate. The runner times
//! each case through a warmup window (discarded) and a measured window, and
//! reports iterations/second per strategy.

pub mod config;
pub mod error;
pub mod outcome;
pub mod runner;
pub mod strategies;

pub use config::HarnessConfig;
pub use error::CaseError;
pub use outcome::{check_batch, RequestOutcome};
pub use runner::{render_table, BenchmarkCase, BenchmarkRunner, CaseReport};
pub use strategies::Strategy;
