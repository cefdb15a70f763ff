//! Error taxonomy for benchmark cases
//!
//! Network-level failures and invariant violations both fail the invocation;
//! the runner turns either into a failed case without aborting the process.

use thiserror::Error;

/// Errors that fail a single benchmark invocation
#[derive(Debug, Error)]
pub enum CaseError {
    /// HTTP client failure (connect, send, or protocol error)
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Raw socket I/O failure
    #[error("socket i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Observed response count does not match the requested batch size
    #[error("expected {expected} responses, observed {observed}")]
    ResponseCount { expected: usize, observed: usize },

    /// A response carried a non-success status (0 marks a failed request)
    #[error("non-success response status: {0}")]
    BadStatus(u16),

    /// A worker thread or spawned task panicked before reporting a result
    #[error("worker panicked before completing its requests")]
    WorkerPanic,
}
