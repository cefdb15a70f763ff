//! Semaphore-bounded async fetch
//!
//! Spawns one task per request on the shared runtime, admission gated by a
//! counting semaphore so no more than `in_flight_cap` requests are
//! outstanding at once. Every task is joined before the invocation exits,
//! and the client is dropped on all exit paths. Per-request failures are
//! logged and recorded as failed outcomes rather than aborting the loop;
//! the batch check then fails the invocation.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use crate::config::HarnessConfig;
use crate::error::CaseError;
use crate::outcome::{check_batch, RequestOutcome};

use super::Strategy;

pub struct BoundedFetch {
    handle: Handle,
    target: String,
    iterations: usize,
    in_flight_cap: usize,
}

impl BoundedFetch {
    pub fn new(config: &HarnessConfig, handle: Handle) -> Self {
        Self {
            handle,
            target: config.http_target.clone(),
            iterations: config.iterations,
            in_flight_cap: config.in_flight_cap,
        }
    }
}

impl Strategy for BoundedFetch {
    fn run(&self) -> Result<(), CaseError> {
        self.handle.block_on(async {
            let client = reqwest::Client::new();
            let semaphore = Arc::new(Semaphore::new(self.in_flight_cap));
            let mut tasks = JoinSet::new();

            for _ in 0..self.iterations {
                // Acquire before spawning so the cap bounds in-flight
                // requests, not just running tasks.
                let permit = semaphore
                    .clone()
                    .acquire_owned()
                    .await
                    .expect("semaphore is never closed");
                let client = client.clone();
                let target = self.target.clone();

                tasks.spawn(async move {
                    let outcome = match client.get(&target).send().await {
                        Ok(response) => RequestOutcome::from_status(response.status()),
                        Err(err) => {
                            warn!(error = %err, "request failed");
                            RequestOutcome::failed()
                        }
                    };
                    drop(permit);
                    outcome
                });
            }

            let mut outcomes = Vec::with_capacity(self.iterations);
            while let Some(joined) = tasks.join_next().await {
                outcomes.push(joined.map_err(|_| CaseError::WorkerPanic)?);
            }

            check_batch(&outcomes, self.iterations)
        })
    }
}
