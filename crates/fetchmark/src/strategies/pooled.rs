//! Pooled-client fetch
//!
//! Queues the whole batch onto a connection-pooling client and drives at
//! most `in_flight_cap` requests concurrently. The first request error
//! aborts the invocation.

use futures::stream::{self, StreamExt, TryStreamExt};
use tokio::runtime::Handle;

use crate::config::HarnessConfig;
use crate::error::CaseError;
use crate::outcome::{check_batch, RequestOutcome};

use super::Strategy;

pub struct PooledFetch {
    handle: Handle,
    target: String,
    iterations: usize,
    in_flight_cap: usize,
}

impl PooledFetch {
    pub fn new(config: &HarnessConfig, handle: Handle) -> Self {
        Self {
            handle,
            target: config.http_target.clone(),
            iterations: config.iterations,
            in_flight_cap: config.in_flight_cap,
        }
    }
}

impl Strategy for PooledFetch {
    fn run(&self) -> Result<(), CaseError> {
        self.handle.block_on(async {
            let client = reqwest::Client::builder()
                .pool_max_idle_per_host(self.in_flight_cap)
                .build()?;

            let outcomes: Vec<RequestOutcome> = stream::iter(0..self.iterations)
                .map(|_| {
                    let client = client.clone();
                    let target = self.target.clone();
                    async move {
                        let response = client.get(&target).send().await?;
                        Ok::<_, reqwest::Error>(RequestOutcome::from_status(response.status()))
                    }
                })
                .buffer_unordered(self.in_flight_cap)
                .try_collect()
                .await?;

            check_batch(&outcomes, self.iterations)
        })
    }
}
