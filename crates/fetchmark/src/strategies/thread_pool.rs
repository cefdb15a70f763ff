//! Fixed thread-pool fetch
//!
//! Maps the batch across a fixed pool of OS worker threads issuing blocking
//! requests. Work is claimed from a shared counter, outcomes flow back over
//! a channel, and every worker is joined before the batch is verified.
//! Request errors propagate and abort the invocation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use crate::config::HarnessConfig;
use crate::error::CaseError;
use crate::outcome::{check_batch, RequestOutcome};

use super::Strategy;

pub struct ThreadPoolFetch {
    target: String,
    iterations: usize,
    workers: usize,
}

impl ThreadPoolFetch {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            target: config.http_target.clone(),
            iterations: config.iterations,
            workers: config.pool_workers,
        }
    }
}

impl Strategy for ThreadPoolFetch {
    fn run(&self) -> Result<(), CaseError> {
        let client = reqwest::blocking::Client::builder().build()?;
        let next = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<Result<RequestOutcome, reqwest::Error>>();

        let mut workers = Vec::with_capacity(self.workers);
        for _ in 0..self.workers {
            let client = client.clone();
            let next = Arc::clone(&next);
            let tx = tx.clone();
            let target = self.target.clone();
            let total = self.iterations;

            workers.push(thread::spawn(move || {
                while next.fetch_add(1, Ordering::Relaxed) < total {
                    let result = client
                        .get(&target)
                        .send()
                        .map(|response| RequestOutcome::from_status(response.status()));
                    if tx.send(result).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(tx);

        // The channel drains once every worker has dropped its sender.
        let outcomes = rx
            .iter()
            .collect::<Result<Vec<RequestOutcome>, reqwest::Error>>();

        for worker in workers {
            worker.join().map_err(|_| CaseError::WorkerPanic)?;
        }

        check_batch(&outcomes?, self.iterations)
    }
}
