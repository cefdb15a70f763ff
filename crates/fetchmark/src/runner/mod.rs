//! Benchmark runner
//!
//! Runs each registered case's strategy repeatedly: first for a warmup window
//! (results discarded), then for a measured window (completed invocations
//! counted), and reports invocations/second. A failing invocation halts that
//! case only; the runner proceeds to the next case.

mod report;
mod stats;

pub use report::{render_table, write_json, CaseReport};
pub use stats::{IterationStats, LatencySummary};

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use crate::strategies::Strategy;

/// One registered benchmark case: a strategy plus its timing windows
pub struct BenchmarkCase {
    pub name: String,
    pub warmup: Duration,
    pub measure: Duration,
    strategy: Box<dyn Strategy>,
}

impl BenchmarkCase {
    pub fn new(
        name: impl Into<String>,
        warmup: Duration,
        measure: Duration,
        strategy: Box<dyn Strategy>,
    ) -> Self {
        Self {
            name: name.into(),
            warmup,
            measure,
            strategy,
        }
    }
}

/// Ordered registry of benchmark cases
#[derive(Default)]
pub struct BenchmarkRunner {
    cases: Vec<BenchmarkCase>,
}

impl BenchmarkRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a case; cases run in registration order
    pub fn register(&mut self, case: BenchmarkCase) {
        self.cases.push(case);
    }

    /// Run every registered case in order and collect the reports
    pub fn run(&self) -> Vec<CaseReport> {
        self.cases.iter().map(|case| self.run_case(case)).collect()
    }

    fn run_case(&self, case: &BenchmarkCase) -> CaseReport {
        info!(
            case = %case.name,
            warmup = ?case.warmup,
            measure = ?case.measure,
            "starting case"
        );

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("spinner template is valid"),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!("{}: warming up", case.name));

        // Warmup: run to completion, discard timing.
        let warmup_deadline = Instant::now() + case.warmup;
        while Instant::now() < warmup_deadline {
            if let Err(err) = case.strategy.run() {
                spinner.finish_and_clear();
                error!(case = %case.name, error = %err, "case failed during warmup");
                return CaseReport::failed(&case.name, 0, Duration::ZERO, Default::default(), err);
            }
        }

        // Measured window: count completed invocations.
        let mut stats = IterationStats::new();
        let start = Instant::now();
        let deadline = start + case.measure;
        let mut iterations = 0u64;

        while Instant::now() < deadline {
            let invocation_start = Instant::now();
            match case.strategy.run() {
                Ok(()) => {
                    stats.record(invocation_start.elapsed());
                    iterations += 1;
                    spinner.set_message(format!(
                        "{}: {} iterations ({:.1}/s)",
                        case.name,
                        iterations,
                        iterations as f64 / start.elapsed().as_secs_f64(),
                    ));
                }
                Err(err) => {
                    spinner.finish_and_clear();
                    error!(case = %case.name, error = %err, "case failed");
                    return CaseReport::failed(
                        &case.name,
                        iterations,
                        start.elapsed(),
                        stats.summary(),
                        err,
                    );
                }
            }
        }

        let elapsed = start.elapsed();
        spinner.finish_and_clear();

        let report = CaseReport::completed(&case.name, iterations, elapsed, stats.summary());
        info!(
            case = %case.name,
            iterations,
            rate = format!("{:.2}/s", report.iterations_per_sec()),
            "case complete"
        );
        report
    }
}
