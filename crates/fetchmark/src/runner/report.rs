//! Per-case reports and the comparison table

use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use super::stats::LatencySummary;

/// Result of running one benchmark case
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    /// Case name as registered
    pub name: String,
    /// Completed invocations within the measured window
    pub iterations: u64,
    /// Actual measured elapsed time
    pub elapsed: Duration,
    /// Per-invocation latency summary
    pub latency: LatencySummary,
    /// Failure that halted the case, if any
    pub error: Option<String>,
}

impl CaseReport {
    /// Report for a case that completed its measured window
    pub fn completed(
        name: impl Into<String>,
        iterations: u64,
        elapsed: Duration,
        latency: LatencySummary,
    ) -> Self {
        Self {
            name: name.into(),
            iterations,
            elapsed,
            latency,
            error: None,
        }
    }

    /// Report for a case halted by a failure; carries whatever was measured
    /// before the failing invocation.
    pub fn failed(
        name: impl Into<String>,
        iterations: u64,
        elapsed: Duration,
        latency: LatencySummary,
        error: impl ToString,
    ) -> Self {
        Self {
            name: name.into(),
            iterations,
            elapsed,
            latency,
            error: Some(error.to_string()),
        }
    }

    /// Completed invocations per second over the measured window
    pub fn iterations_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.iterations as f64 / secs
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Render the comparison table printed after all cases have run
pub fn render_table(reports: &[CaseReport]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<26} {:>8} {:>12} {:>10} {:>10}\n",
        "Case", "Iters", "Iters/sec", "P50", "P99"
    ));
    out.push_str(&format!(
        "{:-<26} {:->8} {:->12} {:->10} {:->10}\n",
        "", "", "", "", ""
    ));

    for report in reports {
        if let Some(error) = &report.error {
            out.push_str(&format!("{:<26} failed: {}\n", report.name, error));
            continue;
        }
        out.push_str(&format!(
            "{:<26} {:>8} {:>10.2}/s {:>8.2}ms {:>8.2}ms\n",
            report.name,
            report.iterations,
            report.iterations_per_sec(),
            report.latency.p50.as_secs_f64() * 1000.0,
            report.latency.p99.as_secs_f64() * 1000.0,
        ));
    }

    out
}

/// Write the collected reports as JSON under the output directory and
/// return the file path.
pub fn write_json(reports: &[CaseReport], output_dir: impl AsRef<Path>) -> io::Result<String> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let path = output_dir.join("fetchmark-report.json");
    let json = serde_json::to_string_pretty(reports).map_err(io::Error::from)?;
    std::fs::write(&path, json)?;

    Ok(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterations_per_sec() {
        let report = CaseReport::completed(
            "case",
            20,
            Duration::from_secs(10),
            LatencySummary::default(),
        );
        assert!((report.iterations_per_sec() - 2.0).abs() < f64::EPSILON);
        assert!(!report.is_failed());
    }

    #[test]
    fn test_zero_elapsed_reports_zero_rate() {
        let report =
            CaseReport::completed("case", 0, Duration::ZERO, LatencySummary::default());
        assert_eq!(report.iterations_per_sec(), 0.0);
    }

    #[test]
    fn test_write_json_roundtrip() {
        let dir = std::env::temp_dir().join(format!("fetchmark-report-{}", std::process::id()));
        let reports = vec![CaseReport::completed(
            "thread-pool/10",
            7,
            Duration::from_secs(5),
            LatencySummary::default(),
        )];

        let path = write_json(&reports, &dir).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("thread-pool/10"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_table_marks_failures() {
        let reports = vec![
            CaseReport::completed(
                "bounded-async/10",
                42,
                Duration::from_secs(10),
                LatencySummary::default(),
            ),
            CaseReport::failed(
                "pooled-client/10",
                3,
                Duration::from_secs(1),
                LatencySummary::default(),
                "non-success response status: 500",
            ),
        ];

        let table = render_table(&reports);
        assert!(table.contains("bounded-async/10"));
        assert!(table.contains("pooled-client/10"));
        assert!(table.contains("failed: non-success response status: 500"));
    }
}
