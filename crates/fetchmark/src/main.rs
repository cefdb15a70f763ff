use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fetchmark::{render_table, strategies, BenchmarkRunner, HarnessConfig};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fetchmark=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = HarnessConfig::default();
    tracing::info!(
        http_target = %config.http_target,
        socket_target = %config.socket_target,
        iterations = config.iterations,
        "fetchmark starting"
    );

    // One runtime for the whole process; async strategies borrow its handle.
    let runtime = tokio::runtime::Runtime::new()?;

    let mut runner = BenchmarkRunner::new();
    for case in strategies::registry(&config, runtime.handle().clone()) {
        runner.register(case);
    }

    let reports = runner.run();
    println!("{}", render_table(&reports));

    match fetchmark::runner::write_json(&reports, "target/benchmark-reports") {
        Ok(path) => tracing::info!(path = %path, "wrote report"),
        Err(err) => tracing::warn!(error = %err, "failed to write report"),
    }

    for report in reports.iter().filter(|report| report.is_failed()) {
        tracing::warn!(case = %report.name, "case did not complete its run");
    }

    Ok(())
}
