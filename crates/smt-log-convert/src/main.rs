//! SMT log converter: turns each machine's `Error.log` / `Operate.log` into
//! JSON arrays for the dashboard.

use tracing_subscriber::EnvFilter;

use smt_log_convert::batch::run_batch;
use smt_log_convert::config::ConverterConfig;
use smt_log_core::{FileLogSource, FileSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "smt-log-convert starting"
    );

    // ── Load config ─────────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => ConverterConfig::from_file(&path)?
            .with_env_overrides(|key| std::env::var(key).ok()),
        None => ConverterConfig::from_env(),
    };
    tracing::info!(
        log_dir = %config.log_dir.display(),
        output_dir = %config.output_dir.display(),
        machines = config.machines.len(),
        style = ?config.parse.style,
        "config loaded"
    );

    // ── Run ─────────────────────────────────────────────────────
    let report = run_batch(&config, &FileLogSource, &FileSink).await?;

    let failed = report.failed();
    if failed > 0 {
        anyhow::bail!("{failed} file(s) failed to convert");
    }

    tracing::info!("smt-log-convert finished");
    Ok(())
}
