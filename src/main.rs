use catalog_engine::{config::Config, runner, snapshot::FileSource};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing; RUST_LOG wins over the configured filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = FileSource::new(&config.input_path);
    let report = runner::run_batch(&source).await?;
    runner::write_report(&report, config.output_path.as_deref(), config.pretty).await?;

    tracing::info!(run_id = %report.run_id, results = report.results.len(), "Run finished");
    Ok(())
}
