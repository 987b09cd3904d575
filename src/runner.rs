use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    report::{render, ResultRecord, RunReport},
    services::Engine,
    snapshot::SnapshotSource,
};

/// Loads a snapshot, executes its requests in order and collects one record per action
pub async fn run_batch(source: &dyn SnapshotSource) -> AppResult<RunReport> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("batch", run_id = %run_id, source = source.name());

    async move {
        let snapshot = source.load().await?.into_snapshot()?;
        let mut engine = Engine::new(snapshot.catalog);

        let results: Vec<ResultRecord> = snapshot
            .requests
            .iter()
            .map(|entry| match entry {
                Ok(request) => ResultRecord {
                    id: request.id,
                    message: render(&engine.execute(request)),
                },
                Err(rejected) => ResultRecord {
                    id: rejected.id,
                    message: format!("error -> {}", rejected.error),
                },
            })
            .collect();

        tracing::info!(results = results.len(), "Batch completed");
        Ok::<_, AppError>(RunReport::new(run_id, results))
    }
    .instrument(span)
    .await
}

/// Writes the report as JSON to `output`, or to stdout when no path is given
pub async fn write_report(report: &RunReport, output: Option<&Path>, pretty: bool) -> AppResult<()> {
    let mut body = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    body.push('\n');

    match output {
        Some(path) => {
            tokio::fs::write(path, body).await?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(body.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
