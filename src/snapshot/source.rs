use std::path::PathBuf;
use tracing::instrument;

use crate::error::AppResult;

use super::SnapshotDocument;

/// Where a batch gets its snapshot document from
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load(&self) -> AppResult<SnapshotDocument>;

    /// Short label used in logs
    fn name(&self) -> &'static str;
}

/// Reads the snapshot from a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl SnapshotSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> AppResult<SnapshotDocument> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let document: SnapshotDocument = serde_json::from_str(&raw)?;

        tracing::info!(
            actors = document.actors.len(),
            movies = document.movies.len(),
            serials = document.serials.len(),
            users = document.users.len(),
            actions = document.commands.len(),
            "Snapshot loaded"
        );
        Ok(document)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
