use std::path::PathBuf;
use thiserror::Error;

/// Failure to persist the player's progress.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no save path configured")]
    NoPath,
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize player: {0}")]
    Serialize(#[from] serde_json::Error),
}
