//! Snapshot loading error types.

use std::path::PathBuf;

/// Errors that can occur while acquiring a network snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Snapshot file could not be read
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON for the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Two stations share one identifier
    #[error("duplicate station id {0}")]
    DuplicateStation(crate::domain::StationId),
}
