//! JSON file snapshot source.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::{Snapshot, SnapshotError, SnapshotFile, SnapshotSource};

/// Snapshot source backed by a JSON file.
///
/// The file is re-read on every call, so edits made by another process
/// show up on the next query.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a snapshot to the file, creating parent directories as needed.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| SnapshotError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&SnapshotFile::from(snapshot)).map_err(|e| {
            SnapshotError::Json {
                message: e.to_string(),
            }
        })?;

        std::fs::write(&self.path, json).map_err(|source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SnapshotSource for JsonFileSource {
    fn snapshot(&self) -> Result<Arc<Snapshot>, SnapshotError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: SnapshotFile =
            serde_json::from_str(&contents).map_err(|e| SnapshotError::Json {
                message: e.to_string(),
            })?;

        debug!(
            path = %self.path.display(),
            stations = file.stations.len(),
            routes = file.routes.len(),
            "Loaded snapshot file"
        );

        Ok(Arc::new(Snapshot::try_from(file)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::demo_network;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_snapshot() {
        let dir = tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("network.json"));

        let demo = demo_network();
        source.save(&demo).unwrap();

        let loaded = source.snapshot().unwrap();
        assert_eq!(loaded.stations().count(), demo.stations().count());
        assert_eq!(loaded.routes(), demo.routes());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("network.json");
        let source = JsonFileSource::new(&path);

        source.save(&Snapshot::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = JsonFileSource::new("/nonexistent/path/network.json");
        assert!(matches!(source.snapshot(), Err(SnapshotError::Io { .. })));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, "{ not json").unwrap();

        let source = JsonFileSource::new(&path);
        assert!(matches!(source.snapshot(), Err(SnapshotError::Json { .. })));
    }

    #[test]
    fn records_with_missing_endpoints_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(
            &path,
            r#"{
                "stations": [{"id": 1, "name": "Köln Hauptbahnhof", "city": "Köln"}],
                "routes": [{
                    "id": 1, "origin": 1, "destination": null,
                    "travel_time_mins": 25, "price": "12.50",
                    "capacity": 100, "available_seats": 100
                }]
            }"#,
        )
        .unwrap();

        let snapshot = JsonFileSource::new(&path).snapshot().unwrap();
        assert_eq!(snapshot.routes().len(), 1);
        assert_eq!(snapshot.valid_routes().count(), 0);
    }
}
