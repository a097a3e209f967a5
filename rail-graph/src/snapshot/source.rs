//! Snapshot sources.

use std::sync::{Arc, PoisonError, RwLock};

use super::{Snapshot, SnapshotError};

/// Trait for acquiring the current network snapshot.
///
/// This abstraction lets the engine run against a database, a file, or
/// fixed test data. Each call should return the latest data the source
/// knows about; callers hold on to the returned snapshot for one query.
pub trait SnapshotSource: Send + Sync {
    /// Take a snapshot of all stations and route records.
    fn snapshot(&self) -> Result<Arc<Snapshot>, SnapshotError>;
}

/// A snapshot held in memory that can be swapped out wholesale.
///
/// Readers get a cheap `Arc` clone; a replacement never disturbs queries
/// already running against the previous snapshot.
#[derive(Debug, Default)]
pub struct InMemorySource {
    current: RwLock<Arc<Snapshot>>,
}

impl InMemorySource {
    /// Create a source serving `snapshot`.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Replace the served snapshot.
    pub fn replace(&self, snapshot: Snapshot) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
    }
}

impl SnapshotSource for InMemorySource {
    fn snapshot(&self) -> Result<Arc<Snapshot>, SnapshotError> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(&guard))
    }
}
