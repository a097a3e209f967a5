//! Query and mutation errors surfaced by the network facade.

use crate::domain::StationId;
use crate::inventory::InventoryError;
use crate::snapshot::SnapshotError;

/// Errors from [`RailNetwork`](super::RailNetwork) operations.
///
/// "No path" is not an error; it is an empty result.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Station id not present in the snapshot
    #[error("station {0} does not exist")]
    UnknownStation(StationId),

    /// Seat inventory rejected the operation
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Snapshot could not be acquired
    #[error("snapshot unavailable: {0}")]
    Snapshot(#[from] SnapshotError),
}
