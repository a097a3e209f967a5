//! Network snapshots and the sources that provide them.
//!
//! A snapshot is the full set of stations and route records a query runs
//! against. It is fixed for the duration of that query and may lag writes
//! made elsewhere.

mod demo;
mod error;
mod file;
mod source;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Route, RouteId, RouteRecord, Station, StationId};

pub use demo::demo_network;
pub use error::SnapshotError;
pub use file::JsonFileSource;
pub use source::{InMemorySource, SnapshotSource};

/// Stations and route records at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    stations: BTreeMap<StationId, Station>,
    routes: Vec<RouteRecord>,
}

impl Snapshot {
    /// Build a snapshot, rejecting duplicate station ids.
    ///
    /// Route records are kept as-is; malformed ones are dealt with when the
    /// graph is built.
    pub fn new(stations: Vec<Station>, routes: Vec<RouteRecord>) -> Result<Self, SnapshotError> {
        let mut by_id = BTreeMap::new();
        for station in stations {
            let id = station.id;
            if by_id.insert(id, station).is_some() {
                return Err(SnapshotError::DuplicateStation(id));
            }
        }
        Ok(Self {
            stations: by_id,
            routes,
        })
    }

    /// Look up a station.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Check whether a station exists.
    pub fn contains_station(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    /// All stations, ordered by id.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// All route records, in the order persistence delivered them.
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Records that validate into routes, in delivery order.
    pub fn valid_routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.routes.iter().filter_map(|r| Route::try_from(r).ok())
    }

    /// Find a route record by id.
    pub fn route(&self, id: RouteId) -> Option<&RouteRecord> {
        self.routes.iter().find(|r| r.id == id)
    }
}

/// On-disk and wire representation of a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub stations: Vec<Station>,
    pub routes: Vec<RouteRecord>,
}

impl TryFrom<SnapshotFile> for Snapshot {
    type Error = SnapshotError;

    fn try_from(file: SnapshotFile) -> Result<Self, Self::Error> {
        Snapshot::new(file.stations, file.routes)
    }
}

impl From<&Snapshot> for SnapshotFile {
    fn from(snapshot: &Snapshot) -> Self {
        SnapshotFile {
            stations: snapshot.stations().cloned().collect(),
            routes: snapshot.routes().to_vec(),
        }
    }
}
