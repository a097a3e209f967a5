//! The network facade: path queries and seat operations.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::config::SolverConfig;
use super::dijkstra::{SearchOutcome, shortest_path};
use super::error::NetworkError;
use super::graph::Graph;
use super::resolve::{resolve_segments, routes_between};
use super::weight::{Criterion, Weight};
use crate::domain::{Route, RouteId, Station, StationId};
use crate::inventory::{CapacityStats, InventoryError, ResetSummary, SeatInventory};
use crate::snapshot::{Snapshot, SnapshotSource};

/// A path as a station sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationPath {
    /// Stations from origin to destination; empty when no path was found.
    pub stations: Vec<Station>,
    pub criterion: Criterion,
    /// Solver cost under `criterion`, if a path was found.
    pub cost: Option<Weight>,
    pub iterations: usize,
    /// The iteration cap cut the search short.
    pub search_bounded: bool,
}

/// A path as one route per hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentPath {
    /// Routes in travel order; empty when no path was found or origin and
    /// destination coincide.
    pub segments: Vec<Route>,
    pub criterion: Criterion,
    pub cost: Option<Weight>,
    pub iterations: usize,
    pub search_bounded: bool,
}

/// Path finding and seat inventory over a snapshot source.
///
/// Every query takes a fresh snapshot and builds its graph from it; nothing
/// about the graph is cached between queries. Seat counts come from the
/// inventory, which outlives snapshots.
pub struct RailNetwork {
    source: Arc<dyn SnapshotSource>,
    inventory: SeatInventory,
    config: SolverConfig,
}

impl RailNetwork {
    /// Create a network with an empty inventory.
    ///
    /// Call [`RailNetwork::sync_inventory`] to seed seat counters up front;
    /// otherwise routes are registered on first use.
    pub fn new(source: Arc<dyn SnapshotSource>, config: SolverConfig) -> Self {
        Self {
            source,
            inventory: SeatInventory::new(),
            config,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn inventory(&self) -> &SeatInventory {
        &self.inventory
    }

    /// Bring the inventory in line with the current snapshot.
    ///
    /// Routes the inventory does not know yet get a counter; counters for
    /// routes no longer in the snapshot are dropped. Live counts of routes
    /// present in both are left alone. Returns how many were added.
    pub fn sync_inventory(&self) -> Result<usize, NetworkError> {
        let snapshot = self.source.snapshot()?;
        let routes: Vec<Route> = snapshot.valid_routes().collect();
        let live: HashSet<RouteId> = routes.iter().map(Route::id).collect();

        self.inventory.retain(|id| live.contains(&id));
        Ok(self.inventory.seed(&routes))
    }

    /// All stations, ordered by id.
    pub fn stations(&self) -> Result<Vec<Station>, NetworkError> {
        let snapshot = self.source.snapshot()?;
        Ok(snapshot.stations().cloned().collect())
    }

    /// All valid routes with live seat counts.
    pub fn routes(&self) -> Result<Vec<Route>, NetworkError> {
        let snapshot = self.source.snapshot()?;
        Ok(snapshot
            .valid_routes()
            .map(|r| self.with_live_seats(r))
            .collect())
    }

    /// Find the best station sequence from `from` to `to`.
    pub fn find_path(
        &self,
        from: StationId,
        to: StationId,
        criterion: Criterion,
    ) -> Result<StationPath, NetworkError> {
        self.find_path_bounded(from, to, criterion, self.config.max_iterations)
    }

    /// As [`RailNetwork::find_path`], with a per-query iteration cap.
    pub fn find_path_bounded(
        &self,
        from: StationId,
        to: StationId,
        criterion: Criterion,
        max_iterations: usize,
    ) -> Result<StationPath, NetworkError> {
        let (snapshot, outcome) = self.search(from, to, criterion, max_iterations)?;

        let stations = outcome
            .path
            .iter()
            .filter_map(|id| snapshot.station(*id).cloned())
            .collect();

        Ok(StationPath {
            stations,
            criterion,
            cost: outcome.cost,
            iterations: outcome.iterations,
            search_bounded: outcome.bounded,
        })
    }

    /// Find the best path from `from` to `to` as concrete routes.
    pub fn find_path_details(
        &self,
        from: StationId,
        to: StationId,
        criterion: Criterion,
    ) -> Result<SegmentPath, NetworkError> {
        self.find_path_details_bounded(from, to, criterion, self.config.max_iterations)
    }

    /// As [`RailNetwork::find_path_details`], with a per-query iteration cap.
    pub fn find_path_details_bounded(
        &self,
        from: StationId,
        to: StationId,
        criterion: Criterion,
        max_iterations: usize,
    ) -> Result<SegmentPath, NetworkError> {
        let (snapshot, outcome) = self.search(from, to, criterion, max_iterations)?;

        let routes: Vec<Route> = snapshot.valid_routes().collect();
        let segments: Vec<Route> = resolve_segments(&outcome.path, &routes, criterion)
            .into_iter()
            .map(|r| self.with_live_seats(r))
            .collect();

        debug!(segments = segments.len(), "Resolved path segments");

        Ok(SegmentPath {
            segments,
            criterion,
            cost: outcome.cost,
            iterations: outcome.iterations,
            search_bounded: outcome.bounded,
        })
    }

    /// Every route from `from` to `to`, fastest first.
    pub fn routes_between(
        &self,
        from: StationId,
        to: StationId,
    ) -> Result<Vec<Route>, NetworkError> {
        let snapshot = self.source.snapshot()?;
        check_station(&snapshot, from)?;
        check_station(&snapshot, to)?;

        let routes: Vec<Route> = snapshot.valid_routes().collect();
        Ok(routes_between(&routes, from, to)
            .into_iter()
            .map(|r| self.with_live_seats(r))
            .collect())
    }

    /// Routes from `from` to `to` with at least one seat left right now,
    /// fastest first.
    pub fn available_routes_between(
        &self,
        from: StationId,
        to: StationId,
    ) -> Result<Vec<Route>, NetworkError> {
        Ok(self
            .routes_between(from, to)?
            .into_iter()
            .filter(|r| r.available_seats() > 0)
            .collect())
    }

    /// Reserve seats on one route. Returns the seats left.
    pub fn reserve(&self, route: RouteId, quantity: u32) -> Result<u32, NetworkError> {
        self.ensure_live(route)?;
        Ok(self.inventory.reserve(route, quantity)?)
    }

    /// Release seats on one route. Returns the seats now available.
    pub fn release(&self, route: RouteId, quantity: u32) -> Result<u32, NetworkError> {
        self.ensure_live(route)?;
        Ok(self.inventory.release(route, quantity)?)
    }

    /// Seats currently available on one route.
    pub fn available_seats(&self, route: RouteId) -> Result<u32, NetworkError> {
        self.ensure_live(route)?;
        Ok(self.inventory.available(route)?)
    }

    /// Total seats on one route.
    pub fn capacity(&self, route: RouteId) -> Result<u32, NetworkError> {
        self.ensure_live(route)?;
        Ok(self.inventory.capacity(route)?)
    }

    /// Restore every registered route to full capacity.
    pub fn reset_seats(&self) -> Result<ResetSummary, NetworkError> {
        self.sync_inventory()?;
        Ok(self.inventory.reset_all())
    }

    /// Aggregate seat figures across registered routes.
    pub fn capacity_stats(&self) -> Result<CapacityStats, NetworkError> {
        self.sync_inventory()?;
        Ok(self.inventory.stats())
    }

    fn search(
        &self,
        from: StationId,
        to: StationId,
        criterion: Criterion,
        max_iterations: usize,
    ) -> Result<(Arc<Snapshot>, SearchOutcome), NetworkError> {
        info!(from = %from, to = %to, criterion = %criterion, "Finding path");

        let snapshot = self.source.snapshot()?;
        check_station(&snapshot, from)?;
        check_station(&snapshot, to)?;

        let graph = if from == to {
            Graph::default()
        } else {
            Graph::from_snapshot(&snapshot)
        };
        let outcome = shortest_path(
            &graph,
            from,
            to,
            |route| criterion.weight(route),
            max_iterations,
        );

        if !outcome.found() {
            info!(from = %from, to = %to, bounded = outcome.bounded, "No path found");
        }

        Ok((snapshot, outcome))
    }

    /// Check `route` against the current snapshot before touching its seats.
    ///
    /// Only the requested route is looked at: a new route gets its counter
    /// registered, and a route that has left the snapshot loses its counter
    /// and is reported as not found.
    fn ensure_live(&self, route: RouteId) -> Result<(), NetworkError> {
        let snapshot = self.source.snapshot()?;
        match snapshot.route(route).and_then(|record| Route::try_from(record).ok()) {
            Some(current) => {
                if self.inventory.register(&current) {
                    debug!(route = %route, "Registered seat counter on first use");
                }
                Ok(())
            }
            None => {
                self.inventory.remove(route);
                Err(InventoryError::RouteNotFound(route).into())
            }
        }
    }

    fn with_live_seats(&self, route: Route) -> Route {
        match self.inventory.available(route.id()) {
            Ok(available) => route.with_available_seats(available),
            Err(_) => route,
        }
    }
}

fn check_station(snapshot: &Snapshot, id: StationId) -> Result<(), NetworkError> {
    if snapshot.contains_station(id) {
        Ok(())
    } else {
        Err(NetworkError::UnknownStation(id))
    }
}
