//! Adjacency graph built from a route snapshot.
//!
//! Each origin station gets one bucket of outgoing routes. Stations with no
//! outgoing routes have no bucket. Buckets are ordered by station id and
//! routes within a bucket keep snapshot order, so equal-weight ties resolve
//! the same way on every build.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::{Route, RouteRecord, StationId};
use crate::snapshot::Snapshot;

/// Directed multigraph: station id to outgoing routes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: BTreeMap<StationId, Vec<Route>>,
    edge_count: usize,
    skipped: usize,
}

impl Graph {
    /// Build a graph from route records.
    ///
    /// Records that fail validation (missing endpoints, zero travel time,
    /// and so on) are skipped and counted.
    pub fn build<'a>(records: impl IntoIterator<Item = &'a RouteRecord>) -> Self {
        Self::build_filtered(records, |_| true)
    }

    /// Build a graph from a snapshot.
    ///
    /// In addition to the checks in [`Graph::build`], routes that reference
    /// a station missing from the snapshot are skipped.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::build_filtered(snapshot.routes(), |route| {
            let known = snapshot.contains_station(route.origin())
                && snapshot.contains_station(route.destination());
            if !known {
                warn!(
                    route = %route.id(),
                    origin = %route.origin(),
                    destination = %route.destination(),
                    "Route references unknown station, skipping"
                );
            }
            known
        })
    }

    fn build_filtered<'a>(
        records: impl IntoIterator<Item = &'a RouteRecord>,
        keep: impl Fn(&Route) -> bool,
    ) -> Self {
        let mut graph = Graph::default();

        for record in records {
            let route = match Route::try_from(record) {
                Ok(route) => route,
                Err(e) => {
                    warn!(route = %record.id, error = %e, "Malformed route, skipping");
                    graph.skipped += 1;
                    continue;
                }
            };
            if !keep(&route) {
                graph.skipped += 1;
                continue;
            }
            graph.insert(route);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count,
            skipped = graph.skipped,
            "Built graph"
        );

        graph
    }

    /// Add a route under its origin's bucket.
    pub fn insert(&mut self, route: Route) {
        self.adjacency.entry(route.origin()).or_default().push(route);
        self.edge_count += 1;
    }

    /// Outgoing routes of a station, empty if it has none.
    pub fn outgoing(&self, station: StationId) -> &[Route] {
        self.adjacency
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the station has at least one outgoing route.
    pub fn has_outgoing(&self, station: StationId) -> bool {
        self.adjacency.contains_key(&station)
    }

    /// Origin stations, in id order.
    pub fn origins(&self) -> impl Iterator<Item = StationId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Number of adjacency buckets (distinct origin stations).
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of records left out while building.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteId, Station};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn rec(id: u64, from: u64, to: u64, mins: u32, price: Decimal) -> RouteRecord {
        RouteRecord::new(
            RouteId::new(id),
            StationId::new(from),
            StationId::new(to),
            mins,
            price,
            100,
        )
    }

    fn sid(id: u64) -> StationId {
        StationId::new(id)
    }

    #[test]
    fn one_bucket_per_origin() {
        let records = vec![
            rec(1, 1, 2, 10, dec!(5)),
            rec(2, 1, 3, 10, dec!(5)),
            rec(3, 2, 3, 10, dec!(5)),
        ];
        let graph = Graph::build(&records);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.outgoing(sid(1)).len(), 2);
        assert_eq!(graph.outgoing(sid(2)).len(), 1);
        assert!(graph.outgoing(sid(3)).is_empty());
        assert!(!graph.has_outgoing(sid(3)));
    }

    #[test]
    fn parallel_edges_are_kept_in_snapshot_order() {
        let records = vec![
            rec(7, 1, 2, 30, dec!(5)),
            rec(3, 1, 2, 10, dec!(9)),
            rec(5, 1, 2, 20, dec!(7)),
        ];
        let graph = Graph::build(&records);

        let ids: Vec<u64> = graph.outgoing(sid(1)).iter().map(|r| r.id().get()).collect();
        assert_eq!(ids, vec![7, 3, 5]);
    }

    #[test]
    fn malformed_records_skipped() {
        let mut no_origin = rec(2, 1, 2, 10, dec!(5));
        no_origin.origin = None;
        let mut no_destination = rec(3, 1, 2, 10, dec!(5));
        no_destination.destination = None;
        let zero_time = rec(4, 1, 2, 0, dec!(5));

        let records = vec![rec(1, 1, 2, 10, dec!(5)), no_origin, no_destination, zero_time];
        let graph = Graph::build(&records);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.skipped(), 3);
    }

    #[test]
    fn dangling_references_skipped_from_snapshot() {
        let snapshot = Snapshot::new(
            vec![
                Station::new(sid(1), "Köln Hauptbahnhof", "Köln"),
                Station::new(sid(2), "Bonn Hauptbahnhof", "Bonn"),
            ],
            vec![rec(1, 1, 2, 20, dec!(9.50)), rec(2, 1, 99, 20, dec!(9.50))],
        )
        .unwrap();

        let graph = Graph::from_snapshot(&snapshot);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.skipped(), 1);
        assert_eq!(graph.outgoing(sid(1))[0].destination(), sid(2));
    }

    #[test]
    fn self_loops_are_edges() {
        let records = vec![rec(1, 4, 4, 5, dec!(1))];
        let graph = Graph::build(&records);
        assert_eq!(graph.outgoing(sid(4)).len(), 1);
    }

    #[test]
    fn origins_in_id_order() {
        let records = vec![
            rec(1, 9, 1, 10, dec!(5)),
            rec(2, 2, 1, 10, dec!(5)),
            rec(3, 5, 1, 10, dec!(5)),
        ];
        let graph = Graph::build(&records);
        let origins: Vec<u64> = graph.origins().map(|s| s.get()).collect();
        assert_eq!(origins, vec![2, 5, 9]);
    }

    #[test]
    fn empty_snapshot_gives_empty_graph() {
        let graph = Graph::build(&[]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
