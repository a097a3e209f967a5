//! Single-source, single-target shortest path search.
//!
//! A lazy-deletion Dijkstra: the frontier may hold several entries for one
//! station, and entries whose cost exceeds the best known distance are
//! dropped when popped. The search stops as soon as the target is popped,
//! or after a fixed number of pops.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use super::graph::Graph;
use super::weight::Weight;
use crate::domain::{Route, StationId};

/// Frontier entry, ordered so the cheapest pops first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    cost: Weight,
    station: StationId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Stations from source to target inclusive; empty when none was found.
    pub path: Vec<StationId>,

    /// Accumulated weight of `path`, if one was found.
    pub cost: Option<Weight>,

    /// Frontier pops performed.
    pub iterations: usize,

    /// True when the iteration cap stopped the search before the target
    /// was settled and live frontier entries remained. An empty path then
    /// does not prove the target is unreachable, and a non-empty one may
    /// not be optimal.
    pub bounded: bool,
}

impl SearchOutcome {
    fn trivial(station: StationId) -> Self {
        Self {
            path: vec![station],
            cost: Some(0),
            iterations: 0,
            bounded: false,
        }
    }

    /// Whether a path was found.
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Find the cheapest path from `from` to `to` under `weight`.
///
/// `weight` must be non-negative, which `Weight` being unsigned enforces.
/// When `from == to` the single-station path is returned without touching
/// the graph.
pub fn shortest_path<W>(
    graph: &Graph,
    from: StationId,
    to: StationId,
    weight: W,
    max_iterations: usize,
) -> SearchOutcome
where
    W: Fn(&Route) -> Weight,
{
    if from == to {
        return SearchOutcome::trivial(from);
    }

    let mut frontier = BinaryHeap::new();
    let mut distances: HashMap<StationId, Weight> = HashMap::new();
    let mut previous: HashMap<StationId, StationId> = HashMap::new();

    distances.insert(from, 0);
    frontier.push(State {
        cost: 0,
        station: from,
    });

    let mut iterations = 0;
    let mut settled = false;

    while iterations < max_iterations {
        let Some(State { cost, station }) = frontier.pop() else {
            break;
        };
        iterations += 1;

        if cost > distances.get(&station).copied().unwrap_or(Weight::MAX) {
            continue;
        }

        if station == to {
            settled = true;
            break;
        }

        let edges = graph.outgoing(station);
        trace!(station = %station, edges = edges.len(), cost, "Expanding station");

        for route in edges {
            let next = route.destination();
            let candidate = cost.saturating_add(weight(route));
            if candidate < distances.get(&next).copied().unwrap_or(Weight::MAX) {
                distances.insert(next, candidate);
                previous.insert(next, station);
                frontier.push(State {
                    cost: candidate,
                    station: next,
                });
            }
        }
    }

    let bounded = !settled && has_live_entry(&mut frontier, &distances);
    let path = reconstruct(&previous, from, to);
    let cost = if path.is_empty() {
        None
    } else {
        distances.get(&to).copied()
    };

    debug!(
        from = %from,
        to = %to,
        iterations,
        bounded,
        hops = path.len().saturating_sub(1),
        "Search complete"
    );

    SearchOutcome {
        path,
        cost,
        iterations,
        bounded,
    }
}

/// Whether any frontier entry could still improve a distance.
///
/// Stale heads are discarded on the way; they would have been skipped
/// without expanding anything.
fn has_live_entry(frontier: &mut BinaryHeap<State>, distances: &HashMap<StationId, Weight>) -> bool {
    while let Some(head) = frontier.peek() {
        if head.cost <= distances.get(&head.station).copied().unwrap_or(Weight::MAX) {
            return true;
        }
        frontier.pop();
    }
    false
}

/// Walk predecessor links back from `to`; empty if `to` was never reached.
fn reconstruct(
    previous: &HashMap<StationId, StationId>,
    from: StationId,
    to: StationId,
) -> Vec<StationId> {
    if !previous.contains_key(&to) {
        return Vec::new();
    }

    let mut path = vec![to];
    let mut current = to;
    while current != from {
        let Some(&prev) = previous.get(&current) else {
            return Vec::new();
        };
        // A chain longer than the predecessor map has looped.
        if path.len() > previous.len() {
            return Vec::new();
        }
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(id: u64) -> StationId {
        StationId::new(id)
    }

    #[test]
    fn frontier_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(State { cost: 5, station: sid(1) });
        heap.push(State { cost: 1, station: sid(2) });
        heap.push(State { cost: 3, station: sid(3) });

        let order: Vec<Weight> = std::iter::from_fn(|| heap.pop()).map(|s| s.cost).collect();
        assert_eq!(order, vec![1, 3, 5]);
    }

    #[test]
    fn frontier_ties_pop_lowest_station_first() {
        let mut heap = BinaryHeap::new();
        heap.push(State { cost: 2, station: sid(9) });
        heap.push(State { cost: 2, station: sid(4) });

        assert_eq!(heap.pop().unwrap().station, sid(4));
    }

    #[test]
    fn reconstruct_follows_predecessors() {
        let previous = HashMap::from([(sid(3), sid(2)), (sid(2), sid(1))]);
        assert_eq!(reconstruct(&previous, sid(1), sid(3)), vec![sid(1), sid(2), sid(3)]);
    }

    #[test]
    fn reconstruct_unreached_target_is_empty() {
        let previous = HashMap::from([(sid(2), sid(1))]);
        assert!(reconstruct(&previous, sid(1), sid(3)).is_empty());
    }

    #[test]
    fn reconstruct_rejects_cycles() {
        let previous = HashMap::from([(sid(3), sid(2)), (sid(2), sid(3))]);
        assert!(reconstruct(&previous, sid(1), sid(3)).is_empty());
    }
}
