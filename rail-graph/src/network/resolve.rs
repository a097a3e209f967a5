//! Turning station sequences into concrete routes.
//!
//! For each consecutive station pair the resolver re-selects the best
//! parallel route under the query's criterion. This is an independent pass
//! over the snapshot, not a replay of the solver's relaxations: when
//! parallel routes tie after weight truncation, the route shown may differ
//! from the one the solver happened to relax through, but it is never
//! worse under the criterion.

use tracing::debug;

use super::weight::Criterion;
use crate::domain::{Route, StationId};

/// Pick the best route from `from` to `to` under `criterion`.
///
/// Among equally good routes the first in snapshot order wins.
pub fn best_route<'a>(
    routes: &'a [Route],
    from: StationId,
    to: StationId,
    criterion: Criterion,
) -> Option<&'a Route> {
    routes
        .iter()
        .filter(|r| r.connects(from, to))
        .min_by(|a, b| criterion.compare(a, b))
}

/// Resolve a station path into one route per hop.
///
/// Hops with no connecting route are skipped, so the result can be shorter
/// than `path.len() - 1`.
pub fn resolve_segments(path: &[StationId], routes: &[Route], criterion: Criterion) -> Vec<Route> {
    path.windows(2)
        .filter_map(|hop| {
            let route = best_route(routes, hop[0], hop[1], criterion);
            if route.is_none() {
                debug!(from = %hop[0], to = %hop[1], "No route for hop, skipping");
            }
            route.cloned()
        })
        .collect()
}

/// All routes from `from` to `to`, fastest first.
///
/// Routes with equal travel time keep snapshot order.
pub fn routes_between(routes: &[Route], from: StationId, to: StationId) -> Vec<Route> {
    let mut found: Vec<Route> = routes
        .iter()
        .filter(|r| r.connects(from, to))
        .cloned()
        .collect();
    found.sort_by_key(Route::travel_time_mins);
    found
}
