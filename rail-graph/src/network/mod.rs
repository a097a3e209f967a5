//! Transport graph engine.
//!
//! Builds a directed multigraph from a route snapshot, finds least-cost
//! paths under a chosen criterion, and resolves those paths into concrete
//! routes. [`RailNetwork`] ties this to the seat inventory.

mod config;
mod dijkstra;
mod engine;
mod error;
mod graph;
mod resolve;
mod weight;

pub use config::{DEFAULT_MAX_ITERATIONS, SolverConfig};
pub use dijkstra::{SearchOutcome, shortest_path};
pub use engine::{RailNetwork, SegmentPath, StationPath};
pub use error::NetworkError;
pub use graph::Graph;
pub use resolve::{best_route, resolve_segments, routes_between};
pub use weight::{
    Criterion, InvalidCriterion, Weight, price_weight, time_weight, value_ratio, value_weight,
};
