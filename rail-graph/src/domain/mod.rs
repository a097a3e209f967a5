//! Domain types for the rail network.
//!
//! Stations and routes as the engine sees them. Route records from
//! persistence are validated into [`Route`] values before they become
//! graph edges, so code that receives a `Route` can trust its invariants.

mod error;
mod route;
mod station;

pub use error::DomainError;
pub use route::{InvalidRouteId, Route, RouteId, RouteRecord};
pub use station::{InvalidStationId, Station, StationId};
