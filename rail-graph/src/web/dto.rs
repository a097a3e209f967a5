//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::RouteId;

/// Query for a path between two stations.
#[derive(Debug, Deserialize)]
pub struct PathRequest {
    /// Origin station id
    pub from: String,

    /// Destination station id
    pub to: String,

    /// `time`, `price` or `value`; defaults to `time`
    pub criterion: Option<String>,

    /// Overrides the configured solver iteration cap
    pub max_iterations: Option<usize>,
}

/// Query for the routes between two adjacent stations.
#[derive(Debug, Deserialize)]
pub struct RouteSearchRequest {
    /// Origin station id
    pub from: String,

    /// Destination station id
    pub to: String,
}

/// Query for a seat reservation or release.
#[derive(Debug, Deserialize)]
pub struct SeatRequest {
    /// Seats to reserve or release; defaults to one
    pub quantity: Option<u32>,
}

/// Seats currently available on a route.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityResponse {
    pub route_id: RouteId,
    pub available_seats: u32,
}

/// Total seats on a route.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapacityResponse {
    pub route_id: RouteId,
    pub capacity: u32,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
