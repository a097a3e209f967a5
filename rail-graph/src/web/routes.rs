//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{Route, RouteId, Station, StationId};
use crate::inventory::{CapacityStats, InventoryError, ResetSummary};
use crate::network::{Criterion, NetworkError, RailNetwork, SegmentPath, StationPath};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/routes", get(list_routes))
        .route("/routes/path", get(find_path))
        .route("/routes/path/details", get(find_path_details))
        .route("/routes/search", get(search_routes))
        .route("/routes/search/available", get(search_available_routes))
        .route("/routes/:id/seats/availability", get(seat_availability))
        .route("/routes/:id/seats/capacity", get(seat_capacity))
        .route("/routes/:id/seats/reserve", post(reserve_seats))
        .route("/routes/:id/seats/release", post(release_seats))
        .route("/maintenance/reset-seats", post(reset_seats))
        .route("/maintenance/capacity-stats", get(capacity_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn list_stations(State(state): State<AppState>) -> Result<Json<Vec<Station>>, AppError> {
    run(&state, |network| network.stations()).await.map(Json)
}

async fn list_routes(State(state): State<AppState>) -> Result<Json<Vec<Route>>, AppError> {
    run(&state, |network| network.routes()).await.map(Json)
}

/// Best path as a station sequence.
async fn find_path(
    State(state): State<AppState>,
    Query(req): Query<PathRequest>,
) -> Result<Json<StationPath>, AppError> {
    let (from, to, criterion) = parse_path_request(&req)?;
    let max_iterations = req
        .max_iterations
        .unwrap_or(state.network.config().max_iterations);

    run(&state, move |network| {
        network.find_path_bounded(from, to, criterion, max_iterations)
    })
    .await
    .map(Json)
}

/// Best path as concrete routes, one per hop.
async fn find_path_details(
    State(state): State<AppState>,
    Query(req): Query<PathRequest>,
) -> Result<Json<SegmentPath>, AppError> {
    let (from, to, criterion) = parse_path_request(&req)?;
    let max_iterations = req
        .max_iterations
        .unwrap_or(state.network.config().max_iterations);

    run(&state, move |network| {
        network.find_path_details_bounded(from, to, criterion, max_iterations)
    })
    .await
    .map(Json)
}

async fn search_routes(
    State(state): State<AppState>,
    Query(req): Query<RouteSearchRequest>,
) -> Result<Json<Vec<Route>>, AppError> {
    let from = parse_station(&req.from)?;
    let to = parse_station(&req.to)?;
    run(&state, move |network| network.routes_between(from, to))
        .await
        .map(Json)
}

async fn search_available_routes(
    State(state): State<AppState>,
    Query(req): Query<RouteSearchRequest>,
) -> Result<Json<Vec<Route>>, AppError> {
    let from = parse_station(&req.from)?;
    let to = parse_station(&req.to)?;
    run(&state, move |network| network.available_routes_between(from, to))
        .await
        .map(Json)
}

async fn seat_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let route_id = parse_route(&id)?;
    let available_seats = run(&state, move |network| network.available_seats(route_id)).await?;
    Ok(Json(AvailabilityResponse {
        route_id,
        available_seats,
    }))
}

async fn seat_capacity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CapacityResponse>, AppError> {
    let route_id = parse_route(&id)?;
    let capacity = run(&state, move |network| network.capacity(route_id)).await?;
    Ok(Json(CapacityResponse { route_id, capacity }))
}

async fn reserve_seats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(req): Query<SeatRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let route_id = parse_route(&id)?;
    let quantity = req.quantity.unwrap_or(1);
    let available_seats = run(&state, move |network| network.reserve(route_id, quantity)).await?;
    Ok(Json(AvailabilityResponse {
        route_id,
        available_seats,
    }))
}

async fn release_seats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(req): Query<SeatRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let route_id = parse_route(&id)?;
    let quantity = req.quantity.unwrap_or(1);
    let available_seats = run(&state, move |network| network.release(route_id, quantity)).await?;
    Ok(Json(AvailabilityResponse {
        route_id,
        available_seats,
    }))
}

async fn reset_seats(State(state): State<AppState>) -> Result<Json<ResetSummary>, AppError> {
    run(&state, |network| network.reset_seats()).await.map(Json)
}

async fn capacity_stats(State(state): State<AppState>) -> Result<Json<CapacityStats>, AppError> {
    run(&state, |network| network.capacity_stats()).await.map(Json)
}

/// Run an engine call off the async workers.
///
/// Snapshot loading may touch the filesystem and path searches are CPU
/// bound, so neither belongs on a reactor thread.
async fn run<T, F>(state: &AppState, call: F) -> Result<T, AppError>
where
    F: FnOnce(&RailNetwork) -> Result<T, NetworkError> + Send + 'static,
    T: Send + 'static,
{
    let network = Arc::clone(&state.network);
    tokio::task::spawn_blocking(move || call(&network))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("Engine task failed: {e}"),
        })?
        .map_err(AppError::from)
}

fn parse_path_request(req: &PathRequest) -> Result<(StationId, StationId, Criterion), AppError> {
    let from = parse_station(&req.from)?;
    let to = parse_station(&req.to)?;
    let criterion = req
        .criterion
        .as_deref()
        .map(str::parse::<Criterion>)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?
        .unwrap_or_default();
    Ok((from, to, criterion))
}

fn parse_station(raw: &str) -> Result<StationId, AppError> {
    StationId::parse(raw).map_err(|e| AppError::BadRequest {
        message: format!("Invalid station {raw:?}: {e}"),
    })
}

fn parse_route(raw: &str) -> Result<RouteId, AppError> {
    RouteId::parse(raw).map_err(|e| AppError::BadRequest {
        message: format!("Invalid route {raw:?}: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        let message = e.to_string();
        match e {
            NetworkError::UnknownStation(_)
            | NetworkError::Inventory(InventoryError::RouteNotFound(_)) => {
                AppError::NotFound { message }
            }
            NetworkError::Inventory(InventoryError::InvalidQuantity(_)) => {
                AppError::BadRequest { message }
            }
            NetworkError::Inventory(InventoryError::CapacityExceeded { .. }) => {
                AppError::Conflict { message }
            }
            NetworkError::Snapshot(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
