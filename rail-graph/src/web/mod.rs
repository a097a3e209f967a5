//! Web layer for the rail network.
//!
//! Exposes path queries and seat operations over HTTP for the booking
//! workflow that sits in front of the engine.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
