//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::network::SolverConfig;

/// Listen address variable.
pub const ADDR_VAR: &str = "RAIL_GRAPH_ADDR";

/// Snapshot file variable. Unset means the built-in demo network.
pub const SNAPSHOT_VAR: &str = "RAIL_GRAPH_SNAPSHOT";

/// Solver iteration cap variable.
pub const MAX_ITERATIONS_VAR: &str = "RAIL_GRAPH_MAX_ITERATIONS";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a socket address")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var}={value:?} is not a non-negative integer")]
    InvalidNumber { var: &'static str, value: String },
}

/// Configuration for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// JSON snapshot to serve, if any.
    pub snapshot_path: Option<PathBuf>,

    /// Path search settings.
    pub solver: SolverConfig,
}

impl ServerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(addr: SocketAddr, snapshot_path: Option<PathBuf>, solver: SolverConfig) -> Self {
        Self {
            addr,
            snapshot_path,
            solver,
        }
    }

    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ADDR_VAR) {
            config.addr = value.trim().parse().map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value,
            })?;
        }

        config.snapshot_path = get(SNAPSHOT_VAR).map(PathBuf::from);

        if let Some(value) = get(MAX_ITERATIONS_VAR) {
            let max_iterations = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: MAX_ITERATIONS_VAR,
                value,
            })?;
            config.solver = SolverConfig::new(max_iterations);
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            snapshot_path: None,
            solver: SolverConfig::default(),
        }
    }
}
