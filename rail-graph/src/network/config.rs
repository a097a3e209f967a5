//! Solver configuration.

/// Default cap on frontier pops per search.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Configuration parameters for path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of frontier pops before the search gives up.
    /// Trades completeness on large graphs for bounded latency.
    pub max_iterations: usize,
}

impl SolverConfig {
    /// Create a new configuration with the given iteration cap.
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(SolverConfig::default().max_iterations, 1000);
    }

    #[test]
    fn custom_config() {
        assert_eq!(SolverConfig::new(50).max_iterations, 50);
    }
}
