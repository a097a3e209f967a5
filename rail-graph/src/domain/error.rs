//! Domain error types.
//!
//! These errors describe route records that cannot become graph edges.
//! They are distinct from inventory and query errors.

use super::RouteId;

/// Validation failures for route records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Record has no origin station reference
    #[error("route {0} has no origin station")]
    MissingOrigin(RouteId),

    /// Record has no destination station reference
    #[error("route {0} has no destination station")]
    MissingDestination(RouteId),

    /// Travel time must be at least one minute
    #[error("route {0} has a zero travel time")]
    ZeroTravelTime(RouteId),

    /// Price must not be negative
    #[error("route {0} has a negative price")]
    NegativePrice(RouteId),

    /// Capacity must be at least one seat
    #[error("route {0} has zero capacity")]
    ZeroCapacity(RouteId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let id = RouteId::new(12);

        assert_eq!(
            DomainError::MissingOrigin(id).to_string(),
            "route 12 has no origin station"
        );
        assert_eq!(
            DomainError::MissingDestination(id).to_string(),
            "route 12 has no destination station"
        );
        assert_eq!(
            DomainError::ZeroTravelTime(id).to_string(),
            "route 12 has a zero travel time"
        );
        assert_eq!(
            DomainError::NegativePrice(id).to_string(),
            "route 12 has a negative price"
        );
        assert_eq!(
            DomainError::ZeroCapacity(id).to_string(),
            "route 12 has zero capacity"
        );
    }
}
