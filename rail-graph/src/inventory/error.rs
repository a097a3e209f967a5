//! Inventory error types.

use crate::domain::RouteId;

/// Errors from seat reservation and release.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// No counter is registered for the route
    #[error("route {0} not found")]
    RouteNotFound(RouteId),

    /// Reservations must be for at least one seat
    #[error("invalid quantity {0}: must be at least 1")]
    InvalidQuantity(u32),

    /// Not enough seats left at the moment of the check
    #[error("not enough seats on route {route}: requested {requested}, available {available}")]
    CapacityExceeded {
        route: RouteId,
        requested: u32,
        available: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let route = RouteId::new(5);

        assert_eq!(
            InventoryError::RouteNotFound(route).to_string(),
            "route 5 not found"
        );
        assert_eq!(
            InventoryError::InvalidQuantity(0).to_string(),
            "invalid quantity 0: must be at least 1"
        );
        assert_eq!(
            InventoryError::CapacityExceeded {
                route,
                requested: 3,
                available: 1
            }
            .to_string(),
            "not enough seats on route 5: requested 3, available 1"
        );
    }
}
