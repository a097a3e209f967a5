//! Seat inventory.
//!
//! One counter per route, held in an arena keyed by route id. The arena
//! lock is only taken to find or register a counter; seat updates happen
//! on the counter itself, so reservations on different routes proceed in
//! parallel and reservations on the same route serialise on one atomic.

mod counter;
mod error;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{Route, RouteId};

pub use counter::SeatCounter;
pub use error::InventoryError;

/// Routes whose availability falls below this share count as nearly sold out.
const LOW_AVAILABILITY_PERCENT: u64 = 20;

/// Outcome of restoring every route to full capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    pub updated_routes: usize,
    pub total_routes: usize,
    pub total_capacity: u64,
    pub total_available: u64,
}

/// Aggregate seat figures across all routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityStats {
    pub total_routes: usize,
    pub total_capacity: u64,
    pub total_available: u64,
    pub total_sold: u64,
    /// Mean of per-route availability percentages, two decimal places.
    pub average_availability_percent: Decimal,
    pub routes_below_20_percent: usize,
}

/// Per-route seat counters.
#[derive(Debug, Default)]
pub struct SeatInventory {
    counters: RwLock<HashMap<RouteId, Arc<SeatCounter>>>,
}

impl SeatInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route's counter from its current seat count.
    ///
    /// Returns false, leaving the live counter alone, if the route is
    /// already registered. The write lock is only taken for a new route.
    pub fn register(&self, route: &Route) -> bool {
        if self.contains(route.id()) {
            return false;
        }
        insert_new(&mut self.write(), route)
    }

    /// Register every route not yet known under one write lock. Returns
    /// how many were added.
    pub fn seed<'a>(&self, routes: impl IntoIterator<Item = &'a Route>) -> usize {
        let mut counters = self.write();
        let added = routes
            .into_iter()
            .filter(|r| insert_new(&mut counters, r))
            .count();
        if added > 0 {
            info!(added, total = counters.len(), "Seeded seat inventory");
        }
        added
    }

    /// Drop the counter for a route that no longer exists. Returns whether
    /// one was registered.
    pub fn remove(&self, route: RouteId) -> bool {
        let removed = self.write().remove(&route).is_some();
        if removed {
            info!(route = %route, "Removed seat counter");
        }
        removed
    }

    /// Keep only the counters whose route id passes `keep`. Returns how
    /// many were dropped.
    pub fn retain(&self, keep: impl Fn(RouteId) -> bool) -> usize {
        let mut counters = self.write();
        let before = counters.len();
        counters.retain(|id, _| keep(*id));
        let removed = before - counters.len();
        if removed > 0 {
            info!(removed, total = counters.len(), "Pruned seat inventory");
        }
        removed
    }

    /// Whether the route has a counter.
    pub fn contains(&self, route: RouteId) -> bool {
        self.read().contains_key(&route)
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Reserve `quantity` seats on `route`.
    ///
    /// The availability check and the decrement are one atomic step.
    /// Returns the seats left afterwards.
    pub fn reserve(&self, route: RouteId, quantity: u32) -> Result<u32, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        let counter = self.counter(route)?;

        match counter.try_reserve(quantity) {
            Ok(remaining) => {
                info!(route = %route, quantity, remaining, "Reserved seats");
                Ok(remaining)
            }
            Err(available) => {
                debug!(route = %route, quantity, available, "Not enough seats");
                Err(InventoryError::CapacityExceeded {
                    route,
                    requested: quantity,
                    available,
                })
            }
        }
    }

    /// Release `quantity` seats on `route`, clamped to capacity.
    ///
    /// Over-release is absorbed silently. Returns the seats available
    /// afterwards.
    pub fn release(&self, route: RouteId, quantity: u32) -> Result<u32, InventoryError> {
        let counter = self.counter(route)?;
        let available = counter.release(quantity);
        info!(route = %route, quantity, available, "Released seats");
        Ok(available)
    }

    /// Seats currently available on `route`.
    pub fn available(&self, route: RouteId) -> Result<u32, InventoryError> {
        Ok(self.counter(route)?.available())
    }

    /// Total seats on `route`.
    pub fn capacity(&self, route: RouteId) -> Result<u32, InventoryError> {
        Ok(self.counter(route)?.capacity())
    }

    /// Restore every route to full capacity.
    pub fn reset_all(&self) -> ResetSummary {
        let counters = self.read();
        let updated_routes = counters.values().filter(|c| c.reset()).count();
        let total_capacity = counters.values().map(|c| u64::from(c.capacity())).sum();
        let total_available = counters.values().map(|c| u64::from(c.available())).sum();

        info!(updated_routes, total_routes = counters.len(), "Reset all seats");

        ResetSummary {
            updated_routes,
            total_routes: counters.len(),
            total_capacity,
            total_available,
        }
    }

    /// Aggregate seat figures. Each counter is read once; concurrent
    /// reservations may land between reads.
    pub fn stats(&self) -> CapacityStats {
        let readings: Vec<(u64, u64)> = self
            .read()
            .values()
            .map(|c| (u64::from(c.capacity()), u64::from(c.available())))
            .collect();

        let total_capacity: u64 = readings.iter().map(|(cap, _)| cap).sum();
        let total_available: u64 = readings.iter().map(|(_, avail)| avail).sum();
        let routes_below_20_percent = readings
            .iter()
            .filter(|(cap, avail)| avail * 100 < cap * LOW_AVAILABILITY_PERCENT)
            .count();

        let average_availability_percent = if readings.is_empty() {
            Decimal::ZERO
        } else {
            let sum: Decimal = readings
                .iter()
                .map(|&(cap, avail)| Decimal::from(avail * 100) / Decimal::from(cap))
                .sum();
            (sum / Decimal::from(readings.len()))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        CapacityStats {
            total_routes: readings.len(),
            total_capacity,
            total_available,
            total_sold: total_capacity - total_available,
            average_availability_percent,
            routes_below_20_percent,
        }
    }

    fn counter(&self, route: RouteId) -> Result<Arc<SeatCounter>, InventoryError> {
        self.read()
            .get(&route)
            .cloned()
            .ok_or(InventoryError::RouteNotFound(route))
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<RouteId, Arc<SeatCounter>>> {
        self.counters.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<RouteId, Arc<SeatCounter>>> {
        self.counters.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn insert_new(counters: &mut HashMap<RouteId, Arc<SeatCounter>>, route: &Route) -> bool {
    if counters.contains_key(&route.id()) {
        return false;
    }
    counters.insert(
        route.id(),
        Arc::new(SeatCounter::new(route.capacity(), route.available_seats())),
    );
    true
}
