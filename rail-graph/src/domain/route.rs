//! Route records and validated routes.
//!
//! A [`RouteRecord`] is what the persistence layer hands over: endpoint
//! references may be missing and numeric fields are unchecked. A [`Route`]
//! is a record that passed validation and can act as a graph edge.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::DomainError;
use super::station::{StationId, parse_raw_id};

/// Error returned when parsing an invalid route identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id: {reason}")]
pub struct InvalidRouteId {
    reason: &'static str,
}

/// An opaque route identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(u64);

impl RouteId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        RouteId(raw)
    }

    /// Parse an identifier from its decimal representation.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteId> {
        parse_raw_id(s)
            .map(RouteId)
            .map_err(|reason| InvalidRouteId { reason })
    }

    /// Returns the raw identifier.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RouteId {
    fn from(raw: u64) -> Self {
        RouteId(raw)
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A route as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: RouteId,
    pub origin: Option<StationId>,
    pub destination: Option<StationId>,
    pub travel_time_mins: u32,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    pub capacity: u32,
    pub available_seats: u32,
}

impl RouteRecord {
    /// Create a fully-seated record with no service tags.
    pub fn new(
        id: RouteId,
        origin: StationId,
        destination: StationId,
        travel_time_mins: u32,
        price: Decimal,
        capacity: u32,
    ) -> Self {
        Self {
            id,
            origin: Some(origin),
            destination: Some(destination),
            travel_time_mins,
            price,
            category: None,
            number: None,
            capacity,
            available_seats: capacity,
        }
    }

    /// Attach service category and number tags (e.g. "ICE", "1025").
    pub fn with_service(mut self, category: impl Into<String>, number: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self.number = Some(number.into());
        self
    }

    /// Override the available seat count.
    pub fn with_available_seats(mut self, available_seats: u32) -> Self {
        self.available_seats = available_seats;
        self
    }
}

/// A validated route: a directed, priced, seated service between two stations.
///
/// Origin and destination may coincide; self-loops are legal data. A
/// record claiming more seats than its capacity is clamped rather than
/// rejected, so a bad seat count never removes a connection from the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    id: RouteId,
    origin: StationId,
    destination: StationId,
    travel_time_mins: u32,
    price: Decimal,
    category: Option<String>,
    number: Option<String>,
    capacity: u32,
    available_seats: u32,
}

impl Route {
    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn origin(&self) -> StationId {
        self.origin
    }

    pub fn destination(&self) -> StationId {
        self.destination
    }

    /// Travel time in minutes, always positive.
    pub fn travel_time_mins(&self) -> u32 {
        self.travel_time_mins
    }

    /// Ticket price, never negative.
    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Seats available when this value was taken.
    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    /// Replace the seat count with a fresher reading, clamped to capacity.
    pub fn with_available_seats(mut self, available_seats: u32) -> Self {
        self.available_seats = available_seats.min(self.capacity);
        self
    }

    /// Whether this route runs from `from` to `to`.
    pub fn connects(&self, from: StationId, to: StationId) -> bool {
        self.origin == from && self.destination == to
    }
}

impl TryFrom<&RouteRecord> for Route {
    type Error = DomainError;

    fn try_from(record: &RouteRecord) -> Result<Self, Self::Error> {
        let id = record.id;
        let origin = record.origin.ok_or(DomainError::MissingOrigin(id))?;
        let destination = record
            .destination
            .ok_or(DomainError::MissingDestination(id))?;

        if record.travel_time_mins == 0 {
            return Err(DomainError::ZeroTravelTime(id));
        }
        if record.price.is_sign_negative() && !record.price.is_zero() {
            return Err(DomainError::NegativePrice(id));
        }
        if record.capacity == 0 {
            return Err(DomainError::ZeroCapacity(id));
        }
        let available_seats = if record.available_seats > record.capacity {
            warn!(
                route = %id,
                available = record.available_seats,
                capacity = record.capacity,
                "Seat count exceeds capacity, clamping"
            );
            record.capacity
        } else {
            record.available_seats
        };

        Ok(Route {
            id,
            origin,
            destination,
            travel_time_mins: record.travel_time_mins,
            price: record.price,
            category: record.category.clone(),
            number: record.number.clone(),
            capacity: record.capacity,
            available_seats,
        })
    }
}

impl TryFrom<RouteRecord> for Route {
    type Error = DomainError;

    fn try_from(record: RouteRecord) -> Result<Self, Self::Error> {
        Route::try_from(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(id: u64, from: u64, to: u64, mins: u32, price: Decimal, capacity: u32) -> RouteRecord {
        RouteRecord::new(
            RouteId::new(id),
            StationId::new(from),
            StationId::new(to),
            mins,
            price,
            capacity,
        )
    }

    fn record() -> RouteRecord {
        rec(1, 10, 20, 25, dec!(12.50), 100)
    }

    #[test]
    fn valid_record_converts() {
        let route = Route::try_from(record().with_service("ICE", "1025")).unwrap();

        assert_eq!(route.id(), RouteId::new(1));
        assert_eq!(route.origin(), StationId::new(10));
        assert_eq!(route.destination(), StationId::new(20));
        assert_eq!(route.travel_time_mins(), 25);
        assert_eq!(route.price(), dec!(12.50));
        assert_eq!(route.category(), Some("ICE"));
        assert_eq!(route.number(), Some("1025"));
        assert_eq!(route.capacity(), 100);
        assert_eq!(route.available_seats(), 100);
    }

    #[test]
    fn parse_route_ids() {
        assert_eq!(RouteId::parse("17").unwrap(), RouteId::new(17));
        assert_eq!(
            RouteId::parse("").unwrap_err().to_string(),
            "invalid route id: must not be empty"
        );
        assert!(RouteId::parse("-3").is_err());
        assert!(RouteId::parse("99999999999999999999").is_err());
    }

    #[test]
    fn self_loop_is_legal() {
        let route = Route::try_from(rec(2, 5, 5, 10, dec!(1), 10)).unwrap();
        assert!(route.connects(StationId::new(5), StationId::new(5)));
    }

    #[test]
    fn zero_price_is_legal() {
        assert!(Route::try_from(rec(3, 1, 2, 10, dec!(0.00), 10)).is_ok());
        assert!(Route::try_from(rec(3, 1, 2, 10, dec!(-0), 10)).is_ok());
    }

    #[test]
    fn missing_endpoints_rejected() {
        let mut r = record();
        r.origin = None;
        assert_eq!(
            Route::try_from(&r),
            Err(DomainError::MissingOrigin(RouteId::new(1)))
        );

        let mut r = record();
        r.destination = None;
        assert_eq!(
            Route::try_from(&r),
            Err(DomainError::MissingDestination(RouteId::new(1)))
        );
    }

    #[test]
    fn numeric_invariants_enforced() {
        let mut r = record();
        r.travel_time_mins = 0;
        assert!(matches!(
            Route::try_from(&r),
            Err(DomainError::ZeroTravelTime(_))
        ));

        let mut r = record();
        r.price = dec!(-0.01);
        assert!(matches!(
            Route::try_from(&r),
            Err(DomainError::NegativePrice(_))
        ));

        let mut r = record();
        r.capacity = 0;
        r.available_seats = 0;
        assert!(matches!(
            Route::try_from(&r),
            Err(DomainError::ZeroCapacity(_))
        ));
    }

    #[test]
    fn excess_seats_are_clamped_to_capacity() {
        let route = Route::try_from(record().with_available_seats(101)).unwrap();
        assert_eq!(route.capacity(), 100);
        assert_eq!(route.available_seats(), 100);
    }

    #[test]
    fn fresher_seat_count_is_clamped() {
        let route = Route::try_from(record()).unwrap();
        assert_eq!(route.clone().with_available_seats(40).available_seats(), 40);
        assert_eq!(route.with_available_seats(500).available_seats(), 100);
    }

    #[test]
    fn record_deserializes_with_missing_tags() {
        let json = r#"{
            "id": 4,
            "origin": 1,
            "destination": null,
            "travel_time_mins": 20,
            "price": "9.50",
            "capacity": 200,
            "available_seats": 150
        }"#;
        let r: RouteRecord = serde_json::from_str(json).unwrap();

        assert_eq!(r.id, RouteId::new(4));
        assert_eq!(r.destination, None);
        assert_eq!(r.price, dec!(9.50));
        assert_eq!(r.category, None);
        assert_eq!(r.available_seats, 150);
    }
}
