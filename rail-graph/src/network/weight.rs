//! Cost criteria and edge weight functions.
//!
//! Weights are whole numbers so the solver accumulates distances exactly.
//! Sub-unit precision is discarded: a 12.50 fare weighs 12, and a value
//! ratio of 0.47 per minute weighs 0.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::Route;

/// Accumulated path cost.
pub type Weight = u64;

/// Error returned when parsing an unknown criterion name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown criterion {0:?}: expected time, price or value")]
pub struct InvalidCriterion(String);

/// The cost basis a path is optimised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Total travel time in minutes.
    #[default]
    Time,
    /// Total fare.
    Price,
    /// Sum of per-hop price-per-minute ratios.
    Value,
}

impl Criterion {
    pub const ALL: [Criterion; 3] = [Criterion::Time, Criterion::Price, Criterion::Value];

    /// Weigh one route under this criterion.
    pub fn weight(self, route: &Route) -> Weight {
        match self {
            Criterion::Time => time_weight(route),
            Criterion::Price => price_weight(route),
            Criterion::Value => value_weight(route),
        }
    }

    /// Order two parallel routes under this criterion, at full precision.
    ///
    /// Used to pick the representative route for a hop; unlike
    /// [`Criterion::weight`] nothing is truncated here.
    pub fn compare(self, a: &Route, b: &Route) -> Ordering {
        match self {
            Criterion::Time => a.travel_time_mins().cmp(&b.travel_time_mins()),
            Criterion::Price => a.price().cmp(&b.price()),
            Criterion::Value => value_ratio(a).cmp(&value_ratio(b)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::Time => "time",
            Criterion::Price => "price",
            Criterion::Value => "value",
        }
    }
}

impl FromStr for Criterion {
    type Err = InvalidCriterion;

    /// Accepts the canonical names plus the `fastest`, `cheapest` and
    /// `best-value` aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "time" | "fastest" => Ok(Criterion::Time),
            "price" | "cheapest" => Ok(Criterion::Price),
            "value" | "best-value" | "best_value" => Ok(Criterion::Value),
            _ => Err(InvalidCriterion(s.to_string())),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel time in minutes.
pub fn time_weight(route: &Route) -> Weight {
    Weight::from(route.travel_time_mins())
}

/// Price with the fractional part dropped.
pub fn price_weight(route: &Route) -> Weight {
    decimal_weight(route.price())
}

/// Price-per-minute ratio with the fractional part dropped.
pub fn value_weight(route: &Route) -> Weight {
    decimal_weight(value_ratio(route))
}

/// Price divided by travel time, rounded half-up to two decimal places.
pub fn value_ratio(route: &Route) -> Decimal {
    (route.price() / Decimal::from(route.travel_time_mins()))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn decimal_weight(amount: Decimal) -> Weight {
    amount.trunc().to_u64().unwrap_or(Weight::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteId, RouteRecord, StationId};
    use rust_decimal_macros::dec;

    fn route(mins: u32, price: Decimal) -> Route {
        Route::try_from(RouteRecord::new(
            RouteId::new(1),
            StationId::new(1),
            StationId::new(2),
            mins,
            price,
            10,
        ))
        .unwrap()
    }

    #[test]
    fn time_weight_is_minutes() {
        assert_eq!(time_weight(&route(25, dec!(12.50))), 25);
    }

    #[test]
    fn price_weight_truncates() {
        assert_eq!(price_weight(&route(25, dec!(12.50))), 12);
        assert_eq!(price_weight(&route(25, dec!(12.99))), 12);
        assert_eq!(price_weight(&route(25, dec!(0.99))), 0);
        assert_eq!(price_weight(&route(25, dec!(18))), 18);
    }

    #[test]
    fn value_ratio_rounds_half_up() {
        // 12.50 / 25 = 0.5
        assert_eq!(value_ratio(&route(25, dec!(12.50))), dec!(0.50));
        // 1.00 / 8 = 0.125 -> 0.13
        assert_eq!(value_ratio(&route(8, dec!(1.00))), dec!(0.13));
        // 10 / 3 = 3.333.. -> 3.33
        assert_eq!(value_ratio(&route(3, dec!(10))), dec!(3.33));
        // 0.995 rounds up into the next whole unit
        assert_eq!(value_ratio(&route(200, dec!(199))), dec!(1.00));
    }

    #[test]
    fn value_weight_truncates_after_rounding() {
        assert_eq!(value_weight(&route(25, dec!(12.50))), 0);
        assert_eq!(value_weight(&route(3, dec!(10))), 3);
        assert_eq!(value_weight(&route(200, dec!(199))), 1);
    }

    #[test]
    fn criterion_dispatch() {
        let r = route(10, dec!(45.00));
        assert_eq!(Criterion::Time.weight(&r), 10);
        assert_eq!(Criterion::Price.weight(&r), 45);
        assert_eq!(Criterion::Value.weight(&r), 4);
    }

    #[test]
    fn compare_uses_full_precision() {
        let a = route(10, dec!(12.40));
        let b = route(10, dec!(12.60));
        assert_eq!(Criterion::Price.weight(&a), Criterion::Price.weight(&b));
        assert_eq!(Criterion::Price.compare(&a, &b), Ordering::Less);
        assert_eq!(Criterion::Time.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("time".parse::<Criterion>().unwrap(), Criterion::Time);
        assert_eq!("Fastest".parse::<Criterion>().unwrap(), Criterion::Time);
        assert_eq!("price".parse::<Criterion>().unwrap(), Criterion::Price);
        assert_eq!("cheapest".parse::<Criterion>().unwrap(), Criterion::Price);
        assert_eq!("value".parse::<Criterion>().unwrap(), Criterion::Value);
        assert_eq!("best-value".parse::<Criterion>().unwrap(), Criterion::Value);

        let err = "distance".parse::<Criterion>().unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"unknown criterion "distance": expected time, price or value"#
        );
    }

    #[test]
    fn display_roundtrip() {
        for c in Criterion::ALL {
            assert_eq!(c.to_string().parse::<Criterion>().unwrap(), c);
        }
    }
}
