//! Built-in demonstration network.
//!
//! Ten Rhine-Ruhr main stations linked by twenty routes (ten bidirectional
//! pairs). Used when no snapshot file is configured.

use rust_decimal::Decimal;

use super::Snapshot;
use crate::domain::{RouteId, RouteRecord, Station, StationId};

const STATIONS: [(&str, &str); 10] = [
    ("Köln Hauptbahnhof", "Köln"),
    ("Düsseldorf Hauptbahnhof", "Düsseldorf"),
    ("Dortmund Hauptbahnhof", "Dortmund"),
    ("Essen Hauptbahnhof", "Essen"),
    ("Bochum Hauptbahnhof", "Bochum"),
    ("Wuppertal Hauptbahnhof", "Wuppertal"),
    ("Bielefeld Hauptbahnhof", "Bielefeld"),
    ("Münster Hauptbahnhof", "Münster"),
    ("Aachen Hauptbahnhof", "Aachen"),
    ("Bonn Hauptbahnhof", "Bonn"),
];

/// (from, to, minutes, price in cents, capacity), ids are 1-based station indices.
const LINKS: [(u64, u64, u32, i64, u32); 10] = [
    (1, 2, 25, 1250, 100),
    (1, 3, 45, 1800, 80),
    (2, 4, 20, 1000, 120),
    (4, 5, 15, 850, 150),
    (5, 6, 25, 1200, 90),
    (3, 7, 35, 1550, 70),
    (7, 8, 30, 1400, 110),
    (1, 9, 40, 1650, 60),
    (1, 10, 20, 950, 200),
    (2, 9, 35, 1500, 85),
];

/// Build the demonstration network.
///
/// Every link is present in both directions; each direction is its own
/// route with its own seats.
pub fn demo_network() -> Snapshot {
    let stations = STATIONS
        .iter()
        .zip(1u64..)
        .map(|(&(name, city), id)| (StationId::new(id), Station::new(StationId::new(id), name, city)))
        .collect();

    let mut routes = Vec::with_capacity(LINKS.len() * 2);
    let mut next_id = 1u64;
    for &(a, b, mins, cents, capacity) in &LINKS {
        for (from, to) in [(a, b), (b, a)] {
            routes.push(RouteRecord::new(
                RouteId::new(next_id),
                StationId::new(from),
                StationId::new(to),
                mins,
                Decimal::new(cents, 2),
                capacity,
            ));
            next_id += 1;
        }
    }

    Snapshot { stations, routes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn demo_network_shape() {
        let demo = demo_network();
        assert_eq!(demo.stations().count(), 10);
        assert_eq!(demo.routes().len(), 20);
        assert_eq!(demo.valid_routes().count(), 20);
    }

    #[test]
    fn every_route_has_a_reverse_twin() {
        let demo = demo_network();
        for route in demo.valid_routes() {
            let twin = demo
                .valid_routes()
                .find(|r| r.connects(route.destination(), route.origin()))
                .expect("reverse route");
            assert_eq!(twin.travel_time_mins(), route.travel_time_mins());
            assert_eq!(twin.price(), route.price());
        }
    }

    #[test]
    fn koln_to_dusseldorf() {
        let demo = demo_network();
        let first = demo.route(RouteId::new(1)).unwrap();
        assert_eq!(first.origin, Some(StationId::new(1)));
        assert_eq!(first.destination, Some(StationId::new(2)));
        assert_eq!(first.price, dec!(12.50));
        assert_eq!(
            demo.station(StationId::new(2)).unwrap().name,
            "Düsseldorf Hauptbahnhof"
        );
    }
}
