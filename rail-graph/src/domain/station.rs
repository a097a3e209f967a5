//! Station identity and record types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// An opaque station identifier.
///
/// Identifiers are unsigned integers assigned by the persistence layer.
/// The engine never invents them; it only compares and hashes them.
///
/// # Examples
///
/// ```
/// use rail_graph::domain::StationId;
///
/// let koln = StationId::parse("1").unwrap();
/// assert_eq!(koln.get(), 1);
///
/// // Signs, whitespace and non-digits are rejected
/// assert!(StationId::parse("-1").is_err());
/// assert!(StationId::parse(" 1").is_err());
/// assert!(StationId::parse("one").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(u64);

impl StationId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        StationId(raw)
    }

    /// Parse an identifier from its decimal representation.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        parse_raw_id(s)
            .map(StationId)
            .map_err(|reason| InvalidStationId { reason })
    }

    /// Returns the raw identifier.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for StationId {
    fn from(raw: u64) -> Self {
        StationId(raw)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a decimal identifier, rejecting signs, whitespace and overflow.
pub(super) fn parse_raw_id(s: &str) -> Result<u64, &'static str> {
    if s.is_empty() {
        return Err("must not be empty");
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("must be decimal digits only");
    }
    s.parse::<u64>().map_err(|_| "out of range")
}

/// A station in the network.
///
/// Stations are immutable once created and are never removed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub city: String,
}

impl Station {
    /// Create a new station.
    pub fn new(id: StationId, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
        }
    }
}
