//! A single route's seat counter.

use std::sync::atomic::{AtomicU32, Ordering};

/// Seats available on one route, bounded by its capacity.
///
/// All updates are compare-and-swap loops on one atomic, so concurrent
/// reservations on the same route can never both succeed against the same
/// seats, and different routes never contend.
#[derive(Debug)]
pub struct SeatCounter {
    capacity: u32,
    available: AtomicU32,
}

impl SeatCounter {
    /// Create a counter; `available` is clamped to `capacity`.
    pub fn new(capacity: u32, available: u32) -> Self {
        Self {
            capacity,
            available: AtomicU32::new(available.min(capacity)),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Current reading. May be stale by the time the caller uses it.
    pub fn available(&self) -> u32 {
        self.available.load(Ordering::Acquire)
    }

    /// Take `quantity` seats if that many remain.
    ///
    /// Returns the seats left afterwards, or on failure the seats that were
    /// available at the moment of the check.
    pub fn try_reserve(&self, quantity: u32) -> Result<u32, u32> {
        self.available
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |available| {
                available.checked_sub(quantity)
            })
            .map(|previous| previous - quantity)
    }

    /// Give back `quantity` seats, never exceeding capacity.
    ///
    /// Returns the seats available afterwards.
    pub fn release(&self, quantity: u32) -> u32 {
        let capacity = self.capacity;
        let updated = |available: u32| available.saturating_add(quantity).min(capacity);
        match self
            .available
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |a| Some(updated(a)))
        {
            Ok(previous) | Err(previous) => updated(previous),
        }
    }

    /// Restore every seat. Returns whether anything changed.
    pub fn reset(&self) -> bool {
        self.available.swap(self.capacity, Ordering::AcqRel) != self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_capacity() {
        assert_eq!(SeatCounter::new(10, 50).available(), 10);
        assert_eq!(SeatCounter::new(10, 4).available(), 4);
    }

    #[test]
    fn reserve_decrements() {
        let c = SeatCounter::new(10, 10);
        assert_eq!(c.try_reserve(3), Ok(7));
        assert_eq!(c.try_reserve(7), Ok(0));
        assert_eq!(c.available(), 0);
    }

    #[test]
    fn reserve_too_many_leaves_counter_unchanged() {
        let c = SeatCounter::new(10, 2);
        assert_eq!(c.try_reserve(3), Err(2));
        assert_eq!(c.available(), 2);
    }

    #[test]
    fn release_clamps_to_capacity() {
        let c = SeatCounter::new(10, 8);
        assert_eq!(c.release(5), 10);
        assert_eq!(c.release(u32::MAX), 10);
        assert_eq!(c.release(0), 10);
    }

    #[test]
    fn reset_restores_capacity() {
        let c = SeatCounter::new(10, 3);
        assert!(c.reset());
        assert_eq!(c.available(), 10);
        assert!(!c.reset());
    }
}
