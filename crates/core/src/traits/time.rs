//! Monotonic time abstraction.
//!
//! The transition core reads one timestamp at the start of every tick and
//! derives all transition timing from it. `TimeSource` abstracts the clock so
//! the same core runs against a hardware timer on target and against
//! [`MockTime`] in host tests.

use core::cell::Cell;

/// Monotonic microsecond clock for the control tick.
///
/// Implementations must be cheap to query; the core calls `now_us()` exactly
/// once per tick and reuses the value throughout, so transition timing is
/// consistent within a tick even if the underlying clock advances.
pub trait TimeSource: Clone {
    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction so a reference taken "in the future"
    /// (e.g. a zero-initialized transition start) yields 0, not a wrap.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

/// Mock clock with controllable advancement.
///
/// Interior mutability lets tests advance the clock through a shared
/// reference while the core owns the instance:
///
/// ```
/// use standard_vtol_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// time.advance(4_000); // one 250 Hz tick
/// assert_eq!(time.now_us(), 4_000);
/// ```
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_starts_at_zero() {
        let time = MockTime::new();
        assert_eq!(time.now_us(), 0);
    }

    #[test]
    fn mock_time_advance_accumulates() {
        let time = MockTime::new();
        time.advance(4_000);
        time.advance(4_000);
        assert_eq!(time.now_us(), 8_000);
    }

    #[test]
    fn mock_time_set_is_absolute() {
        let time = MockTime::with_initial(1_000_000);
        time.set(250_000);
        assert_eq!(time.now_us(), 250_000);
    }

    #[test]
    fn elapsed_since_saturates() {
        let time = MockTime::new();
        time.set(1_000);
        assert_eq!(time.elapsed_since(5_000), 0);
        assert_eq!(time.elapsed_since(400), 600);
    }
}
