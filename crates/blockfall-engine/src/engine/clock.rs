use std::{
    cell::Cell,
    time::{Duration, Instant},
};

/// Monotonic time source injected into the game loop.
///
/// `now` is measured from an arbitrary origin and never decreases.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<C> Clock for &C
where
    C: Clock + ?Sized,
{
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall clock backed by [`Instant`], starting at zero on creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
///
/// Used by tests and headless simulation to drive time deterministically.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now(), Duration::from_millis(250));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Moves the clock to `now`, which must not be earlier than the current time.
    pub fn set(&self, now: Duration) {
        debug_assert!(now >= self.now.get(), "clock moved backwards");
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_through_reference() {
        let clock = ManualClock::new();
        let by_ref: &dyn Clock = &clock;
        assert_eq!(by_ref.now(), Duration::ZERO);
        clock.advance(Duration::from_millis(40));
        clock.advance(Duration::from_millis(2));
        assert_eq!(by_ref.now(), Duration::from_millis(42));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
