use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

/// Abstraction over a monotonic time source to improve testability.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time instant. Non-decreasing across calls.
    fn now(&self) -> Instant;
}

/// System clock using `Instant::now()`.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to, for driving delayed-message
/// readiness in tests.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset_nanos: AtomicU64,
}

impl ManualClock {
    /// Creates a manual clock starting at `base`.
    pub fn new(base: Instant) -> Self {
        Self { base, offset_nanos: AtomicU64::new(0) }
    }

    /// Advances the clock by `step`.
    pub fn advance(&self, step: Duration) {
        self.offset_nanos.fetch_add(step.as_nanos() as u64, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_nanos(self.offset_nanos.load(Ordering::Relaxed))
    }
}
