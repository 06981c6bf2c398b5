#![forbid(unsafe_code)]

//! Injectable time sources.
//!
//! Controls that animate read the current time through a [`TimeSource`]
//! instead of calling `Instant::now()` directly, so hosts and tests can drive
//! them deterministically.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Something that can report the current instant.
pub trait TimeSource {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time via [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A manually advanced clock.
///
/// Clones share the same timeline: advancing one clone advances all of them.
/// The clock is single-threaded, matching the UI thread it runs on.
///
/// ```
/// # use slidekit_core::clock::{ManualClock, TimeSource};
/// # use std::time::Duration;
/// let clock = ManualClock::new();
/// let start = clock.now();
/// let shared = clock.clone();
/// shared.advance(Duration::from_millis(16));
/// assert_eq!(clock.now() - start, Duration::from_millis(16));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move time forward by `dt`.
    pub fn advance(&self, dt: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(dt));
    }

    /// Move time forward by a number of seconds. Negative or non-finite
    /// values are ignored.
    pub fn advance_secs(&self, secs: f32) {
        if secs.is_finite() && secs > 0.0 {
            self.advance(Duration::from_secs_f32(secs));
        }
    }

    /// Total time advanced since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    /// The instant this clock started at.
    #[must_use]
    pub fn origin(&self) -> Instant {
        self.origin
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_frozen() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn manual_clock_clones_share_timeline() {
        let clock = ManualClock::new();
        let other = clock.clone();
        other.advance(Duration::from_millis(250));
        assert_eq!(clock.elapsed(), Duration::from_millis(250));
        assert_eq!(clock.now(), clock.origin() + Duration::from_millis(250));
    }

    #[test]
    fn advance_secs_ignores_invalid_input() {
        let clock = ManualClock::new();
        clock.advance_secs(-1.0);
        clock.advance_secs(f32::NAN);
        assert_eq!(clock.elapsed(), Duration::ZERO);
        clock.advance_secs(0.5);
        assert_eq!(clock.elapsed(), Duration::from_millis(500));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
