#![forbid(unsafe_code)]

//! Fixed-velocity value animation.
//!
//! A [`ValueAnimation`] moves a value from `start` to `target` at a constant
//! rate, so its duration is proportional to the distance travelled rather
//! than fixed. Progress is sampled from absolute timestamps supplied by the
//! caller; the animation never reads a clock or sleeps.
//!
//! # Invariants
//!
//! 1. `sample(t)` never overshoots `target`.
//! 2. `sample(t) == target` exactly once `t >= completion_time()`.
//! 3. Timestamps earlier than `start_time` sample as `start`.
//! 4. Zero distance, a non-positive velocity, or a duration too long to
//!    represent completes immediately.
//!
//! # Driving
//!
//! Widgets that animate implement [`Tick`]; a per-frame driver calls
//! [`Tick::tick`] only while [`Tick::is_animating`] reports `true`.

use std::time::{Duration, Instant};

/// Something advanced by per-frame timer ticks.
pub trait Tick {
    /// Whether the target currently wants ticks.
    fn is_animating(&self) -> bool;

    /// Advance to `now`.
    fn tick(&mut self, now: Instant);
}

/// Linear move from `start` to `target` at `velocity` units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAnimation {
    start: f32,
    target: f32,
    start_time: Instant,
    velocity: f32,
}

impl ValueAnimation {
    /// Create an animation starting at `start_time`.
    ///
    /// `velocity` is the absolute rate in value units per second; its sign is
    /// ignored.
    #[must_use]
    pub fn new(start: f32, target: f32, start_time: Instant, velocity: f32) -> Self {
        Self {
            start,
            target,
            start_time,
            velocity: if velocity.is_finite() {
                velocity.abs()
            } else {
                0.0
            },
        }
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Absolute distance to travel.
    #[inline]
    pub fn distance(&self) -> f32 {
        (self.target - self.start).abs()
    }

    fn try_duration(&self) -> Option<Duration> {
        if self.velocity <= 0.0 || self.distance() == 0.0 {
            return Some(Duration::ZERO);
        }
        let secs = f64::from(self.distance()) / f64::from(self.velocity);
        Duration::try_from_secs_f64(secs).ok()
    }

    /// Whether the duration and completion instant are representable.
    ///
    /// Very slow animations can need more time than a [`Duration`] or an
    /// [`Instant`] can hold; such animations should be completed immediately
    /// instead of scheduled.
    #[must_use]
    pub fn is_schedulable(&self) -> bool {
        self.try_duration()
            .and_then(|duration| self.start_time.checked_add(duration))
            .is_some()
    }

    /// Time needed to cover the distance: `distance / velocity`.
    ///
    /// Zero when the animation is not [schedulable](Self::is_schedulable).
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.try_duration().unwrap_or(Duration::ZERO)
    }

    /// Instant at which the animation reaches its target.
    #[must_use]
    pub fn completion_time(&self) -> Instant {
        self.start_time
            .checked_add(self.duration())
            .unwrap_or(self.start_time)
    }

    /// Whether the animation has reached its target at `now`.
    #[must_use]
    pub fn is_complete_at(&self, now: Instant) -> bool {
        now >= self.completion_time()
    }

    /// Value at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> f32 {
        if self.is_complete_at(now) {
            return self.target;
        }
        let elapsed = now.saturating_duration_since(self.start_time).as_secs_f32();
        let travelled = (self.velocity * elapsed).min(self.distance());
        let direction = (self.target - self.start).signum();
        let value = self.start + direction * travelled;
        if direction > 0.0 {
            value.min(self.target)
        } else {
            value.max(self.target)
        }
    }

    /// Clamp the target into `[minimum, maximum]` (e.g. after a bounds change).
    pub fn clamp_target(&mut self, minimum: f32, maximum: f32) {
        self.target = self.target.clamp(minimum, maximum);
    }
}
