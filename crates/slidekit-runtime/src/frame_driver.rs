#![forbid(unsafe_code)]

//! Per-frame tick driver.
//!
//! The [`FrameDriver`] is the timer collaborator for animating widgets. The
//! host calls [`pump`](FrameDriver::pump) from its event loop with the
//! current instant; the driver forwards a tick only when the target is
//! animating and a full frame interval has elapsed since the last frame.
//!
//! # Invariants
//!
//! 1. Idle targets are never ticked.
//! 2. Consecutive frames are at least `frame_interval` apart, except the
//!    first frame after idle, which fires immediately.
//! 3. The driver never sleeps; [`next_deadline`](FrameDriver::next_deadline)
//!    tells the host how long it may block.

use std::time::{Duration, Instant};

use slidekit_core::animation::Tick;
use slidekit_core::clock::{ManualClock, TimeSource};
use tracing::trace;

/// Default frame interval, roughly 60 Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Paces [`Tick`] calls to a fixed frame interval.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    frame_interval: Duration,
    last_frame: Option<Instant>,
    frames: u64,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl FrameDriver {
    #[must_use]
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            last_frame: None,
            frames: 0,
        }
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Frames delivered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn frame_due(&self, now: Instant) -> bool {
        match self.last_frame {
            Some(last) => now.saturating_duration_since(last) >= self.frame_interval,
            None => true,
        }
    }

    fn record_frame(&mut self, now: Instant) {
        self.last_frame = Some(now);
        self.frames += 1;
    }

    /// Tick `target` if it is animating and a frame is due. Returns whether a
    /// tick was delivered.
    pub fn pump<T: Tick + ?Sized>(&mut self, target: &mut T, now: Instant) -> bool {
        if !target.is_animating() {
            self.last_frame = None;
            return false;
        }
        if !self.frame_due(now) {
            return false;
        }
        self.record_frame(now);
        target.tick(now);
        trace!(frame = self.frames, animating = target.is_animating(), "frame");
        true
    }

    /// Tick every animating target in one shared frame. Returns how many were
    /// ticked.
    pub fn pump_all(&mut self, targets: &mut [&mut dyn Tick], now: Instant) -> usize {
        if !targets.iter().any(|t| t.is_animating()) {
            self.last_frame = None;
            return 0;
        }
        if !self.frame_due(now) {
            return 0;
        }
        self.record_frame(now);
        let mut ticked = 0;
        for target in targets.iter_mut().filter(|t| t.is_animating()) {
            target.tick(now);
            ticked += 1;
        }
        trace!(frame = self.frames, ticked, "frame");
        ticked
    }

    /// When the next frame is due, or `None` if the driver is idle.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.last_frame.map(|last| last + self.frame_interval)
    }

    /// Advance `clock` one frame at a time until `target` stops animating or
    /// `max_frames` have run. Returns the number of frames delivered.
    pub fn run_until_idle<T: Tick + ?Sized>(
        &mut self,
        target: &mut T,
        clock: &ManualClock,
        max_frames: usize,
    ) -> usize {
        let mut delivered = 0;
        while delivered < max_frames && target.is_animating() {
            if self.last_frame.is_some() {
                clock.advance(self.frame_interval);
            }
            if self.pump(target, clock.now()) {
                delivered += 1;
            }
        }
        delivered
    }
}
