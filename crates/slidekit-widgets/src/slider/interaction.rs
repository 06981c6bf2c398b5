#![forbid(unsafe_code)]

//! Slider interaction state machine.
//!
//! ```text
//!            press (thumb or track)
//!   Idle ─────────────────────────────► Dragging
//!    ▲ ▲          release / cancel /        │
//!    │ └──────────── disable ◄──────────────┘
//!    │
//!    │ tick reaches target / disable / set_value(_, false)
//!    │
//!   Animating ◄──── set_value(_, true) from Idle or Animating
//!        │
//!        └──── press ───► Dragging
//! ```
//!
//! The controller owns the transient sessions (a [`DragSession`] while
//! dragging, a [`ValueAnimation`] while animating) and two outputs: a queue
//! of [`SliderEvent`]s and a redraw flag. The value model, geometry and
//! configuration are borrowed per call, so the controller never observes a
//! half-updated slider.
//!
//! # Invariants
//!
//! 1. At most one session exists; the phase enum makes the sessions mutually
//!    exclusive.
//! 2. Animated moves never queue `ValueChanged`; interactive moves do (every
//!    change when continuous, once at release otherwise).
//! 3. Every `DragBegan` is followed by exactly one `DragEnded`.
//! 4. Notifications are queued, never delivered inline, so observers cannot
//!    re-enter a transition in progress.

use std::time::Instant;

use slidekit_core::animation::ValueAnimation;
use slidekit_core::geometry::{Point, Rect};
use slidekit_core::value::ValueModel;
use tracing::{debug, trace};

use super::SliderConfig;
use super::geometry::{self, LayoutParameters};

/// Observable interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging,
    Animating,
}

impl InteractionState {
    /// Lower-case name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Animating => "animating",
        }
    }
}

/// Notification produced by the slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// The value changed through user interaction or a bounds change.
    ValueChanged(f32),
    /// A drag started.
    DragBegan,
    /// A drag ended (release, cancel, or disable).
    DragEnded,
}

/// Bookkeeping for an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    start_value: f32,
    anchor_pointer: Point,
    anchor_normalized: f32,
    last_pointer: Point,
}

impl DragSession {
    /// Value the release notification is compared against.
    #[inline]
    pub fn start_value(&self) -> f32 {
        self.start_value
    }

    /// Pointer position that maps to [`Self::anchor_normalized`].
    #[inline]
    pub fn anchor_pointer(&self) -> Point {
        self.anchor_pointer
    }

    #[inline]
    pub fn anchor_normalized(&self) -> f32 {
        self.anchor_normalized
    }

    #[inline]
    pub fn last_pointer(&self) -> Point {
        self.last_pointer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Dragging(DragSession),
    Animating(ValueAnimation),
}

impl Phase {
    fn state(&self) -> InteractionState {
        match self {
            Self::Idle => InteractionState::Idle,
            Self::Dragging(_) => InteractionState::Dragging,
            Self::Animating(_) => InteractionState::Animating,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct InteractionController {
    phase: Phase,
    events: Vec<SliderEvent>,
    redraw: bool,
}

impl InteractionController {
    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub(crate) fn state(&self) -> InteractionState {
        self.phase.state()
    }

    pub(crate) fn drag_session(&self) -> Option<&DragSession> {
        match &self.phase {
            Phase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub(crate) fn animation(&self) -> Option<&ValueAnimation> {
        match &self.phase {
            Phase::Animating(animation) => Some(animation),
            _ => None,
        }
    }

    pub(crate) fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub(crate) fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    // ------------------------------------------------------------------
    // Outputs
    // ------------------------------------------------------------------

    pub(crate) fn drain_events(&mut self) -> Vec<SliderEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub(crate) fn needs_redraw(&self) -> bool {
        self.redraw
    }

    pub(crate) fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Begin a drag if `point` grabs the thumb or taps the track.
    pub(crate) fn press(
        &mut self,
        model: &mut ValueModel,
        bounds: Rect,
        layout: &LayoutParameters,
        config: &SliderConfig,
        point: Point,
    ) -> bool {
        if self.is_dragging() {
            trace!(x = point.x, y = point.y, "press ignored while dragging");
            return false;
        }
        let normalized = model.normalize();
        let on_thumb = geometry::hit_test_thumb(point, normalized, bounds, layout);
        let on_track = config.track_tap && geometry::hit_test_track(point, bounds);
        if !on_thumb && !on_track {
            trace!(x = point.x, y = point.y, "press missed");
            return false;
        }

        if let Phase::Animating(animation) = self.phase {
            debug!(
                value = model.value(),
                target = animation.target(),
                "animation cancelled by press"
            );
        }
        self.transition(Phase::Dragging(DragSession {
            start_value: model.value(),
            anchor_pointer: point,
            anchor_normalized: normalized,
            last_pointer: point,
        }));
        self.events.push(SliderEvent::DragBegan);
        self.redraw = true;

        if !on_thumb {
            let jump = geometry::normalized_value_for_pointer(point, bounds, layout);
            let target = model.denormalize(jump);
            self.apply_interactive(model, config, target);
            let anchored = model.normalize();
            if let Phase::Dragging(session) = &mut self.phase {
                session.anchor_normalized = anchored;
            }
            debug!(value = model.value(), "track tap");
        }
        true
    }

    /// Follow the pointer while dragging.
    pub(crate) fn move_to(
        &mut self,
        model: &mut ValueModel,
        bounds: Rect,
        layout: &LayoutParameters,
        config: &SliderConfig,
        point: Point,
    ) -> bool {
        let Phase::Dragging(session) = &mut self.phase else {
            return false;
        };
        session.last_pointer = point;
        let normalized = session.anchor_normalized
            + geometry::normalized_delta(session.anchor_pointer, point, bounds, layout);
        let target = model.denormalize(normalized);
        self.apply_interactive(model, config, target);
        true
    }

    /// Apply the final pointer position and end the drag.
    pub(crate) fn release(
        &mut self,
        model: &mut ValueModel,
        bounds: Rect,
        layout: &LayoutParameters,
        config: &SliderConfig,
        point: Point,
    ) -> bool {
        if !self.move_to(model, bounds, layout, config, point) {
            return false;
        }
        self.end_drag(model, config)
    }

    /// End the drag where it is, without applying `point`.
    pub(crate) fn cancel(&mut self, model: &ValueModel, config: &SliderConfig) -> bool {
        self.end_drag(model, config)
    }

    fn end_drag(&mut self, model: &ValueModel, config: &SliderConfig) -> bool {
        let Phase::Dragging(session) = self.phase else {
            return false;
        };
        self.transition(Phase::Idle);
        if !config.continuous && model.value() != session.start_value {
            self.events.push(SliderEvent::ValueChanged(model.value()));
        }
        self.events.push(SliderEvent::DragEnded);
        self.redraw = true;
        true
    }

    fn apply_interactive(&mut self, model: &mut ValueModel, config: &SliderConfig, value: f32) {
        if !model.set_value(value) {
            return;
        }
        self.redraw = true;
        trace!(value = model.value(), "drag value");
        if config.continuous {
            self.events.push(SliderEvent::ValueChanged(model.value()));
        }
    }

    // ------------------------------------------------------------------
    // Programmatic input
    // ------------------------------------------------------------------

    /// Drop any session without a value notification.
    pub(crate) fn discard_sessions(&mut self, model: &ValueModel) -> bool {
        match self.phase {
            Phase::Idle => false,
            Phase::Dragging(_) => {
                debug!(value = model.value(), "drag discarded");
                self.transition(Phase::Idle);
                self.events.push(SliderEvent::DragEnded);
                self.redraw = true;
                true
            }
            Phase::Animating(animation) => {
                debug!(
                    value = model.value(),
                    target = animation.target(),
                    "animation discarded"
                );
                self.transition(Phase::Idle);
                self.redraw = true;
                true
            }
        }
    }

    /// Programmatic assignment. Never queues a notification.
    ///
    /// Returns `true` if the value changed synchronously.
    pub(crate) fn set_value(
        &mut self,
        model: &mut ValueModel,
        config: &SliderConfig,
        value: f32,
        animated: bool,
        now: Instant,
    ) -> bool {
        if value.is_nan() {
            return false;
        }
        if let Phase::Dragging(session) = &mut self.phase {
            let changed = model.set_value(value);
            session.start_value = model.value();
            session.anchor_normalized = model.normalize();
            session.anchor_pointer = session.last_pointer;
            debug!(value = model.value(), "drag baseline rebased");
            self.redraw |= changed;
            return changed;
        }
        if animated {
            return self.animate_to(model, config, value, now);
        }
        if let Phase::Animating(animation) = self.phase {
            debug!(target = animation.target(), "animation cancelled by set_value");
            self.transition(Phase::Idle);
        }
        let changed = model.set_value(value);
        self.redraw |= changed;
        changed
    }

    fn animate_to(
        &mut self,
        model: &mut ValueModel,
        config: &SliderConfig,
        value: f32,
        now: Instant,
    ) -> bool {
        let start = model.value();
        let target = model.clamp(value);
        let velocity = config.animation_speed * model.span();
        let animation = ValueAnimation::new(start, target, now, velocity);
        if target == start
            || model.is_degenerate()
            || !(velocity.is_finite() && velocity > 0.0)
            || !animation.is_schedulable()
        {
            if self.is_animating() {
                self.transition(Phase::Idle);
            }
            let changed = model.set_value(target);
            self.redraw |= changed;
            trace!(value = model.value(), "animated set completed immediately");
            return changed;
        }

        if let Phase::Animating(previous) = self.phase {
            debug!(
                previous_target = previous.target(),
                target, "animation superseded"
            );
        }
        debug!(
            start,
            target,
            velocity,
            duration_ms = animation.duration().as_millis() as u64,
            "animation started"
        );
        self.transition(Phase::Animating(animation));
        false
    }

    /// Advance an active animation. Returns `true` while one was running.
    pub(crate) fn tick(&mut self, model: &mut ValueModel, now: Instant) -> bool {
        let Phase::Animating(animation) = self.phase else {
            return false;
        };
        let done = animation.is_complete_at(now);
        if model.set_value(animation.sample(now)) {
            self.redraw = true;
        }
        if done {
            debug!(value = model.value(), "animation completed");
            self.transition(Phase::Idle);
        }
        true
    }

    /// React to a minimum/maximum assignment that already happened on `model`.
    pub(crate) fn bounds_changed(
        &mut self,
        model: &ValueModel,
        config: &SliderConfig,
        value_changed: bool,
    ) {
        self.redraw = true;
        match &mut self.phase {
            Phase::Animating(animation) => {
                animation.clamp_target(model.minimum(), model.maximum());
            }
            Phase::Dragging(session) => {
                session.anchor_normalized = model.normalize();
                session.anchor_pointer = session.last_pointer;
                trace!(value = model.value(), "drag anchor rebased to new bounds");
            }
            Phase::Idle => {}
        }
        if !value_changed {
            return;
        }
        let deferred = !config.continuous && self.is_dragging();
        trace!(value = model.value(), deferred, "value clamped by bounds");
        if !deferred {
            self.events.push(SliderEvent::ValueChanged(model.value()));
        }
    }

    fn transition(&mut self, next: Phase) {
        let from = self.phase.state();
        let to = next.state();
        self.phase = next;
        if from != to {
            debug!(from = from.as_str(), to = to.as_str(), "slider transition");
        }
    }
}
