//! Property-based invariant tests for the slider.
//!
//! 1. `set_value(v)` leaves `minimum ≤ value ≤ maximum` and equals the clamp.
//! 2. Track segments partition the track at the thumb centre.
//! 3. `normalized_value_for_pointer(thumb_center(n)) ≈ n` in both orientations.
//! 4. Repeated non-animated sets are idempotent and never notify.
//! 5. Animated duration is `|target − start| / velocity`; a second animated
//!    set supersedes the first.
//! 6. Arbitrary pointer sequences keep the value in range and pair every
//!    `DragBegan` with one `DragEnded`.

use std::time::Duration;

use proptest::prelude::*;
use slidekit_core::animation::Tick;
use slidekit_core::clock::{ManualClock, TimeSource};
use slidekit_core::event::{PointerEvent, PointerEventKind};
use slidekit_core::geometry::{Point, Rect};
use slidekit_widgets::slider::geometry::{
    LayoutParameters, normalized_value_for_pointer, thumb_center, thumb_travel, track_segments,
};
use slidekit_widgets::slider::{InteractionState, Slider, SliderConfig, SliderEvent};

const TOL: f32 = 1e-3;

// ── Helpers ─────────────────────────────────────────────────────────────

fn finite() -> impl Strategy<Value = f32> {
    -1.0e5f32..1.0e5f32
}

fn bounds_strategy() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..1000.0, 0.0f32..400.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn layout_strategy() -> impl Strategy<Value = LayoutParameters> {
    (0.0f32..60.0, 0.0f32..20.0, any::<bool>()).prop_map(|(radius, track, horizontal)| {
        LayoutParameters::default()
            .with_thumb_radius(radius)
            .with_track_height(track)
            .with_horizontal(horizontal)
    })
}

fn slider_with_range(lo: f32, hi: f32) -> Slider<ManualClock> {
    Slider::with_clock(ManualClock::new())
        .with_bounds(Rect::new(0.0, 0.0, 300.0, 40.0))
        .with_layout(LayoutParameters::default().with_thumb_radius(10.0))
        .with_range(lo, hi)
}

fn pointer_strategy() -> impl Strategy<Value = PointerEvent> {
    (0u8..4, -50.0f32..350.0, -20.0f32..60.0).prop_map(|(kind, x, y)| {
        let kind = match kind {
            0 => PointerEventKind::Press,
            1 => PointerEventKind::Move,
            2 => PointerEventKind::Release,
            _ => PointerEventKind::Cancel,
        };
        PointerEvent::new(kind, Point::new(x, y))
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. set_value clamps
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn set_value_clamps(a in finite(), b in finite(), v in finite()) {
        let mut slider = slider_with_range(a, b);
        slider.set_value(v);
        prop_assert!(slider.minimum_value() <= slider.value());
        prop_assert!(slider.value() <= slider.maximum_value());
        prop_assert_eq!(
            slider.value(),
            v.clamp(slider.minimum_value(), slider.maximum_value())
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Track segments partition the track
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn track_segments_partition(
        bounds in bounds_strategy(),
        layout in layout_strategy(),
        n in 0.0f32..=1.0,
    ) {
        let segments = track_segments(n, bounds, &layout);
        let center = thumb_center(n, bounds, &layout);
        if layout.is_horizontal() {
            prop_assert!((segments.minimum.left() - bounds.left()).abs() <= TOL);
            prop_assert!((segments.minimum.right() - center.x).abs() <= TOL);
            prop_assert!((segments.maximum.left() - center.x).abs() <= TOL);
            prop_assert!((segments.maximum.right() - bounds.right()).abs() <= TOL);
        } else {
            prop_assert!((segments.maximum.top() - bounds.top()).abs() <= TOL);
            prop_assert!((segments.maximum.bottom() - center.y).abs() <= TOL);
            prop_assert!((segments.minimum.top() - center.y).abs() <= TOL);
            prop_assert!((segments.minimum.bottom() - bounds.bottom()).abs() <= TOL);
        }
        let axis = layout.axis();
        let total = segments.minimum.extent(axis) + segments.maximum.extent(axis);
        prop_assert!((total - bounds.extent(axis)).abs() <= TOL);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Pointer mapping inverts thumb placement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pointer_inverts_thumb_center(
        bounds in bounds_strategy(),
        layout in layout_strategy(),
        n in 0.0f32..=1.0,
    ) {
        prop_assume!(thumb_travel(bounds, &layout) >= 10.0);
        let center = thumb_center(n, bounds, &layout);
        let back = normalized_value_for_pointer(center, bounds, &layout);
        prop_assert!((back - n).abs() <= TOL, "n={} back={}", n, back);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Non-animated sets are idempotent and silent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn programmatic_set_idempotent(a in finite(), b in finite(), v in finite()) {
        let mut slider = slider_with_range(a, b);
        slider.set_value(v);
        let first = (slider.value(), slider.state());
        slider.set_value(v);
        prop_assert_eq!((slider.value(), slider.state()), first);
        prop_assert_eq!(slider.pending_event_count(), 0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Animation duration and supersession
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn animation_duration_matches_velocity(
        target in 0.0f32..=1.0,
        speed in 0.5f32..10.0,
    ) {
        let mut slider = slider_with_range(0.0, 1.0)
            .with_config(SliderConfig::default().animation_speed(speed));
        slider.set_value_animated(target, true);
        if target == 0.0 {
            prop_assert_eq!(slider.state(), InteractionState::Idle);
        } else {
            let animation = *slider.animation().unwrap();
            let expected = f64::from(target) / f64::from(speed);
            prop_assert!((animation.duration().as_secs_f64() - expected).abs() < 1e-6);

            slider.tick(animation.completion_time());
            prop_assert_eq!(slider.value(), target);
            prop_assert_eq!(slider.state(), InteractionState::Idle);
        }
        prop_assert_eq!(slider.pending_event_count(), 0);
    }
}

proptest! {
    #[test]
    fn second_animation_supersedes(
        first in 0.1f32..=1.0,
        second in 0.0f32..=1.0,
        ms in 0u64..400,
    ) {
        let clock = ManualClock::new();
        let mut slider = Slider::with_clock(clock.clone());
        slider.set_value_animated(first, true);
        clock.advance(Duration::from_millis(ms));
        slider.tick(clock.now());
        slider.set_value_animated(second, true);

        clock.advance(Duration::from_secs(2));
        slider.tick(clock.now());
        prop_assert_eq!(slider.value(), second);
        prop_assert!(!slider.is_animating());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Pointer sequences keep invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pointer_sequences_keep_invariants(
        continuous in any::<bool>(),
        events in prop::collection::vec(pointer_strategy(), 0..40),
    ) {
        let mut slider = slider_with_range(-10.0, 10.0)
            .with_config(SliderConfig::default().continuous(continuous));
        let mut open = 0i32;
        for event in events {
            slider.handle_pointer(event);
            prop_assert!(slider.minimum_value() <= slider.value());
            prop_assert!(slider.value() <= slider.maximum_value());
            prop_assert_eq!(slider.is_highlighted(), slider.state() == InteractionState::Dragging);
            for emitted in slider.drain_events() {
                match emitted {
                    SliderEvent::DragBegan => open += 1,
                    SliderEvent::DragEnded => open -= 1,
                    SliderEvent::ValueChanged(v) => prop_assert_eq!(v, slider.value()),
                }
                prop_assert!((0..=1).contains(&open));
            }
        }
        slider.set_enabled(false);
        for emitted in slider.drain_events() {
            if emitted == SliderEvent::DragEnded {
                open -= 1;
            }
        }
        prop_assert_eq!(open, 0);
    }
}
