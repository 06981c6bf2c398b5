#![forbid(unsafe_code)]

//! End-to-end interaction scenarios driven through pointer events and a
//! manual clock.

use std::time::Duration;

use slidekit_core::animation::Tick;
use slidekit_core::clock::{ManualClock, TimeSource};
use slidekit_core::event::PointerEvent;
use slidekit_core::geometry::{Point, Rect};
use slidekit_widgets::slider::geometry::LayoutParameters;
use slidekit_widgets::slider::{InteractionState, Slider, SliderConfig, SliderEvent};

// Thumb travel is 280 units: x = 10 is 0.0, x = 290 is 1.0.
const Y: f32 = 20.0;

fn x(n: f32) -> f32 {
    10.0 + 280.0 * n
}

fn horizontal(config: SliderConfig) -> Slider<ManualClock> {
    Slider::with_clock(ManualClock::new())
        .with_bounds(Rect::new(0.0, 0.0, 300.0, 40.0))
        .with_layout(LayoutParameters::default().with_thumb_radius(10.0))
        .with_config(config)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn value_events(events: &[SliderEvent]) -> Vec<f32> {
    events
        .iter()
        .filter_map(|event| match event {
            SliderEvent::ValueChanged(v) => Some(*v),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Notification modes
// ============================================================================

#[test]
fn discrete_drag_notifies_once_with_final_value() {
    let mut slider = horizontal(SliderConfig::default().continuous(false));
    slider.set_value(0.2);

    assert!(slider.handle_pointer(PointerEvent::press(x(0.2), Y)));
    for n in [0.3, 0.5, 0.7, 0.8] {
        slider.handle_pointer(PointerEvent::moved(x(n), Y));
        assert_eq!(slider.pending_event_count(), 1, "only DragBegan while dragging");
    }
    slider.handle_pointer(PointerEvent::release(x(0.8), Y));

    let events = slider.drain_events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], SliderEvent::DragBegan);
    assert!(matches!(events[1], SliderEvent::ValueChanged(v) if close(v, 0.8)));
    assert_eq!(events[2], SliderEvent::DragEnded);
    assert!(close(slider.value(), 0.8));
}

#[test]
fn continuous_drag_notifies_every_move() {
    let mut slider = horizontal(SliderConfig::default());
    slider.handle_pointer(PointerEvent::press(x(0.0), Y));
    let steps = [0.1, 0.2, 0.3, 0.4, 0.5];
    for n in steps {
        slider.handle_pointer(PointerEvent::moved(x(n), Y));
    }
    slider.handle_pointer(PointerEvent::release(x(0.5), Y));

    let values = value_events(&slider.drain_events());
    assert_eq!(values.len(), steps.len());
    for (got, want) in values.iter().zip(steps) {
        assert!(close(*got, want), "got {got}, want {want}");
    }
}

#[test]
fn moves_that_do_not_change_the_value_are_silent() {
    let mut slider = horizontal(SliderConfig::default());
    slider.handle_pointer(PointerEvent::press(x(0.0), Y));
    slider.handle_pointer(PointerEvent::moved(x(0.0), Y + 15.0));
    slider.handle_pointer(PointerEvent::moved(x(0.0) - 50.0, Y));
    assert!(value_events(&slider.drain_events()).is_empty());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn disable_mid_drag_goes_idle_and_stays_quiet() {
    let mut slider = horizontal(SliderConfig::default().continuous(false));
    slider.handle_pointer(PointerEvent::press(x(0.0), Y));
    slider.handle_pointer(PointerEvent::moved(x(0.6), Y));
    slider.drain_events();

    slider.set_enabled(false);
    assert_eq!(slider.state(), InteractionState::Idle);
    assert!(close(slider.value(), 0.6));
    assert_eq!(slider.drain_events(), vec![SliderEvent::DragEnded]);

    assert!(!slider.handle_pointer(PointerEvent::moved(x(0.9), Y)));
    assert!(!slider.handle_pointer(PointerEvent::release(x(0.9), Y)));
    assert!(!slider.handle_pointer(PointerEvent::press(x(0.6), Y)));
    assert!(close(slider.value(), 0.6));
    assert_eq!(slider.pending_event_count(), 0);
}

#[test]
fn disable_mid_animation_keeps_reached_value() {
    let clock = ManualClock::new();
    let mut slider = Slider::with_clock(clock.clone());
    slider.set_value_animated(1.0, true);
    clock.advance(Duration::from_millis(100));
    slider.tick(clock.now());
    slider.set_enabled(false);

    assert_eq!(slider.state(), InteractionState::Idle);
    assert!(close(slider.value(), 0.2));
    clock.advance(Duration::from_secs(1));
    slider.tick(clock.now());
    assert!(close(slider.value(), 0.2));
    assert_eq!(slider.pending_event_count(), 0);
}

#[test]
fn cancel_never_rolls_back() {
    let mut slider = horizontal(SliderConfig::default().continuous(false));
    slider.handle_pointer(PointerEvent::press(x(0.0), Y));
    slider.handle_pointer(PointerEvent::moved(x(0.4), Y));
    slider.handle_pointer(PointerEvent::cancel(x(0.9), Y));

    assert!(close(slider.value(), 0.4));
    let events = slider.drain_events();
    assert!(matches!(events[1], SliderEvent::ValueChanged(v) if close(v, 0.4)));
    assert_eq!(events.last(), Some(&SliderEvent::DragEnded));
}

#[test]
fn track_tap_jumps_and_then_drags() {
    let mut slider = horizontal(SliderConfig::default());
    assert!(slider.handle_pointer(PointerEvent::press(x(0.75), Y)));
    assert!(close(slider.value(), 0.75));
    assert!(slider.is_highlighted());

    slider.handle_pointer(PointerEvent::moved(x(0.5), Y));
    assert!(close(slider.value(), 0.5));
    slider.handle_pointer(PointerEvent::release(x(0.5), Y));
    assert!(!slider.is_highlighted());
}

#[test]
fn press_interrupts_animation() {
    let clock = ManualClock::new();
    let mut slider = Slider::with_clock(clock.clone())
        .with_bounds(Rect::new(0.0, 0.0, 300.0, 40.0))
        .with_layout(LayoutParameters::default().with_thumb_radius(10.0));
    slider.set_value_animated(1.0, true);
    clock.advance(Duration::from_millis(250));
    slider.tick(clock.now());
    assert!(close(slider.value(), 0.5));

    assert!(slider.handle_pointer(PointerEvent::press(x(0.5), Y)));
    assert_eq!(slider.state(), InteractionState::Dragging);
    assert!(!slider.is_animating());
    clock.advance(Duration::from_secs(1));
    slider.tick(clock.now());
    assert!(close(slider.value(), 0.5));
}

#[test]
fn extremely_slow_animation_completes_immediately() {
    let clock = ManualClock::new();
    let mut slider = Slider::with_clock(clock.clone())
        .with_config(SliderConfig::default().animation_speed(1e-20));
    slider.set_value_animated(1.0, true);
    slider.tick(clock.now());
    assert_eq!(slider.value(), 1.0);
    assert_eq!(slider.state(), InteractionState::Idle);
    assert_eq!(slider.pending_event_count(), 0);
}

// ============================================================================
// Ranges and orientation
// ============================================================================

#[test]
fn degenerate_range_pins_value() {
    let mut slider = horizontal(SliderConfig::default()).with_range(5.0, 5.0);
    assert_eq!(slider.normalized_value(), 0.0);
    for v in [-3.0, 5.0, 42.0] {
        slider.set_value(v);
        assert_eq!(slider.value(), 5.0);
    }
    slider.set_value_animated(9.0, true);
    assert_eq!(slider.state(), InteractionState::Idle);

    slider.handle_pointer(PointerEvent::press(x(0.0), Y));
    slider.handle_pointer(PointerEvent::moved(x(1.0), Y));
    assert_eq!(slider.value(), 5.0);
    assert_eq!(slider.thumb_center(), Point::new(10.0, 20.0));
}

#[test]
fn vertical_slider_grows_upward() {
    let mut slider = Slider::with_clock(ManualClock::new())
        .with_bounds(Rect::new(0.0, 0.0, 40.0, 300.0))
        .with_layout(
            LayoutParameters::default()
                .with_thumb_radius(10.0)
                .with_horizontal(false),
        );
    assert_eq!(slider.thumb_center(), Point::new(20.0, 290.0));

    slider.handle_pointer(PointerEvent::press(20.0, 290.0));
    slider.handle_pointer(PointerEvent::moved(20.0, 150.0));
    assert!(close(slider.value(), 0.5));
    slider.handle_pointer(PointerEvent::release(20.0, 10.0));
    assert_eq!(slider.value(), 1.0);

    let track = slider.track_segments();
    assert!(track.minimum.height > track.maximum.height);
}

#[test]
fn bounds_change_during_discrete_drag_is_reported_at_release() {
    let mut slider = horizontal(SliderConfig::default().continuous(false));
    slider.handle_pointer(PointerEvent::press(x(0.0), Y));
    slider.handle_pointer(PointerEvent::moved(x(0.9), Y));
    slider.set_maximum_value(0.5);
    assert_eq!(value_events(&slider.drain_events()), Vec::<f32>::new());

    slider.handle_pointer(PointerEvent::release(x(1.0), Y));
    assert_eq!(value_events(&slider.drain_events()), vec![0.5]);
}

#[test]
fn bounds_change_during_drag_keeps_pointer_anchored() {
    let mut slider = horizontal(SliderConfig::default()).with_value(0.5);
    assert!(slider.handle_pointer(PointerEvent::press(x(0.5), Y)));
    slider.set_maximum_value(10.0);
    assert!(close(slider.thumb_center().x, x(0.05)));

    slider.handle_pointer(PointerEvent::moved(x(0.5), Y));
    assert!(close(slider.value(), 0.5));
    slider.handle_pointer(PointerEvent::moved(x(0.6), Y));
    assert!(close(slider.value(), 1.5));
}

#[test]
fn bounds_change_while_idle_is_reported() {
    let mut slider = horizontal(SliderConfig::default()).with_value(0.8);
    slider.set_maximum_value(0.5);
    assert_eq!(slider.drain_events(), vec![SliderEvent::ValueChanged(0.5)]);

    slider.set_minimum_value(0.9);
    assert_eq!(slider.minimum_value(), 0.9);
    assert_eq!(slider.maximum_value(), 0.9);
    assert_eq!(slider.drain_events(), vec![SliderEvent::ValueChanged(0.9)]);
}

// ============================================================================
// Re-entrancy
// ============================================================================

#[test]
fn observer_writes_apply_after_the_transition() {
    let mut slider = horizontal(SliderConfig::default());
    slider.handle_pointer(PointerEvent::press(x(0.0), Y));
    slider.handle_pointer(PointerEvent::moved(x(0.7), Y));

    // An observer that snaps the value to one decimal place.
    for event in slider.drain_events() {
        if let SliderEvent::ValueChanged(v) = event {
            slider.set_value((v * 10.0).round() / 10.0);
        }
    }
    assert!(close(slider.value(), 0.7));
    assert_eq!(slider.pending_event_count(), 0);
    assert_eq!(slider.state(), InteractionState::Dragging);
}

#[test]
fn redraw_flag_follows_visible_changes() {
    let clock = ManualClock::new();
    let mut slider = Slider::with_clock(clock.clone());
    assert!(!slider.take_redraw_request());

    slider.set_value_animated(1.0, true);
    clock.advance(Duration::from_millis(16));
    slider.tick(clock.now());
    assert!(slider.take_redraw_request());
    assert!(!slider.needs_redraw());

    slider.set_enabled(false);
    assert!(slider.take_redraw_request());
}
