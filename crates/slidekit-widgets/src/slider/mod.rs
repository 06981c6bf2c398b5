#![forbid(unsafe_code)]

//! Slider control.
//!
//! A [`Slider`] picks a continuous value from a bounded range by dragging a
//! thumb along a track. It owns a [`ValueModel`], layout parameters, visual
//! resources and an interaction state machine, and is driven entirely from
//! outside: pointer events in, timer ticks in, queued [`SliderEvent`]s and a
//! redraw flag out.
//!
//! # Example
//!
//! ```
//! use slidekit_core::clock::ManualClock;
//! use slidekit_core::geometry::{Point, Rect};
//! use slidekit_widgets::slider::{Slider, SliderEvent};
//!
//! let mut slider = Slider::with_clock(ManualClock::new())
//!     .with_bounds(Rect::new(0.0, 0.0, 120.0, 20.0))
//!     .with_range(0.0, 100.0);
//!
//! slider.press(Point::new(60.0, 10.0));
//! slider.release(Point::new(60.0, 10.0));
//!
//! let events = slider.drain_events();
//! assert_eq!(events.first(), Some(&SliderEvent::DragBegan));
//! assert_eq!(slider.value(), 50.0);
//! ```
//!
//! # Notifications
//!
//! | Cause | `ValueChanged` |
//! |-------|----------------|
//! | Drag move, continuous | every change |
//! | Drag, discrete | once at release, if the value differs from the press |
//! | Programmatic `set_value` (animated or not) | never |
//! | Bounds change clamps the value | immediately (deferred to release in a discrete drag) |
//! | Disable / restore mid-drag | never (`DragEnded` only) |

pub mod geometry;
pub mod interaction;
pub mod persist;

use std::time::Instant;

use slidekit_core::animation::{Tick, ValueAnimation};
use slidekit_core::clock::{SystemClock, TimeSource};
use slidekit_core::event::{PointerEvent, PointerEventKind};
use slidekit_core::geometry::{Point, Rect};
use slidekit_core::value::ValueModel;
use slidekit_style::{
    Color, ControlState, ImageHandle, Palette, ResourceRole, Resolved, VisualResourceSet,
};
use tracing::debug;

use crate::stateful::{StateKey, Stateful};
use interaction::InteractionController;

pub use geometry::{LayoutParameters, THUMB_HIT_SLOP, TrackSegments};
pub use interaction::{DragSession, InteractionState, SliderEvent};
pub use persist::{AttributeValue, DecodeError, STATE_VERSION, SliderAttribute, SliderPersist};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Behavioural configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    /// Notify on every drag change (`true`) or once at release (`false`).
    pub continuous: bool,
    /// Whether a press on the track away from the thumb jumps and drags.
    pub track_tap: bool,
    /// Animated sets travel this many full ranges per second.
    pub animation_speed: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            continuous: true,
            track_tap: true,
            animation_speed: 2.0,
        }
    }
}

impl SliderConfig {
    #[must_use]
    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    #[must_use]
    pub fn track_tap(mut self, track_tap: bool) -> Self {
        self.track_tap = track_tap;
        self
    }

    /// Set the animation speed in ranges per second. Negative and non-finite
    /// speeds are ignored; zero makes animated sets complete immediately.
    #[must_use]
    pub fn animation_speed(mut self, speed: f32) -> Self {
        if speed.is_finite() && speed >= 0.0 {
            self.animation_speed = speed;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Render snapshot
// ---------------------------------------------------------------------------

/// Everything a renderer needs to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderRenderModel<'a> {
    pub bounds: Rect,
    pub horizontal: bool,
    pub normalized_value: f32,
    pub thumb_center: Point,
    /// Effective radius, after capping to the bounds.
    pub thumb_radius: f32,
    pub thumb_rect: Rect,
    pub track: TrackSegments,
    pub thumb: Resolved<'a>,
    pub left_track: Resolved<'a>,
    pub right_track: Resolved<'a>,
    pub shadow: bool,
    pub highlighted: bool,
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

/// A slider control.
#[derive(Debug)]
pub struct Slider<C: TimeSource = SystemClock> {
    id: String,
    model: ValueModel,
    layout: LayoutParameters,
    bounds: Rect,
    resources: VisualResourceSet,
    config: SliderConfig,
    enabled: bool,
    clock: C,
    controller: InteractionController,
}

impl Slider {
    /// Create a slider driven by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TimeSource> Slider<C> {
    /// Create a slider reading time from `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            id: String::new(),
            model: ValueModel::default(),
            layout: LayoutParameters::default(),
            bounds: Rect::default(),
            resources: VisualResourceSet::default(),
            config: SliderConfig::default(),
            enabled: true,
            clock,
            controller: InteractionController::default(),
        }
    }

    // --- Builders ---------------------------------------------------------

    /// Instance id used for the persistence key.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set both bounds; swapped arguments are reordered.
    #[must_use]
    pub fn with_range(mut self, minimum: f32, maximum: f32) -> Self {
        self.model.set_range(minimum, maximum);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: f32) -> Self {
        self.model.set_value(value);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutParameters) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SliderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.resources = self.resources.with_palette(palette);
        self
    }

    // --- Accessors --------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutParameters {
        &self.layout
    }

    #[must_use]
    pub fn resources(&self) -> &VisualResourceSet {
        &self.resources
    }

    #[must_use]
    pub fn value_model(&self) -> &ValueModel {
        &self.model
    }

    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.controller.state()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.controller.drag_session()
    }

    #[must_use]
    pub fn animation(&self) -> Option<&ValueAnimation> {
        self.controller.animation()
    }

    /// True exactly while a drag is in progress.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.controller.is_dragging()
    }

    // --- Value and bounds -------------------------------------------------

    #[must_use]
    pub fn value(&self) -> f32 {
        self.model.value()
    }

    #[must_use]
    pub fn minimum_value(&self) -> f32 {
        self.model.minimum()
    }

    #[must_use]
    pub fn maximum_value(&self) -> f32 {
        self.model.maximum()
    }

    #[must_use]
    pub fn normalized_value(&self) -> f32 {
        self.model.normalize()
    }

    /// Assign the value immediately. Never notifies.
    pub fn set_value(&mut self, value: f32) {
        self.set_value_animated(value, false);
    }

    /// Assign the value, optionally animating toward it at a fixed velocity.
    /// Never notifies.
    pub fn set_value_animated(&mut self, value: f32, animated: bool) {
        let now = self.clock.now();
        self.controller
            .set_value(&mut self.model, &self.config, value, animated, now);
    }

    /// Assign the minimum. A larger value drags the maximum along.
    pub fn set_minimum_value(&mut self, minimum: f32) {
        self.update_bounds(|model| model.set_minimum(minimum));
    }

    /// Assign the maximum. A smaller value drags the minimum along.
    pub fn set_maximum_value(&mut self, maximum: f32) {
        self.update_bounds(|model| model.set_maximum(maximum));
    }

    /// Assign both bounds; swapped arguments are reordered.
    pub fn set_range(&mut self, minimum: f32, maximum: f32) {
        self.update_bounds(|model| model.set_range(minimum, maximum));
    }

    fn update_bounds(&mut self, apply: impl FnOnce(&mut ValueModel) -> bool) {
        let before = (self.model.minimum(), self.model.maximum());
        let value_changed = apply(&mut self.model);
        if before == (self.model.minimum(), self.model.maximum()) && !value_changed {
            return;
        }
        debug!(
            minimum = self.model.minimum(),
            maximum = self.model.maximum(),
            value = self.model.value(),
            "slider bounds changed"
        );
        self.controller
            .bounds_changed(&self.model, &self.config, value_changed);
    }

    #[must_use]
    pub fn continues(&self) -> bool {
        self.config.continuous
    }

    pub fn set_continues(&mut self, continues: bool) {
        self.config.continuous = continues;
    }

    // --- Enabled state ----------------------------------------------------

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable input. Disabling ends any drag or animation where it
    /// is, without a value notification.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        debug!(enabled, "slider enabled changed");
        if !enabled {
            self.controller.discard_sessions(&self.model);
        }
        self.controller.request_redraw();
    }

    // --- Layout -----------------------------------------------------------

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.controller.request_redraw();
        }
    }

    #[must_use]
    pub fn track_height(&self) -> f32 {
        self.layout.track_height()
    }

    pub fn set_track_height(&mut self, height: f32) {
        let changed = self.layout.set_track_height(height);
        self.redraw_if(changed);
    }

    #[must_use]
    pub fn thumb_radius(&self) -> f32 {
        self.layout.thumb_radius()
    }

    pub fn set_thumb_radius(&mut self, radius: f32) {
        let changed = self.layout.set_thumb_radius(radius);
        self.redraw_if(changed);
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.layout.is_horizontal()
    }

    pub fn set_horizontal(&mut self, horizontal: bool) {
        let changed = self.layout.set_horizontal(horizontal);
        self.redraw_if(changed);
    }

    #[must_use]
    pub fn has_shadow(&self) -> bool {
        self.layout.has_shadow()
    }

    pub fn set_shadow(&mut self, shadow: bool) {
        let changed = self.layout.set_shadow(shadow);
        self.redraw_if(changed);
    }

    fn redraw_if(&mut self, changed: bool) {
        if changed {
            self.controller.request_redraw();
        }
    }

    // --- Visual resources -------------------------------------------------

    #[must_use]
    pub fn left_track_tint(&self) -> Option<Color> {
        self.resources.tint(ResourceRole::LeftTrack)
    }

    pub fn set_left_track_tint(&mut self, tint: Option<Color>) {
        let changed = self.resources.set_tint(ResourceRole::LeftTrack, tint);
        self.redraw_if(changed);
    }

    #[must_use]
    pub fn right_track_tint(&self) -> Option<Color> {
        self.resources.tint(ResourceRole::RightTrack)
    }

    pub fn set_right_track_tint(&mut self, tint: Option<Color>) {
        let changed = self.resources.set_tint(ResourceRole::RightTrack, tint);
        self.redraw_if(changed);
    }

    #[must_use]
    pub fn thumb_tint(&self) -> Option<Color> {
        self.resources.tint(ResourceRole::Thumb)
    }

    pub fn set_thumb_tint(&mut self, tint: Option<Color>) {
        let changed = self.resources.set_tint(ResourceRole::Thumb, tint);
        self.redraw_if(changed);
    }

    /// Store the thumb image for a control state. States other than normal
    /// and highlighted are folded into one of the two.
    pub fn set_thumb_image(&mut self, image: Option<ImageHandle>, state: ControlState) {
        self.set_image(ResourceRole::Thumb, image, state);
    }

    pub fn set_left_track_image(&mut self, image: Option<ImageHandle>, state: ControlState) {
        self.set_image(ResourceRole::LeftTrack, image, state);
    }

    pub fn set_right_track_image(&mut self, image: Option<ImageHandle>, state: ControlState) {
        self.set_image(ResourceRole::RightTrack, image, state);
    }

    fn set_image(&mut self, role: ResourceRole, image: Option<ImageHandle>, state: ControlState) {
        let changed = self.resources.set_image(role, state, image);
        self.redraw_if(changed);
    }

    /// Image stored for `state`, without fallback.
    #[must_use]
    pub fn thumb_image(&self, state: ControlState) -> Option<&ImageHandle> {
        self.resources.image(ResourceRole::Thumb, state.into())
    }

    #[must_use]
    pub fn left_track_image(&self, state: ControlState) -> Option<&ImageHandle> {
        self.resources.image(ResourceRole::LeftTrack, state.into())
    }

    #[must_use]
    pub fn right_track_image(&self, state: ControlState) -> Option<&ImageHandle> {
        self.resources.image(ResourceRole::RightTrack, state.into())
    }

    /// Thumb image for the current highlight state, if any.
    #[must_use]
    pub fn current_thumb_image(&self) -> Option<&ImageHandle> {
        self.resources
            .current_image(ResourceRole::Thumb, self.is_highlighted())
    }

    #[must_use]
    pub fn current_left_track_image(&self) -> Option<&ImageHandle> {
        self.resources
            .current_image(ResourceRole::LeftTrack, self.is_highlighted())
    }

    #[must_use]
    pub fn current_right_track_image(&self) -> Option<&ImageHandle> {
        self.resources
            .current_image(ResourceRole::RightTrack, self.is_highlighted())
    }

    /// What to draw for `role` right now.
    #[must_use]
    pub fn resolved(&self, role: ResourceRole) -> Resolved<'_> {
        self.resources.resolve(role, self.is_highlighted())
    }

    // --- Geometry ---------------------------------------------------------

    #[must_use]
    pub fn thumb_center(&self) -> Point {
        geometry::thumb_center(self.model.normalize(), self.bounds, &self.layout)
    }

    #[must_use]
    pub fn thumb_rect(&self) -> Rect {
        geometry::thumb_rect(self.model.normalize(), self.bounds, &self.layout)
    }

    #[must_use]
    pub fn track_segments(&self) -> TrackSegments {
        geometry::track_segments(self.model.normalize(), self.bounds, &self.layout)
    }

    #[must_use]
    pub fn render_model(&self) -> SliderRenderModel<'_> {
        let normalized = self.model.normalize();
        let highlighted = self.is_highlighted();
        SliderRenderModel {
            bounds: self.bounds,
            horizontal: self.layout.is_horizontal(),
            normalized_value: normalized,
            thumb_center: geometry::thumb_center(normalized, self.bounds, &self.layout),
            thumb_radius: geometry::effective_thumb_radius(self.bounds, &self.layout),
            thumb_rect: geometry::thumb_rect(normalized, self.bounds, &self.layout),
            track: geometry::track_segments(normalized, self.bounds, &self.layout),
            thumb: self.resources.resolve(ResourceRole::Thumb, highlighted),
            left_track: self.resources.resolve(ResourceRole::LeftTrack, highlighted),
            right_track: self.resources.resolve(ResourceRole::RightTrack, highlighted),
            shadow: self.layout.has_shadow(),
            highlighted,
            enabled: self.enabled,
        }
    }

    // --- Pointer input ----------------------------------------------------

    /// Dispatch a pointer event. Returns `true` if the slider consumed it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Press => self.press(event.position),
            PointerEventKind::Move => self.move_to(event.position),
            PointerEventKind::Release => self.release(event.position),
            PointerEventKind::Cancel => self.cancel(),
        }
    }

    pub fn press(&mut self, point: Point) -> bool {
        if !self.enabled {
            return false;
        }
        self.controller.press(
            &mut self.model,
            self.bounds,
            &self.layout,
            &self.config,
            point,
        )
    }

    pub fn move_to(&mut self, point: Point) -> bool {
        self.controller.move_to(
            &mut self.model,
            self.bounds,
            &self.layout,
            &self.config,
            point,
        )
    }

    pub fn release(&mut self, point: Point) -> bool {
        self.controller.release(
            &mut self.model,
            self.bounds,
            &self.layout,
            &self.config,
            point,
        )
    }

    /// End the drag without applying a final position. The value stays where
    /// the last move left it.
    pub fn cancel(&mut self) -> bool {
        self.controller.cancel(&self.model, &self.config)
    }

    // --- Outputs ----------------------------------------------------------

    /// Take all queued notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<SliderEvent> {
        self.controller.drain_events()
    }

    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.controller.pending_event_count()
    }

    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.controller.needs_redraw()
    }

    /// Read and clear the redraw flag.
    pub fn take_redraw_request(&mut self) -> bool {
        self.controller.take_redraw_request()
    }

    // --- Attributes -------------------------------------------------------

    /// Read a property by attribute name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<AttributeValue> {
        let attribute = SliderAttribute::from_name(name)?;
        self.save_state().get(attribute)
    }

    /// Write a property by attribute name through its regular setter.
    pub fn set_attribute(
        &mut self,
        name: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<(), DecodeError> {
        let attribute: SliderAttribute = name.parse()?;
        let value = value.into();
        match attribute {
            SliderAttribute::Value => self.set_value(value.number_for(attribute)?),
            SliderAttribute::MinimumValue => self.set_minimum_value(value.number_for(attribute)?),
            SliderAttribute::MaximumValue => self.set_maximum_value(value.number_for(attribute)?),
            SliderAttribute::Continues => self.set_continues(value.bool_for(attribute)?),
            SliderAttribute::LeftTrackTint => self.set_left_track_tint(value.color_for(attribute)?),
            SliderAttribute::RightTrackTint => {
                self.set_right_track_tint(value.color_for(attribute)?)
            }
            SliderAttribute::ThumbTint => self.set_thumb_tint(value.color_for(attribute)?),
            SliderAttribute::TrackHeight => self.set_track_height(value.number_for(attribute)?),
            SliderAttribute::ThumbRadius => self.set_thumb_radius(value.number_for(attribute)?),
            SliderAttribute::Horizontal => self.set_horizontal(value.bool_for(attribute)?),
            SliderAttribute::Shadow => self.set_shadow(value.bool_for(attribute)?),
        }
        Ok(())
    }
}

impl<C: TimeSource> Tick for Slider<C> {
    fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    fn tick(&mut self, now: Instant) {
        self.controller.tick(&mut self.model, now);
    }
}

impl<C: TimeSource> Stateful for Slider<C> {
    type State = SliderPersist;

    fn state_key(&self) -> StateKey {
        StateKey::new("Slider", self.id.as_str())
    }

    fn save_state(&self) -> SliderPersist {
        SliderPersist {
            value: self.model.value(),
            minimum_value: self.model.minimum(),
            maximum_value: self.model.maximum(),
            continues: self.config.continuous,
            left_track_tint: self.left_track_tint(),
            right_track_tint: self.right_track_tint(),
            thumb_tint: self.thumb_tint(),
            track_height: self.layout.track_height(),
            thumb_radius: self.layout.thumb_radius(),
            horizontal: self.layout.is_horizontal(),
            shadow: self.layout.has_shadow(),
        }
    }

    /// Apply a snapshot silently. Sessions are discarded; bounds are applied
    /// before the value so the value is clamped against the restored range.
    fn restore_state(&mut self, state: SliderPersist) {
        self.controller.discard_sessions(&self.model);

        let mut model = ValueModel::default();
        model.set_minimum(state.minimum_value);
        model.set_maximum(state.maximum_value);
        model.set_value(state.value);
        self.model = model;

        self.config.continuous = state.continues;
        self.resources.set_tint(ResourceRole::LeftTrack, state.left_track_tint);
        self.resources.set_tint(ResourceRole::RightTrack, state.right_track_tint);
        self.resources.set_tint(ResourceRole::Thumb, state.thumb_tint);
        self.layout.set_track_height(state.track_height);
        self.layout.set_thumb_radius(state.thumb_radius);
        self.layout.set_horizontal(state.horizontal);
        self.layout.set_shadow(state.shadow);

        debug!(key = %self.state_key(), value = self.model.value(), "slider state restored");
        self.controller.request_redraw();
    }

    fn state_version() -> u32 {
        STATE_VERSION
    }
}
