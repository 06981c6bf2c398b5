#![forbid(unsafe_code)]

//! Slider geometry.
//!
//! Pure functions mapping a normalized value to thumb and track geometry and
//! pointer positions back to normalized values. Orientation is resolved once
//! into an active (main) axis and a cross axis; the arithmetic below never
//! branches on orientation except for the direction in which value grows.
//!
//! # Conventions
//!
//! - Horizontal sliders grow to the right, vertical sliders grow upward.
//! - The thumb travels between `start + r` and `end - r` on the main axis,
//!   where `r` is the effective radius (the configured radius capped at half
//!   of either extent), so the thumb box never leaves the bounds.
//! - The track spans the whole main extent and is split at the thumb centre.
//!
//! # Invariants
//!
//! 1. `track_segments(n)` meet exactly at `thumb_center(n)` along the main axis.
//! 2. `normalized_value_for_pointer(thumb_center(n)) ≈ n`.
//! 3. Results are clamped to `[0, 1]`; `NaN` inputs behave like 0.

use slidekit_core::geometry::{Axis, Point, Rect};

/// Extra radius around the thumb that still counts as a thumb hit.
pub const THUMB_HIT_SLOP: f32 = 8.0;

/// Sizing and orientation of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParameters {
    track_height: f32,
    thumb_radius: f32,
    horizontal: bool,
    shadow: bool,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            track_height: 2.0,
            thumb_radius: 28.0,
            horizontal: true,
            shadow: true,
        }
    }
}

impl LayoutParameters {
    #[inline]
    pub fn track_height(&self) -> f32 {
        self.track_height
    }

    #[inline]
    pub fn thumb_radius(&self) -> f32 {
        self.thumb_radius
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    /// Shadow is a rendering flag only; it never affects geometry.
    #[inline]
    pub fn has_shadow(&self) -> bool {
        self.shadow
    }

    /// Active axis derived from the orientation flag.
    #[inline]
    pub fn axis(&self) -> Axis {
        Axis::from_horizontal(self.horizontal)
    }

    /// Set the track thickness. Negative values clamp to zero, non-finite
    /// values are ignored. Returns `true` on change.
    pub fn set_track_height(&mut self, height: f32) -> bool {
        update_length(&mut self.track_height, height)
    }

    /// Set the thumb radius. Negative values clamp to zero, non-finite values
    /// are ignored. Returns `true` on change.
    pub fn set_thumb_radius(&mut self, radius: f32) -> bool {
        update_length(&mut self.thumb_radius, radius)
    }

    pub fn set_horizontal(&mut self, horizontal: bool) -> bool {
        std::mem::replace(&mut self.horizontal, horizontal) != horizontal
    }

    pub fn set_shadow(&mut self, shadow: bool) -> bool {
        std::mem::replace(&mut self.shadow, shadow) != shadow
    }

    #[must_use]
    pub fn with_track_height(mut self, height: f32) -> Self {
        self.set_track_height(height);
        self
    }

    #[must_use]
    pub fn with_thumb_radius(mut self, radius: f32) -> Self {
        self.set_thumb_radius(radius);
        self
    }

    #[must_use]
    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    #[must_use]
    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }
}

fn update_length(slot: &mut f32, value: f32) -> bool {
    if !value.is_finite() {
        return false;
    }
    let value = value.max(0.0);
    std::mem::replace(slot, value) != value
}

/// The two track segments on either side of the thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSegments {
    /// Segment between the minimum end and the thumb centre (left / bottom).
    pub minimum: Rect,
    /// Segment between the thumb centre and the maximum end (right / top).
    pub maximum: Rect,
}

/// Bounds and layout resolved into axis terms.
#[derive(Debug, Clone, Copy)]
struct AxisFrame {
    axis: Axis,
    start: f32,
    end: f32,
    cross_mid: f32,
    cross_extent: f32,
    radius: f32,
    travel: f32,
}

impl AxisFrame {
    fn new(bounds: Rect, layout: &LayoutParameters) -> Self {
        let axis = layout.axis();
        let cross = axis.cross();
        let main_extent = bounds.extent(axis);
        let cross_extent = bounds.extent(cross);
        let radius = layout
            .thumb_radius
            .min(main_extent / 2.0)
            .min(cross_extent / 2.0)
            .max(0.0);
        Self {
            axis,
            start: bounds.start(axis),
            end: bounds.end(axis),
            cross_mid: bounds.mid(cross),
            cross_extent,
            radius,
            travel: (main_extent - 2.0 * radius).max(0.0),
        }
    }

    fn main_for(&self, normalized: f32) -> f32 {
        let offset = self.radius + sanitize(normalized) * self.travel;
        match self.axis {
            Axis::Horizontal => self.start + offset,
            Axis::Vertical => self.end - offset,
        }
    }

    fn normalized_for(&self, main: f32) -> f32 {
        if self.travel <= 0.0 {
            return 0.0;
        }
        let offset = match self.axis {
            Axis::Horizontal => main - (self.start + self.radius),
            Axis::Vertical => (self.end - self.radius) - main,
        };
        sanitize(offset / self.travel)
    }
}

fn sanitize(normalized: f32) -> f32 {
    if normalized.is_nan() {
        0.0
    } else {
        normalized.clamp(0.0, 1.0)
    }
}

/// Thumb radius actually used for `bounds`: the configured radius capped at
/// half of each extent.
#[must_use]
pub fn effective_thumb_radius(bounds: Rect, layout: &LayoutParameters) -> f32 {
    AxisFrame::new(bounds, layout).radius
}

/// Distance the thumb centre can travel along the main axis.
#[must_use]
pub fn thumb_travel(bounds: Rect, layout: &LayoutParameters) -> f32 {
    AxisFrame::new(bounds, layout).travel
}

/// Centre of the thumb for a normalized value.
#[must_use]
pub fn thumb_center(normalized: f32, bounds: Rect, layout: &LayoutParameters) -> Point {
    let frame = AxisFrame::new(bounds, layout);
    Point::from_axes(frame.axis, frame.main_for(normalized), frame.cross_mid)
}

/// Bounding box of the thumb for a normalized value.
#[must_use]
pub fn thumb_rect(normalized: f32, bounds: Rect, layout: &LayoutParameters) -> Rect {
    let frame = AxisFrame::new(bounds, layout);
    let center = Point::from_axes(frame.axis, frame.main_for(normalized), frame.cross_mid);
    let r = frame.radius;
    Rect::new(center.x - r, center.y - r, r * 2.0, r * 2.0)
}

/// Track rectangles on either side of the thumb centre.
#[must_use]
pub fn track_segments(normalized: f32, bounds: Rect, layout: &LayoutParameters) -> TrackSegments {
    let frame = AxisFrame::new(bounds, layout);
    let split = frame.main_for(normalized);
    let thickness = layout.track_height.min(frame.cross_extent);
    let cross = (frame.cross_mid - thickness / 2.0, thickness);

    let lower = Rect::from_spans(frame.axis, (frame.start, split - frame.start), cross);
    let upper = Rect::from_spans(frame.axis, (split, frame.end - split), cross);
    match frame.axis {
        Axis::Horizontal => TrackSegments {
            minimum: lower,
            maximum: upper,
        },
        Axis::Vertical => TrackSegments {
            minimum: upper,
            maximum: lower,
        },
    }
}

/// Normalized value whose thumb centre lies under `point` on the main axis.
#[must_use]
pub fn normalized_value_for_pointer(point: Point, bounds: Rect, layout: &LayoutParameters) -> f32 {
    let frame = AxisFrame::new(bounds, layout);
    frame.normalized_for(point.along(frame.axis))
}

/// Signed normalized distance covered by moving the pointer from `from` to
/// `to`. Not clamped; zero when the thumb has no room to travel.
#[must_use]
pub fn normalized_delta(from: Point, to: Point, bounds: Rect, layout: &LayoutParameters) -> f32 {
    let frame = AxisFrame::new(bounds, layout);
    if frame.travel <= 0.0 {
        return 0.0;
    }
    let delta = to.along(frame.axis) - from.along(frame.axis);
    let delta = match frame.axis {
        Axis::Horizontal => delta,
        Axis::Vertical => -delta,
    };
    let normalized = delta / frame.travel;
    if normalized.is_finite() { normalized } else { 0.0 }
}

/// Whether `point` grabs the thumb drawn at `normalized`.
#[must_use]
pub fn hit_test_thumb(
    point: Point,
    normalized: f32,
    bounds: Rect,
    layout: &LayoutParameters,
) -> bool {
    let frame = AxisFrame::new(bounds, layout);
    let center = Point::from_axes(frame.axis, frame.main_for(normalized), frame.cross_mid);
    point.distance(center) <= frame.radius + THUMB_HIT_SLOP
}

/// Whether `point` is close enough to the control to start a track tap.
#[must_use]
pub fn hit_test_track(point: Point, bounds: Rect) -> bool {
    !bounds.is_empty() && bounds.expand(THUMB_HIT_SLOP).contains(point)
}
