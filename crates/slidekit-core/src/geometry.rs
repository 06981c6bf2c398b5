#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are `f32` in the control's local space: origin at the top-left,
//! `x` grows to the right and `y` grows downward.

/// A point in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`.
    #[inline]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Build a point from a main-axis and cross-axis coordinate.
    #[inline]
    pub const fn from_axes(main_axis: Axis, main: f32, cross: f32) -> Self {
        match main_axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    ///
    /// Negative sizes are clamped to zero.
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Build a rectangle from a span on each axis.
    ///
    /// `main` and `cross` are `(start, length)` pairs.
    pub fn from_spans(main_axis: Axis, main: (f32, f32), cross: (f32, f32)) -> Self {
        match main_axis {
            Axis::Horizontal => Self::new(main.0, cross.0, main.1, cross.1),
            Axis::Vertical => Self::new(cross.0, main.0, cross.1, main.1),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Centre point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (edges inclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle, allowing `tolerance`
    /// for floating-point error.
    pub fn contains_rect(&self, other: &Rect, tolerance: f32) -> bool {
        other.left() >= self.left() - tolerance
            && other.right() <= self.right() + tolerance
            && other.top() >= self.top() - tolerance
            && other.bottom() <= self.bottom() + tolerance
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn expand(&self, amount: f32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Start coordinate along `axis`.
    #[inline]
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Length along `axis`.
    #[inline]
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// End coordinate along `axis`.
    #[inline]
    pub fn end(&self, axis: Axis) -> f32 {
        self.start(axis) + self.extent(axis)
    }

    /// Midpoint along `axis`.
    #[inline]
    pub fn mid(&self, axis: Axis) -> f32 {
        self.start(axis) + self.extent(axis) / 2.0
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Axis for a horizontal/vertical flag.
    #[inline]
    pub const fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, Point, Rect};

    #[test]
    fn rect_edges_and_midpoints() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.mid_x(), 60.0);
        assert_eq!(rect.mid_y(), 40.0);
        assert_eq!(rect.center(), Point::new(60.0, 40.0));
    }

    #[test]
    fn rect_negative_size_clamps_to_zero() {
        let rect = Rect::new(0.0, 0.0, -5.0, 3.0);
        assert_eq!(rect.width, 0.0);
        assert!(rect.is_empty());
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Point::new(2.0, 3.0)));
        assert!(rect.contains(Point::new(6.0, 8.0)));
        assert!(!rect.contains(Point::new(6.1, 3.0)));
        assert!(!rect.contains(Point::new(2.0, 8.5)));
    }

    #[test]
    fn rect_axis_accessors_swap() {
        let rect = Rect::new(1.0, 2.0, 30.0, 40.0);
        assert_eq!(rect.start(Axis::Horizontal), 1.0);
        assert_eq!(rect.start(Axis::Vertical), 2.0);
        assert_eq!(rect.extent(Axis::Horizontal), 30.0);
        assert_eq!(rect.extent(Axis::Vertical), 40.0);
        assert_eq!(rect.end(Axis::Vertical), 42.0);
        assert_eq!(rect.mid(Axis::Horizontal), 16.0);
    }

    #[test]
    fn rect_from_spans_round_trips_axes() {
        let h = Rect::from_spans(Axis::Horizontal, (5.0, 10.0), (1.0, 2.0));
        assert_eq!(h, Rect::new(5.0, 1.0, 10.0, 2.0));
        let v = Rect::from_spans(Axis::Vertical, (5.0, 10.0), (1.0, 2.0));
        assert_eq!(v, Rect::new(1.0, 5.0, 2.0, 10.0));
    }

    #[test]
    fn rect_expand_grows_every_side() {
        let rect = Rect::new(10.0, 10.0, 4.0, 4.0).expand(2.0);
        assert_eq!(rect, Rect::new(8.0, 8.0, 8.0, 8.0));
    }

    #[test]
    fn point_axes() {
        let p = Point::from_axes(Axis::Vertical, 7.0, 3.0);
        assert_eq!(p, Point::new(3.0, 7.0));
        assert_eq!(p.along(Axis::Vertical), 7.0);
        assert_eq!(p.along(Axis::Horizontal.cross()), 7.0);
    }

    #[test]
    fn point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
