#![forbid(unsafe_code)]

//! Bounded value model.
//!
//! [`ValueModel`] stores a value in caller units together with its bounds and
//! owns the clamping and normalization arithmetic.
//!
//! # Invariants
//!
//! 1. `minimum <= value <= maximum` after every mutation.
//! 2. Changing a bound re-clamps `value` immediately.
//! 3. Non-finite inputs are ignored; the previous state is kept.
//! 4. [`normalize`](ValueModel::normalize) never divides by zero and returns
//!    0.0 for a degenerate range.
//!
//! # Inverted Bounds
//!
//! Assigning a minimum above the current maximum (or a maximum below the
//! current minimum) moves the opposite bound along with it, so the most recent
//! assignment always wins and the range collapses rather than inverting.

/// Ranges narrower than this are treated as degenerate by [`ValueModel::normalize`].
pub const RANGE_EPSILON: f32 = f32::EPSILON;

/// A value pinned to a `[minimum, maximum]` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueModel {
    value: f32,
    minimum: f32,
    maximum: f32,
}

impl Default for ValueModel {
    fn default() -> Self {
        Self {
            value: 0.0,
            minimum: 0.0,
            maximum: 1.0,
        }
    }
}

impl ValueModel {
    /// Create a model, ordering the bounds and clamping `value`.
    #[must_use]
    pub fn new(value: f32, minimum: f32, maximum: f32) -> Self {
        Self::from_parts(value, minimum, maximum)
    }

    /// Build a model from untrusted parts (e.g. decoded state).
    ///
    /// Non-finite parts fall back to the defaults, inverted bounds are
    /// swapped, and the value is clamped.
    #[must_use]
    pub fn from_parts(value: f32, minimum: f32, maximum: f32) -> Self {
        let defaults = Self::default();
        let mut model = defaults;
        let minimum = if minimum.is_finite() {
            minimum
        } else {
            defaults.minimum
        };
        let maximum = if maximum.is_finite() {
            maximum
        } else {
            defaults.maximum
        };
        model.set_range(minimum, maximum);
        model.set_value(value);
        model
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    #[inline]
    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    /// Width of the range (`maximum - minimum`), never negative.
    #[inline]
    pub fn span(&self) -> f32 {
        (self.maximum - self.minimum).max(0.0)
    }

    /// Whether the range has (effectively) zero width.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.span() <= RANGE_EPSILON
    }

    /// Clamp an arbitrary value into the current range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.minimum, self.maximum)
    }

    /// Store `clamp(value, minimum, maximum)`.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }
        let clamped = self.clamp(value);
        if clamped == self.value {
            return false;
        }
        self.value = clamped;
        true
    }

    /// Assign the minimum bound and re-clamp the value.
    ///
    /// Returns `true` if the stored value changed as a consequence.
    pub fn set_minimum(&mut self, minimum: f32) -> bool {
        if !minimum.is_finite() {
            return false;
        }
        self.minimum = minimum;
        if self.maximum < minimum {
            self.maximum = minimum;
        }
        self.reclamp()
    }

    /// Assign the maximum bound and re-clamp the value.
    ///
    /// Returns `true` if the stored value changed as a consequence.
    pub fn set_maximum(&mut self, maximum: f32) -> bool {
        if !maximum.is_finite() {
            return false;
        }
        self.maximum = maximum;
        if self.minimum > maximum {
            self.minimum = maximum;
        }
        self.reclamp()
    }

    /// Assign both bounds at once; swapped arguments are reordered.
    ///
    /// Returns `true` if the stored value changed as a consequence.
    pub fn set_range(&mut self, a: f32, b: f32) -> bool {
        if !a.is_finite() || !b.is_finite() {
            return false;
        }
        self.minimum = a.min(b);
        self.maximum = a.max(b);
        self.reclamp()
    }

    /// Position of the value inside the range, in `[0, 1]`.
    #[must_use]
    pub fn normalize(&self) -> f32 {
        self.normalize_value(self.value)
    }

    /// Position of an arbitrary value inside the range, in `[0, 1]`.
    #[must_use]
    pub fn normalize_value(&self, value: f32) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        ((value - self.minimum) / self.span()).clamp(0.0, 1.0)
    }

    /// Map a normalized position back into caller units.
    #[must_use]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        if normalized.is_nan() {
            return self.minimum;
        }
        let n = normalized.clamp(0.0, 1.0);
        self.clamp(self.minimum + n * self.span())
    }

    fn reclamp(&mut self) -> bool {
        let clamped = self.clamp(self.value);
        if clamped == self.value {
            return false;
        }
        self.value = clamped;
        true
    }
}
