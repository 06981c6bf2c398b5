#![forbid(unsafe_code)]

//! Pointer input events.
//!
//! Positions are in the receiving control's local coordinate space.

use crate::geometry::Point;

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer pressed down.
    Press,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Release,
    /// The interaction was interrupted by the system (gesture stolen, focus
    /// lost, touch cancelled).
    Cancel,
}

/// A pointer event delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self { kind, position }
    }

    #[must_use]
    pub const fn press(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Press, Point::new(x, y))
    }

    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y))
    }

    #[must_use]
    pub const fn release(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Release, Point::new(x, y))
    }

    #[must_use]
    pub const fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y))
    }

    /// Whether this event ends an interaction.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            PointerEventKind::Release | PointerEventKind::Cancel
        )
    }
}
