#![forbid(unsafe_code)]

//! SliderKit public facade crate.
//!
//! Re-exports the slider, its supporting types, and (with the default
//! `runtime` feature) the frame driver and state registry, plus a prelude
//! for day-to-day use.
//!
//! ```
//! use slidekit::prelude::*;
//!
//! let mut slider = Slider::new()
//!     .with_bounds(Rect::new(0.0, 0.0, 300.0, 40.0))
//!     .with_range(0.0, 100.0);
//! slider.set_attribute("value", 40.0_f32).unwrap();
//! assert_eq!(slider.value(), 40.0);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use slidekit_core::animation::{Tick, ValueAnimation};
pub use slidekit_core::clock::{ManualClock, SystemClock, TimeSource};
pub use slidekit_core::event::{PointerEvent, PointerEventKind};
pub use slidekit_core::geometry::{Axis, Point, Rect};
pub use slidekit_core::value::ValueModel;

// --- Style re-exports ------------------------------------------------------

pub use slidekit_style::{
    Color, ControlState, ImageHandle, Palette, ResourceRole, ResourceState, Resolved,
    VisualResourceSet,
};

// --- Widget re-exports -----------------------------------------------------

pub use slidekit_widgets::slider::geometry::{LayoutParameters, TrackSegments};
pub use slidekit_widgets::slider::{
    AttributeValue, DecodeError, InteractionState, Slider, SliderAttribute, SliderConfig,
    SliderEvent, SliderPersist, SliderRenderModel,
};
pub use slidekit_widgets::stateful::{StateKey, Stateful, VersionedState};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use slidekit_runtime::{FrameDriver, MemoryStorage, StateRegistry, StorageError};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for SliderKit hosts.
#[derive(Debug)]
pub enum Error {
    /// An attribute name or value was rejected.
    Attribute(DecodeError),
    /// Widget state could not be stored or loaded.
    #[cfg(feature = "runtime")]
    Storage(StorageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Attribute(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Attribute(err)
    }
}

#[cfg(feature = "runtime")]
impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

/// Standard result type for SliderKit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Color, Error, InteractionState, LayoutParameters, Point, PointerEvent, Rect, Result,
        Slider, SliderConfig, SliderEvent, Stateful, Tick,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{FrameDriver, StateRegistry};

    pub use crate::{core, style, widgets};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use slidekit_core as core;
#[cfg(feature = "runtime")]
pub use slidekit_runtime as runtime;
pub use slidekit_style as style;
pub use slidekit_widgets as widgets;
