#![forbid(unsafe_code)]

//! Colors, control states, and per-state visual resources for SliderKit.

pub mod color;
pub mod resources;

pub use color::{Color, Palette, ParseColorError};
pub use resources::{
    ControlState, ImageHandle, ResourceRole, ResourceSource, ResourceState, Resolved,
    VisualResourceSet,
};
