#![forbid(unsafe_code)]

//! The slider control and its persistence contract.
//!
//! - [`slider`]: geometry, interaction state machine, attributes, and the
//!   [`Slider`](slider::Slider) itself.
//! - [`stateful`]: the [`Stateful`](stateful::Stateful) save/restore contract
//!   consumed by the runtime's state registry.

pub mod slider;
pub mod stateful;

pub use slider::{Slider, SliderConfig, SliderEvent, SliderRenderModel};
pub use stateful::{StateKey, Stateful, VersionedState};
