#![forbid(unsafe_code)]

//! Core: value model, geometry primitives, pointer events, clocks, and
//! fixed-velocity animation.

pub mod animation;
pub mod clock;
pub mod event;
pub mod geometry;
pub mod value;
