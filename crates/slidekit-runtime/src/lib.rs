#![forbid(unsafe_code)]

//! Runtime support for SliderKit widgets.
//!
//! - [`frame_driver`]: paces [`Tick`](slidekit_core::animation::Tick) calls
//!   for animating widgets.
//! - [`state_persistence`]: a registry that saves and restores
//!   [`Stateful`](slidekit_widgets::stateful::Stateful) widgets through
//!   memory or file storage.

pub mod frame_driver;
pub mod state_persistence;

pub use frame_driver::FrameDriver;
#[cfg(feature = "state-persistence")]
pub use state_persistence::FileStorage;
pub use state_persistence::{
    MemoryStorage, StateRegistry, StorageBackend, StorageError, StorageResult, StoredEntry,
};
