#![forbid(unsafe_code)]

//! Opt-in trait for widgets with persistable state.
//!
//! A widget implementing [`Stateful`] can hand out a plain snapshot of its
//! user-facing configuration and later accept one back. Storage lives in the
//! runtime crate; this module only defines the contract.
//!
//! # Invariants
//!
//! 1. `restore_state(save_state())` yields an equivalent observable
//!    configuration. Transient interaction state is not part of the snapshot.
//! 2. Two distinct widget instances produce distinct [`StateKey`]s.
//! 3. `save_state` is a pure read; `restore_state` only mutates `self`.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Version mismatch | Schema bumped | Caller keeps the widget's current state |
//! | Corrupt payload | Truncated or foreign data | Caller keeps the widget's current state |
//! | Out-of-range field | Hand-edited data | Clamped by the widget's own setters |

use core::fmt;

/// Identifier for a widget's persisted state: `(widget_type, instance_id)`.
///
/// ```
/// # use slidekit_widgets::stateful::StateKey;
/// let key = StateKey::new("Slider", "volume");
/// assert_eq!(key.canonical(), "Slider::volume");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StateKey {
    /// Widget type name, e.g. `"Slider"`.
    pub widget_type: &'static str,
    /// Instance-unique identifier.
    pub instance_id: String,
}

impl StateKey {
    #[must_use]
    pub fn new(widget_type: &'static str, id: impl Into<String>) -> Self {
        Self {
            widget_type,
            instance_id: id.into(),
        }
    }

    /// Canonical string form: `"widget_type::instance_id"`.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.widget_type, self.instance_id)
    }
}

/// Persistence contract.
pub trait Stateful: Sized {
    /// Snapshot type. `Default` is the state of a freshly constructed widget.
    type State: Default;

    /// Unique key identifying this widget instance.
    fn state_key(&self) -> StateKey;

    /// Extract the current snapshot. Must not have side effects.
    fn save_state(&self) -> Self::State;

    /// Apply a snapshot, clamping anything out of range.
    fn restore_state(&mut self, state: Self::State);

    /// Schema version of [`Self::State`]. Bump when the encoded form changes
    /// incompatibly.
    fn state_version() -> u32 {
        1
    }
}

/// Version-tagged snapshot envelope.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VersionedState<S> {
    /// Schema version from [`Stateful::state_version`].
    pub version: u32,
    /// The snapshot.
    pub data: S,
}

impl<S> VersionedState<S> {
    #[must_use]
    pub fn new(version: u32, data: S) -> Self {
        Self { version, data }
    }

    /// Pack a widget's snapshot with its current version.
    pub fn pack<W: Stateful<State = S>>(widget: &W) -> Self {
        Self {
            version: W::state_version(),
            data: widget.save_state(),
        }
    }

    /// Unpack if the version matches the widget's current schema.
    pub fn unpack<W: Stateful<State = S>>(self) -> Option<S> {
        (self.version == W::state_version()).then_some(self.data)
    }
}
