//! Per-state visual resources.
//!
//! A [`VisualResourceSet`] holds an optional image for each
//! [`ResourceRole`] × [`ResourceState`] slot plus an optional tint per role.
//! Resolution walks an explicit fallback list:
//!
//! 1. the highlighted image, when highlighted;
//! 2. the normal image;
//! 3. the role's tint;
//! 4. the palette default for the role.
//!
//! Every role therefore always resolves to something drawable.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::color::{Color, Palette};

bitflags! {
    /// Control state bits as delivered by a host toolkit.
    ///
    /// Only [`NORMAL`](Self::NORMAL) and [`HIGHLIGHTED`](Self::HIGHLIGHTED)
    /// select distinct resources; see [`ResourceState::from_control_state`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ControlState: u8 {
        const NORMAL      = 0;
        const HIGHLIGHTED = 1 << 0;
        const DISABLED    = 1 << 1;
        const SELECTED    = 1 << 2;
        const FOCUSED     = 1 << 3;
    }
}

/// Which resource slot of a role is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceState {
    #[default]
    Normal = 0,
    Highlighted = 1,
}

impl ResourceState {
    pub const ALL: [ResourceState; 2] = [ResourceState::Normal, ResourceState::Highlighted];

    /// Normalize a host control state to a supported slot.
    ///
    /// Any state containing `HIGHLIGHTED` maps to [`ResourceState::Highlighted`];
    /// every other combination (disabled, selected, focused, ...) maps to
    /// [`ResourceState::Normal`].
    #[must_use]
    pub fn from_control_state(state: ControlState) -> Self {
        if state.contains(ControlState::HIGHLIGHTED) {
            Self::Highlighted
        } else {
            Self::Normal
        }
    }

    /// Slot for the current highlight flag.
    #[must_use]
    pub const fn from_highlighted(highlighted: bool) -> Self {
        if highlighted {
            Self::Highlighted
        } else {
            Self::Normal
        }
    }
}

impl From<ControlState> for ResourceState {
    fn from(state: ControlState) -> Self {
        Self::from_control_state(state)
    }
}

/// The three themable parts of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceRole {
    Thumb = 0,
    /// Track segment between the minimum end and the thumb.
    LeftTrack = 1,
    /// Track segment between the thumb and the maximum end.
    RightTrack = 2,
}

impl ResourceRole {
    pub const ALL: [ResourceRole; 3] = [
        ResourceRole::Thumb,
        ResourceRole::LeftTrack,
        ResourceRole::RightTrack,
    ];

    fn palette_color(self, palette: &Palette) -> Color {
        match self {
            Self::Thumb => palette.thumb,
            Self::LeftTrack => palette.left_track,
            Self::RightTrack => palette.right_track,
        }
    }
}

/// A host-owned image, referenced by name.
///
/// The control never decodes images; it only stores and hands back handles.
/// Cloning is cheap.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    name: Arc<str>,
    width: u32,
    height: u32,
}

impl ImageHandle {
    /// Create a handle for an image of the given pixel size.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageHandle({:?} {}x{})", self.name, self.width, self.height)
    }
}

/// Where a resolved resource came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceSource {
    HighlightedImage,
    NormalImage,
    Tint,
    PaletteDefault,
}

/// What to draw for a role.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    Image(&'a ImageHandle),
    Tint(Color),
}

impl<'a> Resolved<'a> {
    #[must_use]
    pub fn image(&self) -> Option<&'a ImageHandle> {
        match self {
            Self::Image(image) => Some(*image),
            Self::Tint(_) => None,
        }
    }

    #[must_use]
    pub fn tint(&self) -> Option<Color> {
        match self {
            Self::Image(_) => None,
            Self::Tint(color) => Some(*color),
        }
    }
}

/// Fixed table of images and tints for a slider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualResourceSet {
    images: [[Option<ImageHandle>; 2]; 3],
    tints: [Option<Color>; 3],
    palette: Palette,
}

impl VisualResourceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different default palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Store (or clear) the image for a role and host control state.
    ///
    /// Returns `true` if the slot changed.
    pub fn set_image(
        &mut self,
        role: ResourceRole,
        state: ControlState,
        image: Option<ImageHandle>,
    ) -> bool {
        let slot = &mut self.images[role as usize][ResourceState::from(state) as usize];
        if *slot == image {
            return false;
        }
        *slot = image;
        true
    }

    /// The image stored in an exact slot, without fallback.
    #[must_use]
    pub fn image(&self, role: ResourceRole, state: ResourceState) -> Option<&ImageHandle> {
        self.images[role as usize][state as usize].as_ref()
    }

    /// Store (or clear) the tint for a role. Returns `true` if it changed.
    pub fn set_tint(&mut self, role: ResourceRole, tint: Option<Color>) -> bool {
        let slot = &mut self.tints[role as usize];
        if *slot == tint {
            return false;
        }
        *slot = tint;
        true
    }

    /// The explicitly configured tint for a role.
    #[must_use]
    pub fn tint(&self, role: ResourceRole) -> Option<Color> {
        self.tints[role as usize]
    }

    /// The image that applies for the highlight flag, if any.
    #[must_use]
    pub fn current_image(&self, role: ResourceRole, highlighted: bool) -> Option<&ImageHandle> {
        self.resolve_with_source(role, highlighted).0.image()
    }

    /// Resolve what to draw for a role.
    #[must_use]
    pub fn resolve(&self, role: ResourceRole, highlighted: bool) -> Resolved<'_> {
        self.resolve_with_source(role, highlighted).0
    }

    /// Resolve what to draw for a role and report which fallback step matched.
    #[must_use]
    pub fn resolve_with_source(
        &self,
        role: ResourceRole,
        highlighted: bool,
    ) -> (Resolved<'_>, ResourceSource) {
        let images = &self.images[role as usize];
        if highlighted
            && let Some(image) = &images[ResourceState::Highlighted as usize]
        {
            return (Resolved::Image(image), ResourceSource::HighlightedImage);
        }
        if let Some(image) = &images[ResourceState::Normal as usize] {
            return (Resolved::Image(image), ResourceSource::NormalImage);
        }
        match self.tints[role as usize] {
            Some(color) => (Resolved::Tint(color), ResourceSource::Tint),
            None => (
                Resolved::Tint(role.palette_color(&self.palette)),
                ResourceSource::PaletteDefault,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(name: &str) -> ImageHandle {
        ImageHandle::new(name, 16, 16)
    }

    #[test]
    fn unsupported_states_normalize() {
        assert_eq!(
            ResourceState::from_control_state(ControlState::NORMAL),
            ResourceState::Normal
        );
        assert_eq!(
            ResourceState::from_control_state(ControlState::HIGHLIGHTED | ControlState::FOCUSED),
            ResourceState::Highlighted
        );
        assert_eq!(
            ResourceState::from_control_state(ControlState::DISABLED),
            ResourceState::Normal
        );
        assert_eq!(
            ResourceState::from_control_state(ControlState::from_bits_retain(0xF0)),
            ResourceState::Normal
        );
    }

    #[test]
    fn empty_set_resolves_to_palette() {
        let set = VisualResourceSet::new();
        for role in ResourceRole::ALL {
            let (resolved, source) = set.resolve_with_source(role, true);
            assert_eq!(source, ResourceSource::PaletteDefault);
            assert!(resolved.tint().is_some());
            assert!(set.current_image(role, false).is_none());
        }
        assert_eq!(
            set.resolve(ResourceRole::Thumb, false),
            Resolved::Tint(Color::WHITE)
        );
    }

    #[test]
    fn tint_overrides_palette() {
        let mut set = VisualResourceSet::new();
        let red = Color::rgb(255, 0, 0);
        assert!(set.set_tint(ResourceRole::LeftTrack, Some(red)));
        assert!(!set.set_tint(ResourceRole::LeftTrack, Some(red)));
        assert_eq!(
            set.resolve_with_source(ResourceRole::LeftTrack, false),
            (Resolved::Tint(red), ResourceSource::Tint)
        );
    }

    #[test]
    fn highlighted_image_wins_only_when_highlighted() {
        let mut set = VisualResourceSet::new();
        set.set_image(ResourceRole::Thumb, ControlState::NORMAL, Some(img("n")));
        set.set_image(ResourceRole::Thumb, ControlState::HIGHLIGHTED, Some(img("h")));

        let (normal, source) = set.resolve_with_source(ResourceRole::Thumb, false);
        assert_eq!(normal.image().map(ImageHandle::name), Some("n"));
        assert_eq!(source, ResourceSource::NormalImage);

        let (high, source) = set.resolve_with_source(ResourceRole::Thumb, true);
        assert_eq!(high.image().map(ImageHandle::name), Some("h"));
        assert_eq!(source, ResourceSource::HighlightedImage);
    }

    #[test]
    fn highlighted_falls_back_to_normal_image() {
        let mut set = VisualResourceSet::new();
        set.set_image(ResourceRole::RightTrack, ControlState::NORMAL, Some(img("n")));
        assert_eq!(
            set.current_image(ResourceRole::RightTrack, true)
                .map(ImageHandle::name),
            Some("n")
        );
    }

    #[test]
    fn highlighted_only_image_falls_back_to_tint_when_not_highlighted() {
        let mut set = VisualResourceSet::new();
        set.set_image(ResourceRole::LeftTrack, ControlState::HIGHLIGHTED, Some(img("h")));
        let (_, source) = set.resolve_with_source(ResourceRole::LeftTrack, false);
        assert_eq!(source, ResourceSource::PaletteDefault);
    }

    #[test]
    fn clearing_an_image_restores_fallback() {
        let mut set = VisualResourceSet::new();
        assert!(set.set_image(ResourceRole::Thumb, ControlState::NORMAL, Some(img("n"))));
        assert!(!set.set_image(ResourceRole::Thumb, ControlState::NORMAL, Some(img("n"))));
        assert!(set.set_image(ResourceRole::Thumb, ControlState::NORMAL, None));
        assert!(set.current_image(ResourceRole::Thumb, false).is_none());
    }

    #[test]
    fn disabled_state_writes_normal_slot() {
        let mut set = VisualResourceSet::new();
        set.set_image(ResourceRole::Thumb, ControlState::DISABLED, Some(img("d")));
        assert_eq!(
            set.image(ResourceRole::Thumb, ResourceState::Normal)
                .map(ImageHandle::name),
            Some("d")
        );
        assert!(set.image(ResourceRole::Thumb, ResourceState::Highlighted).is_none());
    }

    #[test]
    fn image_handle_accessors() {
        let h = ImageHandle::new("knob", 56, 56);
        assert_eq!(h.name(), "knob");
        assert_eq!(h.size(), (56, 56));
        assert!(format!("{h:?}").contains("knob"));
    }
}
