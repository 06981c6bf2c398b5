#![forbid(unsafe_code)]

//! Declarative attributes and the persisted slider snapshot.
//!
//! Every configurable property is listed once in a field table. Each entry
//! names the attribute, the schema version that introduced it, and a pair of
//! encode/decode functions between [`SliderPersist`] and a loosely typed
//! [`AttributeValue`]. The table drives:
//!
//! - the JSON form of [`SliderPersist`] (an object keyed by attribute name),
//! - [`Slider::attribute`](super::Slider::attribute) reads.
//!
//! Transient state (drag and animation sessions) and images are never part of
//! the snapshot.
//!
//! # Failure Modes
//!
//! | Failure | Behaviour |
//! |---------|-----------|
//! | Unknown key | Ignored |
//! | Wrong JSON type for a field | Field keeps its default, logged at `warn` |
//! | Field newer than the stored version | Field keeps its default |
//! | Stored version newer than this build | [`DecodeError::UnsupportedVersion`] |

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use slidekit_style::Color;
use tracing::{trace, warn};

/// Current snapshot schema version.
pub const STATE_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Attribute names
// ---------------------------------------------------------------------------

/// A declaratively settable slider property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderAttribute {
    Value,
    MinimumValue,
    MaximumValue,
    Continues,
    LeftTrackTint,
    RightTrackTint,
    ThumbTint,
    TrackHeight,
    ThumbRadius,
    Horizontal,
    Shadow,
}

impl SliderAttribute {
    pub const ALL: [Self; 11] = [
        Self::Value,
        Self::MinimumValue,
        Self::MaximumValue,
        Self::Continues,
        Self::LeftTrackTint,
        Self::RightTrackTint,
        Self::ThumbTint,
        Self::TrackHeight,
        Self::ThumbRadius,
        Self::Horizontal,
        Self::Shadow,
    ];

    /// Key used in attribute maps and JSON.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::MinimumValue => "minimum_value",
            Self::MaximumValue => "maximum_value",
            Self::Continues => "continues",
            Self::LeftTrackTint => "left_track_tint",
            Self::RightTrackTint => "right_track_tint",
            Self::ThumbTint => "thumb_tint",
            Self::TrackHeight => "track_height",
            Self::ThumbRadius => "thumb_radius",
            Self::Horizontal => "horizontal",
            Self::Shadow => "shadow",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }
}

impl fmt::Display for SliderAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SliderAttribute {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DecodeError::UnknownAttribute(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Loosely typed attribute value.
///
/// `Text` is accepted wherever a number, flag or color is expected and parsed
/// on demand; colors use `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f32),
    Bool(bool),
    /// `None` clears an optional color.
    Color(Option<Color>),
    Text(String),
    /// A decoded array or object. Matches no attribute.
    Unsupported,
}

impl AttributeValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// `Some(None)` means "clear the color".
    #[must_use]
    pub fn as_color(&self) -> Option<Option<Color>> {
        match self {
            Self::Color(color) => Some(*color),
            Self::Text(s) if s.trim().is_empty() => Some(None),
            Self::Text(s) => s.parse().ok().map(Some),
            _ => None,
        }
    }

    pub(crate) fn number_for(&self, attribute: SliderAttribute) -> Result<f32, DecodeError> {
        self.as_number()
            .ok_or(DecodeError::TypeMismatch { attribute, expected: "number" })
    }

    pub(crate) fn bool_for(&self, attribute: SliderAttribute) -> Result<bool, DecodeError> {
        self.as_bool()
            .ok_or(DecodeError::TypeMismatch { attribute, expected: "bool" })
    }

    pub(crate) fn color_for(
        &self,
        attribute: SliderAttribute,
    ) -> Result<Option<Color>, DecodeError> {
        self.as_color()
            .ok_or(DecodeError::TypeMismatch { attribute, expected: "color" })
    }
}

impl From<f32> for AttributeValue {
    fn from(n: f32) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Color> for AttributeValue {
    fn from(c: Color) -> Self {
        Self::Color(Some(c))
    }
}

impl From<Option<Color>> for AttributeValue {
    fn from(c: Option<Color>) -> Self {
        Self::Color(c)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_f32(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Color(Some(c)) => serializer.serialize_str(&c.to_hex()),
            Self::Color(None) => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Unsupported => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(AttributeValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Number(v as f32))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Number(v as f32))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Number(v as f32))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AttributeValue::Text(v.to_owned()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AttributeValue::Color(None))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AttributeValue::Color(None))
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(AttributeValue::Unsupported)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(AttributeValue::Unsupported)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Attribute or snapshot decoding failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// No attribute with this name exists.
    UnknownAttribute(String),
    /// The value could not be coerced to the attribute's type.
    TypeMismatch {
        attribute: SliderAttribute,
        expected: &'static str,
    },
    /// The snapshot was written by a newer schema.
    UnsupportedVersion(u32),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAttribute(name) => write!(f, "unknown slider attribute: {name}"),
            Self::TypeMismatch { attribute, expected } => {
                write!(f, "attribute {attribute} expects a {expected}")
            }
            Self::UnsupportedVersion(v) => write!(
                f,
                "slider state version {v} is newer than supported version {STATE_VERSION}"
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Persisted slider configuration.
///
/// Plain data: values are clamped when the snapshot is applied to a slider,
/// not when it is decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderPersist {
    pub value: f32,
    pub minimum_value: f32,
    pub maximum_value: f32,
    pub continues: bool,
    pub left_track_tint: Option<Color>,
    pub right_track_tint: Option<Color>,
    pub thumb_tint: Option<Color>,
    pub track_height: f32,
    pub thumb_radius: f32,
    pub horizontal: bool,
    pub shadow: bool,
}

impl Default for SliderPersist {
    fn default() -> Self {
        Self {
            value: 0.0,
            minimum_value: 0.0,
            maximum_value: 1.0,
            continues: true,
            left_track_tint: None,
            right_track_tint: None,
            thumb_tint: None,
            track_height: 2.0,
            thumb_radius: 28.0,
            horizontal: true,
            shadow: true,
        }
    }
}

struct FieldCodec {
    attribute: SliderAttribute,
    since: u32,
    encode: fn(&SliderPersist) -> AttributeValue,
    decode: fn(&mut SliderPersist, &AttributeValue) -> Result<(), DecodeError>,
}

macro_rules! field {
    ($attr:ident, $field:ident, $coerce:ident) => {
        FieldCodec {
            attribute: SliderAttribute::$attr,
            since: 1,
            encode: |state| AttributeValue::from(state.$field),
            decode: |state, value| {
                state.$field = value.$coerce(SliderAttribute::$attr)?;
                Ok(())
            },
        }
    };
}

// Bounds precede the value so the value is clamped against restored bounds.
const FIELDS: &[FieldCodec] = &[
    field!(MinimumValue, minimum_value, number_for),
    field!(MaximumValue, maximum_value, number_for),
    field!(Value, value, number_for),
    field!(Continues, continues, bool_for),
    field!(LeftTrackTint, left_track_tint, color_for),
    field!(RightTrackTint, right_track_tint, color_for),
    field!(ThumbTint, thumb_tint, color_for),
    field!(TrackHeight, track_height, number_for),
    field!(ThumbRadius, thumb_radius, number_for),
    field!(Horizontal, horizontal, bool_for),
    field!(Shadow, shadow, bool_for),
];

fn codec(attribute: SliderAttribute) -> Option<&'static FieldCodec> {
    FIELDS.iter().find(|field| field.attribute == attribute)
}

impl SliderPersist {
    /// Read one attribute.
    #[must_use]
    pub fn get(&self, attribute: SliderAttribute) -> Option<AttributeValue> {
        codec(attribute).map(|field| (field.encode)(self))
    }

    /// Overwrite one attribute, coercing loosely typed input.
    pub fn set(
        &mut self,
        attribute: SliderAttribute,
        value: &AttributeValue,
    ) -> Result<(), DecodeError> {
        match codec(attribute) {
            Some(field) => (field.decode)(self, value),
            None => Err(DecodeError::UnknownAttribute(attribute.name().to_owned())),
        }
    }

    /// Every attribute, keyed by name, in field-table order.
    #[must_use]
    pub fn to_attributes(&self) -> Vec<(&'static str, AttributeValue)> {
        FIELDS
            .iter()
            .map(|field| (field.attribute.name(), (field.encode)(self)))
            .collect()
    }

    /// Build a snapshot from an attribute map written by schema `version`.
    ///
    /// Fields introduced after `version` and fields of the wrong type keep
    /// their defaults.
    pub fn from_attributes(
        attributes: &BTreeMap<String, AttributeValue>,
        version: u32,
    ) -> Result<Self, DecodeError> {
        if version > STATE_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        let mut state = Self::default();
        for field in FIELDS.iter().filter(|field| field.since <= version) {
            let Some(value) = attributes.get(field.attribute.name()) else {
                continue;
            };
            if let Err(err) = (field.decode)(&mut state, value) {
                warn!(
                    attribute = field.attribute.name(),
                    error = %err,
                    "ignoring stored attribute"
                );
            }
        }
        for key in attributes.keys().filter(|key| SliderAttribute::from_name(key).is_none()) {
            trace!(key = %key, "ignoring unknown stored attribute");
        }
        Ok(state)
    }
}

impl Serialize for SliderPersist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELDS.len()))?;
        for field in FIELDS {
            map.serialize_entry(field.attribute.name(), &(field.encode)(self))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SliderPersist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let attributes = BTreeMap::<String, AttributeValue>::deserialize(deserializer)?;
        Self::from_attributes(&attributes, STATE_VERSION).map_err(de::Error::custom)
    }
}
