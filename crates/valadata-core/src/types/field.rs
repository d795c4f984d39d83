//! Canonical field names and the three-state per-source field value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical venue fact names.
///
/// `LiveMusic` and `GoodForGroups` are venue attributes rather than service
/// options, but they are resolved across sources the same way and feed the
/// energy flags component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceField {
    Takeout,
    Delivery,
    DineIn,
    Reservable,
    CurbsidePickup,
    LiveMusic,
    GoodForGroups,
}

impl ServiceField {
    pub const ALL: [ServiceField; 7] = [
        Self::Takeout,
        Self::Delivery,
        Self::DineIn,
        Self::Reservable,
        Self::CurbsidePickup,
        Self::LiveMusic,
        Self::GoodForGroups,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Takeout => "takeout",
            Self::Delivery => "delivery",
            Self::DineIn => "dine_in",
            Self::Reservable => "reservable",
            Self::CurbsidePickup => "curbside_pickup",
            Self::LiveMusic => "live_music",
            Self::GoodForGroups => "good_for_groups",
        }
    }
}

impl fmt::Display for ServiceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServiceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown service field: {s}"))
    }
}

/// What one source says about one field.
///
/// `Absent` means the source never mentioned the field. It is distinct from
/// `ExplicitUnknown` (the source said "don't know") and is never written
/// out: bags drop absent keys instead of storing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldValue {
    Present(bool),
    ExplicitUnknown,
    #[default]
    Absent,
}

impl FieldValue {
    pub fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }

    /// A source holding a boolean for this field.
    pub fn is_informative(self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Present(b) => Some(b),
            Self::ExplicitUnknown | Self::Absent => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Present(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(b) => serializer.serialize_bool(*b),
            // Bags never hold Absent; a bare value serializes like unknown.
            Self::ExplicitUnknown | Self::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            Some(b) => Self::Present(b),
            None => Self::ExplicitUnknown,
        })
    }
}
