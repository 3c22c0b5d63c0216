//! Dimension vocabulary for element width and height

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Token string for [`Dimension::MatchParent`]
pub const MATCH_PARENT: &str = "match-parent";
/// Token string for [`Dimension::MatchContent`]
pub const MATCH_CONTENT: &str = "match-content";

/// A declared width or height of an element.
///
/// The numeric literal `0` is context dependent: on a fully constrained
/// axis it means "stretch to fill the bounds minus margins", otherwise it
/// is an exact zero size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// An exact length in container units
    Px(f64),
    /// Fill the container's extent on this axis
    MatchParent,
    /// Match the natural content size reported by the measurer
    MatchContent,
}

/// An undeclared dimension behaves like the numeric literal `0`
impl Default for Dimension {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl Dimension {
    /// Shorthand for the context-dependent zero (stretch when fully
    /// constrained)
    pub fn zero() -> Self {
        Self::Px(0.0)
    }

    /// Parse a token string into a dimension. Numeric values are not
    /// accepted here; only the two defined tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            MATCH_PARENT => Some(Self::MatchParent),
            MATCH_CONTENT => Some(Self::MatchContent),
            _ => None,
        }
    }

    /// The numeric value, if this is an exact length
    pub fn as_px(&self) -> Option<f64> {
        match self {
            Self::Px(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(value) => write!(f, "{value}"),
            Self::MatchParent => f.write_str(MATCH_PARENT),
            Self::MatchContent => f.write_str(MATCH_CONTENT),
        }
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Self::Px(value)
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Px(value) => serializer.serialize_f64(*value),
            Self::MatchParent => serializer.serialize_str(MATCH_PARENT),
            Self::MatchContent => serializer.serialize_str(MATCH_CONTENT),
        }
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DimensionVisitor;

        impl Visitor<'_> for DimensionVisitor {
            type Value = Dimension;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a length or \"{MATCH_PARENT}\" / \"{MATCH_CONTENT}\"")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Dimension, E> {
                Ok(Dimension::Px(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Dimension, E> {
                Ok(Dimension::Px(value as f64))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Dimension, E> {
                Ok(Dimension::Px(value as f64))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Dimension, E> {
                Dimension::from_token(value).ok_or_else(|| {
                    E::invalid_value(de::Unexpected::Str(value), &self)
                })
            }
        }

        deserializer.deserialize_any(DimensionVisitor)
    }
}
