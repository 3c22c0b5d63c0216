//! Constraint edges: the directional attachments between holders

use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Side};

/// Sentinel id accepted in serialized documents for [`Target::Parent`]
pub const PARENT: &str = "_parent";

/// The eight directional attachment kinds, four per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    LeftToLeftOf,
    LeftToRightOf,
    RightToRightOf,
    RightToLeftOf,
    TopToTopOf,
    TopToBottomOf,
    BottomToBottomOf,
    BottomToTopOf,
}

impl ConstraintKind {
    /// All kinds, in declaration order
    pub const ALL: [ConstraintKind; 8] = [
        Self::LeftToLeftOf,
        Self::LeftToRightOf,
        Self::RightToRightOf,
        Self::RightToLeftOf,
        Self::TopToTopOf,
        Self::TopToBottomOf,
        Self::BottomToBottomOf,
        Self::BottomToTopOf,
    ];

    /// The axis this edge constrains
    pub fn axis(&self) -> Axis {
        match self {
            Self::LeftToLeftOf | Self::LeftToRightOf | Self::RightToRightOf | Self::RightToLeftOf => {
                Axis::Horizontal
            }
            Self::TopToTopOf | Self::TopToBottomOf | Self::BottomToBottomOf | Self::BottomToTopOf => {
                Axis::Vertical
            }
        }
    }

    /// The side of the owning element this edge positions
    pub fn own_side(&self) -> Side {
        match self {
            Self::LeftToLeftOf | Self::LeftToRightOf | Self::TopToTopOf | Self::TopToBottomOf => {
                Side::Start
            }
            Self::RightToRightOf
            | Self::RightToLeftOf
            | Self::BottomToBottomOf
            | Self::BottomToTopOf => Side::End,
        }
    }

    /// The side of the target the edge aligns to
    pub fn target_side(&self) -> Side {
        match self {
            Self::LeftToLeftOf | Self::RightToLeftOf | Self::TopToTopOf | Self::BottomToTopOf => {
                Side::Start
            }
            Self::LeftToRightOf
            | Self::RightToRightOf
            | Self::TopToBottomOf
            | Self::BottomToBottomOf => Side::End,
        }
    }

    /// The attribute name as written in descriptors and documents
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::LeftToLeftOf => "left_to_left_of",
            Self::LeftToRightOf => "left_to_right_of",
            Self::RightToRightOf => "right_to_right_of",
            Self::RightToLeftOf => "right_to_left_of",
            Self::TopToTopOf => "top_to_top_of",
            Self::TopToBottomOf => "top_to_bottom_of",
            Self::BottomToBottomOf => "bottom_to_bottom_of",
            Self::BottomToTopOf => "bottom_to_top_of",
        }
    }

    /// The edge that attaches the same own side to the opposite target
    /// side. Declaring both members of a pair is a configuration error.
    pub fn conflicting(&self) -> ConstraintKind {
        match self {
            Self::LeftToLeftOf => Self::LeftToRightOf,
            Self::LeftToRightOf => Self::LeftToLeftOf,
            Self::RightToRightOf => Self::RightToLeftOf,
            Self::RightToLeftOf => Self::RightToRightOf,
            Self::TopToTopOf => Self::TopToBottomOf,
            Self::TopToBottomOf => Self::TopToTopOf,
            Self::BottomToBottomOf => Self::BottomToTopOf,
            Self::BottomToTopOf => Self::BottomToBottomOf,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// The target of a constraint edge: a single holder id, an ordered list of
/// candidate ids where the first one that resolves wins, or the containing
/// region itself. Ids that resolve to nothing fall back to the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(String),
    FirstOf(Vec<String>),
    Parent,
}

impl Target {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn first_of<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::FirstOf(ids.into_iter().map(Into::into).collect())
    }

    /// Whether any referenced id equals the given id
    pub fn references(&self, id: &str) -> bool {
        match self {
            Self::Id(target) => target == id,
            Self::FirstOf(targets) => targets.iter().any(|t| t == id),
            Self::Parent => false,
        }
    }

    /// The candidate ids, in resolution order
    pub fn candidate_ids(&self) -> &[String] {
        match self {
            Self::Id(id) => std::slice::from_ref(id),
            Self::FirstOf(ids) => ids.as_slice(),
            Self::Parent => &[],
        }
    }
}

impl From<&str> for Target {
    fn from(id: &str) -> Self {
        if id == PARENT {
            Self::Parent
        } else {
            Self::Id(id.to_string())
        }
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Id(id) => serializer.serialize_str(id),
            Self::FirstOf(ids) => ids.serialize(serializer),
            Self::Parent => serializer.serialize_str(PARENT),
        }
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TargetVisitor;

        impl<'de> Visitor<'de> for TargetVisitor {
            type Value = Target;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an id string or an array of id strings")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Target, E> {
                Ok(Target::from(value))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Target, A::Error> {
                let mut ids = Vec::new();
                while let Some(id) = seq.next_element::<String>()? {
                    ids.push(id);
                }
                Ok(Target::FirstOf(ids))
            }
        }

        deserializer.deserialize_any(TargetVisitor)
    }
}
