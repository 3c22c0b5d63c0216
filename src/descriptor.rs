//! Caller-facing element and guide descriptors
//!
//! Descriptors are plain declarative data: the solver builds fresh
//! holders from them at the start of every solve, resolving each
//! breakpoint-qualified attribute against the current viewport width
//! first. Nothing in a descriptor is mutated by solving.

use serde::Deserialize;

use crate::constraint::{ConstraintKind, Target};
use crate::dimension::Dimension;
use crate::responsive::{Breakpoint, Responsive};

/// Declarative description of one positionable box
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ElementDescriptor {
    /// Unique id among all elements and guides in one container. When
    /// absent the solver assigns a deterministic `#anon-view-{n}` id,
    /// which cannot collide with user ids.
    pub id: Option<String>,

    pub width: Responsive<Dimension>,
    pub height: Responsive<Dimension>,

    pub margin_left: Responsive<f64>,
    pub margin_right: Responsive<f64>,
    pub margin_top: Responsive<f64>,
    pub margin_bottom: Responsive<f64>,

    pub left_to_left_of: Responsive<Target>,
    pub left_to_right_of: Responsive<Target>,
    pub right_to_right_of: Responsive<Target>,
    pub right_to_left_of: Responsive<Target>,
    pub top_to_top_of: Responsive<Target>,
    pub top_to_bottom_of: Responsive<Target>,
    pub bottom_to_bottom_of: Responsive<Target>,
    pub bottom_to_top_of: Responsive<Target>,

    /// Slack distribution on a fully constrained horizontal axis,
    /// clamped to [0, 1], default 0.5
    pub horizontal_bias: Responsive<f64>,
    /// Slack distribution on a fully constrained vertical axis
    pub vertical_bias: Responsive<f64>,
}

impl ElementDescriptor {
    /// An element with the given id and no other attributes
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// An element without an id; the solver generates one
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The responsive attribute slot for a constraint edge
    pub fn edge(&self, kind: ConstraintKind) -> &Responsive<Target> {
        match kind {
            ConstraintKind::LeftToLeftOf => &self.left_to_left_of,
            ConstraintKind::LeftToRightOf => &self.left_to_right_of,
            ConstraintKind::RightToRightOf => &self.right_to_right_of,
            ConstraintKind::RightToLeftOf => &self.right_to_left_of,
            ConstraintKind::TopToTopOf => &self.top_to_top_of,
            ConstraintKind::TopToBottomOf => &self.top_to_bottom_of,
            ConstraintKind::BottomToBottomOf => &self.bottom_to_bottom_of,
            ConstraintKind::BottomToTopOf => &self.bottom_to_top_of,
        }
    }

    fn edge_mut(&mut self, kind: ConstraintKind) -> &mut Responsive<Target> {
        match kind {
            ConstraintKind::LeftToLeftOf => &mut self.left_to_left_of,
            ConstraintKind::LeftToRightOf => &mut self.left_to_right_of,
            ConstraintKind::RightToRightOf => &mut self.right_to_right_of,
            ConstraintKind::RightToLeftOf => &mut self.right_to_left_of,
            ConstraintKind::TopToTopOf => &mut self.top_to_top_of,
            ConstraintKind::TopToBottomOf => &mut self.top_to_bottom_of,
            ConstraintKind::BottomToBottomOf => &mut self.bottom_to_bottom_of,
            ConstraintKind::BottomToTopOf => &mut self.bottom_to_top_of,
        }
    }

    /// Set the base width
    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.width.set(None, width.into());
        self
    }

    /// Set the width for one breakpoint
    pub fn width_at(mut self, breakpoint: Breakpoint, width: impl Into<Dimension>) -> Self {
        self.width.set(Some(breakpoint), width.into());
        self
    }

    /// Set the base height
    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.height.set(None, height.into());
        self
    }

    /// Set the height for one breakpoint
    pub fn height_at(mut self, breakpoint: Breakpoint, height: impl Into<Dimension>) -> Self {
        self.height.set(Some(breakpoint), height.into());
        self
    }

    /// Set a base constraint edge
    pub fn constrain(mut self, kind: ConstraintKind, target: impl Into<Target>) -> Self {
        self.edge_mut(kind).set(None, target.into());
        self
    }

    /// Set a constraint edge for one breakpoint
    pub fn constrain_at(
        mut self,
        breakpoint: Breakpoint,
        kind: ConstraintKind,
        target: impl Into<Target>,
    ) -> Self {
        self.edge_mut(kind).set(Some(breakpoint), target.into());
        self
    }

    /// Set all four base margins at once
    pub fn margins(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.margin_left.set(None, left);
        self.margin_top.set(None, top);
        self.margin_right.set(None, right);
        self.margin_bottom.set(None, bottom);
        self
    }

    /// Set the base horizontal bias
    pub fn horizontal_bias(mut self, bias: f64) -> Self {
        self.horizontal_bias.set(None, bias);
        self
    }

    /// Set the base vertical bias
    pub fn vertical_bias(mut self, bias: f64) -> Self {
        self.vertical_bias.set(None, bias);
        self
    }
}

/// Orientation of a guide line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Constrains an x coordinate
    Vertical,
    /// Constrains a y coordinate
    Horizontal,
}

/// Declarative description of one zero-thickness alignment line.
///
/// Exactly one of `begin`, `end` or `percent` must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct GuideDescriptor {
    /// Unique id among all elements and guides in one container
    #[serde(default)]
    pub id: Option<String>,
    pub orientation: Orientation,
    /// Offset from the container start; fixed once computed
    #[serde(default)]
    pub begin: Option<f64>,
    /// Offset from the container end; recomputed when the extent changes
    #[serde(default)]
    pub end: Option<f64>,
    /// Fraction of the container extent from start, in [0, 100];
    /// recomputed when the extent changes
    #[serde(default)]
    pub percent: Option<f64>,
}

impl GuideDescriptor {
    fn new(id: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            id: Some(id.into()),
            orientation,
            begin: None,
            end: None,
            percent: None,
        }
    }

    /// A guide at a fixed offset from the container start
    pub fn begin(id: impl Into<String>, orientation: Orientation, offset: f64) -> Self {
        Self {
            begin: Some(offset),
            ..Self::new(id, orientation)
        }
    }

    /// A guide at a fixed offset from the container end
    pub fn end(id: impl Into<String>, orientation: Orientation, offset: f64) -> Self {
        Self {
            end: Some(offset),
            ..Self::new(id, orientation)
        }
    }

    /// A guide at a percentage of the container extent
    pub fn percent(id: impl Into<String>, orientation: Orientation, percent: f64) -> Self {
        Self {
            percent: Some(percent),
            ..Self::new(id, orientation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_base_attributes() {
        let desc = ElementDescriptor::new("card")
            .width(Dimension::MatchParent)
            .height(120.0)
            .margins(8.0, 4.0, 8.0, 4.0)
            .horizontal_bias(0.25)
            .constrain(ConstraintKind::TopToTopOf, Target::Parent);

        assert_eq!(desc.id.as_deref(), Some("card"));
        assert_eq!(desc.width.resolve(320.0), Some(&Dimension::MatchParent));
        assert_eq!(desc.height.resolve(320.0), Some(&Dimension::Px(120.0)));
        assert_eq!(desc.margin_left.resolve(320.0), Some(&8.0));
        assert_eq!(desc.horizontal_bias.resolve(320.0), Some(&0.25));
        assert_eq!(
            desc.edge(ConstraintKind::TopToTopOf).resolve(320.0),
            Some(&Target::Parent)
        );
    }

    #[test]
    fn test_breakpoint_variants_win_on_wide_viewports() {
        let desc = ElementDescriptor::new("card")
            .width(Dimension::MatchParent)
            .width_at(Breakpoint::Md, 320.0)
            .constrain(ConstraintKind::LeftToLeftOf, Target::Parent)
            .constrain_at(Breakpoint::Lg, ConstraintKind::LeftToLeftOf, Target::id("rail"));

        assert_eq!(desc.width.resolve(500.0), Some(&Dimension::MatchParent));
        assert_eq!(desc.width.resolve(800.0), Some(&Dimension::Px(320.0)));
        assert_eq!(
            desc.edge(ConstraintKind::LeftToLeftOf).resolve(800.0),
            Some(&Target::Parent)
        );
        assert_eq!(
            desc.edge(ConstraintKind::LeftToLeftOf).resolve(1000.0),
            Some(&Target::id("rail"))
        );
    }

    #[test]
    fn test_guide_constructors() {
        let guide = GuideDescriptor::percent("mid", Orientation::Vertical, 50.0);
        assert_eq!(guide.percent, Some(50.0));
        assert_eq!(guide.begin, None);
        assert_eq!(guide.end, None);
    }

    #[test]
    fn test_element_deserialize() {
        let desc: ElementDescriptor = toml::from_str(
            r#"
            id = "body"
            width = 0
            height = "match-content"
            margin_top = 16
            left_to_left_of = "_parent"
            right_to_right_of = ["rail", "_parent"]
            "#,
        )
        .unwrap();

        assert_eq!(desc.id.as_deref(), Some("body"));
        assert_eq!(desc.width.resolve(320.0), Some(&Dimension::Px(0.0)));
        assert_eq!(
            desc.edge(ConstraintKind::LeftToLeftOf).resolve(320.0),
            Some(&Target::Parent)
        );
        assert_eq!(
            desc.edge(ConstraintKind::RightToRightOf).resolve(320.0),
            Some(&Target::first_of(["rail", "_parent"]))
        );
    }

    #[test]
    fn test_guide_deserialize() {
        let guide: GuideDescriptor =
            toml::from_str("id = \"mid\"\norientation = \"vertical\"\npercent = 50.0").unwrap();
        assert_eq!(guide.orientation, Orientation::Vertical);
        assert_eq!(guide.percent, Some(50.0));
    }
}
