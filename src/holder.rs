//! Per-solve holder state for elements and guides
//!
//! Holders are built fresh from descriptors at the start of every solve,
//! after responsive attribute resolution, and discarded when the solve
//! completes. All validation happens here, before any geometry runs.

use std::collections::HashSet;

use crate::constraint::{ConstraintKind, Target};
use crate::descriptor::{ElementDescriptor, GuideDescriptor, Orientation};
use crate::dimension::Dimension;
use crate::error::LayoutError;
use crate::geometry::{Axis, Rect, Side};

/// Resolved margins, one per side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    /// The start-side margin on the given axis (left or top)
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// The end-side margin on the given axis (right or bottom)
    pub fn end(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }
}

/// One declared constraint edge after responsive resolution
#[derive(Debug, Clone)]
pub struct Edge {
    pub kind: ConstraintKind,
    pub target: Target,
}

/// Mutable solving state for one element.
///
/// `bounds` is the rectangle inherited via constraints before the
/// element's own size is applied; `position` is the final resolved
/// rectangle. After each axis is positioned, `bounds` collapses to equal
/// `position` on that axis so later-declared elements see a tight
/// rectangle.
#[derive(Debug, Clone)]
pub struct ElementHolder {
    pub id: String,
    pub width: Dimension,
    pub height: Dimension,
    pub margins: Margins,
    pub edges: Vec<Edge>,
    pub horizontal_bias: f64,
    pub vertical_bias: f64,
    pub bounds: Rect,
    pub position: Rect,
}

impl ElementHolder {
    /// Build and validate a holder from a descriptor, resolving every
    /// responsive attribute against the viewport width. `index` seeds the
    /// generated id for anonymous elements.
    pub fn from_descriptor(
        descriptor: &ElementDescriptor,
        viewport_width: f64,
        index: usize,
    ) -> Result<Self, LayoutError> {
        let id = descriptor
            .id
            .clone()
            .unwrap_or_else(|| format!("#anon-view-{index}"));

        let width = descriptor
            .width
            .resolve(viewport_width)
            .copied()
            .unwrap_or_default();
        let height = descriptor
            .height
            .resolve(viewport_width)
            .copied()
            .unwrap_or_default();

        if let Some(value) = width.as_px() {
            if value < 0.0 {
                return Err(LayoutError::invalid_dimension(id, "width", value));
            }
        }
        if let Some(value) = height.as_px() {
            if value < 0.0 {
                return Err(LayoutError::invalid_dimension(id, "height", value));
            }
        }

        let mut edges = Vec::new();
        for kind in ConstraintKind::ALL {
            let Some(target) = descriptor.edge(kind).resolve(viewport_width) else {
                continue;
            };
            if target.references(&id) {
                return Err(LayoutError::self_referential(id, kind.attribute()));
            }
            edges.push(Edge {
                kind,
                target: target.clone(),
            });
        }

        for edge in &edges {
            let other = edge.kind.conflicting();
            let both_set = edges.iter().any(|e| e.kind == other);
            if both_set && edge.kind.target_side() == Side::Start {
                return Err(LayoutError::conflicting(
                    id,
                    edge.kind.attribute(),
                    other.attribute(),
                ));
            }
        }

        let horizontal_bias = descriptor
            .horizontal_bias
            .resolve(viewport_width)
            .copied()
            .unwrap_or(0.5)
            .clamp(0.0, 1.0);
        let vertical_bias = descriptor
            .vertical_bias
            .resolve(viewport_width)
            .copied()
            .unwrap_or(0.5)
            .clamp(0.0, 1.0);

        let resolve_margin = |attr: &crate::responsive::Responsive<f64>| {
            attr.resolve(viewport_width).copied().unwrap_or(0.0)
        };

        Ok(Self {
            id,
            width,
            height,
            margins: Margins {
                left: resolve_margin(&descriptor.margin_left),
                right: resolve_margin(&descriptor.margin_right),
                top: resolve_margin(&descriptor.margin_top),
                bottom: resolve_margin(&descriptor.margin_bottom),
            },
            edges,
            horizontal_bias,
            vertical_bias,
            bounds: Rect::zero(),
            position: Rect::zero(),
        })
    }

    /// The declared dimension on the given axis
    pub fn dimension(&self, axis: Axis) -> Dimension {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// The bias on the given axis
    pub fn bias(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_bias,
            Axis::Vertical => self.vertical_bias,
        }
    }

    /// The edges constraining the given axis, in declaration order
    pub fn edges_for(&self, axis: Axis) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind.axis() == axis)
    }

    /// Whether at least one edge positions the given side of the axis
    pub fn is_constrained(&self, axis: Axis, side: Side) -> bool {
        self.edges
            .iter()
            .any(|e| e.kind.axis() == axis && e.kind.own_side() == side)
    }

    /// Whether both sides of the axis are constrained
    pub fn is_fully_constrained(&self, axis: Axis) -> bool {
        self.is_constrained(axis, Side::Start) && self.is_constrained(axis, Side::End)
    }
}

/// How a guide's coordinate is derived from the container extent
#[derive(Debug, Clone, Copy, PartialEq)]
enum GuideRule {
    Begin(f64),
    End(f64),
    Percent(f64),
}

/// Mutable solving state for one guide. The bounds on the relevant axis
/// are a degenerate point (start == end) usable as an attachment target.
#[derive(Debug, Clone)]
pub struct GuideHolder {
    pub id: String,
    pub orientation: Orientation,
    rule: GuideRule,
    pub bounds: Rect,
}

impl GuideHolder {
    /// Build and validate a holder from a guide descriptor
    pub fn from_descriptor(
        descriptor: &GuideDescriptor,
        index: usize,
    ) -> Result<Self, LayoutError> {
        let id = descriptor
            .id
            .clone()
            .unwrap_or_else(|| format!("#anon-guide-{index}"));

        let rule = match (descriptor.begin, descriptor.end, descriptor.percent) {
            (Some(begin), None, None) => GuideRule::Begin(begin),
            (None, Some(end), None) => GuideRule::End(end),
            (None, None, Some(percent)) => {
                if !(0.0..=100.0).contains(&percent) {
                    return Err(LayoutError::GuidePercentOutOfRange { id, percent });
                }
                GuideRule::Percent(percent)
            }
            _ => {
                return Err(LayoutError::invalid_guide(
                    id,
                    "requires exactly one of 'begin', 'end' or 'percent'",
                ));
            }
        };

        Ok(Self {
            id,
            orientation: descriptor.orientation,
            rule,
            bounds: Rect::zero(),
        })
    }

    /// The axis this guide constrains: a vertical line fixes an x
    /// coordinate, a horizontal line a y coordinate
    pub fn axis(&self) -> Axis {
        match self.orientation {
            Orientation::Vertical => Axis::Horizontal,
            Orientation::Horizontal => Axis::Vertical,
        }
    }

    /// Recompute the guide's coordinate from the container extent on its
    /// axis
    pub fn refresh(&mut self, extent: f64) {
        let coordinate = match self.rule {
            GuideRule::Begin(begin) => begin,
            GuideRule::End(end) => extent - end,
            GuideRule::Percent(percent) => 0.01 * percent * extent,
        };
        let axis = self.axis();
        self.bounds.set_axis(axis, coordinate, coordinate);
    }
}

/// Build all holders for one solve, enforcing id uniqueness across
/// elements and guides together
pub fn build_holders(
    elements: &[ElementDescriptor],
    guides: &[GuideDescriptor],
    viewport_width: f64,
) -> Result<(Vec<ElementHolder>, Vec<GuideHolder>), LayoutError> {
    let mut seen = HashSet::new();
    let mut element_holders = Vec::with_capacity(elements.len());
    let mut guide_holders = Vec::with_capacity(guides.len());

    for (index, descriptor) in elements.iter().enumerate() {
        let holder = ElementHolder::from_descriptor(descriptor, viewport_width, index)?;
        if !seen.insert(holder.id.clone()) {
            return Err(LayoutError::duplicate(holder.id));
        }
        element_holders.push(holder);
    }

    for (index, descriptor) in guides.iter().enumerate() {
        let holder = GuideHolder::from_descriptor(descriptor, index)?;
        if !seen.insert(holder.id.clone()) {
            return Err(LayoutError::duplicate(holder.id));
        }
        guide_holders.push(holder);
    }

    Ok((element_holders, guide_holders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    fn holder(descriptor: ElementDescriptor) -> ElementHolder {
        ElementHolder::from_descriptor(&descriptor, 320.0, 0).unwrap()
    }

    #[test]
    fn test_generated_ids_are_deterministic() {
        let a = holder(ElementDescriptor::anonymous());
        let b = ElementHolder::from_descriptor(&ElementDescriptor::anonymous(), 320.0, 1).unwrap();
        assert_eq!(a.id, "#anon-view-0");
        assert_eq!(b.id, "#anon-view-1");
    }

    #[test]
    fn test_constrained_flags() {
        let h = holder(
            ElementDescriptor::new("box")
                .constrain(ConstraintKind::LeftToLeftOf, Target::Parent)
                .constrain(ConstraintKind::RightToRightOf, Target::Parent)
                .constrain(ConstraintKind::TopToTopOf, Target::Parent),
        );

        assert!(h.is_fully_constrained(Axis::Horizontal));
        assert!(!h.is_fully_constrained(Axis::Vertical));
        assert!(h.is_constrained(Axis::Vertical, Side::Start));
        assert!(!h.is_constrained(Axis::Vertical, Side::End));
    }

    #[test]
    fn test_bias_is_clamped() {
        let h = holder(ElementDescriptor::new("box").horizontal_bias(1.5).vertical_bias(-0.2));
        assert_eq!(h.horizontal_bias, 1.0);
        assert_eq!(h.vertical_bias, 0.0);
    }

    #[test]
    fn test_negative_width_rejected() {
        let err = ElementHolder::from_descriptor(
            &ElementDescriptor::new("box").width(-4.0),
            320.0,
            0,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidDimensionValue { attribute: "width", .. }
        ));
    }

    #[test]
    fn test_self_reference_rejected() {
        let err = ElementHolder::from_descriptor(
            &ElementDescriptor::new("box").constrain(ConstraintKind::LeftToLeftOf, "box"),
            320.0,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::SelfReferentialConstraint { .. }));
    }

    #[test]
    fn test_self_reference_inside_fallback_list_rejected() {
        let err = ElementHolder::from_descriptor(
            &ElementDescriptor::new("box")
                .constrain(ConstraintKind::TopToTopOf, Target::first_of(["other", "box"])),
            320.0,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::SelfReferentialConstraint { .. }));
    }

    #[test]
    fn test_conflicting_pair_rejected() {
        let err = ElementHolder::from_descriptor(
            &ElementDescriptor::new("box")
                .constrain(ConstraintKind::TopToTopOf, Target::Parent)
                .constrain(ConstraintKind::TopToBottomOf, "other"),
            320.0,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::ConflictingConstraintPair { .. }));
    }

    #[test]
    fn test_guide_requires_exactly_one_rule() {
        let mut guide = GuideDescriptor::begin("g", Orientation::Vertical, 10.0);
        guide.percent = Some(50.0);
        let err = GuideHolder::from_descriptor(&guide, 0).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGuideSpec { .. }));

        let empty = GuideDescriptor {
            id: Some("g".to_string()),
            orientation: Orientation::Vertical,
            begin: None,
            end: None,
            percent: None,
        };
        assert!(GuideHolder::from_descriptor(&empty, 0).is_err());
    }

    #[test]
    fn test_guide_percent_range() {
        let guide = GuideDescriptor::percent("g", Orientation::Horizontal, 120.0);
        let err = GuideHolder::from_descriptor(&guide, 0).unwrap_err();
        assert!(matches!(err, LayoutError::GuidePercentOutOfRange { .. }));
    }

    #[test]
    fn test_guide_refresh() {
        let mut guide =
            GuideHolder::from_descriptor(&GuideDescriptor::end("g", Orientation::Vertical, 20.0), 0)
                .unwrap();
        guide.refresh(300.0);
        assert_eq!(guide.bounds.x1, 280.0);
        assert_eq!(guide.bounds.x2, 280.0);
        assert_eq!(guide.bounds.y1, 0.0);

        let mut pct = GuideHolder::from_descriptor(
            &GuideDescriptor::percent("p", Orientation::Horizontal, 25.0),
            1,
        )
        .unwrap();
        pct.refresh(400.0);
        assert_eq!(pct.bounds.y1, 100.0);
        assert_eq!(pct.bounds.y2, 100.0);
    }

    #[test]
    fn test_duplicate_id_across_elements_and_guides() {
        let elements = vec![ElementDescriptor::new("mid")];
        let guides = vec![GuideDescriptor::begin("mid", Orientation::Vertical, 10.0)];
        let err = build_holders(&elements, &guides, 320.0).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateId { .. }));
    }
}
