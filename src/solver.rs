//! The layout solver: constraint resolution, measurement and positioning
//!
//! One solve builds fresh holders from the descriptors, resolves guides,
//! then solves width for every element and height for every element in
//! declaration order. The height pass repeats (with a guide refresh and,
//! in auto-height mode, a container height update in between) until the
//! vertical result reaches a fixed point or the pass cap is hit, because
//! an element's natural height can change once its width is known.
//!
//! Elements are processed strictly in declaration order: an edge that
//! targets an element declared later silently reads that target's stale
//! zeroed bounds. Use [`SolverConfig::check_declaration_order`] or
//! [`crate::lint::check`] to surface such references instead.

use std::collections::HashMap;

use crate::descriptor::{ElementDescriptor, GuideDescriptor};
use crate::dimension::Dimension;
use crate::error::LayoutError;
use crate::geometry::{Axis, Rect, Side, Viewport};
use crate::holder::{build_holders, Edge, ElementHolder, GuideHolder};
use crate::lint;
use crate::measure::{ContentMeasurer, MeasureMode, MeasureSpec, NullMeasurer};

static NULL_MEASURER: NullMeasurer = NullMeasurer;

/// Configuration options for a solve
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Upper bound on the number of height passes in one solve. The
    /// solver stops earlier when a pass leaves every rectangle and the
    /// derived container height unchanged.
    pub height_passes: usize,

    /// Reject layouts whose edges target elements declared later, or
    /// whose attachment graph contains a cycle, before any geometry runs.
    /// Off by default to preserve the single-linear-pass contract.
    pub check_declaration_order: bool,

    /// Viewport width used for breakpoint-qualified attribute resolution.
    /// Defaults to the container width.
    pub viewport_width: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            height_passes: 3,
            check_declaration_order: false,
            viewport_width: None,
        }
    }
}

impl SolverConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the height pass cap (minimum 1)
    pub fn with_height_passes(mut self, passes: usize) -> Self {
        self.height_passes = passes.max(1);
        self
    }

    /// Enable or disable strict declaration-order checking
    pub fn with_declaration_order_check(mut self, enabled: bool) -> Self {
        self.check_declaration_order = enabled;
        self
    }

    /// Override the viewport width used for breakpoint resolution
    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = Some(width);
        self
    }
}

/// The result of one solve: a final rectangle per element, in
/// container-local coordinates, plus the container's effective height
/// (the supplied height, or the derived one in auto-height mode)
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedLayout {
    rects: HashMap<String, Rect>,
    order: Vec<String>,
    pub container_height: f64,
}

impl SolvedLayout {
    /// The resolved rectangle for an element id
    pub fn get(&self, id: &str) -> Option<&Rect> {
        self.rects.get(id)
    }

    /// Element ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Resolved rectangles in declaration order
    pub fn rects(&self) -> impl Iterator<Item = (&str, &Rect)> {
        self.order.iter().map(move |id| (id.as_str(), &self.rects[id]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Solves element positions for one container
pub struct LayoutSolver<'m> {
    config: SolverConfig,
    measurer: &'m dyn ContentMeasurer,
}

impl LayoutSolver<'static> {
    /// A solver with default configuration and no content measurer
    /// (every `match-content` dimension resolves to 0)
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
            measurer: &NULL_MEASURER,
        }
    }
}

impl Default for LayoutSolver<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'m> LayoutSolver<'m> {
    /// A solver that measures natural content sizes through the given
    /// capability
    pub fn with_measurer(measurer: &'m dyn ContentMeasurer) -> Self {
        Self {
            config: SolverConfig::default(),
            measurer,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one full solve. Pure for a given input: identical descriptors
    /// and viewport yield an identical result.
    pub fn solve(
        &self,
        elements: &[ElementDescriptor],
        guides: &[GuideDescriptor],
        viewport: Viewport,
    ) -> Result<SolvedLayout, LayoutError> {
        let viewport_width = self.config.viewport_width.unwrap_or(viewport.width);
        let (element_holders, guide_holders) = build_holders(elements, guides, viewport_width)?;

        if self.config.check_declaration_order {
            lint::enforce(&element_holders, &guide_holders)?;
        }

        let mut engine = Engine {
            elements: element_holders,
            guides: guide_holders,
            width: viewport.width,
            effective_height: viewport.height.unwrap_or(0.0),
            auto_height: viewport.height.is_none(),
            measurer: self.measurer,
        };
        engine.run(self.config.height_passes.max(1));

        let order: Vec<String> = engine.elements.iter().map(|h| h.id.clone()).collect();
        let rects = engine
            .elements
            .into_iter()
            .map(|h| (h.id, h.position))
            .collect();

        Ok(SolvedLayout {
            rects,
            order,
            container_height: engine.effective_height,
        })
    }
}

/// Convenience entry point: default configuration, no content measurer
pub fn solve(
    elements: &[ElementDescriptor],
    guides: &[GuideDescriptor],
    viewport: Viewport,
) -> Result<SolvedLayout, LayoutError> {
    LayoutSolver::new().solve(elements, guides, viewport)
}

/// Working state of one solve
struct Engine<'m> {
    elements: Vec<ElementHolder>,
    guides: Vec<GuideHolder>,
    width: f64,
    effective_height: f64,
    auto_height: bool,
    measurer: &'m dyn ContentMeasurer,
}

impl Engine<'_> {
    fn run(&mut self, height_passes: usize) {
        self.refresh_guides();
        self.solve_axis(Axis::Horizontal);
        self.solve_axis(Axis::Vertical);
        self.update_auto_height();

        let mut previous = self.vertical_snapshot();
        for _ in 1..height_passes {
            self.refresh_guides();
            self.solve_axis(Axis::Vertical);
            self.update_auto_height();

            let current = self.vertical_snapshot();
            if current == previous {
                break;
            }
            previous = current;
        }
    }

    fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.effective_height,
        }
    }

    fn refresh_guides(&mut self) {
        let width = self.width;
        let height = self.effective_height;
        for guide in &mut self.guides {
            let extent = match guide.axis() {
                Axis::Horizontal => width,
                Axis::Vertical => height,
            };
            guide.refresh(extent);
        }
    }

    /// In auto-height mode the container's effective height follows the
    /// lowest resolved bottom edge
    fn update_auto_height(&mut self) {
        if !self.auto_height {
            return;
        }
        self.effective_height = self
            .elements
            .iter()
            .map(|h| h.position.y2)
            .fold(0.0, f64::max);
    }

    /// The vertical state compared between passes: every element's
    /// resolved top and bottom plus the effective container height.
    /// Exact equality, so convergence means a true fixed point.
    fn vertical_snapshot(&self) -> Vec<f64> {
        let mut snapshot = Vec::with_capacity(self.elements.len() * 2 + 1);
        for holder in &self.elements {
            snapshot.push(holder.position.y1);
            snapshot.push(holder.position.y2);
        }
        snapshot.push(self.effective_height);
        snapshot
    }

    /// Resolve bounds, measure and position every element on one axis,
    /// in declaration order
    fn solve_axis(&mut self, axis: Axis) {
        let extent = self.extent(axis);

        for index in 0..self.elements.len() {
            // Inherit bounds from constraint edges. Targets declared
            // earlier have already collapsed their bounds to their final
            // position; later targets are read as-is.
            let inherited: Vec<(Side, f64)> = self.elements[index]
                .edges_for(axis)
                .map(|edge| (edge.kind.own_side(), self.edge_coordinate(edge, axis, extent)))
                .collect();

            let holder = &mut self.elements[index];
            if inherited.is_empty() {
                // Free axis: the full container extent
                holder.bounds.set_axis(axis, 0.0, extent);
            } else {
                for (side, coordinate) in inherited {
                    holder.bounds.set_side(axis, side, coordinate);
                }
            }

            let size = self.measure(index, axis, extent);
            self.position(index, axis, size);
        }
    }

    /// The coordinate an edge aligns to: the target holder's resolved
    /// side, or the container origin/extent. Unresolvable ids fall back
    /// to the container.
    fn edge_coordinate(&self, edge: &Edge, axis: Axis, extent: f64) -> f64 {
        match self.find_target(&edge.target) {
            Some(bounds) => bounds.side(axis, edge.kind.target_side()),
            None => match edge.kind.target_side() {
                Side::Start => 0.0,
                Side::End => extent,
            },
        }
    }

    /// The bounds of the first holder matching the target's candidate
    /// ids, searching elements before guides
    fn find_target(&self, target: &crate::constraint::Target) -> Option<Rect> {
        for id in target.candidate_ids() {
            if let Some(holder) = self.elements.iter().find(|h| h.id == *id) {
                return Some(holder.bounds);
            }
            if let Some(guide) = self.guides.iter().find(|g| g.id == *id) {
                return Some(guide.bounds);
            }
        }
        None
    }

    /// Final measured size for one axis, after clamping against the
    /// available space and realizing stretch for unresolved requests
    fn measure(&self, index: usize, axis: Axis, extent: f64) -> f64 {
        let holder = &self.elements[index];
        let fully = holder.is_fully_constrained(axis);

        let requested = match holder.dimension(axis) {
            Dimension::MatchParent => MeasureSpec::exact(extent),
            Dimension::MatchContent => {
                let natural = match axis {
                    Axis::Horizontal => self.measurer.natural_width(&holder.id),
                    Axis::Vertical => self
                        .measurer
                        .natural_height(&holder.id, holder.position.width()),
                };
                MeasureSpec::exact(natural)
            }
            Dimension::Px(value) if value == 0.0 && fully => MeasureSpec::unresolved(),
            Dimension::Px(value) => MeasureSpec::exact(value),
        };

        let available = if fully {
            let start = holder.bounds.start(axis) + holder.margins.start(axis);
            let end = holder.bounds.end(axis) - holder.margins.end(axis);
            (end - start).max(0.0)
        } else {
            extent
        };

        if requested.value <= available {
            match requested.mode {
                MeasureMode::Unresolved => available,
                MeasureMode::Exact => requested.value,
            }
        } else {
            available
        }
    }

    /// Place the element inside its bounds on one axis and collapse the
    /// bounds to the final position
    fn position(&mut self, index: usize, axis: Axis, size: f64) {
        let holder = &mut self.elements[index];
        let margin_start = holder.margins.start(axis);
        let margin_end = holder.margins.end(axis);
        let bound_start = holder.bounds.start(axis) + margin_start;
        let bound_end = holder.bounds.end(axis) - margin_end;

        let start_constrained = holder.is_constrained(axis, Side::Start);
        let end_constrained = holder.is_constrained(axis, Side::End);

        let (start, end) = if start_constrained && end_constrained {
            let span = bound_end - bound_start;
            let slack = (span - size).max(0.0);
            let start = bound_start + holder.bias(axis) * slack;
            (start, start + size)
        } else if start_constrained {
            (bound_start, bound_start + size)
        } else if end_constrained {
            (bound_end - size, bound_end)
        } else {
            (margin_start, margin_start + size)
        };

        holder.position.set_axis(axis, start, end);
        holder.bounds.set_axis(axis, start, end);
    }
}
