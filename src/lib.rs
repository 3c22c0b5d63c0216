//! Constraint-based rectangle layout for a flat set of boxes
//!
//! This library computes an exact axis-aligned rectangle for every
//! element in a container from directional attachments between siblings,
//! guides and the container itself, in the style of relative-positioning
//! constraint layouts. It is a pure in-memory geometry computation: the
//! host supplies descriptors, a container extent and (optionally) a
//! natural-content-size measurer, and gets back a rectangle per element.
//!
//! # Example
//!
//! ```rust
//! use constraint_layout::{
//!     solve, ConstraintKind, Dimension, ElementDescriptor, Target, Viewport,
//! };
//!
//! let elements = vec![
//!     ElementDescriptor::new("sidebar")
//!         .width(100.0)
//!         .height(Dimension::MatchParent)
//!         .constrain(ConstraintKind::LeftToLeftOf, Target::Parent),
//!     ElementDescriptor::new("content")
//!         .width(Dimension::zero())
//!         .height(Dimension::MatchParent)
//!         .constrain(ConstraintKind::LeftToRightOf, "sidebar")
//!         .constrain(ConstraintKind::RightToRightOf, Target::Parent),
//! ];
//!
//! let layout = solve(&elements, &[], Viewport::fixed(320.0, 200.0)).unwrap();
//! assert_eq!(layout.get("content").unwrap().x1, 100.0);
//! assert_eq!(layout.get("content").unwrap().x2, 320.0);
//! ```

pub mod constraint;
pub mod descriptor;
pub mod dimension;
pub mod document;
pub mod error;
pub mod geometry;
pub mod holder;
pub mod lint;
pub mod measure;
pub mod responsive;
pub mod solver;

pub use constraint::{ConstraintKind, Target};
pub use descriptor::{ElementDescriptor, GuideDescriptor, Orientation};
pub use dimension::Dimension;
pub use document::{DocumentError, LayoutDocument};
pub use error::LayoutError;
pub use geometry::{Axis, Rect, Side, Viewport};
pub use lint::{LintKind, LintWarning};
pub use measure::{ContentMeasurer, FixedMeasurer, MeasureMode, MeasureSpec, NullMeasurer};
pub use responsive::{Breakpoint, Responsive};
pub use solver::{solve, LayoutSolver, SolvedLayout, SolverConfig};
