//! Measure specs and the natural-size measurement capability

use std::collections::HashMap;

/// Whether a requested size is a hard requirement or may be stretched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The dimension must be exactly the carried value
    Exact,
    /// The dimension may take any value up to the available space
    Unresolved,
}

/// A resolved intermediate measurement: a requested size together with the
/// mode telling the caller whether it is exact or stretchable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub value: f64,
}

impl MeasureSpec {
    pub fn exact(value: f64) -> Self {
        Self {
            mode: MeasureMode::Exact,
            value,
        }
    }

    pub fn unresolved() -> Self {
        Self {
            mode: MeasureMode::Unresolved,
            value: 0.0,
        }
    }
}

/// Natural content size measurement, injected by the host.
///
/// The solver calls through this when an element's dimension is
/// `match-content`. Implementations must be synchronous and pure for a
/// given `(id, width)` pair; the solver may call `natural_height` several
/// times for the same element with different widths as the width pass
/// narrows it (text reflow).
pub trait ContentMeasurer {
    /// Natural width of the element's content, unconstrained
    fn natural_width(&self, id: &str) -> f64;

    /// Natural height of the element's content when laid out at the given
    /// resolved width
    fn natural_height(&self, id: &str, width: f64) -> f64;
}

/// A measurer that reports zero for everything. Used when no element
/// declares `match-content`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMeasurer;

impl ContentMeasurer for NullMeasurer {
    fn natural_width(&self, _id: &str) -> f64 {
        0.0
    }

    fn natural_height(&self, _id: &str, _width: f64) -> f64 {
        0.0
    }
}

/// A table-backed measurer for tests and host adapters.
///
/// Each entry stores a natural `(width, height)` pair. Entries registered
/// through [`FixedMeasurer::insert_reflowing`] model text-like content:
/// their area is preserved, so height grows as the resolved width shrinks
/// below the natural width.
#[derive(Debug, Clone, Default)]
pub struct FixedMeasurer {
    sizes: HashMap<String, (f64, f64)>,
    reflowing: HashMap<String, bool>,
}

impl FixedMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register fixed natural dimensions for an element
    pub fn insert(&mut self, id: impl Into<String>, width: f64, height: f64) {
        let id = id.into();
        self.reflowing.insert(id.clone(), false);
        self.sizes.insert(id, (width, height));
    }

    /// Register reflowing (text-like) natural dimensions for an element
    pub fn insert_reflowing(&mut self, id: impl Into<String>, width: f64, height: f64) {
        let id = id.into();
        self.reflowing.insert(id.clone(), true);
        self.sizes.insert(id, (width, height));
    }

    fn entry(&self, id: &str) -> (f64, f64) {
        self.sizes.get(id).copied().unwrap_or((0.0, 0.0))
    }
}

impl ContentMeasurer for FixedMeasurer {
    fn natural_width(&self, id: &str) -> f64 {
        self.entry(id).0
    }

    fn natural_height(&self, id: &str, width: f64) -> f64 {
        let (natural_width, natural_height) = self.entry(id);
        let reflows = self.reflowing.get(id).copied().unwrap_or(false);

        if reflows && width > 0.0 && width < natural_width {
            natural_width * natural_height / width
        } else {
            natural_height
        }
    }
}
