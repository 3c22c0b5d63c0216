//! Geometric primitives for the layout solver

/// A rectangle stored as its two corner coordinate pairs. `(x1, y1)` is the
/// top-left corner, `(x2, y2)` the bottom-right corner, both in
/// container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// A zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// The start coordinate on the given axis (`x1` or `y1`)
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x1,
            Axis::Vertical => self.y1,
        }
    }

    /// The end coordinate on the given axis (`x2` or `y2`)
    pub fn end(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x2,
            Axis::Vertical => self.y2,
        }
    }

    /// The coordinate of one side on the given axis
    pub fn side(&self, axis: Axis, side: Side) -> f64 {
        match side {
            Side::Start => self.start(axis),
            Side::End => self.end(axis),
        }
    }

    /// Overwrite both coordinates of one axis
    pub fn set_axis(&mut self, axis: Axis, start: f64, end: f64) {
        match axis {
            Axis::Horizontal => {
                self.x1 = start;
                self.x2 = end;
            }
            Axis::Vertical => {
                self.y1 = start;
                self.y2 = end;
            }
        }
    }

    /// Overwrite the coordinate of one side on the given axis
    pub fn set_side(&mut self, axis: Axis, side: Side, value: f64) {
        match (axis, side) {
            (Axis::Horizontal, Side::Start) => self.x1 = value,
            (Axis::Horizontal, Side::End) => self.x2 = value,
            (Axis::Vertical, Side::Start) => self.y1 = value,
            (Axis::Vertical, Side::End) => self.y2 = value,
        }
    }
}

/// One of the two layout axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One of the two sides of an axis: `Start` is left/top, `End` is
/// right/bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Start,
    End,
}

/// The containing region a solve runs against. A `None` height puts the
/// solver in auto-height mode: the container's effective height is derived
/// from the children's resolved bottom edges after each height pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: Option<f64>,
}

impl Viewport {
    /// A container with a known width and height
    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            width,
            height: Some(height),
        }
    }

    /// A container whose height is derived from its children
    pub fn auto_height(width: f64) -> Self {
        Self {
            width,
            height: None,
        }
    }
}
