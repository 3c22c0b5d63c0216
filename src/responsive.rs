//! Breakpoint-qualified attribute variants
//!
//! Any attribute that participates in constraint, dimension, margin or
//! bias resolution may carry per-breakpoint overrides. Resolution walks
//! from the most specific breakpoint matching the current viewport width
//! down to the unqualified base value and uses the first one that is
//! explicitly set.

use serde::Deserialize;

/// The four viewport-width breakpoints, ordered by their min-width
/// thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// All breakpoints, narrowest first
    pub const ALL: [Breakpoint; 4] = [Self::Sm, Self::Md, Self::Lg, Self::Xl];

    /// The minimum viewport width at which this breakpoint applies
    pub fn min_width(&self) -> f64 {
        match self {
            Self::Sm => 576.0,
            Self::Md => 768.0,
            Self::Lg => 992.0,
            Self::Xl => 1200.0,
        }
    }

    /// The widest breakpoint matching the given viewport width, if any
    pub fn matching(viewport_width: f64) -> Option<Breakpoint> {
        Self::ALL
            .iter()
            .rev()
            .find(|bp| viewport_width >= bp.min_width())
            .copied()
    }
}

/// An attribute value with optional breakpoint-qualified overrides
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ResponsiveRepr<T>")]
pub struct Responsive<T: Clone> {
    pub base: Option<T>,
    pub sm: Option<T>,
    pub md: Option<T>,
    pub lg: Option<T>,
    pub xl: Option<T>,
}

impl<T: Clone> Default for Responsive<T> {
    fn default() -> Self {
        Self {
            base: None,
            sm: None,
            md: None,
            lg: None,
            xl: None,
        }
    }
}

impl<T: Clone> Responsive<T> {
    /// An attribute with only the unqualified base value set
    pub fn base(value: T) -> Self {
        Self {
            base: Some(value),
            ..Self::default()
        }
    }

    /// Whether no variant at all is set
    pub fn is_unset(&self) -> bool {
        self.base.is_none()
            && self.sm.is_none()
            && self.md.is_none()
            && self.lg.is_none()
            && self.xl.is_none()
    }

    fn variant(&self, breakpoint: Breakpoint) -> Option<&T> {
        match breakpoint {
            Breakpoint::Sm => self.sm.as_ref(),
            Breakpoint::Md => self.md.as_ref(),
            Breakpoint::Lg => self.lg.as_ref(),
            Breakpoint::Xl => self.xl.as_ref(),
        }
    }

    /// Set the variant for a breakpoint, or the base when `None`
    pub fn set(&mut self, breakpoint: Option<Breakpoint>, value: T) {
        match breakpoint {
            None => self.base = Some(value),
            Some(Breakpoint::Sm) => self.sm = Some(value),
            Some(Breakpoint::Md) => self.md = Some(value),
            Some(Breakpoint::Lg) => self.lg = Some(value),
            Some(Breakpoint::Xl) => self.xl = Some(value),
        }
    }

    /// Resolve the attribute for the given viewport width: walk from the
    /// widest matching breakpoint down through narrower ones to the base,
    /// returning the first explicitly set variant
    pub fn resolve(&self, viewport_width: f64) -> Option<&T> {
        if let Some(current) = Breakpoint::matching(viewport_width) {
            for bp in Breakpoint::ALL.iter().rev() {
                if *bp > current {
                    continue;
                }
                if let Some(value) = self.variant(*bp) {
                    return Some(value);
                }
            }
        }
        self.base.as_ref()
    }
}

/// Serialized form: either a bare value (base only) or a table of
/// per-breakpoint variants
#[derive(Deserialize)]
#[serde(untagged)]
enum ResponsiveRepr<T> {
    Value(T),
    Variants {
        base: Option<T>,
        sm: Option<T>,
        md: Option<T>,
        lg: Option<T>,
        xl: Option<T>,
    },
}

impl<T: Clone> From<ResponsiveRepr<T>> for Responsive<T> {
    fn from(repr: ResponsiveRepr<T>) -> Self {
        match repr {
            ResponsiveRepr::Value(value) => Self::base(value),
            ResponsiveRepr::Variants { base, sm, md, lg, xl } => Self { base, sm, md, lg, xl },
        }
    }
}
