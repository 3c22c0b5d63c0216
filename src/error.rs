//! Error types for layout solving

use thiserror::Error;

/// Errors that can occur while building holders or solving a layout.
///
/// All validation failures are detected eagerly at holder construction,
/// before any geometry is computed, and abort the entire solve for the
/// container: downstream elements may depend on the invalid one's
/// resolved bounds, so there is no partial layout. Every variant names
/// the offending id.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The same id is used by more than one element or guide
    #[error("duplicate id '{id}'")]
    DuplicateId { id: String },

    /// A constraint edge targets the owning element's own id
    #[error("element '{id}': '{attribute}' cannot target the element itself")]
    SelfReferentialConstraint { id: String, attribute: &'static str },

    /// Both edges of one side pair are set (e.g. `left_to_left_of` and
    /// `left_to_right_of`)
    #[error("element '{id}': conflicting constraints '{first}' and '{second}'")]
    ConflictingConstraintPair {
        id: String,
        first: &'static str,
        second: &'static str,
    },

    /// A numeric width or height is negative
    #[error("element '{id}': {attribute} cannot be less than 0 (got {value})")]
    InvalidDimensionValue {
        id: String,
        attribute: &'static str,
        value: f64,
    },

    /// A constraint value is neither a single id nor an ordered list of ids
    #[error("element '{id}': '{attribute}' must be an id or an array of ids")]
    InvalidConstraintTargetType { id: String, attribute: String },

    /// A guide declares a bad orientation or a bad begin/end/percent
    /// combination
    #[error("guide '{id}': {reason}")]
    InvalidGuideSpec { id: String, reason: String },

    /// A guide's percent is outside [0, 100]
    #[error("guide '{id}': percent must be between 0 and 100 (got {percent})")]
    GuidePercentOutOfRange { id: String, percent: f64 },

    /// Diagnostic mode only: an edge targets an element declared later,
    /// which the single-pass solver would resolve against stale state
    #[error("element '{id}': '{attribute}' targets '{target}' which is declared later")]
    ForwardReference {
        id: String,
        attribute: &'static str,
        target: String,
    },

    /// Diagnostic mode only: the attachment graph contains a cycle
    #[error("circular constraint dependency: {}", cycle.join(" -> "))]
    CircularConstraint { cycle: Vec<String> },
}

impl LayoutError {
    /// Create a duplicate id error
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Create a self-referential constraint error
    pub fn self_referential(id: impl Into<String>, attribute: &'static str) -> Self {
        Self::SelfReferentialConstraint {
            id: id.into(),
            attribute,
        }
    }

    /// Create a conflicting constraint pair error
    pub fn conflicting(
        id: impl Into<String>,
        first: &'static str,
        second: &'static str,
    ) -> Self {
        Self::ConflictingConstraintPair {
            id: id.into(),
            first,
            second,
        }
    }

    /// Create an invalid dimension value error
    pub fn invalid_dimension(id: impl Into<String>, attribute: &'static str, value: f64) -> Self {
        Self::InvalidDimensionValue {
            id: id.into(),
            attribute,
            value,
        }
    }

    /// Create an invalid guide spec error
    pub fn invalid_guide(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGuideSpec {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// The id of the offending element or guide, where one exists
    pub fn offending_id(&self) -> Option<&str> {
        match self {
            Self::DuplicateId { id }
            | Self::SelfReferentialConstraint { id, .. }
            | Self::ConflictingConstraintPair { id, .. }
            | Self::InvalidDimensionValue { id, .. }
            | Self::InvalidConstraintTargetType { id, .. }
            | Self::InvalidGuideSpec { id, .. }
            | Self::GuidePercentOutOfRange { id, .. }
            | Self::ForwardReference { id, .. } => Some(id),
            Self::CircularConstraint { .. } => None,
        }
    }
}
