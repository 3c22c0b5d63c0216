//! Declarative layout documents
//!
//! A layout document is a TOML description of one container's elements
//! and guides, the data-file equivalent of building descriptors through
//! the API.
//!
//! ```toml
//! [[guides]]
//! id = "mid"
//! orientation = "vertical"
//! percent = 50.0
//!
//! [[elements]]
//! id = "panel"
//! width = 0
//! height = "match-parent"
//! left_to_left_of = "mid"
//! right_to_right_of = "_parent"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use toml::Value;

use crate::constraint::ConstraintKind;
use crate::descriptor::{ElementDescriptor, GuideDescriptor};
use crate::error::LayoutError;

/// Errors that can occur when loading a layout document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read layout document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse layout document TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// The element and guide descriptors of one container
#[derive(Debug, Clone, Default)]
pub struct LayoutDocument {
    pub elements: Vec<ElementDescriptor>,
    pub guides: Vec<GuideDescriptor>,
}

/// TOML structure for deserializing documents
#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlDocument {
    elements: Vec<ElementDescriptor>,
    guides: Vec<GuideDescriptor>,
}

impl LayoutDocument {
    /// Parse a document from TOML source
    pub fn from_toml(source: &str) -> Result<Self, DocumentError> {
        let value: Value = toml::from_str(source)?;
        check_target_shapes(&value)?;

        let raw: TomlDocument = value.try_into()?;
        Ok(Self {
            elements: raw.elements,
            guides: raw.guides,
        })
    }

    /// Load a document from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }
}

/// Constraint values must be an id string or an array of id strings
/// (optionally per breakpoint). Checked before typed deserialization so
/// the report names the offending element and attribute.
fn check_target_shapes(value: &Value) -> Result<(), LayoutError> {
    let Some(elements) = value.get("elements").and_then(Value::as_array) else {
        return Ok(());
    };

    for (index, element) in elements.iter().enumerate() {
        let Some(table) = element.as_table() else {
            continue;
        };
        let id = table
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#anon-view-{index}"));

        for kind in ConstraintKind::ALL {
            let Some(target) = table.get(kind.attribute()) else {
                continue;
            };
            if !target_shape_ok(target, true) {
                return Err(LayoutError::InvalidConstraintTargetType {
                    id,
                    attribute: kind.attribute().to_string(),
                });
            }
        }
    }
    Ok(())
}

fn target_shape_ok(value: &Value, allow_variants: bool) -> bool {
    match value {
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(|item| matches!(item, Value::String(_))),
        Value::Table(variants) if allow_variants => variants
            .values()
            .all(|variant| target_shape_ok(variant, false)),
        _ => false,
    }
}
