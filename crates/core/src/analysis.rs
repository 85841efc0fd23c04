//! The room analysis record and its schema check.
//!
//! A [`RoomAnalysis`] only ever exists in validated form: the sole
//! constructor from untrusted JSON is [`validate_analysis`], which rejects
//! any object with a missing, empty, or mistyped field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Object keys every analysis must carry, in schema order.
pub const REQUIRED_FIELDS: [&str; 4] = ["description", "style", "colors", "categories"];

/// Category vocabulary the prompt asks the model to draw from.
///
/// Not enforced: the model may return other labels and they are kept.
pub const KNOWN_CATEGORIES: [&str; 5] = ["seating", "dining", "storage", "lighting", "accessories"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Structured description of a photographed room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAnalysis {
    /// Two or three sentences describing the room.
    pub description: String,
    /// Interior style label, e.g. `"scandinavian"`.
    pub style: String,
    /// Dominant colors, in the order the model listed them.
    pub colors: Vec<String>,
    /// Furniture categories the room would benefit from.
    pub categories: Vec<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed JSON value against the analysis schema.
///
/// All four [`REQUIRED_FIELDS`] must be present:
/// - `description` and `style` as non-blank strings,
/// - `colors` and `categories` as non-empty arrays of non-blank strings.
///
/// Extra keys are ignored. Field values are returned as given (no trimming).
/// On failure every offending field is named in
/// [`AnalysisError::SchemaViolation`]; no partial record is produced.
pub fn validate_analysis(value: &Value) -> Result<RoomAnalysis, AnalysisError> {
    let Some(object) = value.as_object() else {
        return Err(AnalysisError::SchemaViolation {
            fields: REQUIRED_FIELDS.to_vec(),
        });
    };

    let description = non_blank_string(object.get("description"));
    let style = non_blank_string(object.get("style"));
    let colors = non_empty_string_list(object.get("colors"));
    let categories = non_empty_string_list(object.get("categories"));

    match (description, style, colors, categories) {
        (Some(description), Some(style), Some(colors), Some(categories)) => Ok(RoomAnalysis {
            description,
            style,
            colors,
            categories,
        }),
        (description, style, colors, categories) => {
            let present = [
                description.is_some(),
                style.is_some(),
                colors.is_some(),
                categories.is_some(),
            ];
            let fields = REQUIRED_FIELDS
                .iter()
                .zip(present)
                .filter(|(_, ok)| !ok)
                .map(|(name, _)| *name)
                .collect();
            Err(AnalysisError::SchemaViolation { fields })
        }
    }
}

fn non_blank_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn non_empty_string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value.and_then(Value::as_array)?;
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| non_blank_string(Some(item)))
        .collect()
}
