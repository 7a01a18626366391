//! Structured operation outcome reported at every boundary.
//!
//! The transport layer (HTTP today, CLI tomorrow) translates this envelope
//! into its own status codes; the core only classifies.

use serde::{Deserialize, Serialize};

/// A single field-level error entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Caller-facing result envelope: `{success, message, errors[]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors,
        }
    }
}
