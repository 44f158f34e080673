//! Error taxonomy for diagnostics requests
//!
//! Classification fails only when a Type B row lacks its planted baseline.
//! Everything else comes from the edges: coercing raw input into
//! observations, and consulting the prescription classifier.

use thiserror::Error;

/// Errors surfaced by report composition, growth comparison and prescription lookup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticError {
    /// Missing or non-numeric required field
    #[error("{}", malformed_message(.field, .index, .reason))]
    MalformedInput {
        field: String,
        /// Row within the batch, `None` for single-object requests
        index: Option<usize>,
        reason: String,
    },

    /// Crop type outside the known {1, 0} encoding
    #[error("row {index}: unrecognized crop type {value} (expected 1 or 0)")]
    UnrecognizedCategory { index: usize, value: String },

    /// Prescription classifier raised or returned an unusable label
    #[error("prescription classifier failed: {0}")]
    CollaboratorFailure(String),
}

impl DiagnosticError {
    pub fn missing(field: &str, index: Option<usize>) -> Self {
        DiagnosticError::MalformedInput {
            field: field.to_string(),
            index,
            reason: "missing required field".to_string(),
        }
    }

    pub fn malformed(field: &str, index: Option<usize>, reason: impl Into<String>) -> Self {
        DiagnosticError::MalformedInput {
            field: field.to_string(),
            index,
            reason: reason.into(),
        }
    }

    /// Attach a batch row to a row-less MalformedInput; other variants pass through
    pub fn at_row(self, row: usize) -> Self {
        match self {
            DiagnosticError::MalformedInput { field, index: None, reason } => {
                DiagnosticError::MalformedInput { field, index: Some(row), reason }
            }
            other => other,
        }
    }

    /// Stable snake_case name used in error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            DiagnosticError::MalformedInput { .. } => "malformed_input",
            DiagnosticError::UnrecognizedCategory { .. } => "unrecognized_category",
            DiagnosticError::CollaboratorFailure(_) => "collaborator_failure",
        }
    }
}

fn malformed_message(field: &str, index: &Option<usize>, reason: &str) -> String {
    match index {
        Some(i) => format!("row {}: field '{}': {}", i, field, reason),
        None => format!("field '{}': {}", field, reason),
    }
}

pub type Result<T> = std::result::Result<T, DiagnosticError>;
