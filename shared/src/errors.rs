//! Error types for the Diet Planner application

use thiserror::Error;

/// Input validation failures for plan requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field as it appears in the request JSON
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::InvalidField { field, .. } => field,
        }
    }
}
