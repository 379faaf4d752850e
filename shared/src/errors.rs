//! Error types for the calculator core

use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationError;

/// Core error type shared by formulas, classification, and calculators
#[derive(Error, Debug)]
pub enum CalcError {
    /// A precondition the presentation layer should have enforced was violated
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The inputs are individually valid but fall outside the formula's domain
    #[error("{formula} is undefined for these inputs: {reason}")]
    Domain { formula: &'static str, reason: String },

    /// A value fell outside every declared band. Bands are exhaustive, so this is a bug.
    #[error("No {metric} band covers value {value}")]
    ClassificationGap { metric: &'static str, value: f64 },

    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result alias used throughout the core
pub type CalcResult<T> = Result<T, CalcError>;

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::user_message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CalcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn domain(formula: &'static str, reason: impl Into<String>) -> Self {
        CalcError::Domain {
            formula,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::Domain { .. } => "DOMAIN_ERROR",
            CalcError::ClassificationGap { .. } => "CLASSIFICATION_GAP",
            CalcError::Validation(_) => "VALIDATION_ERROR",
            CalcError::InvalidTime(_) => "INVALID_TIME",
            CalcError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// The offending field, when a single one can be named
    pub fn field(&self) -> Option<String> {
        match self {
            CalcError::InvalidInput { field, .. } => Some((*field).to_string()),
            CalcError::Validation(errors) if errors.len() == 1 => Some(errors[0].field.clone()),
            _ => None,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                field: self.field(),
            },
        }
    }
}

/// Error body handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Reject NaN and infinities before they leave a formula
pub(crate) fn ensure_finite(formula: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::warn!(formula, value, "formula produced a non-finite result");
        Err(CalcError::domain(formula, format!("result is not finite ({value})")))
    }
}

/// Require a strictly positive, finite input
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a valid number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid(field, format!("must be positive, got {value}")));
    }
    Ok(value)
}
