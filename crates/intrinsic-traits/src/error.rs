//! Error types for the intrinsic valuation engine.
//!
//! Every fatal condition carries the offending field and the violated
//! constraint so that callers can render a precise message without parsing
//! strings.

use thiserror::Error;

/// The main error type for valuation operations.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Structurally invalid raw data, such as a non-finite number or a
    /// negative balance.
    #[error("Invalid input `{field}`: {reason}")]
    InvalidInput {
        /// Name of the offending input field.
        field: &'static str,
        /// The constraint that was violated.
        reason: String,
    },

    /// A required field is absent and has no safe default.
    #[error("Insufficient data: `{field}` is required")]
    InsufficientData {
        /// Name of the missing field.
        field: &'static str,
    },

    /// An assumption violates a hard mathematical precondition.
    #[error("Invalid assumption `{field}`: {reason}")]
    InvalidAssumption {
        /// Name of the offending assumption.
        field: &'static str,
        /// The constraint that was violated.
        reason: String,
    },

    /// A computed figure overflowed or became NaN, usually because the
    /// inputs are at the edge of floating-point range.
    #[error("Non-finite result: `{field}` is {value}")]
    NonFiniteResult {
        /// Name of the offending figure.
        field: &'static str,
        /// The value that was produced.
        value: f64,
    },

    /// A required column is missing from a fundamentals table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl ValuationError {
    /// Shorthand for [`ValuationError::InvalidInput`].
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ValuationError::InvalidAssumption`].
    pub fn invalid_assumption(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidAssumption {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the field this error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. }
            | Self::InsufficientData { field }
            | Self::InvalidAssumption { field, .. }
            | Self::NonFiniteResult { field, .. } => Some(*field),
            Self::MissingColumn(_) | Self::Polars(_) => None,
        }
    }
}

/// A specialized Result type for valuation operations.
pub type Result<T> = std::result::Result<T, ValuationError>;
