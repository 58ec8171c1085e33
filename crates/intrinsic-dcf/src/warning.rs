//! Non-fatal signals attached to a successful valuation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A caution flag raised while valuing a company.
///
/// Warnings never abort a run. They are accumulated in the order they were
/// raised and returned alongside the result so the caller can mark the output
/// as "use with caution".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValuationWarning {
    /// The base-year free cash flow is negative; compounding growth will make
    /// it more negative each year.
    NegativeBaseValue {
        /// The negative starting value.
        value: f64,
    },

    /// An assumption is mathematically valid but economically implausible.
    SuspiciousAssumption {
        /// Name of the assumption.
        field: String,
        /// The value that was used.
        value: f64,
        /// Why the value is implausible.
        reason: String,
    },
}

impl ValuationWarning {
    pub(crate) fn suspicious(field: &str, value: f64, reason: impl Into<String>) -> Self {
        Self::SuspiciousAssumption {
            field: field.to_string(),
            value,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValuationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeBaseValue { value } => {
                write!(f, "negative base cash flow {value}: growth amplifies losses")
            }
            Self::SuspiciousAssumption {
                field,
                value,
                reason,
            } => write!(f, "suspicious `{field}` = {value}: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = ValuationWarning::suspicious("discount_rate", 1.5, "above 100%");
        assert_eq!(w.to_string(), "suspicious `discount_rate` = 1.5: above 100%");

        let w = ValuationWarning::NegativeBaseValue { value: -10.0 };
        assert!(w.to_string().starts_with("negative base cash flow -10"));
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let w = ValuationWarning::NegativeBaseValue { value: -1.0 };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"kind":"negative_base_value","value":-1.0}"#);
    }
}
