//! Completeness scoring for raw fundamental records.

use crate::inputs::RawFinancials;
use serde::{Deserialize, Serialize};

/// Points awarded per disclosed field.
const POINTS_PER_FIELD: u8 = 25;

/// Coarse reliability bucket derived from completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    /// Completeness of at least 80.
    High,
    /// Completeness of at least 60.
    Medium,
    /// Anything below 60.
    Low,
}

impl Reliability {
    /// Bucket a completeness score.
    #[must_use]
    pub const fn from_completeness(completeness: u8) -> Self {
        if completeness >= 80 {
            Self::High
        } else if completeness >= 60 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// How much of the valuation-relevant data the provider actually disclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Score from 0 to 100.
    pub completeness: u8,
    /// Reliability bucket for `completeness`.
    pub reliability: Reliability,
}

impl DataQuality {
    /// Score a raw record.
    ///
    /// Four fields count 25 points each: a base cash flow (either given
    /// directly or via operating cash flow), debt, cash and shares
    /// outstanding. Defaulted fields do not count.
    #[must_use]
    pub fn assess(raw: &RawFinancials) -> Self {
        let disclosed = [
            raw.dcf_start_value.is_some() || raw.statements.operating_cash_flow.is_some(),
            raw.debt.is_some(),
            raw.cash.is_some(),
            raw.shares_outstanding.is_some(),
        ];
        let completeness = disclosed.iter().filter(|&&d| d).count() as u8 * POINTS_PER_FIELD;

        Self {
            completeness,
            reliability: Reliability::from_completeness(completeness),
        }
    }
}
