//! Raw and validated fundamental inputs.

use crate::quality::DataQuality;
use intrinsic_traits::Symbol;
use serde::{Deserialize, Serialize};

/// Cash flow statement figures used to derive a base free cash flow when the
/// provider does not supply one directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementFigures {
    /// Net cash from operating activities.
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure. Either sign is accepted; the magnitude is used.
    pub capital_expenditure: Option<f64>,
    /// Net cash from investing activities, used as a capex proxy when capex
    /// is absent or zero.
    pub investing_cash_flow: Option<f64>,
}

/// Fundamental data as delivered by an upstream provider.
///
/// Every numeric field is optional and untrusted. Nothing here has been
/// validated; pass it through [`normalize`](crate::normalize()) before computing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFinancials {
    /// Company identifier, opaque to the engine.
    pub symbol: Symbol,
    /// Base-year free cash flow or earnings proxy.
    pub dcf_start_value: Option<f64>,
    /// Total liabilities.
    pub debt: Option<f64>,
    /// Cash and cash equivalents.
    pub cash: Option<f64>,
    /// Minority (non-controlling) interests.
    pub minority_interests: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Latest market price per share, if known.
    pub current_price: Option<f64>,
    /// Statement figures for deriving the base cash flow.
    pub statements: StatementFigures,
}

impl RawFinancials {
    /// Create an empty record for `symbol`.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }
}

/// Where the base-year cash flow came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseValueSource {
    /// Supplied directly by the provider or the caller.
    Provided,
    /// Operating cash flow minus capital expenditure.
    DerivedFromStatements,
}

/// Fully validated fundamental inputs for a single valuation.
///
/// Only [`normalize`](crate::normalize()) can build one, so every instance satisfies:
/// all fields finite, `shares_outstanding > 0`, balances non-negative, and
/// `current_price > 0` when present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialInputs {
    pub(crate) symbol: Symbol,
    pub(crate) dcf_start_value: f64,
    pub(crate) debt: f64,
    pub(crate) cash: f64,
    pub(crate) minority_interests: f64,
    pub(crate) shares_outstanding: f64,
    pub(crate) current_price: Option<f64>,
    pub(crate) base_value_source: BaseValueSource,
    pub(crate) data_quality: DataQuality,
}

impl FinancialInputs {
    /// Company identifier.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Base-year free cash flow.
    #[must_use]
    pub const fn dcf_start_value(&self) -> f64 {
        self.dcf_start_value
    }

    /// Total liabilities, zero when undisclosed.
    #[must_use]
    pub const fn debt(&self) -> f64 {
        self.debt
    }

    /// Cash and equivalents, zero when undisclosed.
    #[must_use]
    pub const fn cash(&self) -> f64 {
        self.cash
    }

    /// Minority interests, zero when undisclosed.
    #[must_use]
    pub const fn minority_interests(&self) -> f64 {
        self.minority_interests
    }

    /// Shares outstanding, always positive.
    #[must_use]
    pub const fn shares_outstanding(&self) -> f64 {
        self.shares_outstanding
    }

    /// Latest market price, if supplied.
    #[must_use]
    pub const fn current_price(&self) -> Option<f64> {
        self.current_price
    }

    /// Provenance of the base-year cash flow.
    #[must_use]
    pub const fn base_value_source(&self) -> BaseValueSource {
        self.base_value_source
    }

    /// Completeness of the raw record these inputs were built from.
    #[must_use]
    pub const fn data_quality(&self) -> DataQuality {
        self.data_quality
    }

    /// `debt - cash`.
    #[must_use]
    pub fn net_debt(&self) -> f64 {
        self.debt - self.cash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_new_is_empty() {
        let raw = RawFinancials::new("600519.SH");
        assert_eq!(raw.symbol, "600519.SH");
        assert!(raw.dcf_start_value.is_none());
        assert!(raw.shares_outstanding.is_none());
        assert_eq!(raw.statements, StatementFigures::default());
    }

    #[test]
    fn test_raw_deserialize_partial() {
        let json = r#"{
            "symbol": "NVDA",
            "shares_outstanding": 24.4,
            "statements": {"operating_cash_flow": 64.1}
        }"#;
        let raw: RawFinancials = serde_json::from_str(json).unwrap();
        assert_eq!(raw.symbol, "NVDA");
        assert_eq!(raw.shares_outstanding, Some(24.4));
        assert_eq!(raw.statements.operating_cash_flow, Some(64.1));
        assert!(raw.cash.is_none());
    }
}
