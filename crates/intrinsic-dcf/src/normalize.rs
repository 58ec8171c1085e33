//! Financial data normalizer.
//!
//! Turns an untrusted [`RawFinancials`] record into validated
//! [`FinancialInputs`], filling undisclosed balances with zero and deriving
//! the base cash flow from statements when it is not given directly.

use crate::{
    inputs::{BaseValueSource, FinancialInputs, RawFinancials, StatementFigures},
    quality::DataQuality,
    warning::ValuationWarning,
};
use intrinsic_traits::{Result, ValuationError};
use tracing::debug;

/// Output of [`normalize`]: validated inputs plus any warnings raised.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFinancials {
    /// The validated inputs.
    pub inputs: FinancialInputs,
    /// Warnings raised during normalization.
    pub warnings: Vec<ValuationWarning>,
}

/// Validate and complete a raw fundamentals record.
///
/// # Errors
///
/// - [`ValuationError::InvalidInput`] if any supplied number is NaN or
///   infinite, a balance is negative, shares outstanding is not positive,
///   the current price is not positive, or the statement-derived base cash
///   flow overflows.
/// - [`ValuationError::InsufficientData`] if shares outstanding is missing,
///   or neither a base cash flow nor an operating cash flow is available.
pub fn normalize(raw: &RawFinancials) -> Result<NormalizedFinancials> {
    let dcf_start_value = finite("dcf_start_value", raw.dcf_start_value)?;
    let debt = balance("debt", raw.debt)?;
    let cash = balance("cash", raw.cash)?;
    let minority_interests = balance("minority_interests", raw.minority_interests)?;
    let shares = finite("shares_outstanding", raw.shares_outstanding)?;
    let current_price = finite("current_price", raw.current_price)?;
    let operating_cash_flow = finite(
        "statements.operating_cash_flow",
        raw.statements.operating_cash_flow,
    )?;
    finite(
        "statements.capital_expenditure",
        raw.statements.capital_expenditure,
    )?;
    finite(
        "statements.investing_cash_flow",
        raw.statements.investing_cash_flow,
    )?;

    let shares_outstanding = match shares {
        None => {
            return Err(ValuationError::InsufficientData {
                field: "shares_outstanding",
            });
        }
        Some(s) if s <= 0.0 => {
            return Err(ValuationError::invalid_input(
                "shares_outstanding",
                format!("must be positive, got {s}"),
            ));
        }
        Some(s) => s,
    };

    if let Some(p) = current_price
        && p <= 0.0
    {
        return Err(ValuationError::invalid_input(
            "current_price",
            format!("must be positive, got {p}"),
        ));
    }

    let (dcf_start_value, base_value_source) = match (dcf_start_value, operating_cash_flow) {
        (Some(v), _) => (v, BaseValueSource::Provided),
        (None, Some(ocf)) => {
            let derived = derive_free_cash_flow(ocf, &raw.statements);
            if !derived.is_finite() {
                return Err(ValuationError::invalid_input(
                    "dcf_start_value",
                    format!("derived from statements as {derived}"),
                ));
            }
            (derived, BaseValueSource::DerivedFromStatements)
        }
        (None, None) => {
            return Err(ValuationError::InsufficientData {
                field: "dcf_start_value",
            });
        }
    };

    let mut warnings = Vec::new();
    if dcf_start_value < 0.0 {
        warnings.push(ValuationWarning::NegativeBaseValue {
            value: dcf_start_value,
        });
    }

    debug!(
        symbol = %raw.symbol,
        dcf_start_value,
        ?base_value_source,
        debt,
        cash,
        minority_interests,
        shares_outstanding,
        "normalized financial inputs"
    );

    Ok(NormalizedFinancials {
        inputs: FinancialInputs {
            symbol: raw.symbol.clone(),
            dcf_start_value,
            debt,
            cash,
            minority_interests,
            shares_outstanding,
            current_price,
            base_value_source,
            data_quality: DataQuality::assess(raw),
        },
        warnings,
    })
}

/// Operating cash flow minus capital expenditure.
///
/// Capex is taken as a magnitude. When it is absent or zero the magnitude of
/// investing cash flow stands in for it.
fn derive_free_cash_flow(operating_cash_flow: f64, statements: &StatementFigures) -> f64 {
    let capex = statements
        .capital_expenditure
        .map(f64::abs)
        .filter(|c| *c > 0.0)
        .or_else(|| statements.investing_cash_flow.map(f64::abs))
        .unwrap_or(0.0);
    operating_cash_flow - capex
}

fn finite(field: &'static str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(ValuationError::invalid_input(
            field,
            format!("must be finite, got {v}"),
        )),
        other => Ok(other),
    }
}

/// A disclosed balance must be non-negative; an undisclosed one is zero.
fn balance(field: &'static str, value: Option<f64>) -> Result<f64> {
    match finite(field, value)? {
        Some(v) if v < 0.0 => Err(ValuationError::invalid_input(
            field,
            format!("must be non-negative, got {v}"),
        )),
        Some(v) => Ok(v),
        None => Ok(0.0),
    }
}
