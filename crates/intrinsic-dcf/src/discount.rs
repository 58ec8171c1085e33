//! Discounting engine.

use crate::{
    assumptions::{check_above_minus_one, check_projection_years, year_exponent},
    projection::ProjectedCashFlow,
    warning::ValuationWarning,
};
use intrinsic_traits::Result;
use serde::{Deserialize, Serialize};

/// Present values of the explicit window and the terminal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountedCashFlows {
    /// Per-year detail, year 1 first.
    pub cash_flows: Vec<ProjectedCashFlow>,
    /// Sum of discounted explicit-period cash flows.
    pub pv_explicit: f64,
    /// Terminal value discounted with the final explicit year's exponent.
    pub pv_terminal: f64,
    /// `pv_explicit + pv_terminal`.
    pub enterprise_value: f64,
}

/// Discount a projected series and its terminal value to present value.
///
/// Year `t` (1-based) is divided by `(1 + discount_rate)^t`; the terminal
/// value uses exponent `N = fcf.len()`. A discount rate outside `(0, 1)` is
/// computed anyway and reported through `warnings`.
///
/// # Errors
///
/// Returns [`intrinsic_traits::ValuationError::InvalidAssumption`] if
/// `discount_rate <= -1`, or if `fcf` is empty or longer than
/// [`crate::assumptions::MAX_PROJECTION_YEARS`].
pub fn discount(
    fcf: &[f64],
    terminal_value: f64,
    discount_rate: f64,
    warnings: &mut Vec<ValuationWarning>,
) -> Result<DiscountedCashFlows> {
    check_above_minus_one("discount_rate", discount_rate)?;
    let horizon = u32::try_from(fcf.len()).unwrap_or(u32::MAX);
    check_projection_years(horizon)?;

    if discount_rate <= 0.0 {
        warnings.push(ValuationWarning::suspicious(
            "discount_rate",
            discount_rate,
            "non-positive cost of capital",
        ));
    } else if discount_rate >= 1.0 {
        warnings.push(ValuationWarning::suspicious(
            "discount_rate",
            discount_rate,
            "cost of capital of 100% or more",
        ));
    }

    let base = 1.0 + discount_rate;
    let cash_flows = fcf
        .iter()
        .zip(1u32..)
        .map(|(&free_cash_flow, year)| {
            let compounded = base.powi(year_exponent(year)?);
            Ok(ProjectedCashFlow {
                year,
                free_cash_flow,
                discount_factor: 1.0 / compounded,
                present_value: free_cash_flow / compounded,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let pv_explicit = cash_flows.iter().map(|cf| cf.present_value).sum::<f64>();
    let pv_terminal = terminal_value / base.powi(year_exponent(horizon)?);

    Ok(DiscountedCashFlows {
        cash_flows,
        pv_explicit,
        pv_terminal,
        enterprise_value: pv_explicit + pv_terminal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_reference_case() {
        let fcf = [110.0, 121.0, 133.1, 146.41, 161.051];
        let mut warnings = Vec::new();
        let d = discount(&fcf, 2369.750428571429, 0.10, &mut warnings).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(d.cash_flows.len(), 5);
        for cf in &d.cash_flows {
            assert_relative_eq!(cf.present_value, 100.0, epsilon = 1e-9);
        }
        assert_eq!(d.cash_flows[0].year, 1);
        assert_eq!(d.cash_flows[4].year, 5);
        assert_relative_eq!(d.cash_flows[0].discount_factor, 1.0 / 1.1, epsilon = 1e-12);
        assert_relative_eq!(d.pv_explicit, 500.0, epsilon = 1e-9);
        assert_relative_eq!(d.pv_terminal, 1471.4285714285713, epsilon = 1e-9);
        assert_relative_eq!(d.enterprise_value, 1971.4285714285713, epsilon = 1e-9);
    }

    #[test]
    fn test_suspicious_rates_warn_but_compute() {
        let mut warnings = Vec::new();
        let d = discount(&[10.0], 0.0, -0.05, &mut warnings).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(d.pv_explicit > 10.0);

        let mut warnings = Vec::new();
        discount(&[10.0], 0.0, 1.5, &mut warnings).unwrap();
        assert!(matches!(
            warnings.as_slice(),
            [ValuationWarning::SuspiciousAssumption { field, .. }] if field == "discount_rate"
        ));
    }

    #[test]
    fn test_rate_at_minus_one_rejected() {
        let mut warnings = Vec::new();
        assert!(discount(&[10.0], 0.0, -1.0, &mut warnings).is_err());
    }

    #[test]
    fn test_empty_series_rejected() {
        let mut warnings = Vec::new();
        assert!(discount(&[], 100.0, 0.1, &mut warnings).is_err());
    }

    #[test]
    fn test_overlong_series_rejected() {
        let mut warnings = Vec::new();
        let fcf = vec![1.0; 101];
        let err = discount(&fcf, 100.0, 0.1, &mut warnings).unwrap_err();
        assert_eq!(err.field(), Some("projection_years"));
    }
}
