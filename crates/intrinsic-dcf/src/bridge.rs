//! Equity bridge: enterprise value to per-share value.

use crate::{assumptions::check_margin_of_safety, inputs::FinancialInputs};
use intrinsic_traits::Result;
use serde::{Deserialize, Serialize};

/// Equity-side figures derived from an enterprise value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityBridge {
    /// `enterprise_value - debt + cash - minority_interests`.
    pub equity_value: f64,
    /// `equity_value / shares_outstanding`. Negative values are kept as-is.
    pub intrinsic_value_per_share: f64,
    /// `intrinsic_value_per_share * (1 - margin_of_safety)`.
    pub target_price: f64,
}

impl EquityBridge {
    /// Reconcile `enterprise_value` to per-share value for `inputs`.
    ///
    /// A negative equity value is returned unclamped; it means the
    /// assumptions leave nothing for common shareholders.
    ///
    /// # Errors
    ///
    /// Returns [`intrinsic_traits::ValuationError::InvalidAssumption`] if
    /// `margin_of_safety` is outside `[0, 1)`.
    pub fn compute(
        enterprise_value: f64,
        inputs: &FinancialInputs,
        margin_of_safety: f64,
    ) -> Result<Self> {
        check_margin_of_safety(margin_of_safety)?;

        let equity_value =
            enterprise_value - inputs.debt() + inputs.cash() - inputs.minority_interests();
        let intrinsic_value_per_share = equity_value / inputs.shares_outstanding();

        Ok(Self {
            equity_value,
            intrinsic_value_per_share,
            target_price: intrinsic_value_per_share * (1.0 - margin_of_safety),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{inputs::RawFinancials, normalize::normalize};
    use approx::assert_relative_eq;

    fn inputs(debt: f64, cash: f64, minority: f64, shares: f64) -> FinancialInputs {
        let raw = RawFinancials {
            dcf_start_value: Some(1.0),
            debt: Some(debt),
            cash: Some(cash),
            minority_interests: Some(minority),
            shares_outstanding: Some(shares),
            ..RawFinancials::new("TEST")
        };
        normalize(&raw).unwrap().inputs
    }

    #[test]
    fn test_bridge_adjustments() {
        let b = EquityBridge::compute(1000.0, &inputs(50.0, 20.0, 10.0, 4.0), 0.25).unwrap();
        assert_relative_eq!(b.equity_value, 960.0);
        assert_relative_eq!(b.intrinsic_value_per_share, 240.0);
        assert_relative_eq!(b.target_price, 180.0);
    }

    #[test]
    fn test_negative_equity_not_clamped() {
        let b = EquityBridge::compute(100.0, &inputs(500.0, 0.0, 0.0, 10.0), 0.2).unwrap();
        assert_relative_eq!(b.equity_value, -400.0);
        assert_relative_eq!(b.intrinsic_value_per_share, -40.0);
        assert_relative_eq!(b.target_price, -32.0);
    }

    #[test]
    fn test_margin_of_safety_exact_scaling() {
        let inp = inputs(0.0, 0.0, 0.0, 3.0);
        for mos in [0.0, 0.1, 0.25, 0.5, 0.999] {
            let b = EquityBridge::compute(1234.5, &inp, mos).unwrap();
            assert_eq!(b.target_price, b.intrinsic_value_per_share * (1.0 - mos));
        }
    }

    #[test]
    fn test_margin_of_safety_out_of_range() {
        let inp = inputs(0.0, 0.0, 0.0, 1.0);
        assert!(EquityBridge::compute(10.0, &inp, 1.0).is_err());
        assert!(EquityBridge::compute(10.0, &inp, -0.01).is_err());
    }
}
