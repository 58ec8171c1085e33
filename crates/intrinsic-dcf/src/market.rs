//! Comparison of intrinsic value against the market price.

use serde::{Deserialize, Serialize};

/// Investment recommendation bucketed on upside to intrinsic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    /// Upside above 50%.
    StrongBuy,
    /// Upside above 20%.
    Buy,
    /// Upside between -10% and 20%.
    Hold,
    /// Downside between 10% and 20%.
    Sell,
    /// Downside beyond 20%.
    StrongSell,
}

impl Recommendation {
    /// Bucket a fractional upside (`0.25` = 25% upside).
    #[must_use]
    pub fn from_upside(upside: f64) -> Self {
        if upside > 0.5 {
            Self::StrongBuy
        } else if upside > 0.2 {
            Self::Buy
        } else if upside >= -0.1 {
            Self::Hold
        } else if upside >= -0.2 {
            Self::Sell
        } else {
            Self::StrongSell
        }
    }
}

/// Intrinsic value set against the current market price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketComparison {
    /// The market price used.
    pub current_price: f64,
    /// `(intrinsic - price) / price`.
    pub upside: f64,
    /// `(intrinsic - price) / intrinsic * 100`; `None` when intrinsic value
    /// is zero.
    pub margin_of_safety_pct: Option<f64>,
    /// Recommendation derived from `upside`.
    pub recommendation: Recommendation,
}

impl MarketComparison {
    /// Compare `intrinsic_value_per_share` with a positive `current_price`.
    #[must_use]
    pub fn new(intrinsic_value_per_share: f64, current_price: f64) -> Self {
        let gap = intrinsic_value_per_share - current_price;
        let upside = gap / current_price;
        let margin_of_safety_pct =
            (intrinsic_value_per_share != 0.0).then(|| gap / intrinsic_value_per_share * 100.0);

        Self {
            current_price,
            upside,
            margin_of_safety_pct,
            recommendation: Recommendation::from_upside(upside),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recommendation_buckets() {
        assert_eq!(Recommendation::from_upside(0.8), Recommendation::StrongBuy);
        assert_eq!(Recommendation::from_upside(0.3), Recommendation::Buy);
        assert_eq!(Recommendation::from_upside(0.15), Recommendation::Hold);
        assert_eq!(Recommendation::from_upside(-0.1), Recommendation::Hold);
        assert_eq!(Recommendation::from_upside(-0.15), Recommendation::Sell);
        assert_eq!(Recommendation::from_upside(-0.5), Recommendation::StrongSell);
    }

    #[test]
    fn test_comparison() {
        let m = MarketComparison::new(150.0, 100.0);
        assert_relative_eq!(m.upside, 0.5);
        assert_relative_eq!(m.margin_of_safety_pct.unwrap(), 100.0 / 3.0, epsilon = 1e-12);
        assert_eq!(m.recommendation, Recommendation::Buy);
    }

    #[test]
    fn test_zero_intrinsic_has_no_margin_pct() {
        let m = MarketComparison::new(0.0, 10.0);
        assert!(m.margin_of_safety_pct.is_none());
        assert_relative_eq!(m.upside, -1.0);
        assert_eq!(m.recommendation, Recommendation::StrongSell);
    }

    #[test]
    fn test_recommendation_serializes_screaming() {
        let json = serde_json::to_string(&Recommendation::StrongBuy).unwrap();
        assert_eq!(json, "\"STRONG_BUY\"");
    }
}
