//! Cash flow projector.

use crate::assumptions::{check_above_minus_one, check_projection_years, year_exponent};
use intrinsic_traits::Result;
use serde::{Deserialize, Serialize};

/// One year of the explicit projection window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedCashFlow {
    /// Year index, starting at 1 for the nearest year.
    pub year: u32,
    /// Undiscounted free cash flow for the year.
    pub free_cash_flow: f64,
    /// `1 / (1 + discount_rate)^year`.
    pub discount_factor: f64,
    /// `free_cash_flow * discount_factor`.
    pub present_value: f64,
}

/// Project undiscounted free cash flows at a constant compound growth rate.
///
/// Returns `projection_years` values where element `i` is
/// `start * (1 + growth_rate)^(i + 1)`.
///
/// # Errors
///
/// Returns [`intrinsic_traits::ValuationError::InvalidAssumption`] if
/// `growth_rate <= -1` or `projection_years` is 0 or above
/// [`crate::assumptions::MAX_PROJECTION_YEARS`].
pub fn project_cash_flows(
    start: f64,
    growth_rate: f64,
    projection_years: u32,
) -> Result<Vec<f64>> {
    check_above_minus_one("growth_rate", growth_rate)?;
    check_projection_years(projection_years)?;

    let factor = 1.0 + growth_rate;
    (1..=projection_years)
        .map(|year| Ok(start * factor.powi(year_exponent(year)?)))
        .collect()
}
