//! Terminal value via the Gordon growth model.

use crate::assumptions::check_terminal_below_discount;
use intrinsic_traits::Result;

/// Value at the end of the explicit horizon of all cash flows beyond it.
///
/// `final_year_fcf * (1 + terminal_growth_rate) / (discount_rate - terminal_growth_rate)`,
/// expressed as of year N and not yet discounted.
///
/// # Errors
///
/// Returns [`intrinsic_traits::ValuationError::InvalidAssumption`] unless
/// `discount_rate > terminal_growth_rate`. The check is repeated here so the
/// function is safe to call on its own.
pub fn terminal_value(
    final_year_fcf: f64,
    terminal_growth_rate: f64,
    discount_rate: f64,
) -> Result<f64> {
    check_terminal_below_discount(terminal_growth_rate, discount_rate)?;
    Ok(final_year_fcf * (1.0 + terminal_growth_rate) / (discount_rate - terminal_growth_rate))
}
