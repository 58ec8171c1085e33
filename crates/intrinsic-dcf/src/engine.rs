//! The valuation pipeline and its entry point.
//!
//! [`evaluate`] runs projection, terminal value, discounting and the equity
//! bridge on already-validated inputs. [`DcfEngine`] adds normalization and
//! assumption resolution in front of it and is what request handlers call.

use crate::{
    assumptions::{AssumptionOverrides, DcfAssumptions, DcfDefaults},
    bridge::EquityBridge,
    discount::discount,
    inputs::{BaseValueSource, FinancialInputs, RawFinancials},
    market::MarketComparison,
    normalize::normalize,
    projection::{ProjectedCashFlow, project_cash_flows},
    quality::DataQuality,
    sensitivity::{SensitivityAxes, SensitivityGrid, analyze},
    terminal::terminal_value,
    warning::ValuationWarning,
};
use intrinsic_traits::{Result, Symbol, ValuationError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Output of a single valuation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Company identifier.
    pub symbol: Symbol,
    /// Growth rate used.
    pub growth_rate: f64,
    /// Discount rate used.
    pub discount_rate: f64,
    /// Terminal growth rate used.
    pub terminal_growth_rate: f64,
    /// Margin of safety used.
    pub margin_of_safety: f64,
    /// Base-year free cash flow.
    pub dcf_start_value: f64,
    /// Provenance of the base-year free cash flow.
    pub base_value_source: BaseValueSource,
    /// Explicit-period cash flows, year 1 first.
    pub projected_cash_flows: Vec<ProjectedCashFlow>,
    /// Sum of discounted explicit-period cash flows.
    pub pv_explicit: f64,
    /// Terminal value as of the final explicit year, undiscounted.
    pub terminal_value: f64,
    /// Discounted terminal value.
    pub pv_terminal: f64,
    /// `pv_explicit + pv_terminal`.
    pub enterprise_value: f64,
    /// Enterprise value less debt and minority interests plus cash.
    pub equity_value: f64,
    /// Equity value per share. May be negative.
    pub intrinsic_value_per_share: f64,
    /// Per-share value after the margin-of-safety haircut.
    pub target_price: f64,
    /// Comparison with the market price, when one was supplied.
    pub market: Option<MarketComparison>,
    /// Completeness of the raw data.
    pub data_quality: DataQuality,
    /// Non-fatal cautions, in the order they were raised.
    pub warnings: Vec<ValuationWarning>,
}

impl ValuationResult {
    /// Number of explicit projection years.
    #[must_use]
    pub fn projection_years(&self) -> usize {
        self.projected_cash_flows.len()
    }

    /// Whether any warning was raised.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A valuation together with its optional sensitivity grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    /// The base-case valuation.
    pub valuation: ValuationResult,
    /// Per-share values across the requested assumption grid.
    pub sensitivity: Option<SensitivityGrid>,
}

/// Value validated inputs under validated assumptions.
///
/// This is the pure core of the engine. The returned warnings cover the
/// discounting stage only; normalization warnings are added by
/// [`DcfEngine`].
///
/// # Errors
///
/// - [`ValuationError::InvalidAssumption`] if a stage precondition fails.
///   Assumptions built through [`DcfAssumptions::new`] always pass.
/// - [`ValuationError::NonFiniteResult`] if the terminal value, enterprise
///   value, equity value or per-share value overflows.
pub fn evaluate(
    inputs: &FinancialInputs,
    assumptions: &DcfAssumptions,
) -> Result<ValuationResult> {
    let fcf = project_cash_flows(
        inputs.dcf_start_value(),
        assumptions.growth_rate(),
        assumptions.projection_years(),
    )?;

    let final_year_fcf = fcf.last().copied().unwrap_or(inputs.dcf_start_value());
    let terminal_value = ensure_finite(
        "terminal_value",
        terminal_value(
            final_year_fcf,
            assumptions.terminal_growth_rate(),
            assumptions.discount_rate(),
        )?,
    )?;

    let mut warnings = Vec::new();
    let discounted = discount(
        &fcf,
        terminal_value,
        assumptions.discount_rate(),
        &mut warnings,
    )?;
    ensure_finite("enterprise_value", discounted.enterprise_value)?;

    let bridge = EquityBridge::compute(
        discounted.enterprise_value,
        inputs,
        assumptions.margin_of_safety(),
    )?;
    ensure_finite("equity_value", bridge.equity_value)?;
    ensure_finite("intrinsic_value_per_share", bridge.intrinsic_value_per_share)?;

    let market = inputs
        .current_price()
        .map(|price| MarketComparison::new(bridge.intrinsic_value_per_share, price));

    debug!(
        symbol = inputs.symbol(),
        pv_explicit = discounted.pv_explicit,
        pv_terminal = discounted.pv_terminal,
        enterprise_value = discounted.enterprise_value,
        equity_value = bridge.equity_value,
        per_share = bridge.intrinsic_value_per_share,
        "valuation computed"
    );

    Ok(ValuationResult {
        symbol: inputs.symbol().to_string(),
        growth_rate: assumptions.growth_rate(),
        discount_rate: assumptions.discount_rate(),
        terminal_growth_rate: assumptions.terminal_growth_rate(),
        margin_of_safety: assumptions.margin_of_safety(),
        dcf_start_value: inputs.dcf_start_value(),
        base_value_source: inputs.base_value_source(),
        projected_cash_flows: discounted.cash_flows,
        pv_explicit: discounted.pv_explicit,
        terminal_value,
        pv_terminal: discounted.pv_terminal,
        enterprise_value: discounted.enterprise_value,
        equity_value: bridge.equity_value,
        intrinsic_value_per_share: bridge.intrinsic_value_per_share,
        target_price: bridge.target_price,
        market,
        data_quality: inputs.data_quality(),
        warnings,
    })
}

/// Entry point for valuation requests.
///
/// Holds only the default assumptions; every call is independent and the
/// engine can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct DcfEngine {
    defaults: DcfDefaults,
}

impl DcfEngine {
    /// Create an engine that falls back to `defaults` for unspecified
    /// assumptions.
    #[must_use]
    pub const fn new(defaults: DcfDefaults) -> Self {
        Self { defaults }
    }

    /// The default assumptions.
    #[must_use]
    pub const fn defaults(&self) -> &DcfDefaults {
        &self.defaults
    }

    /// Normalize `raw`, resolve `overrides` and value the company.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error from normalization, assumption
    /// resolution or any pipeline stage.
    pub fn value(
        &self,
        raw: &RawFinancials,
        overrides: &AssumptionOverrides,
    ) -> Result<ValuationResult> {
        let (inputs, assumptions, warnings) = self.prepare(raw, overrides)?;
        Ok(finish(evaluate(&inputs, &assumptions)?, warnings))
    }

    /// Like [`DcfEngine::value`], additionally computing a sensitivity grid
    /// from the same normalized inputs.
    ///
    /// # Errors
    ///
    /// Fails if the base case fails or `axes` is malformed. Individual grid
    /// cells never cause an error.
    pub fn value_with_sensitivity(
        &self,
        raw: &RawFinancials,
        overrides: &AssumptionOverrides,
        axes: &SensitivityAxes,
    ) -> Result<ValuationReport> {
        let (inputs, assumptions, warnings) = self.prepare(raw, overrides)?;
        let valuation = finish(evaluate(&inputs, &assumptions)?, warnings);
        let sensitivity = analyze(&inputs, &assumptions, axes)?;

        Ok(ValuationReport {
            valuation,
            sensitivity: Some(sensitivity),
        })
    }

    fn prepare(
        &self,
        raw: &RawFinancials,
        overrides: &AssumptionOverrides,
    ) -> Result<(FinancialInputs, DcfAssumptions, Vec<ValuationWarning>)> {
        let normalized = normalize(raw)?;
        let assumptions = overrides.resolve(&self.defaults)?;
        Ok((normalized.inputs, assumptions, normalized.warnings))
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValuationError::NonFiniteResult { field, value })
    }
}

/// Prepend normalization warnings and log the lot.
fn finish(mut result: ValuationResult, mut warnings: Vec<ValuationWarning>) -> ValuationResult {
    warnings.append(&mut result.warnings);
    for w in &warnings {
        warn!(symbol = %result.symbol, warning = %w, "valuation warning");
    }
    result.warnings = warnings;
    result
}
