//! Single-stage discounted cash flow valuation.
//!
//! The pipeline runs leaf-first, every stage a pure function of its inputs:
//!
//! 1. [`normalize`] validates raw provider data into [`FinancialInputs`]
//! 2. [`project_cash_flows`] compounds the base cash flow over the horizon
//! 3. [`terminal_value`] applies the Gordon growth model at the horizon
//! 4. [`discount`] brings both to present value (enterprise value)
//! 5. [`EquityBridge`] reconciles to equity and per-share value
//! 6. [`analyze`] optionally repeats 2–5 over a growth × discount grid
//!
//! [`DcfEngine`] wires these together behind a single entry point.
//!
//! # Example
//!
//! ```ignore
//! use intrinsic_dcf::{AssumptionOverrides, DcfDefaults, DcfEngine, RawFinancials};
//!
//! let engine = DcfEngine::new(DcfDefaults::default());
//! let raw = RawFinancials {
//!     dcf_start_value: Some(100.0),
//!     shares_outstanding: Some(100.0),
//!     ..RawFinancials::new("AAPL")
//! };
//! let valuation = engine.value(&raw, &AssumptionOverrides::default())?;
//! println!("{:.2}", valuation.intrinsic_value_per_share);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod assumptions;
pub mod bridge;
pub mod discount;
pub mod engine;
pub mod inputs;
pub mod market;
pub mod normalize;
pub mod projection;
pub mod quality;
pub mod sensitivity;
pub mod table;
pub mod terminal;
pub mod warning;

pub use assumptions::{AssumptionOverrides, DcfAssumptions, DcfDefaults, MAX_PROJECTION_YEARS};
pub use bridge::EquityBridge;
pub use discount::{DiscountedCashFlows, discount};
pub use engine::{DcfEngine, ValuationReport, ValuationResult, evaluate};
pub use inputs::{BaseValueSource, FinancialInputs, RawFinancials, StatementFigures};
pub use market::{MarketComparison, Recommendation};
pub use normalize::{NormalizedFinancials, normalize};
pub use projection::{ProjectedCashFlow, project_cash_flows};
pub use quality::{DataQuality, Reliability};
pub use sensitivity::{
    MAX_GRID_CELLS, SensitivityAxes, SensitivityGrid, SweepPoint, TERMINAL_GROWTH_DELTAS, analyze,
    sweep_terminal_growth,
};
pub use table::{DcfValue, DcfValueConfig};
pub use terminal::terminal_value;
pub use warning::ValuationWarning;
