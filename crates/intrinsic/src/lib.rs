#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # intrinsic
//!
//! Discounted cash flow valuation for equities.
//!
//! intrinsic is an umbrella crate that re-exports the intrinsic sub-crates
//! for convenience: the shared error and table types, and the DCF engine.
//!
//! ## Quick Start
//!
//! ```ignore
//! use intrinsic::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let engine = DcfEngine::default();
//! let raw = RawFinancials {
//!     dcf_start_value: Some(100.0),
//!     debt: Some(50.0),
//!     cash: Some(20.0),
//!     shares_outstanding: Some(100.0),
//!     ..RawFinancials::new("ACME")
//! };
//!
//! let valuation = engine.value(&raw, &AssumptionOverrides::default())?;
//! println!("{:.2}", valuation.intrinsic_value_per_share);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Error taxonomy, shared types and the [`Valuator`] trait
//! - [`dcf`] - Normalizer, projection, terminal value, discounting, equity
//!   bridge and sensitivity analysis
//!
//! ## Pipeline
//!
//! 1. **Normalize** raw provider figures into validated inputs
//! 2. **Project** free cash flow over the explicit horizon
//! 3. **Terminal value** by perpetuity growth at the horizon
//! 4. **Discount** both to enterprise value
//! 5. **Bridge** to equity value, per-share value and target price
//! 6. **Sensitivity** grids over growth and discount rates (optional)

/// Version information for the intrinsic crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Shared types and traits.
///
/// - [`ValuationError`] - Error taxonomy for every valuation stage
/// - [`FundamentalsTable`] - Point-in-time fundamentals for many companies
/// - [`Valuator`] - Values every company in a table at once
pub mod traits {
    pub use intrinsic_traits::*;
}

pub use intrinsic_traits::{Date, FundamentalsTable, Result, Symbol, ValuationError, Valuator};

// ============================================================================
// DCF Engine
// ============================================================================

/// Single-stage discounted cash flow engine.
///
/// ## Formulas
///
/// ```text
/// FCF_t  = FCF_0 * (1 + g)^t
/// TV     = FCF_N * (1 + g_T) / (r - g_T)
/// EV     = sum(FCF_t / (1 + r)^t) + TV / (1 + r)^N
/// Equity = EV - debt + cash - minority interests
/// ```
///
/// # Example
///
/// ```ignore
/// use intrinsic::dcf::{DcfEngine, SensitivityAxes};
///
/// let report = DcfEngine::default()
///     .value_with_sensitivity(&raw, &overrides, &SensitivityAxes::default())?;
/// ```
pub mod dcf {
    pub use intrinsic_dcf::*;
}

pub use intrinsic_dcf::{
    AssumptionOverrides, DcfAssumptions, DcfDefaults, DcfEngine, DcfValue, RawFinancials,
    SensitivityAxes, SensitivityGrid, ValuationReport, ValuationResult, ValuationWarning,
};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use intrinsic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AssumptionOverrides, DcfAssumptions, DcfDefaults, DcfEngine, DcfValue, RawFinancials,
        SensitivityAxes, SensitivityGrid, ValuationReport, ValuationResult, ValuationWarning,
    };
    pub use crate::{Date, FundamentalsTable, Symbol, Valuator};
    pub use crate::{Result, ValuationError};
}
