//! Valuation assumptions and their defaults.
//!
//! [`DcfAssumptions`] is the only assumption type the engine computes with.
//! It can only be obtained through [`DcfAssumptions::new`] (or
//! [`AssumptionOverrides::resolve`], which calls it), so every instance in
//! circulation already satisfies the engine's hard preconditions.

use intrinsic_traits::{Result, ValuationError};
use serde::{Deserialize, Serialize};

/// Longest explicit projection horizon accepted, in years.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Default assumptions applied to any field a caller leaves unspecified.
///
/// This is plain configuration passed explicitly to [`crate::DcfEngine`];
/// separate engines may hold different defaults side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcfDefaults {
    /// Growth rate over the explicit window (default: 0.10)
    pub growth_rate: f64,

    /// Discount rate / cost of capital (default: 0.10)
    pub discount_rate: f64,

    /// Perpetuity growth rate after the horizon (default: 0.03)
    pub terminal_growth_rate: f64,

    /// Haircut applied to intrinsic value (default: 0.25)
    pub margin_of_safety: f64,

    /// Explicit projection horizon in years (default: 5)
    pub projection_years: u32,
}

impl Default for DcfDefaults {
    fn default() -> Self {
        Self {
            growth_rate: 0.10,
            discount_rate: 0.10,
            terminal_growth_rate: 0.03,
            margin_of_safety: 0.25,
            projection_years: 5,
        }
    }
}

impl DcfDefaults {
    /// Parse defaults from a JSON document. Absent fields keep their
    /// built-in values.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `json` is not a valid defaults document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Validate the defaults as a complete assumption set.
    ///
    /// # Errors
    ///
    /// See [`DcfAssumptions::new`].
    pub fn to_assumptions(&self) -> Result<DcfAssumptions> {
        DcfAssumptions::new(
            self.growth_rate,
            self.discount_rate,
            self.terminal_growth_rate,
            self.margin_of_safety,
            self.projection_years,
        )
    }
}

/// Caller-supplied assumption overrides; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionOverrides {
    /// Growth rate over the explicit window.
    pub growth_rate: Option<f64>,
    /// Discount rate.
    pub discount_rate: Option<f64>,
    /// Perpetuity growth rate.
    pub terminal_growth_rate: Option<f64>,
    /// Margin of safety fraction.
    pub margin_of_safety: Option<f64>,
    /// Projection horizon. Arrives untyped from the wire, so it is checked
    /// for being a whole positive number during resolution.
    pub projection_years: Option<f64>,
}

impl AssumptionOverrides {
    /// Merge the overrides over `defaults` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidAssumption`] if `projection_years` is
    /// not a whole number in `1..=MAX_PROJECTION_YEARS`, or if the merged set violates any
    /// precondition of [`DcfAssumptions::new`].
    pub fn resolve(&self, defaults: &DcfDefaults) -> Result<DcfAssumptions> {
        let projection_years = match self.projection_years {
            Some(years) => whole_years(years)?,
            None => defaults.projection_years,
        };

        DcfAssumptions::new(
            self.growth_rate.unwrap_or(defaults.growth_rate),
            self.discount_rate.unwrap_or(defaults.discount_rate),
            self.terminal_growth_rate
                .unwrap_or(defaults.terminal_growth_rate),
            self.margin_of_safety.unwrap_or(defaults.margin_of_safety),
            projection_years,
        )
    }
}

fn whole_years(years: f64) -> Result<u32> {
    if !years.is_finite() || years.fract() != 0.0 {
        return Err(ValuationError::invalid_assumption(
            "projection_years",
            format!("must be a whole number of years, got {years}"),
        ));
    }
    if years < 1.0 || years > f64::from(MAX_PROJECTION_YEARS) {
        return Err(ValuationError::invalid_assumption(
            "projection_years",
            format!("must be between 1 and {MAX_PROJECTION_YEARS}, got {years}"),
        ));
    }
    Ok(years as u32)
}

/// A fully validated set of DCF assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DcfAssumptions {
    growth_rate: f64,
    discount_rate: f64,
    terminal_growth_rate: f64,
    margin_of_safety: f64,
    projection_years: u32,
}

impl DcfAssumptions {
    /// Build a validated assumption set.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidAssumption`] naming the field when:
    /// - any rate is NaN or infinite
    /// - `growth_rate <= -1` or `discount_rate <= -1`
    /// - `terminal_growth_rate <= -1`
    /// - `terminal_growth_rate >= discount_rate`
    /// - `margin_of_safety` is outside `[0, 1)`
    /// - `projection_years` is 0 or above [`MAX_PROJECTION_YEARS`]
    pub fn new(
        growth_rate: f64,
        discount_rate: f64,
        terminal_growth_rate: f64,
        margin_of_safety: f64,
        projection_years: u32,
    ) -> Result<Self> {
        for (field, value) in [
            ("growth_rate", growth_rate),
            ("discount_rate", discount_rate),
            ("terminal_growth_rate", terminal_growth_rate),
            ("margin_of_safety", margin_of_safety),
        ] {
            if !value.is_finite() {
                return Err(ValuationError::invalid_assumption(
                    field,
                    format!("must be finite, got {value}"),
                ));
            }
        }

        check_above_minus_one("growth_rate", growth_rate)?;
        check_above_minus_one("discount_rate", discount_rate)?;
        check_above_minus_one("terminal_growth_rate", terminal_growth_rate)?;
        check_terminal_below_discount(terminal_growth_rate, discount_rate)?;
        check_margin_of_safety(margin_of_safety)?;
        check_projection_years(projection_years)?;

        Ok(Self {
            growth_rate,
            discount_rate,
            terminal_growth_rate,
            margin_of_safety,
            projection_years,
        })
    }

    /// Growth rate over the explicit window.
    #[must_use]
    pub const fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    /// Discount rate.
    #[must_use]
    pub const fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Perpetuity growth rate.
    #[must_use]
    pub const fn terminal_growth_rate(&self) -> f64 {
        self.terminal_growth_rate
    }

    /// Margin of safety fraction.
    #[must_use]
    pub const fn margin_of_safety(&self) -> f64 {
        self.margin_of_safety
    }

    /// Explicit projection horizon in years.
    #[must_use]
    pub const fn projection_years(&self) -> u32 {
        self.projection_years
    }

    /// Copy with a different growth and discount rate, revalidated.
    ///
    /// # Errors
    ///
    /// See [`DcfAssumptions::new`].
    pub fn with_rates(&self, growth_rate: f64, discount_rate: f64) -> Result<Self> {
        Self::new(
            growth_rate,
            discount_rate,
            self.terminal_growth_rate,
            self.margin_of_safety,
            self.projection_years,
        )
    }

    /// Copy with a different terminal growth rate, revalidated.
    ///
    /// # Errors
    ///
    /// See [`DcfAssumptions::new`].
    pub fn with_terminal_growth_rate(&self, terminal_growth_rate: f64) -> Result<Self> {
        Self::new(
            self.growth_rate,
            self.discount_rate,
            terminal_growth_rate,
            self.margin_of_safety,
            self.projection_years,
        )
    }
}

pub(crate) fn check_above_minus_one(field: &'static str, rate: f64) -> Result<()> {
    if rate <= -1.0 {
        return Err(ValuationError::invalid_assumption(
            field,
            format!("must be greater than -100%, got {rate}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_terminal_below_discount(
    terminal_growth_rate: f64,
    discount_rate: f64,
) -> Result<()> {
    if terminal_growth_rate >= discount_rate {
        return Err(ValuationError::invalid_assumption(
            "terminal_growth_rate",
            format!(
                "must be strictly below discount_rate ({discount_rate}), got {terminal_growth_rate}"
            ),
        ));
    }
    Ok(())
}

pub(crate) fn check_margin_of_safety(margin_of_safety: f64) -> Result<()> {
    if !(0.0..1.0).contains(&margin_of_safety) {
        return Err(ValuationError::invalid_assumption(
            "margin_of_safety",
            format!("must lie in [0, 1), got {margin_of_safety}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_projection_years(projection_years: u32) -> Result<()> {
    if projection_years == 0 || projection_years > MAX_PROJECTION_YEARS {
        return Err(ValuationError::invalid_assumption(
            "projection_years",
            format!("must be between 1 and {MAX_PROJECTION_YEARS}, got {projection_years}"),
        ));
    }
    Ok(())
}

/// `powi` exponent for a year index within the checked horizon.
pub(crate) fn year_exponent(year: u32) -> Result<i32> {
    i32::try_from(year).map_err(|_| {
        ValuationError::invalid_assumption(
            "projection_years",
            format!("year {year} is beyond the supported horizon"),
        )
    })
}
