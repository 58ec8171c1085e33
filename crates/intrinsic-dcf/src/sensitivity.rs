//! Sensitivity analysis over growth and discount rate grids.
//!
//! Every cell re-runs the full pipeline from the same normalized inputs. A
//! cell whose assumptions are invalid is left undefined; it never aborts the
//! grid.

use crate::{
    assumptions::DcfAssumptions,
    engine::evaluate,
    inputs::FinancialInputs,
};
use intrinsic_traits::{Result, ValuationError};
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest grid the analyzer accepts.
pub const MAX_GRID_CELLS: usize = 400;

/// Terminal growth offsets used by [`sweep_terminal_growth`] when the caller
/// has no preference.
pub const TERMINAL_GROWTH_DELTAS: [f64; 5] = [-0.01, -0.005, 0.0, 0.005, 0.01];

/// Grid axes expressed as offsets from the base-case rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityAxes {
    /// Offsets added to the base growth rate, one per grid row
    /// (default: -3% to +3% in 1% steps)
    pub growth_deltas: Vec<f64>,

    /// Offsets added to the base discount rate, one per grid column
    /// (default: -2% to +2% in 0.5% steps)
    pub discount_deltas: Vec<f64>,
}

impl Default for SensitivityAxes {
    fn default() -> Self {
        Self {
            growth_deltas: (-3..=3).map(|i| f64::from(i) * 0.01).collect(),
            discount_deltas: (-4..=4).map(|i| f64::from(i) * 0.005).collect(),
        }
    }
}

impl SensitivityAxes {
    /// Axes from explicit offsets.
    #[must_use]
    pub const fn new(growth_deltas: Vec<f64>, discount_deltas: Vec<f64>) -> Self {
        Self {
            growth_deltas,
            discount_deltas,
        }
    }

    /// Number of cells the grid will contain.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.growth_deltas.len() * self.discount_deltas.len()
    }

    fn validate(&self) -> Result<()> {
        if self.growth_deltas.is_empty() || self.discount_deltas.is_empty() {
            return Err(ValuationError::invalid_assumption(
                "sensitivity_axes",
                "both axes need at least one offset",
            ));
        }
        if self.cell_count() > MAX_GRID_CELLS {
            return Err(ValuationError::invalid_assumption(
                "sensitivity_axes",
                format!(
                    "{} cells requested, at most {MAX_GRID_CELLS} allowed",
                    self.cell_count()
                ),
            ));
        }
        if let Some(d) = self
            .growth_deltas
            .iter()
            .chain(&self.discount_deltas)
            .find(|d| !d.is_finite())
        {
            return Err(ValuationError::invalid_assumption(
                "sensitivity_axes",
                format!("offsets must be finite, got {d}"),
            ));
        }
        Ok(())
    }
}

/// Per-share values across a growth × discount rate grid.
///
/// Rows follow `growth_rates`, columns follow `discount_rates`. A `None`
/// cell means that combination violates an assumption precondition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityGrid {
    /// Growth rate for each row.
    pub growth_rates: Vec<f64>,
    /// Discount rate for each column.
    pub discount_rates: Vec<f64>,
    /// Terminal growth rate held fixed across the grid.
    pub terminal_growth_rate: f64,
    /// Intrinsic value per share for each cell.
    pub values: Array2<Option<f64>>,
}

impl SensitivityGrid {
    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Value at `(row, col)`; `None` if undefined or out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied().flatten()
    }

    /// Number of defined cells.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Number of undefined cells.
    #[must_use]
    pub fn undefined_count(&self) -> usize {
        self.values.len() - self.defined_count()
    }
}

/// Build a sensitivity grid around `base`.
///
/// Cells are evaluated in parallel; each one only reads `inputs` and writes
/// its own slot, so the result is identical to a sequential run.
///
/// # Errors
///
/// Returns [`ValuationError::InvalidAssumption`] if an axis is empty, an
/// offset is not finite, or the grid exceeds [`MAX_GRID_CELLS`].
pub fn analyze(
    inputs: &FinancialInputs,
    base: &DcfAssumptions,
    axes: &SensitivityAxes,
) -> Result<SensitivityGrid> {
    axes.validate()?;

    let growth_rates: Vec<f64> = axes
        .growth_deltas
        .iter()
        .map(|d| base.growth_rate() + d)
        .collect();
    let discount_rates: Vec<f64> = axes
        .discount_deltas
        .iter()
        .map(|d| base.discount_rate() + d)
        .collect();

    let shape = (growth_rates.len(), discount_rates.len());
    let mut values = Array2::<Option<f64>>::from_elem(shape, None);
    Zip::indexed(&mut values).par_for_each(|(row, col), cell| {
        *cell = base
            .with_rates(growth_rates[row], discount_rates[col])
            .and_then(|a| evaluate(inputs, &a))
            .ok()
            .map(|v| v.intrinsic_value_per_share);
    });

    let grid = SensitivityGrid {
        growth_rates,
        discount_rates,
        terminal_growth_rate: base.terminal_growth_rate(),
        values,
    };
    debug!(
        symbol = inputs.symbol(),
        cells = grid.values.len(),
        undefined = grid.undefined_count(),
        "sensitivity grid computed"
    );
    Ok(grid)
}

/// One point of a single-assumption sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// The assumption value at this point.
    pub rate: f64,
    /// Intrinsic value per share, `None` if the rate is invalid.
    pub value: Option<f64>,
}

/// Vary only the terminal growth rate by each of `deltas`.
///
/// Points where the terminal rate reaches the discount rate are undefined.
#[must_use]
pub fn sweep_terminal_growth(
    inputs: &FinancialInputs,
    base: &DcfAssumptions,
    deltas: &[f64],
) -> Vec<SweepPoint> {
    deltas
        .iter()
        .map(|d| {
            let rate = base.terminal_growth_rate() + d;
            let value = base
                .with_terminal_growth_rate(rate)
                .and_then(|a| evaluate(inputs, &a))
                .ok()
                .map(|v| v.intrinsic_value_per_share);
            SweepPoint { rate, value }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{inputs::RawFinancials, normalize::normalize};

    fn reference() -> (FinancialInputs, DcfAssumptions) {
        let raw = RawFinancials {
            dcf_start_value: Some(100.0),
            debt: Some(50.0),
            cash: Some(20.0),
            shares_outstanding: Some(100.0),
            ..RawFinancials::new("REF")
        };
        let inputs = normalize(&raw).unwrap().inputs;
        let base = DcfAssumptions::new(0.10, 0.10, 0.03, 0.25, 5).unwrap();
        (inputs, base)
    }

    #[test]
    fn test_default_axes() {
        let axes = SensitivityAxes::default();
        assert_eq!(axes.growth_deltas.len(), 7);
        assert_eq!(axes.discount_deltas.len(), 9);
        assert_eq!(axes.growth_deltas[3], 0.0);
        assert_eq!(axes.discount_deltas[4], 0.0);
        assert_eq!(axes.cell_count(), 63);
    }

    #[test]
    fn test_three_by_three_all_defined() {
        let (inputs, base) = reference();
        let axes = SensitivityAxes::new(vec![-0.01, 0.0, 0.01], vec![-0.01, 0.0, 0.01]);
        let grid = analyze(&inputs, &base, &axes).unwrap();
        assert_eq!(grid.shape(), (3, 3));
        assert_eq!(grid.defined_count(), 9);
    }

    #[test]
    fn test_invalid_cells_are_undefined() {
        let (inputs, base) = reference();
        // Column 0 lands at a discount rate of 0.02, below terminal growth.
        let axes = SensitivityAxes::new(vec![-0.01, 0.0, 0.01], vec![-0.08, 0.0, 0.01]);
        let grid = analyze(&inputs, &base, &axes).unwrap();
        assert_eq!(grid.defined_count(), 6);
        for row in 0..3 {
            assert!(grid.cell(row, 0).is_none());
            assert!(grid.cell(row, 1).is_some());
        }
    }

    #[test]
    fn test_grid_is_deterministic() {
        let (inputs, base) = reference();
        let axes = SensitivityAxes::default();
        let a = analyze(&inputs, &base, &axes).unwrap();
        let b = analyze(&inputs, &base, &axes).unwrap();
        let bits = |g: &SensitivityGrid| -> Vec<Option<u64>> {
            g.values.iter().map(|v| v.map(f64::to_bits)).collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_values_fall_along_discount_axis() {
        let (inputs, base) = reference();
        let grid = analyze(&inputs, &base, &SensitivityAxes::default()).unwrap();
        let (rows, cols) = grid.shape();
        for row in 0..rows {
            for col in 1..cols {
                let left = grid.cell(row, col - 1).unwrap();
                let right = grid.cell(row, col).unwrap();
                assert!(right < left, "row {row} col {col}: {right} !< {left}");
            }
        }
    }

    #[test]
    fn test_axes_validation() {
        let (inputs, base) = reference();
        let empty = SensitivityAxes::new(vec![], vec![0.0]);
        assert!(analyze(&inputs, &base, &empty).is_err());

        let huge = SensitivityAxes::new(vec![0.0; 21], vec![0.0; 20]);
        assert!(analyze(&inputs, &base, &huge).is_err());

        let nan = SensitivityAxes::new(vec![f64::NAN], vec![0.0]);
        assert!(analyze(&inputs, &base, &nan).is_err());
    }

    #[test]
    fn test_terminal_sweep() {
        let (inputs, base) = reference();
        let points = sweep_terminal_growth(&inputs, &base, &TERMINAL_GROWTH_DELTAS);
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.value.is_some()));
        assert!(points[4].value > points[0].value);

        let points = sweep_terminal_growth(&inputs, &base, &[0.08, 0.2]);
        assert!(points.iter().all(|p| p.value.is_none()));
    }
}
