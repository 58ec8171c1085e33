//! Sensitivity Grid
//!
//! Prints per-share value across growth and discount rates around a base
//! case, followed by a terminal growth sweep. Cells where the discount rate
//! does not exceed terminal growth are shown as `-`.
//!
//! ## Running
//!
//! ```bash
//! cargo run --example sensitivity_grid
//! ```

use anyhow::Result;
use intrinsic::dcf::{TERMINAL_GROWTH_DELTAS, normalize, sweep_terminal_growth};
use intrinsic::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let raw = RawFinancials {
        dcf_start_value: Some(100.0),
        debt: Some(50.0),
        cash: Some(20.0),
        shares_outstanding: Some(100.0),
        ..RawFinancials::new("REF")
    };
    let overrides = AssumptionOverrides {
        discount_rate: Some(0.045),
        ..AssumptionOverrides::default()
    };

    // Default axes reach below the 3% terminal growth rate.
    let report = DcfEngine::default().value_with_sensitivity(
        &raw,
        &overrides,
        &SensitivityAxes::default(),
    )?;
    let Some(grid) = report.sensitivity else {
        return Ok(());
    };

    print!("{:>8}", "g \\ r");
    for r in &grid.discount_rates {
        print!("{:>9.1}%", r * 100.0);
    }
    println!();
    for (row, g) in grid.growth_rates.iter().enumerate() {
        print!("{:>7.1}%", g * 100.0);
        for col in 0..grid.discount_rates.len() {
            match grid.cell(row, col) {
                Some(v) => print!("{v:>10.2}"),
                None => print!("{:>10}", "-"),
            }
        }
        println!();
    }
    println!(
        "\n{} of {} cells defined",
        grid.defined_count(),
        grid.values.len()
    );

    let inputs = normalize(&raw)?.inputs;
    let base = DcfAssumptions::new(0.10, 0.045, 0.03, 0.25, 5)?;
    println!("\nTerminal growth sweep (r = 4.5%):");
    for point in sweep_terminal_growth(&inputs, &base, &TERMINAL_GROWTH_DELTAS) {
        match point.value {
            Some(v) => println!("  {:>5.1}%  {v:>10.2}", point.rate * 100.0),
            None => println!("  {:>5.1}%  {:>10}", point.rate * 100.0, "-"),
        }
    }

    Ok(())
}
