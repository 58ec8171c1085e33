//! Table Valuation
//!
//! Values a small universe from a fundamentals table using the latest
//! filing on or before the valuation date.
//!
//! ## Running
//!
//! ```bash
//! cargo run --example table_valuation
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use intrinsic::dcf::DcfValueConfig;
use intrinsic::prelude::*;
use polars::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    let df = df! {
        "symbol" => &["AAA", "AAA", "BBB", "CCC", "DDD"],
        "date" => &[
            date(2023, 12, 31),
            date(2024, 12, 31),
            date(2024, 12, 31),
            date(2024, 9, 30),
            date(2024, 12, 31),
        ],
        "free_cash_flow" => &[90.0, 100.0, 420.0, 35.0, 60.0],
        "shares_outstanding" => &[Some(100.0), Some(100.0), Some(800.0), Some(55.0), None],
        "total_liabilities" => &[50.0, 50.0, 900.0, 10.0, 0.0],
        "cash" => &[20.0, 20.0, 150.0, 40.0, 0.0],
        "price" => &[Some(15.0), Some(17.5), Some(6.2), None, Some(3.0)],
    }?;
    let table = FundamentalsTable::new(df);

    let valuator = DcfValue::new(DcfValueConfig {
        overrides: AssumptionOverrides {
            growth_rate: Some(0.06),
            ..AssumptionOverrides::default()
        },
        ..DcfValueConfig::default()
    });

    // DDD has no share count; it is skipped with a warning.
    let values = valuator.value(&table, date(2025, 1, 31))?;

    let symbols = values.column("symbol")?.as_materialized_series().str()?.clone();
    let intrinsic = values.column("intrinsic_value")?.as_materialized_series().f64()?.clone();
    let target = values.column("target_price")?.as_materialized_series().f64()?.clone();
    let upside = values.column("upside")?.as_materialized_series().f64()?.clone();

    println!("{} as of 2025-01-31", valuator.name());
    println!("{:<8}{:>12}{:>12}{:>10}", "symbol", "value", "target", "upside");
    for i in 0..values.height() {
        let upside = upside
            .get(i)
            .map_or_else(|| "-".to_string(), |u| format!("{:.1}%", u * 100.0));
        println!(
            "{:<8}{:>12.2}{:>12.2}{:>10}",
            symbols.get(i).unwrap_or_default(),
            intrinsic.get(i).unwrap_or(f64::NAN),
            target.get(i).unwrap_or(f64::NAN),
            upside
        );
    }
    Ok(())
}
