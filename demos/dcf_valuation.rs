//! Single Company DCF Valuation
//!
//! Values one company from statement figures, compares the result against
//! its market price and prints the full structured record as JSON.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=intrinsic_dcf=debug cargo run --example dcf_valuation
//! ```
//!
//! Assumption defaults can be supplied as a JSON file:
//!
//! ```bash
//! cargo run --example dcf_valuation -- defaults.json
//! ```

use anyhow::{Context, Result};
use intrinsic::dcf::StatementFigures;
use intrinsic::prelude::*;
use std::{env, fs};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let defaults = match env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            DcfDefaults::from_json(&json)?
        }
        None => DcfDefaults::default(),
    };
    let engine = DcfEngine::new(defaults);

    // Figures in millions; no free cash flow reported, so it is derived.
    let raw = RawFinancials {
        debt: Some(1_250.0),
        cash: Some(430.0),
        minority_interests: Some(15.0),
        shares_outstanding: Some(310.0),
        current_price: Some(42.5),
        statements: StatementFigures {
            operating_cash_flow: Some(1_180.0),
            capital_expenditure: Some(-340.0),
            investing_cash_flow: None,
        },
        ..RawFinancials::new("ACME")
    };

    let overrides = AssumptionOverrides {
        growth_rate: Some(0.07),
        discount_rate: Some(0.09),
        ..AssumptionOverrides::default()
    };

    let valuation = engine.value(&raw, &overrides)?;

    println!("{} ({:?})", valuation.symbol, valuation.base_value_source);
    println!("  Enterprise value:   {:>12.1}", valuation.enterprise_value);
    println!("  Equity value:       {:>12.1}", valuation.equity_value);
    println!("  Value per share:    {:>12.2}", valuation.intrinsic_value_per_share);
    println!("  Target price:       {:>12.2}", valuation.target_price);
    if let Some(market) = &valuation.market {
        println!("  Upside:             {:>11.1}%", market.upside * 100.0);
        println!("  Recommendation:     {:?}", market.recommendation);
    }
    for warning in &valuation.warnings {
        println!("  warning: {warning}");
    }

    println!("\n{}", serde_json::to_string_pretty(&valuation)?);
    Ok(())
}
