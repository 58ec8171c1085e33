//! DCF valuation of every company in a fundamentals table.

use crate::{
    assumptions::{AssumptionOverrides, DcfDefaults},
    engine::DcfEngine,
    inputs::RawFinancials,
};
use chrono::Datelike;
use intrinsic_traits::{Date, FundamentalsTable, Result, ValuationError, Valuator};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Days between 0001-01-01 and 1970-01-01, the Polars date epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Configuration for the table-driven DCF valuator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DcfValueConfig {
    /// Defaults for unspecified assumptions.
    pub defaults: DcfDefaults,

    /// Assumption overrides applied to every company.
    pub overrides: AssumptionOverrides,

    /// Abort on the first company that cannot be valued instead of skipping
    /// it (default: false)
    pub fail_fast: bool,
}

/// Values each company in a [`FundamentalsTable`] with the DCF engine.
///
/// For every symbol the most recent row dated on or before `as_of` is used.
/// Output columns: `symbol`, `intrinsic_value`, `target_price`, and `upside`
/// (null when the table has no `price` for that row).
///
/// # Example
///
/// ```ignore
/// use intrinsic_dcf::DcfValue;
///
/// let valuator = DcfValue::default();
/// let values = valuator.value(&table, as_of)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DcfValue {
    engine: DcfEngine,
    config: DcfValueConfig,
}

impl DcfValue {
    /// Create a valuator with the given configuration.
    #[must_use]
    pub fn new(config: DcfValueConfig) -> Self {
        Self {
            engine: DcfEngine::new(config.defaults.clone()),
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &DcfValueConfig {
        &self.config
    }
}

impl Valuator for DcfValue {
    fn name(&self) -> &str {
        "dcf_value"
    }

    fn value(&self, data: &FundamentalsTable, as_of: Date) -> Result<DataFrame> {
        self.check_columns(data)?;

        let df = data.data();
        let symbols: Vec<Option<String>> = df
            .column("symbol")?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|s| s.map(str::to_string))
            .collect();
        let dates: Vec<Option<i32>> = df
            .column("date")?
            .as_materialized_series()
            .date()?
            .physical()
            .into_iter()
            .collect();

        let fcf = f64_column(df, "free_cash_flow")?;
        let shares = f64_column(df, "shares_outstanding")?;
        let debt = optional_f64_column(df, "total_liabilities")?;
        let cash = optional_f64_column(df, "cash")?;
        let minority = optional_f64_column(df, "minority_interests")?;
        let price = optional_f64_column(df, "price")?;

        // Latest row per symbol on or before as_of.
        let cutoff = as_of.num_days_from_ce() - EPOCH_DAYS_FROM_CE;
        let mut latest: BTreeMap<&str, (i32, usize)> = BTreeMap::new();
        for (idx, (symbol, date)) in symbols.iter().zip(&dates).enumerate() {
            let (Some(symbol), Some(date)) = (symbol, date) else {
                continue;
            };
            if *date > cutoff {
                continue;
            }
            let entry = latest.entry(symbol.as_str()).or_insert((*date, idx));
            if *date >= entry.0 {
                *entry = (*date, idx);
            }
        }

        if latest.is_empty() {
            return Err(ValuationError::InsufficientData { field: "date" });
        }

        let mut out_symbols = Vec::with_capacity(latest.len());
        let mut out_values = Vec::with_capacity(latest.len());
        let mut out_targets = Vec::with_capacity(latest.len());
        let mut out_upside: Vec<Option<f64>> = Vec::with_capacity(latest.len());

        for (symbol, (_, idx)) in latest {
            let raw = RawFinancials {
                dcf_start_value: fcf[idx],
                debt: debt[idx],
                cash: cash[idx],
                minority_interests: minority[idx],
                shares_outstanding: shares[idx],
                current_price: price[idx],
                ..RawFinancials::new(symbol)
            };

            match self.engine.value(&raw, &self.config.overrides) {
                Ok(v) => {
                    out_symbols.push(symbol.to_string());
                    out_values.push(v.intrinsic_value_per_share);
                    out_targets.push(v.target_price);
                    out_upside.push(v.market.map(|m| m.upside));
                }
                Err(e) if self.config.fail_fast => return Err(e),
                Err(e) => {
                    warn!(symbol, error = %e, "skipping company");
                }
            }
        }

        if out_symbols.is_empty() {
            return Err(ValuationError::InsufficientData {
                field: "free_cash_flow",
            });
        }

        Ok(df! {
            "symbol" => out_symbols,
            "intrinsic_value" => out_values,
            "target_price" => out_targets,
            "upside" => out_upside,
        }?)
    }

    fn required_columns(&self) -> &[&str] {
        &["symbol", "date", "free_cash_flow", "shares_outstanding"]
    }
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

fn optional_f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    if df.get_column_names().iter().any(|c| c.as_str() == name) {
        f64_column(df, name)
    } else {
        Ok(vec![None; df.height()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn table() -> FundamentalsTable {
        let df = df! {
            "symbol" => &["AAA", "AAA", "BBB", "CCC"],
            "date" => &[d(2023, 12, 31), d(2024, 12, 31), d(2024, 12, 31), d(2024, 12, 31)],
            "free_cash_flow" => &[50.0, 100.0, 80.0, 10.0],
            "shares_outstanding" => &[Some(100.0), Some(100.0), Some(40.0), None],
            "total_liabilities" => &[50.0, 50.0, 0.0, 0.0],
            "cash" => &[20.0, 20.0, 0.0, 0.0],
            "price" => &[Some(10.0), Some(10.0), None, None],
        }
        .unwrap();
        FundamentalsTable::new(df)
    }

    #[test]
    fn test_values_latest_row_per_symbol() {
        let out = DcfValue::default().value(&table(), d(2025, 1, 1)).unwrap();

        // CCC has no share count and is skipped.
        assert_eq!(out.height(), 2);
        let symbols: Vec<&str> = out
            .column("symbol")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(symbols, vec!["AAA", "BBB"]);

        let values = out
            .column("intrinsic_value")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .clone();
        assert_relative_eq!(values.get(0).unwrap(), 19.414285714285713, epsilon = 1e-9);

        let upside = out
            .column("upside")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .clone();
        assert!(upside.get(0).is_some());
        assert!(upside.get(1).is_none());
    }

    #[test]
    fn test_as_of_excludes_future_rows() {
        let out = DcfValue::default().value(&table(), d(2024, 6, 30)).unwrap();
        assert_eq!(out.height(), 1);
        let values = out
            .column("intrinsic_value")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .clone();
        // Only the 2023 AAA row qualifies: half the reference cash flow.
        let expected = (1971.4285714285713 / 2.0 - 30.0) / 100.0;
        assert_relative_eq!(values.get(0).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_fail_fast() {
        let valuator = DcfValue::new(DcfValueConfig {
            fail_fast: true,
            ..DcfValueConfig::default()
        });
        let err = valuator.value(&table(), d(2025, 1, 1)).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::InsufficientData {
                field: "shares_outstanding"
            }
        ));
    }

    #[test]
    fn test_missing_column() {
        let df = df! { "symbol" => &["AAA"] }.unwrap();
        let err = DcfValue::default()
            .value(&FundamentalsTable::new(df), d(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, ValuationError::MissingColumn(_)));
    }

    #[test]
    fn test_nothing_before_as_of() {
        let err = DcfValue::default().value(&table(), d(2000, 1, 1)).unwrap_err();
        assert!(matches!(err, ValuationError::InsufficientData { field: "date" }));
    }

    #[test]
    fn test_overrides_flow_through() {
        let valuator = DcfValue::new(DcfValueConfig {
            overrides: AssumptionOverrides {
                margin_of_safety: Some(0.5),
                ..AssumptionOverrides::default()
            },
            ..DcfValueConfig::default()
        });
        assert_relative_eq!(valuator.config().overrides.margin_of_safety.unwrap(), 0.5);
        let out = valuator.value(&table(), d(2025, 1, 1)).unwrap();
        let series = |name: &str| {
            out.column(name)
                .unwrap()
                .as_materialized_series()
                .f64()
                .unwrap()
                .clone()
        };
        let values = series("intrinsic_value");
        let targets = series("target_price");
        assert_relative_eq!(targets.get(1).unwrap(), values.get(1).unwrap() * 0.5);
    }
}
