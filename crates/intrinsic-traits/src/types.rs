//! Common types shared by the valuation crates.
//!
//! This module defines identifiers, the date type and a thin wrapper around a
//! Polars DataFrame holding fundamentals for many companies.

use polars::prelude::*;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A company identifier.
///
/// The engine treats symbols as opaque; typically these are ticker symbols
/// like "AAPL" or exchange-qualified codes like "600519.SH".
pub type Symbol = String;

/// Container for fundamental data of one or more companies.
///
/// `FundamentalsTable` wraps a Polars DataFrame with one row per company and
/// reporting date. Values are untrusted provider output and are validated by
/// the consumer before any computation.
///
/// # Expected Schema
///
/// - `symbol`: Company identifier
/// - `date`: Reporting date
/// - `free_cash_flow`: Base-year free cash flow
/// - `shares_outstanding`: Shares outstanding
/// - Optional balance columns such as `total_liabilities`, `cash`,
///   `minority_interests` and a `price` column
///
/// # Example
///
/// ```no_run
/// use intrinsic_traits::FundamentalsTable;
/// use polars::prelude::*;
///
/// let df = df! {
///     "symbol" => &["AAPL", "MSFT"],
///     "free_cash_flow" => &[100.0, 80.0],
///     "shares_outstanding" => &[15.0, 7.4],
/// }.unwrap();
///
/// let table = FundamentalsTable::new(df);
/// ```
#[derive(Debug, Clone)]
pub struct FundamentalsTable {
    data: DataFrame,
}

impl FundamentalsTable {
    /// Creates a new `FundamentalsTable` from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }
}
