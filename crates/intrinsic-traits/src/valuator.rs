//! Valuator trait for table-driven valuation.
//!
//! A valuator turns a table of fundamentals for many companies into a table
//! of per-company values as of a given date.

use crate::{Date, FundamentalsTable, Result};
use polars::prelude::*;

/// A model that values every company in a fundamentals table.
///
/// Implementations must be `Send + Sync` so that independent tables can be
/// valued on different threads.
///
/// # Example
///
/// ```no_run
/// use intrinsic_traits::{Date, FundamentalsTable, Result, Valuator};
/// use polars::prelude::*;
///
/// struct BookValue;
///
/// impl Valuator for BookValue {
///     fn name(&self) -> &str {
///         "book_value"
///     }
///
///     fn value(&self, data: &FundamentalsTable, _as_of: Date) -> Result<DataFrame> {
///         Ok(data.data().clone())
///     }
///
///     fn required_columns(&self) -> &[&str] {
///         &["symbol", "book_value"]
///     }
/// }
/// ```
pub trait Valuator: Send + Sync {
    /// Returns the name of this valuation model.
    fn name(&self) -> &str;

    /// Values every company present in `data` using the latest row on or
    /// before `as_of`.
    ///
    /// The returned DataFrame contains at minimum a `symbol` column and an
    /// `intrinsic_value` column.
    ///
    /// # Errors
    ///
    /// Returns an error if required columns are missing or no company could
    /// be valued.
    fn value(&self, data: &FundamentalsTable, as_of: Date) -> Result<DataFrame>;

    /// Returns the columns that must be present in the input table.
    fn required_columns(&self) -> &[&str];

    /// Checks that every required column is present.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ValuationError::MissingColumn`] naming the first
    /// absent column.
    fn check_columns(&self, data: &FundamentalsTable) -> Result<()> {
        match self
            .required_columns()
            .iter()
            .find(|col| !data.has_column(col))
        {
            Some(col) => Err(crate::ValuationError::MissingColumn((*col).to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValuationError;
    use chrono::NaiveDate;

    struct TestValuator;

    impl Valuator for TestValuator {
        fn name(&self) -> &str {
            "test"
        }

        fn value(&self, data: &FundamentalsTable, _as_of: Date) -> Result<DataFrame> {
            self.check_columns(data)?;
            Ok(df! {
                "symbol" => &["AAPL"],
                "intrinsic_value" => &[42.0],
            }?)
        }

        fn required_columns(&self) -> &[&str] {
            &["symbol", "free_cash_flow"]
        }
    }

    #[test]
    fn test_check_columns_missing() {
        let df = df! { "symbol" => &["AAPL"] }.unwrap();
        let table = FundamentalsTable::new(df);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let err = TestValuator.value(&table, date).unwrap_err();
        assert!(matches!(err, ValuationError::MissingColumn(ref c) if c == "free_cash_flow"));
    }

    #[test]
    fn test_value_with_columns() {
        let df = df! {
            "symbol" => &["AAPL"],
            "free_cash_flow" => &[1.0],
        }
        .unwrap();
        let table = FundamentalsTable::new(df);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let out = TestValuator.value(&table, date).unwrap();
        assert_eq!(out.height(), 1);
        assert!(out.column("intrinsic_value").is_ok());
    }

    #[test]
    fn test_valuator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn Valuator>>();
    }
}
