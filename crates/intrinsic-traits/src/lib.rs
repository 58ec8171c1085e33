#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for the intrinsic valuation engine.
//!
//! This crate provides the error taxonomy shared by every valuation stage,
//! common identifier types, and the [`Valuator`] abstraction for valuing a
//! table of companies at once.

/// The version of the intrinsic-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod types;
pub mod valuator;

pub use error::{Result, ValuationError};
pub use types::{Date, FundamentalsTable, Symbol};
pub use valuator::Valuator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
