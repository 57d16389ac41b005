//! # slz-models
//!
//! Data models for the AlphaVantage API responses stocklyzer consumes.
//!
//! The provider reports every number as a string and uses `"None"` for values
//! it does not have, so the models keep the raw strings; turning them into
//! numbers is the client's job.
//!
//! ## Usage
//!
//! ```ignore
//! use slz_models::fundamentals::CompanyOverview;
//! use slz_models::time_series::GlobalQuote;
//!
//! let quote: GlobalQuote = serde_json::from_str(&response_json)?;
//! let overview: CompanyOverview = serde_json::from_str(&overview_json)?;
//! ```

#![warn(clippy::all)]

pub mod common;
pub mod economic;
pub mod fundamentals;
pub mod time_series;

// Re-export common types for convenience
pub use common::*;

pub use economic::*;
pub use fundamentals::*;
pub use time_series::*;
