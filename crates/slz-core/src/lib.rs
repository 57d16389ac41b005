/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! # slz-core
//!
//! Shared building blocks for the stocklyzer crates: configuration, the error
//! taxonomy, provider function identifiers and the raw market-data types that
//! flow from the provider into the report engine.

pub mod config;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use error::{Error, Result};
pub use types::{
  parse_raw_number, Periodicity, PricePoint, RawPeriod, RawQuote, StatementKind, Symbol,
};

/// Provider functions used by the stocklyzer client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncType {
  // Quote functions
  GlobalQuote,
  TimeSeriesWeeklyAdjusted,

  // Fundamentals functions
  Overview,
  IncomeStatement,
  BalanceSheet,
  CashFlow,

  // Economic indicators
  TreasuryYield,
}

impl std::fmt::Display for FuncType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FuncType::GlobalQuote => write!(f, "GLOBAL_QUOTE"),
      FuncType::TimeSeriesWeeklyAdjusted => write!(f, "TIME_SERIES_WEEKLY_ADJUSTED"),
      FuncType::Overview => write!(f, "OVERVIEW"),
      FuncType::IncomeStatement => write!(f, "INCOME_STATEMENT"),
      FuncType::BalanceSheet => write!(f, "BALANCE_SHEET"),
      FuncType::CashFlow => write!(f, "CASH_FLOW"),
      FuncType::TreasuryYield => write!(f, "TREASURY_YIELD"),
    }
  }
}

impl From<StatementKind> for FuncType {
  fn from(kind: StatementKind) -> Self {
    match kind {
      StatementKind::Income => FuncType::IncomeStatement,
      StatementKind::BalanceSheet => FuncType::BalanceSheet,
      StatementKind::CashFlow => FuncType::CashFlow,
    }
  }
}

/// Base URL for the AlphaVantage API (the transport appends `/query`)
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";

/// API rate limits
pub const DEFAULT_RATE_LIMIT: u32 = 75; // requests per minute
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolution of the 52-week range bar
pub const DEFAULT_BAR_SEGMENTS: usize = 10;
