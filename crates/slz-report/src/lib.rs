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

//! # slz-report
//!
//! Turns raw market data into a display-ready stock report: scaled and signed
//! quantities, period-over-period and multi-year growth, bullish/bearish
//! classification, the position of the price inside its 52-week range, and the
//! weighted average cost of capital.
//!
//! Everything here is synchronous and free of I/O. Callers fetch data with a
//! provider, hand it to a [`ReportBuilder`] as a [`ReportInput`], and render
//! the resulting [`Report`] however they like.
//!
//! ```
//! use slz_report::{format_quantity, QuantityKind};
//!
//! assert_eq!(format_quantity(-794_000_000.0, QuantityKind::Currency).unwrap(), "-$794M");
//! assert_eq!(format_quantity(-0.04, QuantityKind::Percent).unwrap(), "+0.0%");
//! ```

pub mod builder;
pub mod error;
pub mod format;
pub mod growth;
pub mod metric;
pub mod range;
pub mod report;
pub mod sentiment;
pub mod statement;
pub mod valuation;

pub use builder::{valid_pe_ratio, ReportBuilder, ReportInput, ReportSettings};
pub use error::{ReportError, Result};
pub use format::{format_quantity, format_with_growth, QuantityKind};
pub use growth::{growth, history_start, horizon_growth, latest_close, period_over_period, Horizon};
pub use metric::Metric;
pub use range::{position, RangePosition};
pub use report::{
  DayChange, DerivedMetric, Fundamental, MarketCapCategory, PriceSummary, QuoteProfile, RangeBar,
  Report, StatementTable, Valuation,
};
pub use sentiment::{classify, classify_named, Sentiment};
pub use statement::{
  complete_periods, normalize, FieldMap, SourceField, StatementPeriod, StatementValue,
};
pub use valuation::{
  cost_of_debt, cost_of_equity, debt_years, wacc, CostOfDebt, DebtFields, DebtYear, Wacc, WaccInputs,
};
