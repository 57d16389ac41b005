//! The assembled report model
//!
//! Every map is a `BTreeMap` and every list has a fixed order, so two reports
//! built from the same input serialize to identical bytes.

use crate::format::QuantityKind;
use crate::growth::Horizon;
use crate::metric::Metric;
use crate::range::RangePosition;
use crate::sentiment::Sentiment;
use crate::valuation::Wacc;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slz_core::{Periodicity, RawQuote, StatementKind};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// A value ready for display, with its growth and classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetric {
  pub raw_value: f64,
  /// The value alone, e.g. `$391.04B`
  pub formatted: String,
  /// The value with its growth suffix, e.g. `$391.04B(+2.0%)`
  pub cell: String,
  pub growth_percent: Option<f64>,
  pub sentiment: Option<Sentiment>,
  /// Computed rather than reported by the provider
  pub derived: bool,
}

/// Valuation fields shown under the price
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Fundamental {
  MarketCap,
  PeRatio,
  Eps,
  BookValue,
  DividendYield,
}

impl Fundamental {
  pub const ALL: [Fundamental; 5] = [
    Fundamental::MarketCap,
    Fundamental::PeRatio,
    Fundamental::Eps,
    Fundamental::BookValue,
    Fundamental::DividendYield,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      Fundamental::MarketCap => "Market Cap",
      Fundamental::PeRatio => "P/E Ratio",
      Fundamental::Eps => "EPS",
      Fundamental::BookValue => "Book Value",
      Fundamental::DividendYield => "Dividend Yield",
    }
  }

  pub fn quantity_kind(&self) -> QuantityKind {
    match self {
      Fundamental::PeRatio => QuantityKind::Ratio,
      Fundamental::DividendYield => QuantityKind::Yield,
      Fundamental::MarketCap | Fundamental::Eps | Fundamental::BookValue => QuantityKind::Currency,
    }
  }
}

impl Display for Fundamental {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// Cost of capital with its display strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
  pub wacc: Wacc,
  /// e.g. `10.90%`
  pub formatted: String,
  pub cost_of_equity: String,
  pub cost_of_debt: String,
}

/// Change since the previous close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayChange {
  pub amount: f64,
  pub percent: Option<f64>,
  /// e.g. `-$5.18(-2.5%)`
  pub formatted: String,
  pub sentiment: Sentiment,
}

/// Quantized 52-week position for a text bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBar {
  pub filled: usize,
  pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
  pub price: f64,
  pub formatted: String,
  pub day_change: Option<DayChange>,
  pub day_low: String,
  pub day_high: String,
  pub volume: String,
  pub week52_low: Option<String>,
  pub week52_high: Option<String>,
  pub range: Option<RangePosition>,
  pub bar: Option<RangeBar>,
}

/// Size bucket by market capitalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketCapCategory {
  Mega,
  Large,
  Mid,
  Small,
  Micro,
}

impl MarketCapCategory {
  pub fn from_market_cap(market_cap: f64) -> Self {
    match market_cap {
      cap if cap >= 200e9 => MarketCapCategory::Mega,
      cap if cap >= 10e9 => MarketCapCategory::Large,
      cap if cap >= 2e9 => MarketCapCategory::Mid,
      cap if cap >= 300e6 => MarketCapCategory::Small,
      _ => MarketCapCategory::Micro,
    }
  }
}

impl Display for MarketCapCategory {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      MarketCapCategory::Mega => write!(f, "Mega Cap"),
      MarketCapCategory::Large => write!(f, "Large Cap"),
      MarketCapCategory::Mid => write!(f, "Mid Cap"),
      MarketCapCategory::Small => write!(f, "Small Cap"),
      MarketCapCategory::Micro => write!(f, "Micro Cap"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteProfile {
  pub market_cap_category: Option<MarketCapCategory>,
  /// Share of the key inputs that were available, 0.0 to 1.0
  pub data_quality: f64,
}

/// One statement kind at one cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
  pub kind: StatementKind,
  pub periodicity: Periodicity,
  pub periods: BTreeMap<NaiveDate, BTreeMap<Metric, DerivedMetric>>,
}

impl StatementTable {
  /// Period end dates, most recent first
  pub fn period_ends(&self) -> Vec<NaiveDate> {
    self.periods.keys().rev().copied().collect()
  }

  /// Column labels, most recent first
  pub fn labels(&self) -> Vec<String> {
    self.periods.keys().rev().map(|date| self.periodicity.label(*date)).collect()
  }

  pub fn cell(&self, period_end: NaiveDate, metric: Metric) -> Option<&DerivedMetric> {
    self.periods.get(&period_end)?.get(&metric)
  }

  pub fn is_empty(&self) -> bool {
    self.periods.is_empty()
  }
}

/// Everything the terminal shows for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
  pub quote: RawQuote,
  pub as_of: NaiveDate,
  pub price: PriceSummary,
  pub fundamentals: BTreeMap<Fundamental, DerivedMetric>,
  pub growth: BTreeMap<Horizon, DerivedMetric>,
  pub profile: QuoteProfile,
  /// Income, balance sheet, cash flow; annual before quarterly
  pub statements: Vec<StatementTable>,
  /// Absent when any input to the cost of capital is missing
  pub valuation: Option<Valuation>,
}

impl Report {
  pub fn statement(&self, kind: StatementKind, periodicity: Periodicity) -> Option<&StatementTable> {
    self.statements.iter().find(|table| table.kind == kind && table.periodicity == periodicity)
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn market_cap_buckets() {
    assert_eq!(MarketCapCategory::from_market_cap(3e12), MarketCapCategory::Mega);
    assert_eq!(MarketCapCategory::from_market_cap(200e9), MarketCapCategory::Mega);
    assert_eq!(MarketCapCategory::from_market_cap(50e9), MarketCapCategory::Large);
    assert_eq!(MarketCapCategory::from_market_cap(2e9), MarketCapCategory::Mid);
    assert_eq!(MarketCapCategory::from_market_cap(500e6), MarketCapCategory::Small);
    assert_eq!(MarketCapCategory::from_market_cap(10e6), MarketCapCategory::Micro);
    assert_eq!(MarketCapCategory::Mega.to_string(), "Mega Cap");
  }

  #[test]
  fn table_labels_are_most_recent_first() {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let table = StatementTable {
      kind: StatementKind::Income,
      periodicity: Periodicity::Quarterly,
      periods: BTreeMap::from([
        (date(2024, 6, 29), BTreeMap::new()),
        (date(2024, 12, 28), BTreeMap::new()),
      ]),
    };

    assert_eq!(table.labels(), vec!["2024-Q4", "2024-Q2"]);
    assert_eq!(table.period_ends()[0], date(2024, 12, 28));
    assert!(table.cell(date(2024, 6, 29), Metric::NetIncome).is_none());
  }
}
