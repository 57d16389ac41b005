//! The closed set of metrics a report can show

use crate::error::ReportError;
use crate::format::QuantityKind;
use serde::{Deserialize, Serialize};
use slz_core::StatementKind;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Every quantity the report derives growth or sentiment for.
///
/// Declaration order is the row order of the statement tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
  // Income statement
  TotalRevenue,
  NetIncome,

  // Balance sheet
  TotalAssets,
  TotalLiabilities,
  StockholdersEquity,
  SharesOutstanding,

  // Cash flow statement
  OperatingCashFlow,
  InvestingCashFlow,
  FinancingCashFlow,
  ChangesInCash,
  FreeCashFlow,

  // Quote
  Price,
  DividendYield,
}

const INCOME_METRICS: [Metric; 2] = [Metric::TotalRevenue, Metric::NetIncome];

const BALANCE_SHEET_METRICS: [Metric; 4] = [
  Metric::TotalAssets,
  Metric::TotalLiabilities,
  Metric::StockholdersEquity,
  Metric::SharesOutstanding,
];

const CASH_FLOW_METRICS: [Metric; 5] = [
  Metric::OperatingCashFlow,
  Metric::InvestingCashFlow,
  Metric::FinancingCashFlow,
  Metric::ChangesInCash,
  Metric::FreeCashFlow,
];

impl Metric {
  pub const ALL: [Metric; 13] = [
    Metric::TotalRevenue,
    Metric::NetIncome,
    Metric::TotalAssets,
    Metric::TotalLiabilities,
    Metric::StockholdersEquity,
    Metric::SharesOutstanding,
    Metric::OperatingCashFlow,
    Metric::InvestingCashFlow,
    Metric::FinancingCashFlow,
    Metric::ChangesInCash,
    Metric::FreeCashFlow,
    Metric::Price,
    Metric::DividendYield,
  ];

  /// Metrics every period of a statement kind must carry
  pub fn required_for(kind: StatementKind) -> &'static [Metric] {
    match kind {
      StatementKind::Income => &INCOME_METRICS,
      StatementKind::BalanceSheet => &BALANCE_SHEET_METRICS,
      StatementKind::CashFlow => &CASH_FLOW_METRICS,
    }
  }

  /// Human-readable row label
  pub fn label(&self) -> &'static str {
    match self {
      Metric::TotalRevenue => "Total Revenue",
      Metric::NetIncome => "Net Income",
      Metric::TotalAssets => "Total Assets",
      Metric::TotalLiabilities => "Total Liabilities",
      Metric::StockholdersEquity => "Stockholders Equity",
      Metric::SharesOutstanding => "Shares Outstanding",
      Metric::OperatingCashFlow => "Operating Cash Flow",
      Metric::InvestingCashFlow => "Investing Cash Flow",
      Metric::FinancingCashFlow => "Financing Cash Flow",
      Metric::ChangesInCash => "Changes In Cash",
      Metric::FreeCashFlow => "Free Cash Flow",
      Metric::Price => "Price",
      Metric::DividendYield => "Dividend Yield",
    }
  }

  /// How values of this metric are rendered
  pub fn quantity_kind(&self) -> QuantityKind {
    match self {
      Metric::SharesOutstanding => QuantityKind::Shares,
      Metric::DividendYield => QuantityKind::Yield,
      _ => QuantityKind::Currency,
    }
  }
}

impl Display for Metric {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// Lowercase with spaces, underscores and dashes removed
fn fold_name(name: &str) -> String {
  name
    .chars()
    .filter(|c| !matches!(c, ' ' | '_' | '-'))
    .flat_map(char::to_lowercase)
    .collect()
}

impl FromStr for Metric {
  type Err = ReportError;

  /// Accepts labels (`"Total Revenue"`), variant names (`"TotalRevenue"`)
  /// and snake case (`"total_revenue"`).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let folded = fold_name(s);
    Metric::ALL
      .into_iter()
      .find(|metric| fold_name(metric.label()) == folded)
      .ok_or_else(|| ReportError::UnknownMetric(s.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_metric_names() {
    assert_eq!("Total Revenue".parse::<Metric>().unwrap(), Metric::TotalRevenue);
    assert_eq!("FreeCashFlow".parse::<Metric>().unwrap(), Metric::FreeCashFlow);
    assert_eq!("shares_outstanding".parse::<Metric>().unwrap(), Metric::SharesOutstanding);
    assert_eq!(
      "EBITDA".parse::<Metric>(),
      Err(ReportError::UnknownMetric("EBITDA".to_string()))
    );
  }

  #[test]
  fn every_statement_metric_belongs_to_one_kind() {
    let mut seen: Vec<Metric> =
      StatementKind::ALL.iter().flat_map(|kind| Metric::required_for(*kind).to_vec()).collect();
    assert_eq!(seen.len(), 11);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 11);
    assert!(!seen.contains(&Metric::Price));
  }

  #[test]
  fn labels_round_trip() {
    for metric in Metric::ALL {
      assert_eq!(metric.label().parse::<Metric>().unwrap(), metric);
    }
  }
}
