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

//! Statement normalization: provider rows in, ordered complete periods out

use crate::metric::Metric;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slz_core::{Periodicity, RawPeriod, StatementKind};
use std::collections::BTreeMap;
use tracing::debug;

/// What a provider field feeds into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceField {
  Metric(Metric),
  /// Input to the free cash flow derivation, not shown on its own
  CapitalExpenditure,
}

/// Explicit translation from provider field names to metrics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
  fields: BTreeMap<String, SourceField>,
}

impl FieldMap {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, provider_field: impl Into<String>, source: SourceField) -> Self {
    self.fields.insert(provider_field.into(), source);
    self
  }

  /// Field names used by the AlphaVantage statement endpoints
  pub fn alpha_vantage() -> Self {
    use SourceField::{CapitalExpenditure, Metric as M};

    Self::new()
      .with("totalRevenue", M(Metric::TotalRevenue))
      .with("netIncome", M(Metric::NetIncome))
      .with("totalAssets", M(Metric::TotalAssets))
      .with("totalLiabilities", M(Metric::TotalLiabilities))
      .with("totalShareholderEquity", M(Metric::StockholdersEquity))
      .with("commonStockSharesOutstanding", M(Metric::SharesOutstanding))
      .with("operatingCashflow", M(Metric::OperatingCashFlow))
      .with("cashflowFromInvestment", M(Metric::InvestingCashFlow))
      .with("cashflowFromFinancing", M(Metric::FinancingCashFlow))
      .with("changeInCashAndCashEquivalents", M(Metric::ChangesInCash))
      .with("capitalExpenditures", CapitalExpenditure)
  }

  fn maps_to(&self, source: SourceField) -> bool {
    self.fields.values().any(|mapped| *mapped == source)
  }

  /// Statement metrics the map can neither read nor derive
  pub fn missing(&self) -> Vec<Metric> {
    StatementKind::ALL
      .iter()
      .flat_map(|kind| Metric::required_for(*kind).iter().copied())
      .filter(|metric| {
        let derivable = *metric == Metric::FreeCashFlow
          && self.maps_to(SourceField::Metric(Metric::OperatingCashFlow))
          && self.maps_to(SourceField::CapitalExpenditure);
        !self.maps_to(SourceField::Metric(*metric)) && !derivable
      })
      .collect()
  }

  /// True when every statement metric has a source
  pub fn is_total(&self) -> bool {
    self.missing().is_empty()
  }
}

/// One normalized number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatementValue {
  pub value: f64,
  /// Computed here rather than reported by the provider
  pub derived: bool,
}

/// A complete statement period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementPeriod {
  pub period_end: NaiveDate,
  pub values: BTreeMap<Metric, StatementValue>,
}

impl StatementPeriod {
  pub fn value(&self, metric: Metric) -> Option<f64> {
    self.values.get(&metric).map(|v| v.value)
  }
}

/// Normalize raw provider periods into a statement.
///
/// The result is most recent first with unique dates, holds only periods
/// carrying every metric required for `kind`, and is capped at
/// `periodicity.max_periods()`.
pub fn normalize(
  raw: &[RawPeriod],
  kind: StatementKind,
  periodicity: Periodicity,
  field_map: &FieldMap,
) -> Vec<StatementPeriod> {
  let mut periods = complete_periods(raw, kind, periodicity, field_map);
  if let Some(max) = periodicity.max_periods() {
    periods.truncate(max);
  }
  periods
}

/// Every complete period, most recent first, before any display cap.
///
/// Growth for the oldest shown period needs the period just past the cap.
pub fn complete_periods(
  raw: &[RawPeriod],
  kind: StatementKind,
  periodicity: Periodicity,
  field_map: &FieldMap,
) -> Vec<StatementPeriod> {
  let required = Metric::required_for(kind);

  let mut ordered: Vec<&RawPeriod> = raw.iter().collect();
  // stable: among equal dates the provider's first record stays first
  ordered.sort_by(|a, b| b.period_end.cmp(&a.period_end));
  ordered.dedup_by_key(|period| period.period_end);

  ordered
    .into_iter()
    .map(|period| map_period(period, required, field_map))
    .filter(|period| {
      let complete = required.iter().all(|metric| period.values.contains_key(metric));
      if !complete {
        debug!("Dropping incomplete {} {} period {}", periodicity, kind, period.period_end);
      }
      complete
    })
    .collect()
}

fn map_period(raw: &RawPeriod, required: &[Metric], field_map: &FieldMap) -> StatementPeriod {
  let mut values = BTreeMap::new();
  let mut capital_expenditure = None;

  for (field, source) in &field_map.fields {
    let Some(value) = raw.number(field) else { continue };
    match source {
      SourceField::Metric(metric) if required.contains(metric) => {
        values.entry(*metric).or_insert(StatementValue { value, derived: false });
      }
      SourceField::Metric(_) => {}
      SourceField::CapitalExpenditure => {
        capital_expenditure.get_or_insert(value);
      }
    }
  }

  // providers disagree on the sign of capital expenditure
  if required.contains(&Metric::FreeCashFlow) && !values.contains_key(&Metric::FreeCashFlow) {
    if let (Some(operating), Some(capex)) =
      (values.get(&Metric::OperatingCashFlow).map(|v| v.value), capital_expenditure)
    {
      values.insert(
        Metric::FreeCashFlow,
        StatementValue { value: operating - f64::abs(capex), derived: true },
      );
    }
  }

  StatementPeriod { period_end: raw.period_end, values }
}

#[cfg(test)]
mod tests {
  use super::*;
  use slz_core::test_utils::{raw_period, ymd};

  fn income(date: NaiveDate, revenue: &str, net_income: &str) -> RawPeriod {
    raw_period(date, &[("totalRevenue", revenue), ("netIncome", net_income)])
  }

  #[test]
  fn alpha_vantage_map_is_total() {
    let map = FieldMap::alpha_vantage();
    assert!(map.is_total(), "missing: {:?}", map.missing());
  }

  #[test]
  fn gaps_in_a_map_are_listed() {
    let map = FieldMap::new().with("totalRevenue", SourceField::Metric(Metric::TotalRevenue));
    let missing = map.missing();
    assert!(!map.is_total());
    assert!(missing.contains(&Metric::NetIncome));
    assert!(missing.contains(&Metric::FreeCashFlow));
    assert!(!missing.contains(&Metric::TotalRevenue));
  }

  #[test]
  fn periods_are_sorted_descending_and_deduplicated() {
    let raw = vec![
      income(ymd(2022, 9, 24), "394328", "99803"),
      income(ymd(2024, 9, 28), "391035", "93736"),
      income(ymd(2023, 9, 30), "383285", "96995"),
      income(ymd(2024, 9, 28), "1", "1"),
    ];

    let periods = normalize(&raw, StatementKind::Income, Periodicity::Annual, &FieldMap::alpha_vantage());

    let dates: Vec<NaiveDate> = periods.iter().map(|p| p.period_end).collect();
    assert_eq!(dates, vec![ymd(2024, 9, 28), ymd(2023, 9, 30), ymd(2022, 9, 24)]);
    assert_eq!(periods[0].value(Metric::TotalRevenue), Some(391_035.0));
  }

  #[test]
  fn partial_periods_are_dropped() {
    let raw = vec![
      income(ymd(2024, 9, 28), "391035", "93736"),
      income(ymd(2023, 9, 30), "383285", "None"),
      income(ymd(2022, 9, 24), "-", "99803"),
      income(ymd(2021, 9, 25), "365817", "94680"),
    ];

    let periods = normalize(&raw, StatementKind::Income, Periodicity::Annual, &FieldMap::alpha_vantage());

    assert_eq!(periods.len(), 2);
    assert_eq!(periods[1].period_end, ymd(2021, 9, 25));
  }

  #[test]
  fn quarterly_keeps_four_most_recent() {
    let raw: Vec<RawPeriod> = [
      ymd(2023, 12, 30),
      ymd(2024, 12, 28),
      ymd(2024, 3, 30),
      ymd(2024, 9, 28),
      ymd(2024, 6, 29),
    ]
    .into_iter()
    .map(|date| income(date, "100", "10"))
    .collect();

    let quarterly =
      normalize(&raw, StatementKind::Income, Periodicity::Quarterly, &FieldMap::alpha_vantage());
    assert_eq!(quarterly.len(), 4);
    assert_eq!(quarterly[0].period_end, ymd(2024, 12, 28));
    assert_eq!(quarterly[3].period_end, ymd(2024, 3, 30));

    let annual = normalize(&raw, StatementKind::Income, Periodicity::Annual, &FieldMap::alpha_vantage());
    assert_eq!(annual.len(), 5);

    let uncapped =
      complete_periods(&raw, StatementKind::Income, Periodicity::Quarterly, &FieldMap::alpha_vantage());
    assert_eq!(uncapped.len(), 5);
    assert_eq!(uncapped[4].period_end, ymd(2023, 12, 30));
  }

  #[test]
  fn truncation_happens_after_filtering() {
    let mut raw: Vec<RawPeriod> =
      (1..=4).map(|month| income(ymd(2024, month * 3, 28), "100", "10")).collect();
    raw.push(income(ymd(2025, 3, 28), "100", ""));
    raw.push(income(ymd(2023, 12, 28), "100", "10"));

    let periods =
      normalize(&raw, StatementKind::Income, Periodicity::Quarterly, &FieldMap::alpha_vantage());
    assert_eq!(periods.len(), 4);
    assert_eq!(periods[0].period_end, ymd(2024, 12, 28));
  }

  #[test]
  fn free_cash_flow_is_derived_from_capex_magnitude() {
    let fields = |capex: &'static str| {
      vec![
        ("operatingCashflow", "118254000000"),
        ("capitalExpenditures", capex),
        ("cashflowFromInvestment", "2935000000"),
        ("cashflowFromFinancing", "-121983000000"),
        ("changeInCashAndCashEquivalents", "-794000000"),
      ]
    };

    for capex in ["9447000000", "-9447000000"] {
      let raw = vec![raw_period(ymd(2024, 9, 28), &fields(capex))];
      let periods =
        normalize(&raw, StatementKind::CashFlow, Periodicity::Annual, &FieldMap::alpha_vantage());

      let fcf = periods[0].values[&Metric::FreeCashFlow];
      assert_eq!(fcf.value, 108_807_000_000.0);
      assert!(fcf.derived);
      assert!(!periods[0].values[&Metric::OperatingCashFlow].derived);
    }
  }

  #[test]
  fn reported_free_cash_flow_is_kept() {
    let map = FieldMap::alpha_vantage().with("freeCashFlow", SourceField::Metric(Metric::FreeCashFlow));
    let raw = vec![raw_period(
      ymd(2024, 9, 28),
      &[
        ("operatingCashflow", "100"),
        ("capitalExpenditures", "30"),
        ("freeCashFlow", "75"),
        ("cashflowFromInvestment", "1"),
        ("cashflowFromFinancing", "1"),
        ("changeInCashAndCashEquivalents", "1"),
      ],
    )];

    let periods = normalize(&raw, StatementKind::CashFlow, Periodicity::Annual, &map);
    assert_eq!(periods[0].values[&Metric::FreeCashFlow], StatementValue { value: 75.0, derived: false });
  }

  #[test]
  fn cash_flow_without_capex_is_incomplete() {
    let raw = vec![raw_period(
      ymd(2024, 9, 28),
      &[
        ("operatingCashflow", "100"),
        ("cashflowFromInvestment", "1"),
        ("cashflowFromFinancing", "1"),
        ("changeInCashAndCashEquivalents", "1"),
      ],
    )];

    assert!(
      normalize(&raw, StatementKind::CashFlow, Periodicity::Annual, &FieldMap::alpha_vantage())
        .is_empty()
    );
  }
}
