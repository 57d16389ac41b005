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

//! Assembly of a [`Report`] from provider data

use crate::error::Result;
use crate::format::{format_quantity, format_with_growth, QuantityKind};
use crate::growth::{growth, horizon_growth, latest_close, period_over_period, Horizon};
use crate::metric::Metric;
use crate::range::position;
use crate::report::{
  DayChange, DerivedMetric, Fundamental, MarketCapCategory, PriceSummary, QuoteProfile, RangeBar,
  Report, StatementTable, Valuation,
};
use crate::sentiment::classify;
use crate::statement::{complete_periods, FieldMap};
use crate::valuation::{debt_years, wacc, DebtFields, WaccInputs, DEFAULT_REQUIRED_RETURN};
use chrono::NaiveDate;
use slz_core::{Periodicity, PricePoint, RawPeriod, RawQuote, StatementKind, DEFAULT_BAR_SEGMENTS};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Highest P/E still shown
const MAX_PE_RATIO: f64 = 1000.0;

/// Knobs for report assembly
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
  /// Width of the 52-week range bar
  pub bar_segments: usize,
  pub field_map: FieldMap,
  pub debt_fields: DebtFields,
  /// Required equity return for the cost of capital, as a fraction
  pub required_return: f64,
}

impl Default for ReportSettings {
  fn default() -> Self {
    Self {
      bar_segments: DEFAULT_BAR_SEGMENTS,
      field_map: FieldMap::alpha_vantage(),
      debt_fields: DebtFields::alpha_vantage(),
      required_return: DEFAULT_REQUIRED_RETURN,
    }
  }
}

/// Everything fetched for one ticker
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
  pub quote: RawQuote,
  pub price_history: Vec<PricePoint>,
  /// Statements that could not be fetched are simply absent
  pub statements: BTreeMap<(StatementKind, Periodicity), Vec<RawPeriod>>,
  /// 10-year treasury yield in percent
  pub treasury_yield: Option<f64>,
  pub as_of: NaiveDate,
}

/// Builds reports; holds no state between builds
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
  settings: ReportSettings,
}

impl ReportBuilder {
  pub fn new(settings: ReportSettings) -> Self {
    Self { settings }
  }

  pub fn settings(&self) -> &ReportSettings {
    &self.settings
  }

  /// Build the report for `input`.
  ///
  /// Only an unrenderable current price fails the build; any other value that
  /// is missing or invalid is left out of the report.
  #[instrument(skip(self, input), fields(symbol = %input.quote.symbol))]
  pub fn build(&self, input: &ReportInput) -> Result<Report> {
    let quote = &input.quote;
    let price = self.price_summary(quote)?;
    let fundamentals = fundamentals(quote);
    let growth = horizon_growths(&input.price_history, input.as_of);
    let profile = profile(quote, &fundamentals, &growth);
    let statements = self.statement_tables(&input.statements);
    let valuation = self.valuation(input);

    Ok(Report {
      quote: quote.clone(),
      as_of: input.as_of,
      price,
      fundamentals,
      growth,
      profile,
      statements,
      valuation,
    })
  }

  fn valuation(&self, input: &ReportInput) -> Option<Valuation> {
    let annual = |kind: StatementKind| input.statements.get(&(kind, Periodicity::Annual)).map(Vec::as_slice);
    let years = debt_years(
      annual(StatementKind::Income).unwrap_or_default(),
      annual(StatementKind::BalanceSheet).unwrap_or_default(),
      &self.settings.debt_fields,
    );

    let inputs = WaccInputs {
      market_cap: input.quote.market_cap,
      beta: input.quote.beta,
      treasury_yield: input.treasury_yield.map(|percent| percent / 100.0),
      required_return: self.settings.required_return,
      years,
    };
    let Some(wacc) = wacc(&inputs) else {
      debug!("Cost of capital undefined for {}", input.quote.symbol);
      return None;
    };

    let percent = |fraction: f64| format_quantity(fraction * 100.0, QuantityKind::Yield).ok();
    Some(Valuation {
      formatted: percent(wacc.wacc)?,
      cost_of_equity: percent(wacc.cost_of_equity)?,
      cost_of_debt: percent(wacc.cost_of_debt.rate)?,
      wacc,
    })
  }

  fn price_summary(&self, quote: &RawQuote) -> Result<PriceSummary> {
    let current = quote.current_price;
    let formatted = format_quantity(current, QuantityKind::Currency)?;

    let (range, bar) = match (quote.week52_low, quote.week52_high) {
      (Some(low), Some(high)) => {
        let range = position(current, low, high);
        let total = self.settings.bar_segments;
        (Some(range), Some(RangeBar { filled: range.segments(total), total }))
      }
      _ => (None, None),
    };

    Ok(PriceSummary {
      price: current,
      formatted,
      day_change: day_change(current, quote.previous_close),
      day_low: format_or_blank(quote.day_low, QuantityKind::Currency),
      day_high: format_or_blank(quote.day_high, QuantityKind::Currency),
      volume: format_or_blank(quote.volume as f64, QuantityKind::Shares),
      week52_low: quote.week52_low.and_then(|v| format_quantity(v, QuantityKind::Currency).ok()),
      week52_high: quote.week52_high.and_then(|v| format_quantity(v, QuantityKind::Currency).ok()),
      range,
      bar,
    })
  }

  fn statement_tables(
    &self,
    statements: &BTreeMap<(StatementKind, Periodicity), Vec<RawPeriod>>,
  ) -> Vec<StatementTable> {
    let mut tables = Vec::new();
    for kind in StatementKind::ALL {
      for periodicity in Periodicity::ALL {
        let Some(raw) = statements.get(&(kind, periodicity)) else {
          debug!("No {} {} statement supplied", periodicity, kind);
          continue;
        };
        tables.push(statement_table(raw, kind, periodicity, &self.settings.field_map));
      }
    }
    tables
  }
}

fn statement_table(
  raw: &[RawPeriod],
  kind: StatementKind,
  periodicity: Periodicity,
  field_map: &FieldMap,
) -> StatementTable {
  let periods = complete_periods(raw, kind, periodicity, field_map);
  let shown = periodicity.max_periods().unwrap_or(periods.len()).min(periods.len());
  let mut cells: BTreeMap<NaiveDate, BTreeMap<Metric, DerivedMetric>> =
    periods[..shown].iter().map(|period| (period.period_end, BTreeMap::new())).collect();

  for &metric in Metric::required_for(kind) {
    // growth runs over every complete period so the oldest shown one has a predecessor
    let values: Vec<Option<f64>> = periods.iter().map(|period| period.value(metric)).collect();
    let growths = period_over_period(&values);

    for (period, growth_percent) in periods[..shown].iter().zip(growths) {
      let Some(value) = period.values.get(&metric) else { continue };
      let Some(derived) = derive(value.value, metric.quantity_kind(), growth_percent, Some(metric))
      else {
        continue;
      };
      if let Some(row) = cells.get_mut(&period.period_end) {
        row.insert(metric, DerivedMetric { derived: value.derived, ..derived });
      }
    }
  }

  StatementTable { kind, periodicity, periods: cells }
}

/// A displayable metric, or `None` when the value cannot be rendered
fn derive(
  value: f64,
  kind: QuantityKind,
  growth_percent: Option<f64>,
  classify_as: Option<Metric>,
) -> Option<DerivedMetric> {
  let formatted = format_quantity(value, kind).ok()?;
  let cell = format_with_growth(value, kind, growth_percent).ok()?;
  let sentiment = classify_as.zip(growth_percent).map(|(metric, g)| classify(metric, g));

  Some(DerivedMetric { raw_value: value, formatted, cell, growth_percent, sentiment, derived: false })
}

fn format_or_blank(value: f64, kind: QuantityKind) -> String {
  format_quantity(value, kind).unwrap_or_default()
}

fn day_change(current: f64, previous_close: f64) -> Option<DayChange> {
  let amount = current - previous_close;
  let percent = growth(Some(current), Some(previous_close));
  let formatted = format_with_growth(amount, QuantityKind::Currency, percent).ok()?;
  let sentiment = classify(Metric::Price, percent.unwrap_or(amount));

  Some(DayChange { amount, percent, formatted, sentiment })
}

/// P/E is shown only for positive earnings and a plausible multiple
pub fn valid_pe_ratio(pe_ratio: Option<f64>, eps: Option<f64>) -> Option<f64> {
  let (pe, eps) = (pe_ratio?, eps?);
  if !pe.is_finite() || !eps.is_finite() || eps <= 0.0 || !(0.0..=MAX_PE_RATIO).contains(&pe) {
    return None;
  }
  Some(pe)
}

fn fundamentals(quote: &RawQuote) -> BTreeMap<Fundamental, DerivedMetric> {
  Fundamental::ALL
    .iter()
    .filter_map(|&field| {
      let value = match field {
        Fundamental::MarketCap => quote.market_cap,
        Fundamental::PeRatio => valid_pe_ratio(quote.pe_ratio, quote.eps),
        Fundamental::Eps => quote.eps,
        Fundamental::BookValue => quote.book_value,
        Fundamental::DividendYield => quote.dividend_yield,
      }?;
      derive(value, field.quantity_kind(), None, None).map(|metric| (field, metric))
    })
    .collect()
}

fn horizon_growths(series: &[PricePoint], as_of: NaiveDate) -> BTreeMap<Horizon, DerivedMetric> {
  let current = latest_close(series);

  Horizon::ALL
    .iter()
    .filter_map(|&horizon| {
      let Some(percent) = horizon_growth(series, current, as_of, horizon) else {
        debug!("{} growth undefined for history of {} points", horizon, series.len());
        return None;
      };
      let formatted = format_quantity(percent, QuantityKind::Percent).ok()?;
      Some((
        horizon,
        DerivedMetric {
          raw_value: percent,
          cell: formatted.clone(),
          formatted,
          growth_percent: Some(percent),
          sentiment: Some(classify(Metric::Price, percent)),
          derived: true,
        },
      ))
    })
    .collect()
}

fn profile(
  quote: &RawQuote,
  fundamentals: &BTreeMap<Fundamental, DerivedMetric>,
  growth: &BTreeMap<Horizon, DerivedMetric>,
) -> QuoteProfile {
  let market_cap = fundamentals.get(&Fundamental::MarketCap).map(|m| m.raw_value);
  let available = [
    market_cap.is_some(),
    fundamentals.contains_key(&Fundamental::PeRatio),
    fundamentals.contains_key(&Fundamental::Eps),
    fundamentals.contains_key(&Fundamental::BookValue),
    quote.sector.as_deref().is_some_and(|s| !s.trim().is_empty()),
    growth.contains_key(&Horizon::OneYear),
  ];
  let present = available.iter().filter(|present| **present).count();

  QuoteProfile {
    market_cap_category: market_cap.map(MarketCapCategory::from_market_cap),
    data_quality: present as f64 / available.len() as f64,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sentiment::Sentiment;
  use slz_core::test_utils::{assert_approx_eq, price_series, raw_period, ymd};

  fn quote() -> RawQuote {
    RawQuote {
      symbol: "TEST".to_string(),
      company_name: "Test Corp".to_string(),
      sector: Some("TECHNOLOGY".to_string()),
      current_price: 110.0,
      previous_close: 100.0,
      day_open: 101.0,
      day_high: 111.0,
      day_low: 99.5,
      volume: 1_250_000,
      week52_low: Some(80.0),
      week52_high: Some(120.0),
      market_cap: Some(25e9),
      pe_ratio: Some(22.5),
      eps: Some(4.89),
      book_value: Some(31.2),
      dividend_yield: Some(1.25),
      beta: Some(1.1),
    }
  }

  fn input(quote: RawQuote) -> ReportInput {
    ReportInput {
      quote,
      price_history: Vec::new(),
      statements: BTreeMap::new(),
      treasury_yield: None,
      as_of: ymd(2025, 6, 2),
    }
  }

  #[test]
  fn pe_ratio_rule() {
    assert_eq!(valid_pe_ratio(Some(30.66), Some(6.6)), Some(30.66));
    assert_eq!(valid_pe_ratio(Some(30.0), Some(0.0)), None);
    assert_eq!(valid_pe_ratio(Some(30.0), Some(-1.2)), None);
    assert_eq!(valid_pe_ratio(Some(1500.0), Some(0.01)), None);
    assert_eq!(valid_pe_ratio(Some(-3.0), Some(1.0)), None);
    assert_eq!(valid_pe_ratio(Some(30.0), None), None);
    assert_eq!(valid_pe_ratio(Some(1000.0), Some(0.1)), Some(1000.0));
  }

  #[test]
  fn price_summary_and_day_change() {
    let report = ReportBuilder::default().build(&input(quote())).unwrap();
    let price = &report.price;

    assert_eq!(price.formatted, "$110.00");
    assert_eq!(price.volume, "1.25M");
    assert_eq!(price.week52_low.as_deref(), Some("$80.00"));

    let change = price.day_change.as_ref().unwrap();
    assert_eq!(change.formatted, "$10.00(+10.0%)");
    assert_eq!(change.sentiment, Sentiment::Bullish);

    let range = price.range.unwrap();
    assert_approx_eq(range.fraction, 0.75, 1e-12);
    assert_eq!(range.zone, Sentiment::Bullish);
    assert_eq!(price.bar, Some(RangeBar { filled: 8, total: 10 }));
  }

  #[test]
  fn missing_band_leaves_range_out() {
    let mut q = quote();
    q.week52_high = None;
    let report = ReportBuilder::default().build(&input(q)).unwrap();
    assert!(report.price.range.is_none());
    assert!(report.price.bar.is_none());
  }

  #[test]
  fn non_finite_price_fails_the_build() {
    let mut q = quote();
    q.current_price = f64::NAN;
    assert!(ReportBuilder::default().build(&input(q)).is_err());
  }

  #[test]
  fn invalid_fundamentals_are_omitted() {
    let mut q = quote();
    q.eps = Some(-0.5);
    q.book_value = Some(f64::INFINITY);
    q.dividend_yield = None;
    let report = ReportBuilder::default().build(&input(q)).unwrap();

    assert!(report.fundamentals.contains_key(&Fundamental::Eps));
    assert!(!report.fundamentals.contains_key(&Fundamental::PeRatio));
    assert!(!report.fundamentals.contains_key(&Fundamental::BookValue));
    assert!(!report.fundamentals.contains_key(&Fundamental::DividendYield));
    assert_eq!(report.fundamentals[&Fundamental::MarketCap].formatted, "$25.00B");
    assert!(report.fundamentals.values().all(|m| m.sentiment.is_none()));
  }

  #[test]
  fn profile_scores_available_inputs() {
    let report = ReportBuilder::default().build(&input(quote())).unwrap();
    assert_eq!(report.profile.market_cap_category, Some(MarketCapCategory::Large));
    // everything but 1-year growth
    assert_approx_eq(report.profile.data_quality, 5.0 / 6.0, 1e-12);
  }

  #[test]
  fn horizon_growth_entries() {
    let mut data = input(quote());
    data.price_history =
      price_series(&[(ymd(2023, 5, 26), 50.0), (ymd(2024, 5, 31), 80.0), (ymd(2025, 5, 30), 100.0)]);
    let report = ReportBuilder::default().build(&data).unwrap();

    assert_eq!(report.growth[&Horizon::OneYear].cell, "+25.0%");
    assert_eq!(report.growth[&Horizon::TwoYears].cell, "+100.0%");
    assert_eq!(report.growth[&Horizon::TwoYears].sentiment, Some(Sentiment::Bullish));
    assert!(!report.growth.contains_key(&Horizon::ThreeYears));
    assert_approx_eq(report.profile.data_quality, 1.0, 1e-12);
  }

  #[test]
  fn statement_cells_carry_growth_and_flags() {
    let cash_flow = |date, ocf: &str, capex: &str| {
      raw_period(
        date,
        &[
          ("operatingCashflow", ocf),
          ("capitalExpenditures", capex),
          ("cashflowFromInvestment", "-100"),
          ("cashflowFromFinancing", "-200"),
          ("changeInCashAndCashEquivalents", "50"),
        ],
      )
    };
    let mut data = input(quote());
    data.statements.insert(
      (StatementKind::CashFlow, Periodicity::Annual),
      vec![cash_flow(ymd(2024, 12, 31), "1200", "-200"), cash_flow(ymd(2023, 12, 31), "1000", "200")],
    );

    let report = ReportBuilder::default().build(&data).unwrap();
    assert_eq!(report.statements.len(), 1);
    let table = report.statement(StatementKind::CashFlow, Periodicity::Annual).unwrap();

    let fcf = table.cell(ymd(2024, 12, 31), Metric::FreeCashFlow).unwrap();
    assert!(fcf.derived);
    assert_eq!(fcf.cell, "$1,000.00(+25.0%)");
    assert_eq!(fcf.sentiment, Some(Sentiment::Bullish));

    let investing = table.cell(ymd(2024, 12, 31), Metric::InvestingCashFlow).unwrap();
    assert_eq!(investing.sentiment, Some(Sentiment::Neutral));

    let oldest = table.cell(ymd(2023, 12, 31), Metric::OperatingCashFlow).unwrap();
    assert_eq!(oldest.cell, "$1,000.00");
    assert_eq!(oldest.growth_percent, None);
    assert_eq!(oldest.sentiment, None);
  }

  #[test]
  fn oldest_shown_quarter_grows_against_the_capped_one() {
    let income = |date, revenue: &str| raw_period(date, &[("totalRevenue", revenue), ("netIncome", "10")]);
    let mut data = input(quote());
    data.statements.insert(
      (StatementKind::Income, Periodicity::Quarterly),
      vec![
        income(ymd(2024, 12, 28), "124"),
        income(ymd(2024, 9, 28), "95"),
        income(ymd(2024, 6, 29), "86"),
        income(ymd(2024, 3, 30), "90"),
        income(ymd(2023, 12, 30), "120"),
      ],
    );

    let report = ReportBuilder::default().build(&data).unwrap();
    let table = report.statement(StatementKind::Income, Periodicity::Quarterly).unwrap();

    assert_eq!(table.period_ends().len(), 4);
    assert!(table.cell(ymd(2023, 12, 30), Metric::TotalRevenue).is_none());

    let first_quarter = table.cell(ymd(2024, 3, 30), Metric::TotalRevenue).unwrap();
    assert_eq!(first_quarter.cell, "$90.00(-25.0%)");
    assert_approx_eq(first_quarter.growth_percent.unwrap(), -25.0, 1e-9);
    assert_eq!(first_quarter.sentiment, Some(Sentiment::Bearish));
  }

  #[test]
  fn valuation_needs_treasury_yield_and_debt() {
    let mut data = input(quote());
    data.statements.insert(
      (StatementKind::BalanceSheet, Periodicity::Annual),
      vec![raw_period(
        ymd(2024, 12, 31),
        &[("longTermDebt", "4000000000"), ("shortTermDebt", "1000000000")],
      )],
    );
    data.statements.insert(
      (StatementKind::Income, Periodicity::Annual),
      vec![raw_period(
        ymd(2024, 12, 31),
        &[
          ("interestExpense", "200000000"),
          ("incomeTaxExpense", "250000000"),
          ("incomeBeforeTax", "1000000000"),
        ],
      )],
    );
    assert!(ReportBuilder::default().build(&data).unwrap().valuation.is_none());

    data.treasury_yield = Some(4.0);
    let valuation = ReportBuilder::default().build(&data).unwrap().valuation.unwrap();

    // Kd = 0.2 / 5 * 0.75, Ke = 0.04 + 1.1 * 0.06, weights 5/30 and 25/30
    assert_approx_eq(valuation.wacc.cost_of_debt.rate, 0.03, 1e-12);
    assert_approx_eq(valuation.wacc.cost_of_equity, 0.106, 1e-12);
    assert_approx_eq(valuation.wacc.wacc, 0.0933333, 1e-6);
    assert_eq!(valuation.formatted, "9.33%");
    assert_eq!(valuation.cost_of_equity, "10.60%");
    assert_eq!(valuation.cost_of_debt, "3.00%");
  }

  #[test]
  fn valuation_is_left_out_without_statements() {
    let mut data = input(quote());
    data.treasury_yield = Some(4.0);
    assert!(ReportBuilder::default().build(&data).unwrap().valuation.is_none());
  }
}
