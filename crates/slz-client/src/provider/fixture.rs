use super::MarketDataProvider;
use async_trait::async_trait;
use chrono::{Months, NaiveDate};
use slz_core::{Error, Periodicity, PricePoint, RawPeriod, RawQuote, Result, StatementKind, Symbol};
use std::collections::BTreeMap;

/// Canned data for one ticker
#[derive(Debug, Clone)]
pub struct FixtureTicker {
  pub quote: RawQuote,
  pub history: Vec<PricePoint>,
  pub statements: BTreeMap<(StatementKind, Periodicity), Vec<RawPeriod>>,
}

/// In-memory [`MarketDataProvider`] for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
  tickers: BTreeMap<Symbol, FixtureTicker>,
  treasury_yield: Option<f64>,
}

impl FixtureProvider {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_ticker(mut self, symbol: Symbol, ticker: FixtureTicker) -> Self {
    self.tickers.insert(symbol, ticker);
    self
  }

  /// Treasury yield in percent; without one the fetch fails
  pub fn with_treasury_yield(mut self, percent: f64) -> Self {
    self.treasury_yield = Some(percent);
    self
  }

  /// The bundled AAPL fixture, with its price history anchored at `as_of`
  pub fn with_default_data(as_of: NaiveDate) -> Self {
    let provider = Self::new().with_treasury_yield(DEFAULT_TREASURY_YIELD);
    match Symbol::parse("AAPL") {
      Ok(symbol) => provider.with_ticker(symbol, aapl_fixture(as_of)),
      Err(_) => provider,
    }
  }

  fn ticker(&self, symbol: &Symbol) -> Result<&FixtureTicker> {
    self.tickers.get(symbol).ok_or_else(|| Error::NotFound(symbol.to_string()))
  }
}

#[async_trait]
impl MarketDataProvider for FixtureProvider {
  fn source_name(&self) -> &'static str {
    "Fixture"
  }

  async fn fetch_quote(&self, symbol: &Symbol) -> Result<RawQuote> {
    Ok(self.ticker(symbol)?.quote.clone())
  }

  async fn fetch_price_history(
    &self,
    symbol: &Symbol,
    since: NaiveDate,
  ) -> Result<Vec<PricePoint>> {
    let mut points: Vec<PricePoint> =
      self.ticker(symbol)?.history.iter().filter(|p| p.as_of >= since).copied().collect();
    points.sort_by_key(|p| p.as_of);
    Ok(points)
  }

  async fn fetch_statement(
    &self,
    symbol: &Symbol,
    kind: StatementKind,
    periodicity: Periodicity,
  ) -> Result<Vec<RawPeriod>> {
    self
      .ticker(symbol)?
      .statements
      .get(&(kind, periodicity))
      .cloned()
      .ok_or_else(|| Error::NotFound(symbol.to_string()))
  }

  async fn fetch_treasury_yield(&self) -> Result<f64> {
    self.treasury_yield.ok_or_else(|| Error::Api("No treasury yield in fixture".to_string()))
  }
}

const DEFAULT_TREASURY_YIELD: f64 = 4.5;

/// Growth of the fixture's price series, in percent, per lookback in years
const AAPL_GROWTH: [(u32, f64); 5] =
  [(1, -7.52), (2, 6.14), (3, 42.87), (5, 91.11), (10, 662.93)];

const AAPL_PRICE: f64 = 202.38;

fn aapl_fixture(as_of: NaiveDate) -> FixtureTicker {
  let quote = RawQuote {
    symbol: "AAPL".to_string(),
    company_name: "Apple Inc.".to_string(),
    sector: Some("Technology".to_string()),
    current_price: AAPL_PRICE,
    previous_close: 207.56,
    day_open: 205.00,
    day_high: 205.44,
    day_low: 201.50,
    volume: 45_234_567,
    week52_low: Some(164.08),
    week52_high: Some(237.49),
    market_cap: Some(3_000_000_000_000.0),
    pe_ratio: Some(30.66),
    eps: Some(6.60),
    book_value: Some(4.43),
    dividend_yield: Some(0.44),
    beta: Some(1.21),
  };

  // one point per lookback target plus the latest close
  let mut history: Vec<PricePoint> = AAPL_GROWTH
    .iter()
    .filter_map(|(years, growth)| {
      let date = as_of.checked_sub_months(Months::new(years * 12))?;
      Some(PricePoint::new(date, AAPL_PRICE / (1.0 + growth / 100.0)))
    })
    .collect();
  history.push(PricePoint::new(as_of, AAPL_PRICE));
  history.sort_by_key(|p| p.as_of);

  FixtureTicker { quote, history, statements: aapl_statements() }
}

type Row<'a> = (&'a str, [&'a str; 6]);

const INCOME_FIELDS: [&str; 5] =
  ["totalRevenue", "netIncome", "interestExpense", "incomeTaxExpense", "incomeBeforeTax"];
const BALANCE_FIELDS: [&str; 6] = [
  "totalAssets",
  "totalLiabilities",
  "totalShareholderEquity",
  "commonStockSharesOutstanding",
  "longTermDebt",
  "shortTermDebt",
];
const CASH_FLOW_FIELDS: [&str; 5] = [
  "operatingCashflow",
  "capitalExpenditures",
  "cashflowFromInvestment",
  "cashflowFromFinancing",
  "changeInCashAndCashEquivalents",
];

// FY2024 reports no interest expense
const ANNUAL_INCOME: [Row<'static>; 4] = [
  ("2024-09-28", ["391035000000", "93736000000", "None", "29749000000", "123485000000", ""]),
  ("2023-09-30", ["383285000000", "96995000000", "3933000000", "16741000000", "113736000000", ""]),
  ("2022-09-24", ["394328000000", "99803000000", "2931000000", "19300000000", "119103000000", ""]),
  ("2021-09-25", ["365817000000", "94680000000", "2645000000", "14527000000", "109207000000", ""]),
];

const QUARTERLY_INCOME: [Row<'static>; 5] = [
  ("2024-12-28", ["124300000000", "36330000000", "", "", "", ""]),
  ("2024-09-28", ["94930000000", "14736000000", "", "", "", ""]),
  ("2024-06-29", ["85777000000", "21448000000", "", "", "", ""]),
  ("2024-03-30", ["90753000000", "23636000000", "", "", "", ""]),
  ("2023-12-30", ["119575000000", "33916000000", "", "", "", ""]),
];

const ANNUAL_BALANCE: [Row<'static>; 4] = [
  ("2024-09-28", ["364980000000", "308030000000", "56950000000", "15116786000", "85750000000", "10912000000"]),
  ("2023-09-30", ["352583000000", "290437000000", "62146000000", "15550061000", "95281000000", "15807000000"]),
  ("2022-09-24", ["352755000000", "302083000000", "50672000000", "15943425000", "98959000000", "21110000000"]),
  ("2021-09-25", ["351002000000", "287912000000", "63090000000", "16426786000", "109106000000", "15613000000"]),
];

const QUARTERLY_BALANCE: [Row<'static>; 5] = [
  ("2024-12-28", ["344085000000", "277327000000", "66758000000", "15040000000", "", ""]),
  ("2024-09-28", ["364980000000", "308030000000", "56950000000", "15116786000", "", ""]),
  ("2024-06-29", ["331612000000", "264904000000", "66708000000", "15222259000", "", ""]),
  ("2024-03-30", ["337411000000", "263217000000", "74194000000", "15337686000", "", ""]),
  ("2023-12-30", ["353514000000", "279414000000", "74100000000", "15460223000", "", ""]),
];

const ANNUAL_CASH_FLOW: [Row<'static>; 4] = [
  ("2024-09-28", ["118254000000", "9447000000", "2935000000", "-121983000000", "-794000000", ""]),
  ("2023-09-30", ["110543000000", "10959000000", "3705000000", "-108488000000", "5760000000", ""]),
  ("2022-09-24", ["122151000000", "10708000000", "-22354000000", "-110749000000", "-10952000000", ""]),
  ("2021-09-25", ["104038000000", "11085000000", "-14545000000", "-93353000000", "-3860000000", ""]),
];

const QUARTERLY_CASH_FLOW: [Row<'static>; 5] = [
  ("2024-12-28", ["29935000000", "2940000000", "-209000000", "-39371000000", "-9645000000", ""]),
  ("2024-09-28", ["26811000000", "2908000000", "1445000000", "-24948000000", "3308000000", ""]),
  ("2024-06-29", ["28858000000", "2151000000", "-127000000", "-36017000000", "-7286000000", ""]),
  ("2024-03-30", ["22690000000", "1996000000", "-310000000", "-30433000000", "-8053000000", ""]),
  ("2023-12-30", ["39895000000", "2392000000", "1927000000", "-27419000000", "14403000000", ""]),
];

fn aapl_statements() -> BTreeMap<(StatementKind, Periodicity), Vec<RawPeriod>> {
  use Periodicity::{Annual, Quarterly};
  use StatementKind::{BalanceSheet, CashFlow, Income};

  BTreeMap::from([
    ((Income, Annual), periods(&INCOME_FIELDS, &ANNUAL_INCOME)),
    ((Income, Quarterly), periods(&INCOME_FIELDS, &QUARTERLY_INCOME)),
    ((BalanceSheet, Annual), periods(&BALANCE_FIELDS, &ANNUAL_BALANCE)),
    ((BalanceSheet, Quarterly), periods(&BALANCE_FIELDS, &QUARTERLY_BALANCE)),
    ((CashFlow, Annual), periods(&CASH_FLOW_FIELDS, &ANNUAL_CASH_FLOW)),
    ((CashFlow, Quarterly), periods(&CASH_FLOW_FIELDS, &QUARTERLY_CASH_FLOW)),
  ])
}

fn periods(fields: &[&str], rows: &[Row]) -> Vec<RawPeriod> {
  rows
    .iter()
    .filter_map(|(date, values)| {
      let period_end = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
      Some(
        fields
          .iter()
          .zip(values.iter())
          .fold(RawPeriod::new(period_end), |period, (name, value)| period.with_field(*name, *value)),
      )
    })
    .collect()
}
