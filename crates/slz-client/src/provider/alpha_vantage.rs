use super::MarketDataProvider;
use crate::AlphaVantageClient;
use async_trait::async_trait;
use chrono::NaiveDate;
use slz_core::{
  parse_raw_number, Config, Error, Periodicity, PricePoint, RawPeriod, RawQuote, Result,
  StatementKind, Symbol,
};
use slz_models::{
  parse_date, CompanyOverview, FinancialReport, FinancialStatement, QuoteData, TreasuryYield,
  WeeklyAdjustedTimeSeries,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// [`MarketDataProvider`] backed by the AlphaVantage REST API.
///
/// Quotes combine `GLOBAL_QUOTE` with `OVERVIEW`; history comes from
/// `TIME_SERIES_WEEKLY_ADJUSTED`; statements from `INCOME_STATEMENT`,
/// `BALANCE_SHEET` and `CASH_FLOW`; the risk-free rate from `TREASURY_YIELD`.
#[derive(Debug)]
pub struct AlphaVantageProvider {
  client: AlphaVantageClient,
}

impl AlphaVantageProvider {
  pub fn new(config: Config) -> Result<Self> {
    Ok(Self { client: AlphaVantageClient::new(config)? })
  }

  pub fn from_client(client: AlphaVantageClient) -> Self {
    Self { client }
  }

  /// Overview for the symbol, `None` when the provider has none
  async fn overview(&self, symbol: &Symbol) -> Result<Option<CompanyOverview>> {
    match self.client.fundamentals().company_overview(symbol.as_str()).await {
      Ok(overview) if overview.is_empty() => Ok(None),
      Ok(overview) => Ok(Some(overview)),
      Err(e) if e.is_not_found() => Ok(None),
      Err(e) => Err(e),
    }
  }

  async fn statement_set(
    &self,
    symbol: &Symbol,
    kind: StatementKind,
  ) -> Result<BTreeMap<Periodicity, Vec<RawPeriod>>> {
    let fundamentals = self.client.fundamentals();
    let ticker = symbol.as_str();
    match kind {
      StatementKind::Income => split_statement(symbol, &fundamentals.income_statement(ticker).await?),
      StatementKind::BalanceSheet => split_statement(symbol, &fundamentals.balance_sheet(ticker).await?),
      StatementKind::CashFlow => split_statement(symbol, &fundamentals.cash_flow(ticker).await?),
    }
  }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
  fn source_name(&self) -> &'static str {
    "AlphaVantage"
  }

  #[instrument(skip(self, symbol), fields(symbol = %symbol))]
  async fn fetch_quote(&self, symbol: &Symbol) -> Result<RawQuote> {
    let quote = self.client.time_series().quote(symbol.as_str()).await?;
    if quote.global_quote.is_empty() {
      return Err(Error::NotFound(symbol.to_string()));
    }

    let overview = self.overview(symbol).await?;
    if overview.is_none() {
      warn!("No company overview for {}; fundamentals will be empty", symbol);
    }

    let raw = to_raw_quote(symbol, &quote.global_quote, overview.as_ref())?;
    info!("Fetched quote for {}: {}", symbol, raw.current_price);
    Ok(raw)
  }

  #[instrument(skip(self, symbol), fields(symbol = %symbol))]
  async fn fetch_price_history(
    &self,
    symbol: &Symbol,
    since: NaiveDate,
  ) -> Result<Vec<PricePoint>> {
    let series = match self.client.time_series().weekly_adjusted(symbol.as_str()).await {
      Ok(series) => series,
      // the series endpoint rejects unknown symbols as an invalid call
      Err(Error::Api(msg)) if msg.contains("Invalid API call") => {
        return Err(Error::NotFound(symbol.to_string()));
      }
      Err(e) => return Err(e),
    };
    if series.is_empty() {
      return Err(Error::NotFound(symbol.to_string()));
    }

    let points = to_price_points(&series, since)?;
    debug!("{} weekly points since {}", points.len(), since);
    Ok(points)
  }

  #[instrument(skip(self, symbol), fields(symbol = %symbol))]
  async fn fetch_statement(
    &self,
    symbol: &Symbol,
    kind: StatementKind,
    periodicity: Periodicity,
  ) -> Result<Vec<RawPeriod>> {
    let mut statements = self.statement_set(symbol, kind).await?;
    Ok(statements.remove(&periodicity).unwrap_or_default())
  }

  #[instrument(skip(self, symbol), fields(symbol = %symbol))]
  async fn fetch_statements(
    &self,
    symbol: &Symbol,
    kind: StatementKind,
  ) -> Result<BTreeMap<Periodicity, Vec<RawPeriod>>> {
    self.statement_set(symbol, kind).await
  }

  #[instrument(skip(self))]
  async fn fetch_treasury_yield(&self) -> Result<f64> {
    let treasury = self.client.economic().treasury_yield().await?;
    let latest = latest_yield(&treasury)?;
    debug!("10-year treasury yield {}%", latest);
    Ok(latest)
  }
}

/// Combine the quote endpoint with the company overview.
///
/// The overview reports the dividend yield as a fraction; it is converted to
/// percent here and nowhere else.
fn to_raw_quote(
  symbol: &Symbol,
  quote: &QuoteData,
  overview: Option<&CompanyOverview>,
) -> Result<RawQuote> {
  let current_price = parse_raw_number(&quote.price)
    .ok_or_else(|| Error::Parse(format!("Invalid price '{}' for {}", quote.price, symbol)))?;
  let or_price = |raw: &str| parse_raw_number(raw).unwrap_or(current_price);
  let number = |field: Option<&String>| field.and_then(|raw| parse_raw_number(raw));

  let company_name = overview
    .map(|o| o.name.trim())
    .filter(|name| !name.is_empty())
    .unwrap_or(symbol.as_str())
    .to_string();
  let sector = overview
    .map(|o| o.sector.trim())
    .filter(|sector| !sector.is_empty() && !sector.eq_ignore_ascii_case("none"))
    .map(str::to_string);

  Ok(RawQuote {
    symbol: symbol.to_string(),
    company_name,
    sector,
    current_price,
    previous_close: or_price(&quote.previous_close),
    day_open: or_price(&quote.open),
    day_high: or_price(&quote.high),
    day_low: or_price(&quote.low),
    volume: parse_raw_number(&quote.volume).map(|v| v.max(0.0) as u64).unwrap_or(0),
    week52_low: number(overview.map(|o| &o.week_52_low)),
    week52_high: number(overview.map(|o| &o.week_52_high)),
    market_cap: number(overview.map(|o| &o.market_capitalization)),
    pe_ratio: number(overview.map(|o| &o.pe_ratio)),
    eps: number(overview.map(|o| &o.eps)),
    book_value: number(overview.map(|o| &o.book_value)),
    dividend_yield: number(overview.map(|o| &o.dividend_yield)).map(|fraction| fraction * 100.0),
    beta: number(overview.map(|o| &o.beta)),
  })
}

/// Most recent observation that carries a number
fn latest_yield(treasury: &TreasuryYield) -> Result<f64> {
  let mut observations: Vec<_> = treasury.data.iter().collect();
  observations.sort_by(|a, b| b.date.cmp(&a.date));
  observations
    .into_iter()
    .find_map(|observation| parse_raw_number(&observation.value))
    .ok_or_else(|| Error::Parse("No usable treasury yield observation".to_string()))
}

/// Adjusted closes on or after `since`, ascending by date
fn to_price_points(series: &WeeklyAdjustedTimeSeries, since: NaiveDate) -> Result<Vec<PricePoint>> {
  let mut points = Vec::with_capacity(series.len());
  for (date, data) in &series.time_series {
    let as_of = parse_date(date)?;
    if as_of < since {
      continue;
    }
    match parse_raw_number(&data.adjusted_close) {
      Some(close) => points.push(PricePoint::new(as_of, close)),
      None => debug!("Skipping {} without an adjusted close", date),
    }
  }
  points.sort_by_key(|point| point.as_of);
  Ok(points)
}

fn split_statement<R: FinancialReport>(
  symbol: &Symbol,
  statement: &FinancialStatement<R>,
) -> Result<BTreeMap<Periodicity, Vec<RawPeriod>>> {
  if statement.is_empty() {
    return Err(Error::NotFound(symbol.to_string()));
  }
  Ok(BTreeMap::from([
    (Periodicity::Annual, to_raw_periods(&statement.annual_reports)?),
    (Periodicity::Quarterly, to_raw_periods(&statement.quarterly_reports)?),
  ]))
}

fn to_raw_periods<R: FinancialReport>(reports: &[R]) -> Result<Vec<RawPeriod>> {
  let mut periods = Vec::with_capacity(reports.len());
  for report in reports {
    let Ok(period_end) = parse_date(report.fiscal_date_ending()) else {
      warn!("Skipping report with bad fiscal date '{}'", report.fiscal_date_ending());
      continue;
    };
    periods.push(RawPeriod { period_end, fields: report.fields()? });
  }
  Ok(periods)
}

#[cfg(test)]
mod tests {
  use super::*;
  use slz_core::test_utils::{assert_approx_eq, ymd};
  use slz_models::{CashFlowReport, IndicatorValue, OhlcvAdjustedData};

  fn aapl() -> Symbol {
    Symbol::parse("AAPL").unwrap()
  }

  fn quote_data() -> QuoteData {
    QuoteData {
      symbol: "AAPL".to_string(),
      open: "205.00".to_string(),
      high: "205.44".to_string(),
      low: "201.50".to_string(),
      price: "202.38".to_string(),
      volume: "45234567".to_string(),
      previous_close: "207.56".to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn quote_uses_overview_for_fundamentals() {
    let overview = CompanyOverview {
      symbol: "AAPL".to_string(),
      name: "Apple Inc".to_string(),
      sector: "TECHNOLOGY".to_string(),
      pe_ratio: "30.66".to_string(),
      eps: "6.60".to_string(),
      dividend_yield: "0.0044".to_string(),
      book_value: "None".to_string(),
      week_52_low: "164.08".to_string(),
      week_52_high: "237.49".to_string(),
      beta: "1.21".to_string(),
      ..Default::default()
    };

    let raw = to_raw_quote(&aapl(), &quote_data(), Some(&overview)).unwrap();
    assert_eq!(raw.company_name, "Apple Inc");
    assert_eq!(raw.sector.as_deref(), Some("TECHNOLOGY"));
    assert_eq!(raw.volume, 45_234_567);
    assert_eq!(raw.pe_ratio, Some(30.66));
    assert_eq!(raw.book_value, None);
    assert_eq!(raw.week52_high, Some(237.49));
    assert_approx_eq(raw.dividend_yield.unwrap(), 0.44, 1e-9);
    assert_eq!(raw.beta, Some(1.21));
  }

  #[test]
  fn quote_without_overview_falls_back_to_symbol() {
    let raw = to_raw_quote(&aapl(), &quote_data(), None).unwrap();
    assert_eq!(raw.company_name, "AAPL");
    assert_eq!(raw.sector, None);
    assert_eq!(raw.market_cap, None);
    assert_eq!(raw.week52_low, None);
    assert_eq!(raw.beta, None);
  }

  #[test]
  fn quote_without_price_is_a_parse_error() {
    let quote = QuoteData { price: "None".to_string(), ..quote_data() };
    assert!(matches!(to_raw_quote(&aapl(), &quote, None), Err(Error::Parse(_))));
  }

  #[test]
  fn latest_yield_skips_missing_observations() {
    let observation = |date: &str, value: &str| IndicatorValue {
      date: date.to_string(),
      value: value.to_string(),
    };
    let treasury = TreasuryYield {
      data: vec![
        observation("2025-05-29", "4.43"),
        observation("2025-05-30", "."),
        observation("2025-05-28", "4.48"),
      ],
      ..Default::default()
    };
    assert_eq!(latest_yield(&treasury).unwrap(), 4.43);

    let empty = TreasuryYield { data: vec![observation("2025-05-30", ".")], ..Default::default() };
    assert!(matches!(latest_yield(&empty), Err(Error::Parse(_))));
  }

  #[test]
  fn price_points_are_filtered_and_ascending() {
    let mut series = WeeklyAdjustedTimeSeries::default();
    for (date, close) in [("2025-06-13", "196.45"), ("2015-06-12", "29.8"), ("2024-06-14", "")] {
      series.time_series.insert(
        date.to_string(),
        OhlcvAdjustedData { adjusted_close: close.to_string(), ..Default::default() },
      );
    }

    let points = to_price_points(&series, ymd(2016, 1, 1)).unwrap();
    assert_eq!(points, vec![PricePoint::new(ymd(2025, 6, 13), 196.45)]);

    let points = to_price_points(&series, ymd(2015, 1, 1)).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].as_of, ymd(2015, 6, 12));
  }

  #[test]
  fn statement_reports_become_raw_periods() {
    let statement = FinancialStatement {
      symbol: "AAPL".to_string(),
      annual_reports: vec![
        CashFlowReport {
          fiscal_date_ending: "2024-09-30".to_string(),
          operating_cashflow: "118254000000".to_string(),
          capital_expenditures: "9447000000".to_string(),
          ..Default::default()
        },
        CashFlowReport { fiscal_date_ending: "n/a".to_string(), ..Default::default() },
      ],
      quarterly_reports: vec![],
    };

    let split = split_statement(&aapl(), &statement).unwrap();
    let annual = &split[&Periodicity::Annual];
    assert_eq!(annual.len(), 1);
    assert_eq!(annual[0].period_end, ymd(2024, 9, 30));
    assert_eq!(annual[0].number("capitalExpenditures"), Some(9_447_000_000.0));
    assert!(split[&Periodicity::Quarterly].is_empty());
  }

  #[test]
  fn empty_statement_is_not_found() {
    let statement: FinancialStatement<CashFlowReport> =
      FinancialStatement { symbol: String::new(), annual_reports: vec![], quarterly_reports: vec![] };
    assert!(split_statement(&aapl(), &statement).unwrap_err().is_not_found());
  }
}
