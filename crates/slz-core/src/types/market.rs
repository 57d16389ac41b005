//! Raw market data as handed over by a market data provider

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable quote snapshot for one ticker, created once per fetch.
///
/// `dividend_yield` is in percent units (`0.44` means 0.44%). Providers that
/// report a fraction convert at their boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
  pub symbol: String,
  pub company_name: String,
  pub sector: Option<String>,
  pub current_price: f64,
  pub previous_close: f64,
  pub day_open: f64,
  pub day_high: f64,
  pub day_low: f64,
  pub volume: u64,
  pub week52_low: Option<f64>,
  pub week52_high: Option<f64>,
  pub market_cap: Option<f64>,
  pub pe_ratio: Option<f64>,
  pub eps: Option<f64>,
  pub book_value: Option<f64>,
  pub dividend_yield: Option<f64>,
  /// Market beta; valuation assumes 1.0 when absent
  #[serde(default)]
  pub beta: Option<f64>,
}

/// One adjusted close of a price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
  pub as_of: NaiveDate,
  pub adjusted_close: f64,
}

impl PricePoint {
  pub fn new(as_of: NaiveDate, adjusted_close: f64) -> Self {
    Self { as_of, adjusted_close }
  }
}

/// A statement period exactly as the provider reported it.
///
/// Field names are the provider's own; translating them into metrics is the
/// job of the statement normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPeriod {
  pub period_end: NaiveDate,
  pub fields: BTreeMap<String, String>,
}

impl RawPeriod {
  pub fn new(period_end: NaiveDate) -> Self {
    Self { period_end, fields: BTreeMap::new() }
  }

  /// Builder-style helper, mostly for fixtures
  pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.fields.insert(name.into(), value.into());
    self
  }

  pub fn field(&self, name: &str) -> Option<&str> {
    self.fields.get(name).map(String::as_str)
  }

  /// Numeric value of a field, `None` when absent or not a usable number
  pub fn number(&self, name: &str) -> Option<f64> {
    self.field(name).and_then(parse_raw_number)
  }
}

/// Parse a provider-reported number.
///
/// Providers use `""`, `"None"` and `"-"` for missing values; those, anything
/// unparseable and non-finite results all come back as `None`.
pub fn parse_raw_number(raw: &str) -> Option<f64> {
  let trimmed = raw.trim();
  if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("none") {
    return None;
  }
  trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn raw_period_fields() {
    let period = RawPeriod::new(NaiveDate::from_ymd_opt(2024, 9, 28).unwrap())
      .with_field("totalRevenue", "391035000000")
      .with_field("netIncome", "None");

    assert_eq!(period.field("totalRevenue"), Some("391035000000"));
    assert_eq!(period.field("netIncome"), Some("None"));
    assert_eq!(period.field("grossProfit"), None);
    assert_eq!(period.number("totalRevenue"), Some(391_035_000_000.0));
    assert_eq!(period.number("netIncome"), None);
  }

  #[test]
  fn missing_markers_are_not_numbers() {
    for raw in ["", "  ", "None", "none", "-", "n/a", "NaN", "inf", "12abc"] {
      assert_eq!(parse_raw_number(raw), None, "{raw:?}");
    }
    assert_eq!(parse_raw_number(" -794000000 "), Some(-794_000_000.0));
    assert_eq!(parse_raw_number("0.0044"), Some(0.0044));
  }
}
