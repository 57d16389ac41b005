//! Weighted average cost of capital from the quote and annual statements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slz_core::RawPeriod;
use tracing::debug;

/// Market beta assumed when the provider reports none
pub const DEFAULT_BETA: f64 = 1.0;
/// Return investors require from equity, as a fraction
pub const DEFAULT_REQUIRED_RETURN: f64 = 0.10;

/// Provider field names feeding the cost of capital
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtFields {
  pub long_term_debt: String,
  pub current_debt: String,
  /// Used only when either of the two above is missing
  pub total_debt: String,
  pub interest_expense: String,
  pub income_tax_expense: String,
  pub pretax_income: String,
}

impl DebtFields {
  /// Field names used by the AlphaVantage statement endpoints
  pub fn alpha_vantage() -> Self {
    Self {
      long_term_debt: "longTermDebt".to_string(),
      current_debt: "shortTermDebt".to_string(),
      total_debt: "shortLongTermDebtTotal".to_string(),
      interest_expense: "interestExpense".to_string(),
      income_tax_expense: "incomeTaxExpense".to_string(),
      pretax_income: "incomeBeforeTax".to_string(),
    }
  }
}

impl Default for DebtFields {
  fn default() -> Self {
    Self::alpha_vantage()
  }
}

/// Debt and interest figures of one fiscal year
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DebtYear {
  pub period_end: NaiveDate,
  pub long_term_debt: Option<f64>,
  pub current_debt: Option<f64>,
  pub total_debt: Option<f64>,
  pub interest_expense: Option<f64>,
  pub income_tax_expense: Option<f64>,
  pub pretax_income: Option<f64>,
}

impl DebtYear {
  /// Long-term plus current debt, else the reported total
  pub fn total_debt(&self) -> Option<f64> {
    match (self.long_term_debt, self.current_debt) {
      (Some(long_term), Some(current)) => Some(long_term + current),
      _ => self.total_debt,
    }
  }

  /// Effective tax rate; zero when the year reports no tax figures.
  ///
  /// `None` when pretax income is zero.
  pub fn tax_rate(&self) -> Option<f64> {
    match (self.income_tax_expense, self.pretax_income) {
      (Some(_), Some(pretax)) if pretax == 0.0 => None,
      (Some(tax), Some(pretax)) => Some(tax / pretax),
      _ => Some(0.0),
    }
  }
}

/// Pair annual balance sheets with the income statement of the same year,
/// most recent first.
pub fn debt_years(
  income: &[RawPeriod],
  balance: &[RawPeriod],
  fields: &DebtFields,
) -> Vec<DebtYear> {
  let mut sheets: Vec<&RawPeriod> = balance.iter().collect();
  sheets.sort_by(|a, b| b.period_end.cmp(&a.period_end));
  sheets.dedup_by_key(|sheet| sheet.period_end);

  sheets
    .into_iter()
    .map(|sheet| {
      let statement = income.iter().find(|period| period.period_end == sheet.period_end);
      let reported = |name: &str| statement.and_then(|period| period.number(name));
      DebtYear {
        period_end: sheet.period_end,
        long_term_debt: sheet.number(&fields.long_term_debt),
        current_debt: sheet.number(&fields.current_debt),
        total_debt: sheet.number(&fields.total_debt),
        interest_expense: reported(&fields.interest_expense),
        income_tax_expense: reported(&fields.income_tax_expense),
        pretax_income: reported(&fields.pretax_income),
      }
    })
    .collect()
}

/// Capital asset pricing: `treasury + beta * (required - treasury)`
pub fn cost_of_equity(treasury_yield: f64, beta: f64, required_return: f64) -> f64 {
  treasury_yield + beta * (required_return - treasury_yield)
}

/// After-tax cost of debt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostOfDebt {
  pub rate: f64,
  pub tax_rate: f64,
  /// Fiscal year the rate was taken from
  pub period_end: NaiveDate,
}

/// Cost of debt from the most recent year reporting interest expense.
///
/// Interest is divided by that same year's debt. A year with interest but no
/// usable debt or tax rate ends the search.
pub fn cost_of_debt(years: &[DebtYear]) -> Option<CostOfDebt> {
  let year = years.iter().find(|year| year.interest_expense.is_some())?;
  let interest = year.interest_expense?.abs();
  let debt = year.total_debt().filter(|debt| *debt != 0.0)?;
  let tax_rate = year.tax_rate()?;

  let rate = interest / debt * (1.0 - tax_rate);
  debug!("Cost of debt {:.4} from fiscal year {}", rate, year.period_end);
  rate.is_finite().then_some(CostOfDebt { rate, tax_rate, period_end: year.period_end })
}

/// What the cost of capital is computed from
#[derive(Debug, Clone, PartialEq)]
pub struct WaccInputs {
  pub market_cap: Option<f64>,
  pub beta: Option<f64>,
  /// 10-year treasury yield as a fraction (`0.045` is 4.5%)
  pub treasury_yield: Option<f64>,
  pub required_return: f64,
  /// Most recent first
  pub years: Vec<DebtYear>,
}

/// Weighted average cost of capital and its parts, all fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wacc {
  pub wacc: f64,
  pub cost_of_equity: f64,
  pub cost_of_debt: CostOfDebt,
  pub beta: f64,
  pub treasury_yield: f64,
  pub total_debt: f64,
  pub debt_weight: f64,
  pub equity_weight: f64,
}

/// `D/(D+E) * Kd + E/(D+E) * Ke`, with debt from the latest balance sheet.
///
/// `None` when any part is unavailable or debt plus equity is zero.
pub fn wacc(inputs: &WaccInputs) -> Option<Wacc> {
  let equity = inputs.market_cap.filter(|cap| cap.is_finite())?;
  let total_debt = inputs.years.first()?.total_debt()?;
  let capital = total_debt + equity;
  if capital == 0.0 || !capital.is_finite() {
    return None;
  }

  let cost_of_debt = cost_of_debt(&inputs.years)?;
  let treasury_yield = inputs.treasury_yield.filter(|y| y.is_finite())?;
  let beta = inputs.beta.filter(|b| b.is_finite()).unwrap_or(DEFAULT_BETA);
  let cost_of_equity = cost_of_equity(treasury_yield, beta, inputs.required_return);

  let debt_weight = total_debt / capital;
  let equity_weight = equity / capital;
  let wacc = debt_weight * cost_of_debt.rate + equity_weight * cost_of_equity;

  wacc.is_finite().then_some(Wacc {
    wacc,
    cost_of_equity,
    cost_of_debt,
    beta,
    treasury_yield,
    total_debt,
    debt_weight,
    equity_weight,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use slz_core::test_utils::{assert_approx_eq, raw_period, ymd};

  fn year(period_end: NaiveDate, debt: f64, interest: Option<f64>) -> DebtYear {
    DebtYear { period_end, total_debt: Some(debt), interest_expense: interest, ..Default::default() }
  }

  fn inputs() -> WaccInputs {
    WaccInputs {
      market_cap: Some(3.4e12),
      beta: Some(1.2),
      treasury_yield: Some(0.045),
      required_return: DEFAULT_REQUIRED_RETURN,
      years: vec![DebtYear {
        period_end: ymd(2024, 9, 28),
        long_term_debt: Some(85e9),
        current_debt: Some(21e9),
        interest_expense: Some(2e9),
        ..Default::default()
      }],
    }
  }

  #[test]
  fn wacc_weights_debt_and_equity() {
    let result = wacc(&inputs()).unwrap();

    assert_approx_eq(result.total_debt, 106e9, 1.0);
    assert_approx_eq(result.cost_of_debt.rate, 2.0 / 106.0, 1e-12);
    assert_approx_eq(result.cost_of_equity, 0.111, 1e-12);
    assert_approx_eq(result.debt_weight + result.equity_weight, 1.0, 1e-12);
    assert_approx_eq(result.wacc, 0.108214, 1e-6);
  }

  #[test]
  fn missing_market_cap_has_no_wacc() {
    let data = WaccInputs { market_cap: None, ..inputs() };
    assert!(wacc(&data).is_none());
  }

  #[test]
  fn missing_debt_has_no_wacc() {
    assert!(wacc(&WaccInputs { years: Vec::new(), ..inputs() }).is_none());

    let no_debt =
      DebtYear { period_end: ymd(2024, 9, 28), interest_expense: Some(2e9), ..Default::default() };
    assert!(wacc(&WaccInputs { years: vec![no_debt], ..inputs() }).is_none());
  }

  #[test]
  fn missing_treasury_yield_has_no_wacc() {
    assert!(wacc(&WaccInputs { treasury_yield: None, ..inputs() }).is_none());
  }

  #[test]
  fn zero_capital_has_no_wacc() {
    let data = WaccInputs {
      market_cap: Some(0.0),
      years: vec![year(ymd(2024, 9, 28), 0.0, Some(1e6))],
      ..inputs()
    };
    assert!(wacc(&data).is_none());
  }

  #[test]
  fn missing_beta_defaults_to_market() {
    let result = wacc(&WaccInputs { beta: None, ..inputs() }).unwrap();
    assert_eq!(result.beta, DEFAULT_BETA);
    assert_approx_eq(result.cost_of_equity, DEFAULT_REQUIRED_RETURN, 1e-12);
  }

  #[test]
  fn cost_of_debt_from_interest_over_debt() {
    let years = [year(ymd(2024, 12, 31), 25e9, Some(600e6))];
    let kd = cost_of_debt(&years).unwrap();
    assert_approx_eq(kd.rate, 0.024, 1e-12);
    assert_eq!(kd.tax_rate, 0.0);
  }

  #[test]
  fn cost_of_debt_uses_the_year_reporting_interest() {
    let years =
      [year(ymd(2024, 12, 31), 40e9, None), year(ymd(2023, 12, 31), 20e9, Some(800e6))];

    let kd = cost_of_debt(&years).unwrap();
    assert_approx_eq(kd.rate, 0.04, 1e-12);
    assert_eq!(kd.period_end, ymd(2023, 12, 31));

    let data = WaccInputs {
      market_cap: Some(2e12),
      beta: Some(1.1),
      treasury_yield: Some(0.042),
      required_return: DEFAULT_REQUIRED_RETURN,
      years: years.to_vec(),
    };
    let result = wacc(&data).unwrap();
    assert_approx_eq(result.cost_of_equity, 0.1058, 1e-12);
    // weights come from the latest balance sheet
    assert_eq!(result.total_debt, 40e9);
    assert!(result.wacc > 0.0 && result.wacc < 1.0);
    assert_approx_eq(result.wacc, 0.104510, 1e-6);
  }

  #[test]
  fn cost_of_debt_is_after_tax() {
    let taxed = DebtYear {
      income_tax_expense: Some(21e6),
      pretax_income: Some(100e6),
      ..year(ymd(2024, 12, 31), 10e9, Some(500e6))
    };
    let kd = cost_of_debt(&[taxed]).unwrap();
    assert_approx_eq(kd.tax_rate, 0.21, 1e-12);
    assert_approx_eq(kd.rate, 0.05 * 0.79, 1e-12);
  }

  #[test]
  fn zero_pretax_income_has_no_cost_of_debt() {
    let year = DebtYear {
      income_tax_expense: Some(1e6),
      pretax_income: Some(0.0),
      ..year(ymd(2024, 12, 31), 10e9, Some(500e6))
    };
    assert!(cost_of_debt(&[year]).is_none());
  }

  #[test]
  fn total_debt_falls_back_to_reported_total() {
    let both = DebtYear {
      long_term_debt: Some(85e9),
      current_debt: Some(21e9),
      total_debt: Some(1.0),
      ..Default::default()
    };
    assert_eq!(both.total_debt(), Some(106e9));

    let partial =
      DebtYear { long_term_debt: Some(85e9), total_debt: Some(99e9), ..Default::default() };
    assert_eq!(partial.total_debt(), Some(99e9));
  }

  #[test]
  fn debt_years_pair_statements_by_date() {
    let fields = DebtFields::alpha_vantage();
    let debt = |long_term, short_term| [("longTermDebt", long_term), ("shortTermDebt", short_term)];
    let balance = vec![
      raw_period(ymd(2023, 9, 30), &debt("95281000000", "15807000000")),
      raw_period(ymd(2024, 9, 28), &debt("85750000000", "10912000000")),
    ];
    let income = vec![
      raw_period(ymd(2024, 9, 28), &[("interestExpense", "None"), ("incomeBeforeTax", "123485000000")]),
      raw_period(
        ymd(2023, 9, 30),
        &[
          ("interestExpense", "3933000000"),
          ("incomeTaxExpense", "16741000000"),
          ("incomeBeforeTax", "113736000000"),
        ],
      ),
    ];

    let years = debt_years(&income, &balance, &fields);
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].period_end, ymd(2024, 9, 28));
    assert_eq!(years[0].interest_expense, None);
    assert_eq!(years[0].total_debt(), Some(96_662_000_000.0));

    let kd = cost_of_debt(&years).unwrap();
    assert_eq!(kd.period_end, ymd(2023, 9, 30));
    assert_approx_eq(kd.tax_rate, 0.147192, 1e-6);
    assert_approx_eq(kd.rate, 0.030193, 1e-6);
  }
}
