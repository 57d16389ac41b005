/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

//! Fundamental analysis data models for company financials

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Company overview with key financial metrics
///
/// Every field defaults to an empty string: the provider answers `{}` for
/// symbols it does not cover and `"None"` for values it does not have.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyOverview {
  #[serde(rename = "Symbol")]
  pub symbol: String,

  #[serde(rename = "AssetType")]
  pub asset_type: String,

  #[serde(rename = "Name")]
  pub name: String,

  /// Exchange where the stock is traded
  #[serde(rename = "Exchange")]
  pub exchange: String,

  #[serde(rename = "Currency")]
  pub currency: String,

  #[serde(rename = "Sector")]
  pub sector: String,

  #[serde(rename = "Industry")]
  pub industry: String,

  #[serde(rename = "LatestQuarter")]
  pub latest_quarter: String,

  #[serde(rename = "MarketCapitalization")]
  pub market_capitalization: String,

  /// Price to Earnings ratio
  #[serde(rename = "PERatio")]
  pub pe_ratio: String,

  #[serde(rename = "BookValue")]
  pub book_value: String,

  /// Trailing dividend yield as a fraction (`"0.0044"` is 0.44%)
  #[serde(rename = "DividendYield")]
  pub dividend_yield: String,

  #[serde(rename = "EPS")]
  pub eps: String,

  #[serde(rename = "52WeekHigh")]
  pub week_52_high: String,

  #[serde(rename = "52WeekLow")]
  pub week_52_low: String,

  #[serde(rename = "SharesOutstanding")]
  pub shares_outstanding: String,

  /// Market beta over the trailing five years
  #[serde(rename = "Beta")]
  pub beta: String,
}

impl CompanyOverview {
  pub fn is_empty(&self) -> bool {
    self.symbol.trim().is_empty()
  }
}

/// A statement response: the same report layout for annual and quarterly data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatement<R> {
  #[serde(default)]
  pub symbol: String,

  #[serde(rename = "annualReports", default = "Vec::new")]
  pub annual_reports: Vec<R>,

  #[serde(rename = "quarterlyReports", default = "Vec::new")]
  pub quarterly_reports: Vec<R>,
}

impl<R> FinancialStatement<R> {
  /// True when the provider had nothing for the requested symbol
  pub fn is_empty(&self) -> bool {
    self.annual_reports.is_empty() && self.quarterly_reports.is_empty()
  }
}

pub type IncomeStatement = FinancialStatement<IncomeStatementReport>;
pub type BalanceSheet = FinancialStatement<BalanceSheetReport>;
pub type CashFlow = FinancialStatement<CashFlowReport>;

/// Common access to a single statement report
pub trait FinancialReport: Serialize {
  fn fiscal_date_ending(&self) -> &str;

  /// All reported values keyed by the provider's field names
  fn fields(&self) -> serde_json::Result<BTreeMap<String, String>> {
    let mut fields: BTreeMap<String, String> = serde_json::from_value(serde_json::to_value(self)?)?;
    fields.remove("fiscalDateEnding");
    fields.remove("reportedCurrency");
    Ok(fields)
  }
}

/// Individual income statement report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeStatementReport {
  pub fiscal_date_ending: String,
  pub reported_currency: String,
  pub gross_profit: String,
  pub total_revenue: String,
  pub cost_of_revenue: String,
  pub operating_income: String,
  pub operating_expenses: String,
  pub research_and_development: String,
  pub income_before_tax: String,
  pub income_tax_expense: String,
  pub interest_expense: String,
  pub ebit: String,
  pub ebitda: String,
  pub net_income: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalanceSheetReport {
  pub fiscal_date_ending: String,
  pub reported_currency: String,
  pub total_assets: String,
  pub total_current_assets: String,
  pub cash_and_cash_equivalents_at_carrying_value: String,
  pub total_liabilities: String,
  pub total_current_liabilities: String,
  pub long_term_debt: String,
  pub short_term_debt: String,
  pub short_long_term_debt_total: String,
  pub total_shareholder_equity: String,
  pub retained_earnings: String,
  pub common_stock_shares_outstanding: String,
}

/// Individual cash flow report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashFlowReport {
  pub fiscal_date_ending: String,
  pub reported_currency: String,
  pub operating_cashflow: String,
  pub capital_expenditures: String,
  pub cashflow_from_investment: String,
  pub cashflow_from_financing: String,
  pub dividend_payout: String,
  pub payments_for_repurchase_of_common_stock: String,
  pub change_in_cash_and_cash_equivalents: String,
  pub net_income: String,
}

macro_rules! impl_financial_report {
  ($($report:ty),+ $(,)?) => {
    $(
      impl FinancialReport for $report {
        fn fiscal_date_ending(&self) -> &str {
          &self.fiscal_date_ending
        }
      }
    )+
  };
}

impl_financial_report!(IncomeStatementReport, BalanceSheetReport, CashFlowReport);
