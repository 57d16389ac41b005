use super::{impl_endpoint_base, symbol_params, EndpointBase, SharedRateLimiter};
use crate::transport::Transport;
use slz_core::{FuncType, Result};
use slz_models::fundamentals::*;
use std::sync::Arc;
use tracing::instrument;

/// Fundamental data endpoints for company financial information
pub struct FundamentalsEndpoints {
  transport: Arc<Transport>,
  rate_limiter: SharedRateLimiter,
}

impl_endpoint_base!(FundamentalsEndpoints);

impl FundamentalsEndpoints {
  /// Create a new fundamentals endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: SharedRateLimiter) -> Self {
    Self { transport, rate_limiter }
  }

  /// Get company overview with key financial metrics
  ///
  /// Market cap, P/E, EPS, book value, dividend yield and the 52-week band.
  ///
  /// ```rust,no_run
  /// # async fn demo(endpoints: slz_client::FundamentalsEndpoints) -> slz_core::Result<()> {
  /// let overview = endpoints.company_overview("AAPL").await?;
  /// println!("Market Cap: {}", overview.market_capitalization);
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(self))]
  pub async fn company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
    self.wait_for_rate_limit().await?;
    self.transport().get(FuncType::Overview, symbol_params(symbol)).await
  }

  /// Get annual and quarterly income statements
  #[instrument(skip(self))]
  pub async fn income_statement(&self, symbol: &str) -> Result<IncomeStatement> {
    self.wait_for_rate_limit().await?;
    self.transport().get(FuncType::IncomeStatement, symbol_params(symbol)).await
  }

  /// Get annual and quarterly balance sheets
  #[instrument(skip(self))]
  pub async fn balance_sheet(&self, symbol: &str) -> Result<BalanceSheet> {
    self.wait_for_rate_limit().await?;
    self.transport().get(FuncType::BalanceSheet, symbol_params(symbol)).await
  }

  /// Get annual and quarterly cash flow statements
  #[instrument(skip(self))]
  pub async fn cash_flow(&self, symbol: &str) -> Result<CashFlow> {
    self.wait_for_rate_limit().await?;
    self.transport().get(FuncType::CashFlow, symbol_params(symbol)).await
  }
}
