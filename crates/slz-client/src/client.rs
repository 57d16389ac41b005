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

use crate::endpoints::{
  economic::EconomicEndpoints, fundamentals::FundamentalsEndpoints,
  time_series::TimeSeriesEndpoints, SharedRateLimiter,
};
use crate::transport::Transport;
use governor::{Quota, RateLimiter};
use slz_core::{Config, Result};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Main AlphaVantage API client
///
/// Provides access to the endpoints stocklyzer needs through organized
/// endpoint groups. Handles authentication, rate limiting, and transport
/// concerns automatically.
///
/// # Examples
///
/// ```rust,no_run
/// use slz_client::AlphaVantageClient;
/// use slz_core::Config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env()?;
///     let client = AlphaVantageClient::new(config)?;
///
///     let overview = client.fundamentals().company_overview("AAPL").await?;
///     println!("Apple market cap: {}", overview.market_capitalization);
///
///     let quote = client.time_series().quote("AAPL").await?;
///     println!("Last price: {}", quote.global_quote.price);
///
///     Ok(())
/// }
/// ```
pub struct AlphaVantageClient {
  rate_limiter: SharedRateLimiter,
  transport: Arc<Transport>,
}

impl AlphaVantageClient {
  /// Create a new AlphaVantage API client
  ///
  /// # Errors
  ///
  /// Returns an error if the API key is missing or the HTTP client cannot be
  /// created.
  pub fn new(config: Config) -> Result<Self> {
    // a zero rate limit falls back to the default quota
    let rate_limit = NonZeroU32::new(config.rate_limit)
      .or_else(|| NonZeroU32::new(slz_core::DEFAULT_RATE_LIMIT))
      .unwrap_or(NonZeroU32::MIN);
    let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rate_limit)));

    Self::with_rate_limiter(config, rate_limiter)
  }

  /// Create a new client with custom rate limiting
  ///
  /// # Errors
  ///
  /// Returns an error if the API key is missing or the HTTP client cannot be
  /// created.
  pub fn with_rate_limiter(config: Config, rate_limiter: SharedRateLimiter) -> Result<Self> {
    Ok(Self { transport: Arc::new(Transport::new(&config)?), rate_limiter })
  }

  /// Quote and weekly adjusted price endpoints
  pub fn time_series(&self) -> TimeSeriesEndpoints {
    TimeSeriesEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Company overview and financial statement endpoints
  pub fn fundamentals(&self) -> FundamentalsEndpoints {
    FundamentalsEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Treasury yield endpoint
  pub fn economic(&self) -> EconomicEndpoints {
    EconomicEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Wait for rate limit to allow next request
  ///
  /// Most users won't need to call this directly as endpoints handle it automatically.
  pub async fn wait_for_rate_limit(&self) -> Result<()> {
    self.rate_limiter.until_ready().await;
    Ok(())
  }
}

impl std::fmt::Debug for AlphaVantageClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AlphaVantageClient")
      .field("transport", &self.transport)
      .field("rate_limiter", &"RateLimiter")
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use slz_core::Error;

  #[test]
  fn test_client_creation() {
    let config = Config::default_with_key("test_key".to_string());
    let client = AlphaVantageClient::new(config).expect("Failed to create client");
    assert_eq!(client.transport.base_url(), slz_core::ALPHA_VANTAGE_BASE_URL);
  }

  #[test]
  fn test_zero_rate_limit_falls_back() {
    let mut config = Config::default_with_key("test_key".to_string());
    config.rate_limit = 0;
    assert!(AlphaVantageClient::new(config).is_ok());
  }

  #[test]
  fn test_client_requires_key() {
    let mut config = Config::default_with_key("test_key".to_string());
    config.api_key = None;
    assert!(matches!(AlphaVantageClient::new(config), Err(Error::ApiKey(_))));
  }

  #[test]
  fn test_wait_for_rate_limit() {
    let client = AlphaVantageClient::new(Config::default_with_key("k".to_string())).unwrap();
    tokio_test::block_on(client.wait_for_rate_limit()).unwrap();
  }
}
