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

//! The market data seam between the network and the report engine.

mod alpha_vantage;
mod fixture;

pub use alpha_vantage::AlphaVantageProvider;
pub use fixture::{FixtureProvider, FixtureTicker};

use async_trait::async_trait;
use chrono::NaiveDate;
use slz_core::{Periodicity, PricePoint, RawPeriod, RawQuote, Result, StatementKind, Symbol};
use std::collections::BTreeMap;

/// Trait for market data providers.
///
/// Implement this trait to add a new data source. A symbol the source does
/// not know is reported as [`slz_core::Error::NotFound`].
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
  /// Get the name of this data source.
  fn source_name(&self) -> &'static str;

  /// Latest quote snapshot, enriched with the company overview.
  async fn fetch_quote(&self, symbol: &Symbol) -> Result<RawQuote>;

  /// Adjusted closes dated on or after `since`, ascending.
  async fn fetch_price_history(&self, symbol: &Symbol, since: NaiveDate)
    -> Result<Vec<PricePoint>>;

  /// Raw statement periods of one kind and cadence, in provider order.
  async fn fetch_statement(
    &self,
    symbol: &Symbol,
    kind: StatementKind,
    periodicity: Periodicity,
  ) -> Result<Vec<RawPeriod>>;

  /// Latest 10-year treasury yield in percent (`4.41` means 4.41%).
  async fn fetch_treasury_yield(&self) -> Result<f64>;

  /// Both cadences of a statement kind.
  ///
  /// Sources that deliver annual and quarterly reports in one response
  /// override this to avoid a second request.
  async fn fetch_statements(
    &self,
    symbol: &Symbol,
    kind: StatementKind,
  ) -> Result<BTreeMap<Periodicity, Vec<RawPeriod>>> {
    let mut statements = BTreeMap::new();
    for periodicity in Periodicity::ALL {
      statements.insert(periodicity, self.fetch_statement(symbol, kind, periodicity).await?);
    }
    Ok(statements)
  }
}
