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

//! Common types and structures used across different AlphaVantage API responses

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Common metadata returned by AlphaVantage time series responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
  #[serde(rename = "1. Information")]
  pub information: String,

  #[serde(rename = "2. Symbol")]
  pub symbol: String,

  #[serde(rename = "3. Last Refreshed")]
  pub last_refreshed: String,

  #[serde(rename = "4. Time Zone", skip_serializing_if = "Option::is_none")]
  pub time_zone: Option<String>,
}

/// OHLCV data with adjusted closing price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OhlcvAdjustedData {
  #[serde(rename = "1. open")]
  pub open: String,

  #[serde(rename = "2. high")]
  pub high: String,

  #[serde(rename = "3. low")]
  pub low: String,

  #[serde(rename = "4. close")]
  pub close: String,

  /// Close adjusted for splits and dividends
  #[serde(rename = "5. adjusted close")]
  pub adjusted_close: String,

  #[serde(rename = "6. volume")]
  pub volume: String,

  #[serde(rename = "7. dividend amount")]
  pub dividend_amount: String,
}

/// Time series keyed by the provider's `YYYY-MM-DD` date strings
pub type TimeSeriesData<T> = BTreeMap<String, T>;

/// Error response from AlphaVantage API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
  #[serde(rename = "Error Message")]
  pub error_message: String,
}

/// Note response from AlphaVantage API (usually rate limit info)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiNote {
  #[serde(rename = "Note")]
  pub note: String,
}

impl OhlcvAdjustedData {
  /// Parse adjusted close as f64
  pub fn adjusted_close_as_f64(&self) -> Result<f64, std::num::ParseFloatError> {
    self.adjusted_close.parse()
  }
}

/// Parse a provider date string (`YYYY-MM-DD`)
pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
}
