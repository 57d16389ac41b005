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

//! Price models: the latest quote and the weekly adjusted series

use crate::common::{Metadata, OhlcvAdjustedData, TimeSeriesData};
use serde::{Deserialize, Serialize};

/// Weekly adjusted time series response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyAdjustedTimeSeries {
    #[serde(rename = "Meta Data")]
    pub meta_data: Metadata,

    /// Weekly adjusted time series data
    #[serde(rename = "Weekly Adjusted Time Series")]
    pub time_series: TimeSeriesData<OhlcvAdjustedData>,
}

impl WeeklyAdjustedTimeSeries {
    /// Get the number of data points
    pub fn len(&self) -> usize {
        self.time_series.len()
    }

    /// Check if the time series is empty
    pub fn is_empty(&self) -> bool {
        self.time_series.is_empty()
    }
}

/// Quote endpoint response (real-time price)
///
/// Unknown symbols come back as `{"Global Quote": {}}`, which parses into an
/// all-empty [`QuoteData`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalQuote {
    #[serde(rename = "Global Quote")]
    pub global_quote: QuoteData,
}

/// Quote data structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteData {
    #[serde(rename = "01. symbol")]
    pub symbol: String,

    #[serde(rename = "02. open")]
    pub open: String,

    #[serde(rename = "03. high")]
    pub high: String,

    #[serde(rename = "04. low")]
    pub low: String,

    /// Current price
    #[serde(rename = "05. price")]
    pub price: String,

    #[serde(rename = "06. volume")]
    pub volume: String,

    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: String,

    #[serde(rename = "08. previous close")]
    pub previous_close: String,

    #[serde(rename = "09. change")]
    pub change: String,

    /// Change percentage, e.g. `"0.9934%"`
    #[serde(rename = "10. change percent")]
    pub change_percent: String,
}

impl QuoteData {
    /// True when the provider returned an empty quote object
    pub fn is_empty(&self) -> bool {
        self.symbol.trim().is_empty() && self.price.trim().is_empty()
    }

    /// Parse current price as f64
    pub fn price_as_f64(&self) -> Result<f64, std::num::ParseFloatError> {
        self.price.parse()
    }

    /// Parse change percent as f64 (removes % sign)
    pub fn change_percent_as_f64(&self) -> Result<f64, std::num::ParseFloatError> {
        self.change_percent.trim_end_matches('%').parse()
    }
}
