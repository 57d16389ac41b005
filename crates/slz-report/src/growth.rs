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

//! Percentage change between two values, and multi-year price growth

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use slz_core::PricePoint;
use std::fmt::{Display, Formatter};

/// Weekly series can miss the exact target date; fetch a little extra.
const HISTORY_SLACK_DAYS: u64 = 14;

/// Percentage change from `baseline` to `current`.
///
/// `None` when either side is missing or non-finite, or the baseline is zero.
/// The baseline's magnitude is the denominator, so a move from a negative
/// value toward zero is positive growth.
pub fn growth(current: Option<f64>, baseline: Option<f64>) -> Option<f64> {
  let (current, baseline) = (current?, baseline?);
  if !current.is_finite() || !baseline.is_finite() || baseline == 0.0 {
    return None;
  }
  Some((current - baseline) / baseline.abs() * 100.0)
}

/// Growth of each value against the next older one.
///
/// `values` is most recent first; the oldest entry has no baseline and gets
/// `None`.
pub fn period_over_period(values: &[Option<f64>]) -> Vec<Option<f64>> {
  (0..values.len()).map(|i| growth(values[i], values.get(i + 1).copied().flatten())).collect()
}

/// Lookback windows for price growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
  OneYear,
  TwoYears,
  ThreeYears,
  FiveYears,
  TenYears,
}

impl Horizon {
  pub const ALL: [Horizon; 5] =
    [Horizon::OneYear, Horizon::TwoYears, Horizon::ThreeYears, Horizon::FiveYears, Horizon::TenYears];

  pub fn years(&self) -> u32 {
    match self {
      Horizon::OneYear => 1,
      Horizon::TwoYears => 2,
      Horizon::ThreeYears => 3,
      Horizon::FiveYears => 5,
      Horizon::TenYears => 10,
    }
  }

  /// Date `years()` calendar years before `as_of`; Feb 29 maps to Feb 28
  pub fn target_date(&self, as_of: NaiveDate) -> Option<NaiveDate> {
    as_of.checked_sub_months(Months::new(self.years() * 12))
  }
}

impl Display for Horizon {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}Y", self.years())
  }
}

/// Earliest date a price history must reach to cover every horizon
pub fn history_start(as_of: NaiveDate) -> NaiveDate {
  let longest = Horizon::TenYears.target_date(as_of).unwrap_or(as_of);
  longest.checked_sub_days(Days::new(HISTORY_SLACK_DAYS)).unwrap_or(longest)
}

/// Adjusted close of the most recent point in the series
pub fn latest_close(series: &[PricePoint]) -> Option<f64> {
  series.iter().max_by_key(|point| point.as_of).map(|point| point.adjusted_close)
}

/// Price growth over `horizon`, measured against the latest point dated on
/// or before the horizon's target date.
///
/// `None` when the series does not reach back that far.
pub fn horizon_growth(
  series: &[PricePoint],
  current: Option<f64>,
  as_of: NaiveDate,
  horizon: Horizon,
) -> Option<f64> {
  let target = horizon.target_date(as_of)?;
  let baseline = series
    .iter()
    .filter(|point| point.as_of <= target)
    .max_by_key(|point| point.as_of)
    .map(|point| point.adjusted_close);
  growth(current, baseline)
}
