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

//! Display formatting for report quantities
//!
//! Values are scaled to the largest unit of at least one (`T`, `B`, `M`) and
//! rounded to a fixed precision per unit. The sign of a percentage is taken
//! after rounding, so a change that rounds to zero always shows as `+0.0%`.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// How a raw number is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
  /// Dollar amounts: `$391.04B`, `-$794M`, `$202.38`
  Currency,
  /// Share counts: `15.117B`, `45.23M`, `812,000`
  Shares,
  /// Signed percentage change: `+2.0%`, `-7.5%`
  Percent,
  /// Plain ratio: `30.66`
  Ratio,
  /// Percentage level without forced sign: `0.44%`
  Yield,
}

/// One rung of the scaling ladder
struct Unit {
  scale: f64,
  suffix: &'static str,
  currency_decimals: usize,
  share_decimals: usize,
}

/// Ascending; the first rung is the unscaled value
const UNITS: [Unit; 4] = [
  Unit { scale: 1.0, suffix: "", currency_decimals: 2, share_decimals: 0 },
  Unit { scale: 1e6, suffix: "M", currency_decimals: 0, share_decimals: 2 },
  Unit { scale: 1e9, suffix: "B", currency_decimals: 2, share_decimals: 3 },
  Unit { scale: 1e12, suffix: "T", currency_decimals: 2, share_decimals: 3 },
];

/// Render `value` as a display string.
///
/// Fails with [`ReportError::Format`] for NaN and infinities.
pub fn format_quantity(value: f64, kind: QuantityKind) -> Result<String> {
  if !value.is_finite() {
    return Err(ReportError::Format { value });
  }

  Ok(match kind {
    QuantityKind::Currency => format_scaled(value, "$", |unit| unit.currency_decimals),
    QuantityKind::Shares => format_scaled(value, "", |unit| unit.share_decimals),
    QuantityKind::Percent => {
      let rounded = round_to(value, 1);
      if rounded >= 0.0 {
        format!("+{:.1}%", rounded.abs())
      } else {
        format!("{:.1}%", rounded)
      }
    }
    QuantityKind::Ratio => format!("{:.2}", clear_negative_zero(round_to(value, 2))),
    QuantityKind::Yield => format!("{:.2}%", clear_negative_zero(round_to(value, 2))),
  })
}

/// A report cell: the formatted value followed by its growth, if defined.
///
/// ```
/// use slz_report::format::{format_with_growth, QuantityKind};
///
/// let cell = format_with_growth(391_035_000_000.0, QuantityKind::Currency, Some(2.02)).unwrap();
/// assert_eq!(cell, "$391.04B(+2.0%)");
/// ```
pub fn format_with_growth(value: f64, kind: QuantityKind, growth: Option<f64>) -> Result<String> {
  let formatted = format_quantity(value, kind)?;
  match growth {
    Some(growth) => Ok(format!("{}({})", formatted, format_quantity(growth, QuantityKind::Percent)?)),
    None => Ok(formatted),
  }
}

fn format_scaled(value: f64, symbol: &str, decimals: fn(&Unit) -> usize) -> String {
  let magnitude = value.abs();

  let mut index = UNITS.iter().rposition(|unit| magnitude >= unit.scale).unwrap_or(0);
  let mut rounded = round_to(magnitude / UNITS[index].scale, decimals(&UNITS[index]));
  // 999.996B rounds to 1000.00B; show it as 1.00T instead
  while index + 1 < UNITS.len() && rounded * UNITS[index].scale >= UNITS[index + 1].scale {
    index += 1;
    rounded = round_to(magnitude / UNITS[index].scale, decimals(&UNITS[index]));
  }

  let unit = &UNITS[index];
  let digits = format!("{:.*}", decimals(unit), rounded);
  let digits = if unit.suffix.is_empty() { group_thousands(&digits) } else { digits };
  let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };

  format!("{}{}{}{}", sign, symbol, digits, unit.suffix)
}

/// Insert `,` between groups of three integer digits
fn group_thousands(digits: &str) -> String {
  let (integer, fraction) = match digits.split_once('.') {
    Some((integer, fraction)) => (integer, Some(fraction)),
    None => (digits, None),
  };

  let mut grouped = String::with_capacity(digits.len() + integer.len() / 3);
  for (i, ch) in integer.chars().enumerate() {
    if i > 0 && (integer.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }
  if let Some(fraction) = fraction {
    grouped.push('.');
    grouped.push_str(fraction);
  }
  grouped
}

/// Round half away from zero to `decimals` places
fn round_to(value: f64, decimals: usize) -> f64 {
  let factor = 10f64.powi(decimals as i32);
  (value * factor).round() / factor
}

fn clear_negative_zero(value: f64) -> f64 {
  if value == 0.0 {
    0.0
  } else {
    value
  }
}
