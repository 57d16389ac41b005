//! Assertion helpers and fixtures shared by the workspace tests

use crate::types::{PricePoint, RawPeriod};
use chrono::NaiveDate;

/// Default tolerance for floating-point comparisons
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Assert that two floating-point numbers are approximately equal
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
  assert!(
    (actual - expected).abs() < tolerance,
    "Values not approximately equal:\n  actual:   {}\n  expected: {}\n  diff:     {}\n  tolerance: {}",
    actual,
    expected,
    (actual - expected).abs(),
    tolerance
  );
}

/// Assert that two growth percentages agree to within a thousandth of a point
pub fn assert_percentage_eq(actual: f64, expected: f64) {
  assert_approx_eq(actual, expected, 1e-3);
}

/// Assert that an optional growth value is present and close to `expected`
pub fn assert_growth_eq(actual: Option<f64>, expected: f64) {
  match actual {
    Some(value) => assert_percentage_eq(value, expected),
    None => panic!("expected growth of {expected}%, got None"),
  }
}

/// Shorthand for building dates in fixtures
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day)
    .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

/// A statement period with the given provider fields
pub fn raw_period(period_end: NaiveDate, fields: &[(&str, &str)]) -> RawPeriod {
  fields
    .iter()
    .fold(RawPeriod::new(period_end), |period, (name, value)| period.with_field(*name, *value))
}

/// A price series from `(date, close)` pairs
pub fn price_series(points: &[(NaiveDate, f64)]) -> Vec<PricePoint> {
  points.iter().map(|(date, close)| PricePoint::new(*date, *close)).collect()
}
