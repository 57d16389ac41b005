//! Position of the current price inside the 52-week band

use crate::sentiment::Sentiment;
use serde::{Deserialize, Serialize};

/// Below this fraction the price sits in the bearish zone
pub const BEARISH_BELOW: f64 = 0.30;
/// Above this fraction the price sits in the bullish zone
pub const BULLISH_ABOVE: f64 = 0.70;

/// Where the price sits between the 52-week low (0.0) and high (1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePosition {
  pub fraction: f64,
  pub zone: Sentiment,
}

impl RangePosition {
  /// Filled segments of a bar `total` segments wide
  pub fn segments(&self, total: usize) -> usize {
    let filled = (self.fraction * total as f64).round();
    (filled.max(0.0) as usize).min(total)
  }
}

/// Place `current` within `[low, high]`.
///
/// An empty or inverted band, or any non-finite input, puts the price in the
/// middle.
pub fn position(current: f64, low: f64, high: f64) -> RangePosition {
  let fraction = if [current, low, high].iter().all(|v| v.is_finite()) && high > low {
    ((current - low) / (high - low)).clamp(0.0, 1.0)
  } else {
    0.5
  };

  RangePosition { fraction, zone: zone(fraction) }
}

fn zone(fraction: f64) -> Sentiment {
  if fraction < BEARISH_BELOW {
    Sentiment::Bearish
  } else if fraction > BULLISH_ABOVE {
    Sentiment::Bullish
  } else {
    Sentiment::Neutral
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use slz_core::test_utils::assert_approx_eq;

  #[test]
  fn position_within_band() {
    let pos = position(202.38, 164.08, 237.49);
    assert_approx_eq(pos.fraction, 0.521727, 1e-6);
    assert_eq!(pos.zone, Sentiment::Neutral);
    assert_eq!(pos.segments(10), 5);
  }

  #[test]
  fn position_in_wider_band() {
    let pos = position(202.38, 164.08, 260.10);
    assert_approx_eq(pos.fraction, 0.398875, 1e-6);
    assert_eq!(pos.zone, Sentiment::Neutral);
    assert_eq!(pos.segments(10), 4);
  }

  #[test]
  fn zones() {
    assert_eq!(position(110.0, 100.0, 200.0).zone, Sentiment::Bearish);
    assert_eq!(position(130.0, 100.0, 200.0).zone, Sentiment::Neutral);
    assert_eq!(position(170.0, 100.0, 200.0).zone, Sentiment::Neutral);
    assert_eq!(position(171.0, 100.0, 200.0).zone, Sentiment::Bullish);
  }

  #[test]
  fn outside_band_is_clamped() {
    let above = position(250.0, 100.0, 200.0);
    assert_eq!(above.fraction, 1.0);
    assert_eq!(above.segments(10), 10);

    let below = position(50.0, 100.0, 200.0);
    assert_eq!(below.fraction, 0.0);
    assert_eq!(below.segments(10), 0);
  }

  #[test]
  fn degenerate_band_is_centered() {
    for pos in [
      position(100.0, 100.0, 100.0),
      position(1_000_000.0, 100.0, 100.0),
      position(-5.0, 100.0, 100.0),
      position(0.0, 0.0, 0.0),
      position(150.0, 200.0, 100.0),
      position(f64::NAN, 100.0, 200.0),
    ] {
      assert_eq!(pos.fraction, 0.5);
      assert_eq!(pos.zone, Sentiment::Neutral);
    }
  }

  #[test]
  fn segments_round_to_nearest() {
    let pos = RangePosition { fraction: 0.25, zone: Sentiment::Bearish };
    assert_eq!(pos.segments(10), 3);
    assert_eq!(pos.segments(4), 1);
    assert_eq!(pos.segments(0), 0);
  }
}
