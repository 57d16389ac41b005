//! Bullish / bearish classification of a change

use crate::error::Result;
use crate::metric::Metric;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// Good for shareholders
    Bullish,
    /// No signal
    Neutral,
    /// Bad for shareholders
    Bearish,
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "Bullish"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Bearish => write!(f, "Bearish"),
        }
    }
}

impl Sentiment {
    fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            Sentiment::Bullish
        } else if value < 0.0 {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }

    fn inverted(self) -> Self {
        match self {
            Sentiment::Bullish => Sentiment::Bearish,
            Sentiment::Neutral => Sentiment::Neutral,
            Sentiment::Bearish => Sentiment::Bullish,
        }
    }
}

/// Classify a growth value for `metric`.
///
/// Rising liabilities and share counts are bearish; investing and financing
/// cash flows carry no direction.
pub fn classify(metric: Metric, growth: f64) -> Sentiment {
    match metric {
        Metric::TotalLiabilities | Metric::SharesOutstanding => Sentiment::from_sign(growth).inverted(),
        Metric::InvestingCashFlow | Metric::FinancingCashFlow => Sentiment::Neutral,
        Metric::TotalRevenue
        | Metric::NetIncome
        | Metric::TotalAssets
        | Metric::StockholdersEquity
        | Metric::OperatingCashFlow
        | Metric::ChangesInCash
        | Metric::FreeCashFlow
        | Metric::Price
        | Metric::DividendYield => Sentiment::from_sign(growth),
    }
}

/// [`classify`] for a metric given by name
pub fn classify_named(name: &str, growth: f64) -> Result<Sentiment> {
    Ok(classify(name.parse()?, growth))
}
