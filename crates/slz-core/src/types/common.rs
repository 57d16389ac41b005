//! Statement classification shared by the client and the report engine

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Kind of financial statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Income statement
    Income,
    /// Balance sheet
    BalanceSheet,
    /// Cash flow statement
    CashFlow,
}

impl StatementKind {
    /// Every statement kind, in report order
    pub const ALL: [StatementKind; 3] =
        [StatementKind::Income, StatementKind::BalanceSheet, StatementKind::CashFlow];
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementKind::Income => write!(f, "Income Statement"),
            StatementKind::BalanceSheet => write!(f, "Balance Sheet"),
            StatementKind::CashFlow => write!(f, "Cash Flow Statement"),
        }
    }
}

/// Reporting cadence of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    /// Fiscal year reports
    Annual,
    /// Fiscal quarter reports
    Quarterly,
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Periodicity::Annual => write!(f, "Annual"),
            Periodicity::Quarterly => write!(f, "Quarterly"),
        }
    }
}

impl Periodicity {
    /// Both cadences, in report order
    pub const ALL: [Periodicity; 2] = [Periodicity::Annual, Periodicity::Quarterly];

    /// Maximum number of periods kept after filtering; `None` keeps all
    pub fn max_periods(&self) -> Option<usize> {
        match self {
            Periodicity::Annual => None,
            Periodicity::Quarterly => Some(4),
        }
    }

    /// Column label for a period ending on `date`
    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            Periodicity::Annual => date.format("%Y-%m-%d").to_string(),
            Periodicity::Quarterly => format!("{}-Q{}", date.year(), date.month0() / 3 + 1),
        }
    }
}
