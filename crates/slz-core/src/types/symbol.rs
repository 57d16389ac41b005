//! Validated ticker symbols

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const MAX_SYMBOL_LEN: usize = 10;

/// Normalized, uppercase ticker symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
  /// Parse and normalize a symbol to uppercase.
  pub fn parse(input: &str) -> Result<Self> {
    let normalized = input.trim().to_ascii_uppercase();
    let reject = |reason: &str| Error::InvalidSymbol {
      symbol: input.to_string(),
      reason: reason.to_string(),
    };

    if normalized.is_empty() {
      return Err(reject("symbol cannot be empty"));
    }
    if normalized.chars().count() > MAX_SYMBOL_LEN {
      return Err(reject("symbol is too long"));
    }
    if !normalized.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
      return Err(reject("symbol must start with a letter"));
    }
    if let Some(ch) =
      normalized.chars().find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '-'))
    {
      return Err(reject(&format!("unexpected character '{}'", ch)));
    }

    Ok(Self(normalized))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl TryFrom<String> for Symbol {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> {
    Self::parse(&value)
  }
}

impl From<Symbol> for String {
  fn from(value: Symbol) -> Self {
    value.0
  }
}

impl std::str::FromStr for Symbol {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}
