use thiserror::Error;

/// Errors raised while deriving or formatting report values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
  /// The value cannot be rendered (NaN or infinite)
  #[error("Cannot format non-finite value {value}")]
  Format { value: f64 },

  /// Metric name outside the known set
  #[error("Unknown metric: {0}")]
  UnknownMetric(String),
}

/// Result type alias for the report engine
pub type Result<T> = std::result::Result<T, ReportError>;
