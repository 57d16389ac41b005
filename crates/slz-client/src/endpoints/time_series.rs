//! Price endpoints
//!
//! This module provides access to the latest quote and to the weekly adjusted
//! series used for multi-year growth.

use super::{impl_endpoint_base, symbol_params, EndpointBase, SharedRateLimiter};
use crate::transport::Transport;
use slz_core::{FuncType, Result};
use slz_models::time_series::*;
use std::sync::Arc;
use tracing::instrument;

/// Time series endpoints for quotes and historical prices
pub struct TimeSeriesEndpoints {
    transport: Arc<Transport>,
    rate_limiter: SharedRateLimiter,
}

impl_endpoint_base!(TimeSeriesEndpoints);

impl TimeSeriesEndpoints {
    /// Create a new time series endpoints instance
    pub fn new(transport: Arc<Transport>, rate_limiter: SharedRateLimiter) -> Self {
        Self { transport, rate_limiter }
    }

    /// Get the latest price and volume for a symbol
    #[instrument(skip(self))]
    pub async fn quote(&self, symbol: &str) -> Result<GlobalQuote> {
        self.wait_for_rate_limit().await?;
        self.transport().get(FuncType::GlobalQuote, symbol_params(symbol)).await
    }

    /// Get the full weekly adjusted series (20+ years for listed equities)
    #[instrument(skip(self))]
    pub async fn weekly_adjusted(&self, symbol: &str) -> Result<WeeklyAdjustedTimeSeries> {
        self.wait_for_rate_limit().await?;
        self.transport().get(FuncType::TimeSeriesWeeklyAdjusted, symbol_params(symbol)).await
    }
}
