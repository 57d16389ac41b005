use super::{impl_endpoint_base, EndpointBase, SharedRateLimiter};
use crate::transport::Transport;
use slz_core::{FuncType, Result};
use slz_models::economic::TreasuryYield;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

/// Economic indicator endpoints
pub struct EconomicEndpoints {
  transport: Arc<Transport>,
  rate_limiter: SharedRateLimiter,
}

impl_endpoint_base!(EconomicEndpoints);

impl EconomicEndpoints {
  pub fn new(transport: Arc<Transport>, rate_limiter: SharedRateLimiter) -> Self {
    Self { transport, rate_limiter }
  }

  /// Daily 10-year treasury yield, most recent observation first
  #[instrument(skip(self))]
  pub async fn treasury_yield(&self) -> Result<TreasuryYield> {
    self.wait_for_rate_limit().await?;
    self.transport().get(FuncType::TreasuryYield, treasury_params()).await
  }
}

fn treasury_params() -> HashMap<String, String> {
  HashMap::from([
    ("interval".to_string(), "daily".to_string()),
    ("maturity".to_string(), "10year".to_string()),
  ])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn treasury_request_asks_for_daily_ten_year() {
    let params = treasury_params();
    assert_eq!(params["interval"], "daily");
    assert_eq!(params["maturity"], "10year");
    assert!(!params.contains_key("symbol"));
  }
}
