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

//! Configuration management for the stocklyzer client and report

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Main configuration struct
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// AlphaVantage API key; only needed when talking to the live provider
  pub api_key: Option<String>,

  /// API rate limit (requests per minute)
  pub rate_limit: u32,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Base URL for the AlphaVantage API
  pub base_url: String,

  /// Number of segments in the 52-week range bar
  pub bar_segments: usize,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let api_key = env::var("ALPHA_VANTAGE_API_KEY").ok().filter(|key| !key.trim().is_empty());

    let rate_limit = env::var("SLZ_RATE_LIMIT")
      .unwrap_or_else(|_| crate::DEFAULT_RATE_LIMIT.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid SLZ_RATE_LIMIT".to_string()))?;

    let timeout_secs = env::var("SLZ_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid SLZ_TIMEOUT_SECS".to_string()))?;

    let bar_segments: usize = env::var("SLZ_BAR_SEGMENTS")
      .unwrap_or_else(|_| crate::DEFAULT_BAR_SEGMENTS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid SLZ_BAR_SEGMENTS".to_string()))?;
    if bar_segments == 0 {
      return Err(Error::Config("SLZ_BAR_SEGMENTS must be positive".to_string()));
    }

    let base_url =
      env::var("SLZ_BASE_URL").unwrap_or_else(|_| crate::ALPHA_VANTAGE_BASE_URL.to_string());
    Url::parse(&base_url).map_err(|e| Error::Config(format!("Invalid SLZ_BASE_URL: {}", e)))?;

    Ok(Config { api_key, rate_limit, timeout_secs, base_url, bar_segments })
  }

  /// Create a config with default values (for testing)
  pub fn default_with_key(api_key: String) -> Self {
    Config {
      api_key: Some(api_key),
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      base_url: crate::ALPHA_VANTAGE_BASE_URL.to_string(),
      bar_segments: crate::DEFAULT_BAR_SEGMENTS,
    }
  }

  /// The API key, or an error explaining how to provide one
  pub fn require_api_key(&self) -> Result<&str> {
    self
      .api_key
      .as_deref()
      .ok_or_else(|| Error::ApiKey("ALPHA_VANTAGE_API_KEY not set".to_string()))
  }
}
