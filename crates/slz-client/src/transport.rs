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

//! HTTP transport layer for AlphaVantage API requests

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use slz_core::{Config, Error, FuncType, Result};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

/// HTTP transport layer for making requests to the AlphaVantage API
///
/// Each call is a single request; failed requests are reported, not retried.
pub struct Transport {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl Transport {
    /// Create a new transport instance
    ///
    /// Fails with [`Error::ApiKey`] when the configuration carries no key.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let timeout = Duration::from_secs(config.timeout_secs);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("slz-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string(), api_key, timeout })
    }

    /// Create a mock transport for testing
    #[cfg(test)]
    pub fn new_mock() -> Self {
        Self {
            client: Client::new(),
            base_url: "https://mock.alphavantage.co".to_string(),
            api_key: "test_key".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Make a GET request to the AlphaVantage API
    ///
    /// # Arguments
    ///
    /// * `function` - The AlphaVantage API function to call
    /// * `params` - Additional query parameters for the request
    #[instrument(skip(self, params), fields(function = %function))]
    pub async fn get<T>(&self, function: FuncType, params: HashMap<String, String>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.build_url(function, params)?;
        debug!("Making request to: {}", redact_api_key(&url));

        let response = self.make_request(&url).await?;
        let text = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

        debug!("Response body length: {} bytes", text.len());
        #[cfg(feature = "debug-logging")]
        debug!("Response body: {}", preview(&text, 2000));

        self.check_api_error(&text)?;

        match serde_json::from_str::<T>(&text) {
            Ok(data) => {
                info!("Successfully parsed response for function: {}", function);
                Ok(data)
            }
            Err(e) => {
                error!("Failed to parse JSON response: {}", e);
                error!("Response text (first 500 chars): {}", preview(&text, 500));
                Err(Error::Parse(format!(
                    "Failed to parse response: {}. Response: {}",
                    e,
                    preview(&text, 200)
                )))
            }
        }
    }

    /// Build the full URL for an API request
    fn build_url(&self, function: FuncType, mut params: HashMap<String, String>) -> Result<String> {
        let mut url = Url::parse(&format!("{}/query", self.base_url))
            .map_err(|e| Error::Http(format!("Invalid base URL: {}", e)))?;

        params.insert("function".to_string(), function.to_string());
        params.insert("apikey".to_string(), self.api_key.clone());

        // sorted so identical requests produce identical URLs
        let mut pairs: Vec<_> = params.into_iter().collect();
        pairs.sort();
        url.query_pairs_mut().extend_pairs(pairs);

        Ok(url.to_string())
    }

    /// Make the actual HTTP request
    async fn make_request(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", redact_api_key(&e.to_string()))))?;

        let status = response.status();

        if status.is_success() {
            debug!("Request successful with status: {}", status);
            Ok(response)
        } else {
            error!("Request failed with status: {}", status);
            Err(Error::Http(format!("HTTP error: {}", status)))
        }
    }

    /// Check for AlphaVantage API error messages in the response
    ///
    /// The provider answers errors with HTTP 200 and a JSON object carrying an
    /// `Error Message`, `Note` or `Information` key.
    fn check_api_error(&self, response_text: &str) -> Result<()> {
        let Ok(body) = serde_json::from_str::<HashMap<String, serde_json::Value>>(response_text)
        else {
            return Ok(());
        };

        let message = |key: &str| body.get(key).and_then(|v| v.as_str()).map(str::to_string);

        if let Some(msg) = message("Error Message") {
            return Err(Error::Api(msg));
        }

        for key in ["Note", "Information"] {
            if let Some(msg) = message(key) {
                if msg.contains("API call frequency") || msg.contains("rate limit") {
                    return Err(Error::RateLimit(msg));
                }
                if msg.contains("apikey") || msg.contains("API key") {
                    return Err(Error::ApiKey(msg));
                }
                return Err(Error::Api(msg));
            }
        }

        Ok(())
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get request timeout duration
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Replace the value of the `apikey` query parameter
fn redact_api_key(text: &str) -> String {
    match text.find("apikey=") {
        Some(start) => {
            let value_start = start + "apikey=".len();
            let value_end = text[value_start..]
                .find(|c: char| c == '&' || c == ')' || c.is_whitespace())
                .map(|offset| value_start + offset)
                .unwrap_or(text.len());
            format!("{}***{}", &text[..value_start], &text[value_end..])
        }
        None => text.to_string(),
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let transport = Transport::new_mock();
        let mut params = HashMap::new();
        params.insert("symbol".to_string(), "AAPL".to_string());

        let url = transport.build_url(FuncType::GlobalQuote, params).unwrap();

        assert!(url.contains("function=GLOBAL_QUOTE"));
        assert!(url.contains("symbol=AAPL"));
        assert!(url.contains("apikey=test_key"));
        assert!(url.starts_with("https://mock.alphavantage.co/query"));
    }

    #[test]
    fn test_new_requires_api_key() {
        let mut config = Config::default_with_key("k".to_string());
        config.api_key = None;
        assert!(matches!(Transport::new(&config), Err(Error::ApiKey(_))));
    }

    #[test]
    fn test_redact_api_key() {
        let url = "https://mock.alphavantage.co/query?apikey=secret&function=OVERVIEW";
        let redacted = redact_api_key(url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("apikey=***&function=OVERVIEW"));
        assert_eq!(redact_api_key("no key here"), "no key here");
    }

    #[test]
    fn test_check_api_error_rate_limit() {
        let transport = Transport::new_mock();
        let response = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day."}"#;

        let result = transport.check_api_error(response);
        assert!(matches!(result, Err(Error::RateLimit(_))), "got {result:?}");
    }

    #[test]
    fn test_check_api_error_invalid_call() {
        let transport = Transport::new_mock();
        let response = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation"}"#;

        let result = transport.check_api_error(response);
        assert!(matches!(result, Err(Error::Api(_))), "got {result:?}");
    }

    #[test]
    fn test_check_api_error_success() {
        let transport = Transport::new_mock();
        assert!(transport.check_api_error(r#"{"Weekly Adjusted Time Series": {}}"#).is_ok());
        assert!(transport.check_api_error(r#"{"Global Quote": {}}"#).is_ok());
        assert!(transport.check_api_error("not json").is_ok());
    }
}
