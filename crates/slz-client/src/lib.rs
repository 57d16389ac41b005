//! # slz-client
//!
//! Market data for stocklyzer: a rate-limited AlphaVantage client and the
//! [`MarketDataProvider`] trait the report pipeline consumes.
//!
//! ## Features
//!
//! - **Async/Await**: Built on tokio and reqwest
//! - **Rate Limiting**: governor quota shared by every endpoint group
//! - **Type Safe**: Strongly typed responses using slz-models
//! - **Offline**: [`FixtureProvider`] serves canned data without a network
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slz_client::{AlphaVantageProvider, MarketDataProvider};
//! use slz_core::{Config, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = AlphaVantageProvider::new(Config::from_env()?)?;
//!     let quote = provider.fetch_quote(&Symbol::parse("AAPL")?).await?;
//!     println!("{} trades at {}", quote.company_name, quote.current_price);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, slz_core::Error>`. A symbol the provider
//! does not cover is reported as `Error::NotFound`.

#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod provider;
pub mod transport;

// Re-export the main client and common types
pub use client::AlphaVantageClient;
pub use provider::{AlphaVantageProvider, FixtureProvider, FixtureTicker, MarketDataProvider};
pub use slz_core::{Config, Error, Result};

pub use endpoints::{
  economic::EconomicEndpoints, fundamentals::FundamentalsEndpoints,
  time_series::TimeSeriesEndpoints,
};
