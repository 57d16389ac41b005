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

//! `slz ticker`: fetch, build and print reports

use crate::render::Renderer;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use colored::Colorize;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use slz_client::{AlphaVantageProvider, FixtureProvider, MarketDataProvider};
use slz_core::{Config, Periodicity, PricePoint, RawPeriod, StatementKind, Symbol};
use slz_report::{history_start, Report, ReportBuilder, ReportInput, ReportSettings};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Args, Debug)]
pub struct TickerCommand {
  /// Ticker symbols, e.g. AAPL MSFT
  #[arg(required = true)]
  pub symbols: Vec<String>,

  /// Print the report model as JSON
  #[arg(long)]
  pub json: bool,

  /// Use bundled sample data instead of the live API
  #[arg(long)]
  pub mock: bool,

  /// Disable colored output
  #[arg(long)]
  pub no_color: bool,
}

/// What happened for one requested ticker
#[derive(Debug)]
enum Outcome {
  Report(Box<Report>),
  Failed(String),
}

pub async fn execute(cmd: TickerCommand) -> Result<()> {
  let config = Config::from_env().context("Failed to load configuration")?;
  let as_of = Local::now().date_naive();
  let provider = provider(&config, cmd.mock, as_of)?;
  let builder = ReportBuilder::new(ReportSettings {
    bar_segments: config.bar_segments,
    ..ReportSettings::default()
  });

  if cmd.no_color {
    colored::control::set_override(false);
  }

  let spinner = spinner(&cmd.symbols)?;
  let treasury_yield = treasury_yield(provider.as_ref()).await;
  let outcomes = join_all(
    cmd
      .symbols
      .iter()
      .map(|symbol| report_for(provider.as_ref(), &builder, symbol, as_of, treasury_yield)),
  )
  .await;
  spinner.finish_and_clear();

  if cmd.json {
    let reports: Vec<&Report> = outcomes
      .iter()
      .filter_map(|outcome| match outcome {
        Outcome::Report(report) => Some(report.as_ref()),
        Outcome::Failed(message) => {
          eprintln!("{}", message);
          None
        }
      })
      .collect();
    println!("{}", serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?);
    return Ok(());
  }

  let renderer = Renderer::new(!cmd.no_color);
  for outcome in &outcomes {
    match outcome {
      Outcome::Report(report) => renderer.print(report),
      Outcome::Failed(message) => println!("{}\n", message.as_str().red()),
    }
  }

  Ok(())
}

fn provider(config: &Config, mock: bool, as_of: NaiveDate) -> Result<Box<dyn MarketDataProvider>> {
  if mock {
    info!("Using bundled fixture data");
    return Ok(Box::new(FixtureProvider::with_default_data(as_of)));
  }

  let provider = AlphaVantageProvider::new(config.clone())
    .context("Live data needs ALPHA_VANTAGE_API_KEY (or run with --mock)")?;
  Ok(Box::new(provider))
}

fn spinner(symbols: &[String]) -> Result<ProgressBar> {
  let spinner = ProgressBar::new_spinner();
  spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
  spinner.set_message(format!("Fetching {}...", symbols.join(", ")));
  spinner.enable_steady_tick(Duration::from_millis(100));
  Ok(spinner)
}

/// Shared by every ticker of a run; without it the cost of capital is left out
async fn treasury_yield(provider: &dyn MarketDataProvider) -> Option<f64> {
  match provider.fetch_treasury_yield().await {
    Ok(percent) => Some(percent),
    Err(e) => {
      warn!("No treasury yield, cost of capital left out: {}", e);
      None
    }
  }
}

async fn report_for(
  provider: &dyn MarketDataProvider,
  builder: &ReportBuilder,
  raw_symbol: &str,
  as_of: NaiveDate,
  treasury_yield: Option<f64>,
) -> Outcome {
  let symbol = match Symbol::parse(raw_symbol) {
    Ok(symbol) => symbol,
    Err(e) => return Outcome::Failed(e.to_string()),
  };

  let input = match gather(provider, &symbol, as_of, treasury_yield).await {
    Ok(input) => input,
    Err(e) => {
      if !e.is_not_found() {
        warn!("Quote request for {} failed: {}", symbol, e);
      }
      return Outcome::Failed(format!("Could not fetch data for ticker: {}", symbol));
    }
  };

  match builder.build(&input) {
    Ok(report) => Outcome::Report(Box::new(report)),
    Err(e) => Outcome::Failed(format!("Could not build report for {}: {}", symbol, e)),
  }
}

/// Fetch everything a report needs. Only the quote is mandatory.
async fn gather(
  provider: &dyn MarketDataProvider,
  symbol: &Symbol,
  as_of: NaiveDate,
  treasury_yield: Option<f64>,
) -> slz_core::Result<ReportInput> {
  let quote = provider.fetch_quote(symbol).await?;
  debug!("Fetched quote for {} from {}", symbol, provider.source_name());

  let (price_history, statements) =
    futures::join!(price_history(provider, symbol, as_of), statements(provider, symbol));

  Ok(ReportInput { quote, price_history, statements, treasury_yield, as_of })
}

async fn price_history(
  provider: &dyn MarketDataProvider,
  symbol: &Symbol,
  as_of: NaiveDate,
) -> Vec<PricePoint> {
  match provider.fetch_price_history(symbol, history_start(as_of)).await {
    Ok(points) => points,
    Err(e) => {
      warn!("No price history for {}, growth horizons left out: {}", symbol, e);
      Vec::new()
    }
  }
}

async fn statements(
  provider: &dyn MarketDataProvider,
  symbol: &Symbol,
) -> BTreeMap<(StatementKind, Periodicity), Vec<RawPeriod>> {
  let fetched =
    join_all(StatementKind::ALL.iter().map(|kind| provider.fetch_statements(symbol, *kind))).await;

  let mut statements = BTreeMap::new();
  for (kind, result) in StatementKind::ALL.iter().zip(fetched) {
    match result {
      Ok(by_periodicity) => {
        for (periodicity, periods) in by_periodicity {
          statements.insert((*kind, periodicity), periods);
        }
      }
      Err(e) => warn!("Omitting {} for {}: {}", kind, symbol, e),
    }
  }
  statements
}
