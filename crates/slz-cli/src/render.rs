//! Terminal rendering of a [`Report`]

use chrono::Datelike;
use colored::{ColoredString, Colorize};
use prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE;
use prettytable::{Cell, Row, Table};
use slz_report::{
  DerivedMetric, Fundamental, Horizon, Metric, PriceSummary, RangeBar, Report, Sentiment,
  StatementTable, Valuation,
};

const FILLED: char = '█';
const EMPTY: char = '░';

pub struct Renderer {
  color: bool,
}

impl Renderer {
  pub fn new(color: bool) -> Self {
    Self { color }
  }

  pub fn print(&self, report: &Report) {
    self.print_header(report);
    self.print_price(&report.price);

    let fundamentals = self.fundamentals_table(report);
    if !fundamentals.is_empty() {
      fundamentals.printstd();
    }

    let growth = self.growth_table(report);
    if !growth.is_empty() {
      println!("\n{}", "Price Growth".bold());
      growth.printstd();
    }

    for table in &report.statements {
      println!("\n{} ({})", table.kind.to_string().bold(), table.periodicity);
      if table.is_empty() {
        println!("{}", "No complete periods".dimmed());
        continue;
      }
      self.statement_table(table).printstd();
      if table.periods.values().any(|row| row.values().any(|m| m.derived)) {
        println!("{}", "* derived".dimmed());
      }
    }
    println!();
  }

  fn print_header(&self, report: &Report) {
    let quote = &report.quote;
    println!("{} ({})", quote.company_name.as_str().bold(), quote.symbol.as_str().bold());

    let mut details = vec![format!("as of {}", report.as_of)];
    if let Some(sector) = quote.sector.as_deref().filter(|s| !s.is_empty()) {
      details.insert(0, sector.to_string());
    }
    if let Some(category) = report.profile.market_cap_category {
      details.push(category.to_string());
    }
    details.push(format!("data quality {:.0}%", report.profile.data_quality * 100.0));
    println!("{}", details.join(" | ").dimmed());
  }

  fn print_price(&self, price: &PriceSummary) {
    let change = price
      .day_change
      .as_ref()
      .map(|change| self.paint(&change.formatted, Some(change.sentiment)).to_string())
      .unwrap_or_default();
    println!("\n{} {}", price.formatted.as_str().bold(), change);
    println!("Day {} - {}  Volume {}", price.day_low, price.day_high, price.volume);

    if let (Some(low), Some(high), Some(range), Some(bar)) =
      (&price.week52_low, &price.week52_high, price.range, price.bar)
    {
      println!(
        "52W {} {} {}  {:.1}% {}\n",
        low,
        self.paint(&range_bar(bar), Some(range.zone)),
        high,
        range.fraction * 100.0,
        range.zone
      );
    } else {
      println!();
    }
  }

  fn fundamentals_table(&self, report: &Report) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
    for field in Fundamental::ALL {
      if let Some(metric) = report.fundamentals.get(&field) {
        table.add_row(Row::new(vec![Cell::new(field.label()), Cell::new(&metric.formatted)]));
      }
    }
    if let Some(valuation) = &report.valuation {
      table.add_row(Row::new(vec![Cell::new("WACC"), Cell::new(&valuation_text(valuation))]));
    }
    table
  }

  fn growth_table(&self, report: &Report) -> Table {
    let mut table = Table::new();
    if report.growth.is_empty() {
      return table;
    }
    table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(Horizon::ALL.iter().map(|h| Cell::new(&h.to_string())).collect()));
    table.add_row(Row::new(
      Horizon::ALL.iter().map(|horizon| self.cell(report.growth.get(horizon), false)).collect(),
    ));
    table
  }

  fn statement_table(&self, statement: &StatementTable) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);

    let mut titles = vec![Cell::new("")];
    titles.extend(statement.labels().iter().map(|label| Cell::new(label)));
    table.set_titles(Row::new(titles));

    let period_ends = statement.period_ends();
    for &metric in Metric::required_for(statement.kind) {
      let mut cells = vec![Cell::new(metric.label())];
      cells.extend(period_ends.iter().map(|end| self.cell(statement.cell(*end, metric), true)));
      table.add_row(Row::new(cells));
    }
    table
  }

  fn cell(&self, metric: Option<&DerivedMetric>, mark_derived: bool) -> Cell {
    let Some(metric) = metric else { return Cell::new("-") };
    let text = if mark_derived && metric.derived {
      format!("{}*", metric.cell)
    } else {
      metric.cell.clone()
    };

    let cell = Cell::new(&text);
    match (self.color, metric.sentiment) {
      (true, Some(Sentiment::Bullish)) => cell.style_spec("Fg"),
      (true, Some(Sentiment::Bearish)) => cell.style_spec("Fr"),
      _ => cell,
    }
  }

  fn paint(&self, text: &str, sentiment: Option<Sentiment>) -> ColoredString {
    match (self.color, sentiment) {
      (true, Some(Sentiment::Bullish)) => text.green(),
      (true, Some(Sentiment::Bearish)) => text.red(),
      (true, Some(Sentiment::Neutral)) => text.yellow(),
      _ => text.normal(),
    }
  }
}

/// `█████░░░░░` for 5 of 10 segments
/// `10.90% (Ke 11.16%, Kd 3.02% FY2023)`
pub fn valuation_text(valuation: &Valuation) -> String {
  format!(
    "{} (Ke {}, Kd {} FY{})",
    valuation.formatted,
    valuation.cost_of_equity,
    valuation.cost_of_debt,
    valuation.wacc.cost_of_debt.period_end.year()
  )
}

pub fn range_bar(bar: RangeBar) -> String {
  let filled = bar.filled.min(bar.total);
  std::iter::repeat(FILLED)
    .take(filled)
    .chain(std::iter::repeat(EMPTY).take(bar.total - filled))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use slz_core::test_utils::ymd;
  use slz_core::{Periodicity, StatementKind};
  use slz_report::{CostOfDebt, Wacc};
  use std::collections::BTreeMap;

  fn metric(cell: &str, sentiment: Option<Sentiment>, derived: bool) -> DerivedMetric {
    DerivedMetric {
      raw_value: 1.0,
      formatted: cell.split('(').next().unwrap_or(cell).to_string(),
      cell: cell.to_string(),
      growth_percent: sentiment.map(|_| 2.0),
      sentiment,
      derived,
    }
  }

  #[test]
  fn range_bar_fills_segments() {
    assert_eq!(range_bar(RangeBar { filled: 5, total: 10 }), "█████░░░░░");
    assert_eq!(range_bar(RangeBar { filled: 0, total: 4 }), "░░░░");
    assert_eq!(range_bar(RangeBar { filled: 9, total: 4 }), "████");
  }

  #[test]
  fn statement_table_lists_metrics_by_period() {
    let table = StatementTable {
      kind: StatementKind::Income,
      periodicity: Periodicity::Annual,
      periods: BTreeMap::from([
        (
          ymd(2023, 9, 30),
          BTreeMap::from([(Metric::TotalRevenue, metric("$383.29B", None, false))]),
        ),
        (
          ymd(2024, 9, 28),
          BTreeMap::from([
            (Metric::TotalRevenue, metric("$391.04B(+2.0%)", Some(Sentiment::Bullish), false)),
            (Metric::NetIncome, metric("$93.74B(-3.4%)", Some(Sentiment::Bearish), false)),
          ]),
        ),
      ]),
    };

    let rendered = Renderer::new(false).statement_table(&table);
    assert_eq!(rendered.len(), 2);

    let revenue = rendered.get_row(0).unwrap();
    assert_eq!(revenue.get_cell(0).unwrap().get_content(), "Total Revenue");
    assert_eq!(revenue.get_cell(1).unwrap().get_content(), "$391.04B(+2.0%)");
    assert_eq!(revenue.get_cell(2).unwrap().get_content(), "$383.29B");

    let net_income = rendered.get_row(1).unwrap();
    assert_eq!(net_income.get_cell(2).unwrap().get_content(), "-");
  }

  #[test]
  fn valuation_line_names_both_costs() {
    let wacc = Wacc {
      wacc: 0.109,
      cost_of_equity: 0.11155,
      cost_of_debt: CostOfDebt { rate: 0.0302, tax_rate: 0.147, period_end: ymd(2023, 9, 30) },
      beta: 1.21,
      treasury_yield: 0.045,
      total_debt: 96.662e9,
      debt_weight: 0.031,
      equity_weight: 0.969,
    };
    let valuation = Valuation {
      wacc,
      formatted: "10.90%".to_string(),
      cost_of_equity: "11.16%".to_string(),
      cost_of_debt: "3.02%".to_string(),
    };
    assert_eq!(valuation_text(&valuation), "10.90% (Ke 11.16%, Kd 3.02% FY2023)");
  }

  #[test]
  fn derived_statement_values_are_marked() {
    let renderer = Renderer::new(false);
    let fcf = metric("$108.81B(+9.3%)", Some(Sentiment::Bullish), true);
    assert_eq!(renderer.cell(Some(&fcf), true).get_content(), "$108.81B(+9.3%)*");
    assert_eq!(renderer.cell(Some(&fcf), false).get_content(), "$108.81B(+9.3%)");
    assert_eq!(renderer.cell(None, true).get_content(), "-");
  }
}
