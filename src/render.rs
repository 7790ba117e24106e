//! Terminal presentation of a finished run. Numbers are turned into text here and nowhere else.

use analytics::{InstrumentResult, Verdict};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::ETF_CATALOGUE;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use simulator::SimulationOutcome;

const BAR_WIDTH: u32 = 40;
const NOT_COMPUTABLE: &str = "not computable";

pub const PRIVACY_NOTICE: &str = "\
Privacy Notice

This ETF simulator collects personal information, such as your name and email
address, only to provide the simulation results and to improve our services.
Your information will not be shared with third parties without your express
consent. If you have any questions about how your personal data is handled,
you can contact us at the email address provided.

By accepting the terms and conditions you consent to the use of your data as
described in this notice.";

pub fn print_catalogue() {
    let mut table = new_table(vec!["Symbol", "ETF"]);
    for etf in ETF_CATALOGUE {
        table.add_row(vec![etf.symbol, etf.name]);
    }
    println!("{table}");
}

/// Prints every section of the report for one run.
pub fn print_report(outcome: &SimulationOutcome) {
    let params = &outcome.parameters;
    println!(
        "\nInvestment comparison: {} years, initial investment {} MXN",
        params.horizon_years,
        format_money(params.initial_amount)
    );
    println!(
        "Reference: {} at {} a year\n",
        outcome.reference.name,
        format_pct(outcome.reference.annual_rate)
    );

    for skipped in outcome.skipped() {
        if let Some(warning) = skipped.warning() {
            eprintln!("Warning: {warning}");
        }
    }

    let computed: Vec<&InstrumentResult> = outcome.computed().collect();
    if !computed.is_empty() {
        println!("\nComparative results");
        println!("{}", results_table(&computed));

        println!("\nFinal growth");
        println!("{}", growth_bars(outcome));
    }

    println!("\nGrowth over the years");
    println!("{}", trajectory_table(outcome));

    println!("\nAnnualized return ranking");
    println!("{}", comparison_table(outcome));

    if !computed.is_empty() {
        println!("\nRecommendations based on annualized return");
        for result in &computed {
            print_recommendation(result, outcome);
        }
    }
}

fn results_table(results: &[&InstrumentResult]) -> Table {
    let mut table = new_table(vec![
        "Symbol",
        "ETF",
        "Annual return",
        "Volatility",
        "Final growth (MXN)",
        "VaR (95%)",
        "Sharpe ratio",
    ]);
    for r in results {
        table.add_row(vec![
            Cell::new(&r.symbol),
            Cell::new(&r.name),
            right(format_pct(r.annualized_return)),
            right(optional(r.annualized_volatility, format_pct)),
            right(optional(r.projected_growth, format_money)),
            right(optional(r.value_at_risk_95, format_pct)),
            right(optional(r.sharpe_ratio, format_ratio)),
        ]);
    }
    table
}

fn growth_bars(outcome: &SimulationOutcome) -> Table {
    let mut bars: Vec<(&str, Option<Decimal>)> = outcome
        .computed()
        .map(|r| (r.name.as_str(), r.projected_growth))
        .collect();
    bars.push((outcome.reference.name.as_str(), Some(outcome.reference.projected_growth)));

    let max = bars.iter().filter_map(|(_, v)| *v).max().unwrap_or(Decimal::ZERO);
    let mut table = new_table(vec!["Instrument", "Final growth (MXN)", ""]);
    for (label, value) in bars {
        table.add_row(vec![
            Cell::new(label),
            right(optional(value, format_money)),
            Cell::new(value.map(|v| bar(v, max)).unwrap_or_default()).fg(Color::Cyan),
        ]);
    }
    table
}

fn trajectory_table(outcome: &SimulationOutcome) -> Table {
    let mut header = vec!["Instrument".to_string()];
    header.extend((1..=outcome.parameters.horizon_years).map(|y| format!("Year {y}")));
    let mut table = new_table(header);

    for trajectory in &outcome.trajectories {
        let mut row = vec![Cell::new(&trajectory.label)];
        row.extend(trajectory.points.iter().map(|(_, v)| right(format_money(*v))));
        table.add_row(row);
    }
    table
}

fn comparison_table(outcome: &SimulationOutcome) -> Table {
    let mut table = new_table(vec![
        "#",
        "Instrument",
        "Annualized return",
        "Final growth (MXN)",
        "Versus reference",
    ]);
    for (rank, row) in outcome.comparison.rows.iter().enumerate() {
        let verdict = match row.verdict {
            Verdict::Outperforms => Cell::new("outperforms").fg(Color::Green),
            Verdict::Underperforms => Cell::new("underperforms").fg(Color::Red),
        };
        let label = if row.is_reference() {
            format!("{} (reference)", row.label)
        } else {
            row.label.clone()
        };
        table.add_row(vec![
            right((rank + 1).to_string()),
            Cell::new(label),
            right(format_pct(row.annual_return)),
            right(optional(row.projected_growth, format_money)),
            verdict,
        ]);
    }
    table
}

fn print_recommendation(result: &InstrumentResult, outcome: &SimulationOutcome) {
    println!("\n{}:", result.name);
    println!("  Annualized return: {}", format_pct(result.annualized_return));
    println!("  Volatility:        {}", optional(result.annualized_volatility, format_pct));
    println!("  Final growth:      {} MXN", optional(result.projected_growth, format_money));
    println!("  VaR (95%):         {}", optional(result.value_at_risk_95, format_pct));
    println!("  Sharpe ratio:      {}", optional(result.sharpe_ratio, format_ratio));

    match outcome.comparison.verdict_for(&result.symbol) {
        Some(Verdict::Outperforms) => println!(
            "  Better return than {}. An interesting option for investors willing to take on market risk.",
            outcome.reference.name
        ),
        _ => println!(
            "  Did not beat {}. Consider options with a higher return.",
            outcome.reference.name
        ),
    }
}

fn new_table<T: Into<comfy_table::Cell>>(header: Vec<T>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn optional(value: Option<Decimal>, format: fn(Decimal) -> String) -> String {
    value.map(format).unwrap_or_else(|| NOT_COMPUTABLE.to_string())
}

fn bar(value: Decimal, max: Decimal) -> String {
    if max <= Decimal::ZERO {
        return String::new();
    }
    let width = (value / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0);
    "█".repeat(width)
}

/// A fraction as a percentage with two decimals: `0.1020` -> `"10.20%"`.
pub fn format_pct(fraction: Decimal) -> String {
    format!("{:.2}%", (fraction * Decimal::ONE_HUNDRED).round_dp(2))
}

pub fn format_ratio(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// A currency amount with thousands separators: `16252.0434` -> `"$16,252.04"`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac_part}")
}
