use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mean return and volatility scaled to a yearly basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annualized {
    pub mean_annual_return: Decimal,
    pub annual_volatility: Option<Decimal>, // None with a single return
}

/// The statistics computed for one instrument in one run.
///
/// Created once by the `AnalyticsEngine` and never mutated afterwards.
/// Every `Option` field is `None` when the metric is not computable; the
/// renderer is responsible for showing that, never a NaN or a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentResult {
    pub symbol: String,
    pub name: String,
    /// Mean daily return times trading days per year, as a fraction.
    pub annualized_return: Decimal,
    pub annualized_volatility: Option<Decimal>,
    /// Initial amount compounded at `annualized_return` over the horizon.
    /// `None` when the rate is below -100% or the amount overflows.
    pub projected_growth: Option<Decimal>,
    /// Lower-tail daily return cutoff at the configured confidence.
    pub value_at_risk_95: Option<Decimal>,
    pub sharpe_ratio: Option<Decimal>, // None for zero volatility
    /// Number of closing prices the statistics were derived from.
    pub observations: usize,
}

/// The fixed-rate baseline for one run. Depends only on run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceResult {
    pub name: String,
    pub annual_rate: Decimal,
    pub projected_growth: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Outperforms,
    Underperforms,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    Reference,
    Instrument { symbol: String },
}

/// One row of the ranked comparison table.
///
/// Every row, the reference included, carries a verdict: only a return
/// strictly above the reference rate outperforms, so the reference row itself
/// always reads `Underperforms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub label: String,
    pub annual_return: Decimal,
    pub projected_growth: Option<Decimal>,
    pub verdict: Verdict,
    pub kind: RowKind,
}

impl ComparisonRow {
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, RowKind::Reference)
    }
}

/// Instruments and the reference ranked by annualized return, highest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    pub fn verdict_for(&self, symbol: &str) -> Option<Verdict> {
        self.rows.iter().find_map(|row| match &row.kind {
            RowKind::Instrument { symbol: s } if s == symbol => Some(row.verdict),
            _ => None,
        })
    }
}

/// Compounded value at the end of each whole year of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthTrajectory {
    pub label: String,
    pub annual_rate: Decimal,
    /// `(year, amount)` for years `1..=horizon`.
    pub points: Vec<(u32, Decimal)>,
}
