use analytics::{Comparison, GrowthTrajectory, InstrumentResult, ReferenceResult};
use core_types::RunParameters;

/// What a run produced for one selected symbol.
///
/// Only `Computed` carries statistics; the other variants are the markers
/// shown in place of a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentOutcome {
    Computed(InstrumentResult),
    /// The provider returned nothing or failed.
    NoData {
        symbol: String,
        name: String,
        reason: String,
    },
    /// Fewer than two closing prices.
    InsufficientData {
        symbol: String,
        name: String,
        observations: usize,
    },
    /// Prices were available but the statistics could not be derived.
    NotComputable {
        symbol: String,
        name: String,
        reason: String,
    },
}

impl InstrumentOutcome {
    pub fn symbol(&self) -> &str {
        match self {
            InstrumentOutcome::Computed(result) => &result.symbol,
            InstrumentOutcome::NoData { symbol, .. }
            | InstrumentOutcome::InsufficientData { symbol, .. }
            | InstrumentOutcome::NotComputable { symbol, .. } => symbol,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            InstrumentOutcome::Computed(result) => &result.name,
            InstrumentOutcome::NoData { name, .. }
            | InstrumentOutcome::InsufficientData { name, .. }
            | InstrumentOutcome::NotComputable { name, .. } => name,
        }
    }

    pub fn result(&self) -> Option<&InstrumentResult> {
        match self {
            InstrumentOutcome::Computed(result) => Some(result),
            _ => None,
        }
    }

    /// A one-line explanation for outcomes without statistics.
    pub fn warning(&self) -> Option<String> {
        match self {
            InstrumentOutcome::Computed(_) => None,
            InstrumentOutcome::NoData { name, reason, .. } => {
                Some(format!("No data found for {}: {}", name, reason))
            }
            InstrumentOutcome::InsufficientData { name, observations, .. } => Some(format!(
                "Insufficient data for {}: {} closing price(s), statistics not computable",
                name, observations
            )),
            InstrumentOutcome::NotComputable { name, reason, .. } => {
                Some(format!("Statistics not computable for {}: {}", name, reason))
            }
        }
    }
}

/// Everything one run produced, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub parameters: RunParameters,
    /// One entry per selected symbol, in selection order.
    pub outcomes: Vec<InstrumentOutcome>,
    pub reference: ReferenceResult,
    pub comparison: Comparison,
    /// The reference first, then each computed instrument.
    pub trajectories: Vec<GrowthTrajectory>,
}

impl SimulationOutcome {
    pub fn computed(&self) -> impl Iterator<Item = &InstrumentResult> {
        self.outcomes.iter().filter_map(InstrumentOutcome::result)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &InstrumentOutcome> {
        self.outcomes.iter().filter(|o| o.result().is_none())
    }
}
