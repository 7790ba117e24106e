//! # ETF Simulator Orchestration
//!
//! Runs one comparison: fetches every selected instrument from the price
//! provider, hands each series to the `AnalyticsEngine`, and assembles the
//! ranked comparison against the reference instrument.
//!
//! A failure for one instrument (provider error, empty history, too few
//! prices, degenerate statistics) becomes an `InstrumentOutcome` marker and
//! never stops the others.

use analytics::{AnalyticsEngine, AnalyticsError, compare_to_reference, growth_trajectory};
use api_client::{ApiError, PriceProvider};
use configuration::{Config, ReferenceInstrument, Simulation};
use core_types::{PriceSeries, RunParameters, display_name};
use futures::future::join_all;
use indicatif::ProgressStyle;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{Instrument, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

pub mod error;
pub mod outcome;

pub use error::SimulationError;
pub use outcome::{InstrumentOutcome, SimulationOutcome};

/// The comparison runner.
pub struct Simulator {
    provider: Arc<dyn PriceProvider>,
    engine: AnalyticsEngine,
    reference: ReferenceInstrument,
    simulation: Simulation,
}

impl Simulator {
    pub fn new(
        provider: Arc<dyn PriceProvider>,
        engine: AnalyticsEngine,
        reference: ReferenceInstrument,
        simulation: Simulation,
    ) -> Self {
        Self {
            provider,
            engine,
            reference,
            simulation,
        }
    }

    /// Builds a simulator from the loaded application configuration.
    pub fn from_config(provider: Arc<dyn PriceProvider>, config: &Config) -> Self {
        Self::new(
            provider,
            AnalyticsEngine::new(config.analytics.clone()),
            config.reference.clone(),
            config.simulation.clone(),
        )
    }

    /// Validates user input into `RunParameters`, filling gaps from the configured defaults.
    pub fn parameters(
        &self,
        initial_amount: Option<Decimal>,
        horizon_years: Option<u32>,
        symbols: Vec<String>,
    ) -> Result<RunParameters, SimulationError> {
        Ok(RunParameters::new(
            initial_amount.unwrap_or(self.simulation.initial_amount),
            horizon_years.unwrap_or(self.simulation.horizon_years),
            self.simulation.max_horizon_years,
            symbols,
        )?)
    }

    /// Runs the comparison for `params`.
    ///
    /// Only a failure to compute the reference itself is an error; every
    /// per-instrument problem is reported in `SimulationOutcome::outcomes`.
    pub async fn run(&self, params: RunParameters) -> Result<SimulationOutcome, SimulationError> {
        let reference = self.engine.reference(&self.reference, &params)?;

        let span = tracing::info_span!("simulation", symbols = params.symbols.len());
        span.pb_set_style(
            &ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );
        span.pb_set_length(params.symbols.len() as u64);

        let fetched = join_all(
            params
                .symbols
                .iter()
                .map(|symbol| self.fetch(symbol, params.horizon_years)),
        )
        .instrument(span)
        .await;

        let outcomes: Vec<InstrumentOutcome> = params
            .symbols
            .iter()
            .zip(fetched)
            .map(|(symbol, series)| self.evaluate(symbol, series, &params))
            .collect();

        let computed: Vec<_> = outcomes.iter().filter_map(|o| o.result().cloned()).collect();
        let comparison = compare_to_reference(&computed, &reference);

        let mut trajectories = vec![growth_trajectory(
            &reference.name,
            params.initial_amount,
            reference.annual_rate,
            params.horizon_years,
        )?];
        for result in &computed {
            match growth_trajectory(
                &result.name,
                params.initial_amount,
                result.annualized_return,
                params.horizon_years,
            ) {
                Ok(trajectory) => trajectories.push(trajectory),
                Err(e) => tracing::warn!(symbol = %result.symbol, error = %e, "Skipping growth trajectory."),
            }
        }

        tracing::info!(
            selected = params.symbols.len(),
            computed = computed.len(),
            "Simulation complete."
        );

        Ok(SimulationOutcome {
            parameters: params,
            outcomes,
            reference,
            comparison,
            trajectories,
        })
    }

    /// Fetches one symbol inside its own span so the console shows it as a spinner.
    async fn fetch(&self, symbol: &str, horizon_years: u32) -> Result<PriceSeries, ApiError> {
        let result = self
            .provider
            .fetch_price_series(symbol, horizon_years)
            .instrument(tracing::info_span!("fetch", %symbol))
            .await;
        Span::current().pb_inc(1);
        result
    }

    /// Turns one fetch result into an outcome, isolating every failure.
    fn evaluate(
        &self,
        symbol: &str,
        series: Result<PriceSeries, ApiError>,
        params: &RunParameters,
    ) -> InstrumentOutcome {
        let name = display_name(symbol);

        let series = match series {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(%symbol, error = %e, "Price fetch failed; treating as no data.");
                return InstrumentOutcome::NoData {
                    symbol: symbol.to_string(),
                    name,
                    reason: e.to_string(),
                };
            }
        };

        match self.engine.analyze(&series, &name, params) {
            Ok(result) => InstrumentOutcome::Computed(result),
            Err(AnalyticsError::NoData(_)) => {
                tracing::warn!(%symbol, "Provider returned an empty price series.");
                InstrumentOutcome::NoData {
                    symbol: symbol.to_string(),
                    name,
                    reason: "the provider returned no prices".to_string(),
                }
            }
            Err(AnalyticsError::NotEnoughData(reason)) => {
                tracing::warn!(%symbol, %reason, "Insufficient price history.");
                InstrumentOutcome::InsufficientData {
                    symbol: symbol.to_string(),
                    name,
                    observations: series.len(),
                }
            }
            Err(e) => {
                tracing::warn!(%symbol, error = %e, "Statistics not computable.");
                InstrumentOutcome::NotComputable {
                    symbol: symbol.to_string(),
                    name,
                    reason: e.to_string(),
                }
            }
        }
    }
}
