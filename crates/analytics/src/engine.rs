use crate::error::AnalyticsError;
use crate::report::{Annualized, InstrumentResult, ReferenceResult};
use crate::stats::{mean, percentile, sample_std_dev};
use configuration::{AnalyticsSettings, ReferenceInstrument};
use core_types::{PriceSeries, RunParameters};
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, MathematicalOps};

/// A stateless calculator for deriving return and risk statistics from price history.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    settings: AnalyticsSettings,
}

impl AnalyticsEngine {
    pub fn new(settings: AnalyticsSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// The main entry point for analysing one instrument.
    ///
    /// # Arguments
    ///
    /// * `series` - The instrument's closing prices over the run horizon.
    /// * `name` - Display name carried into the result.
    /// * `params` - Initial amount and horizon used for the growth projection.
    ///
    /// # Returns
    ///
    /// The `InstrumentResult`, or `NoData` for an empty series and
    /// `NotEnoughData` when there are fewer than two prices. A metric that
    /// cannot be computed (a growth rate below -100%, an overflowing
    /// deviation) is left as `None` without discarding the others.
    pub fn analyze(
        &self,
        series: &PriceSeries,
        name: &str,
        params: &RunParameters,
    ) -> Result<InstrumentResult, AnalyticsError> {
        if series.is_empty() {
            return Err(AnalyticsError::NoData(series.symbol.clone()));
        }

        let returns = self.compute_returns(series)?;
        if returns.is_empty() {
            return Err(AnalyticsError::NotEnoughData(format!(
                "{} has {} closing price(s), at least 2 are required",
                series.symbol,
                series.len()
            )));
        }

        let annualized = self.annualize(&returns)?;
        let projected_growth = match compound_growth(
            params.initial_amount,
            annualized.mean_annual_return,
            Decimal::from(params.horizon_years),
        ) {
            Ok(amount) => Some(amount),
            Err(e) => {
                tracing::warn!(symbol = %series.symbol, error = %e, "Projected growth not computable.");
                None
            }
        };
        let value_at_risk_95 = self.value_at_risk(&returns);
        let sharpe_ratio = self.sharpe_ratio(&returns);

        tracing::debug!(
            symbol = %series.symbol,
            observations = series.len(),
            annualized_return = %annualized.mean_annual_return,
            sharpe_computable = sharpe_ratio.is_some(),
            "Instrument analysed."
        );

        Ok(InstrumentResult {
            symbol: series.symbol.clone(),
            name: name.to_string(),
            annualized_return: annualized.mean_annual_return,
            annualized_volatility: annualized.annual_volatility,
            projected_growth,
            value_at_risk_95,
            sharpe_ratio,
            observations: series.len(),
        })
    }

    /// Computes the fixed-rate baseline for the run.
    pub fn reference(
        &self,
        reference: &ReferenceInstrument,
        params: &RunParameters,
    ) -> Result<ReferenceResult, AnalyticsError> {
        let projected_growth = compound_growth(
            params.initial_amount,
            reference.annual_rate,
            Decimal::from(params.horizon_years),
        )?;

        Ok(ReferenceResult {
            name: reference.name.clone(),
            annual_rate: reference.annual_rate,
            projected_growth,
        })
    }

    /// Period-over-period fractional changes: `price[i] / price[i-1] - 1`.
    ///
    /// A series with fewer than two prices yields an empty return series.
    pub fn compute_returns(&self, series: &PriceSeries) -> Result<Vec<Decimal>, AnalyticsError> {
        let closes: Vec<Decimal> = series.closes().collect();

        closes
            .windows(2)
            .map(|w| {
                let ratio = w[1]
                    .checked_div(w[0])
                    .ok_or_else(|| AnalyticsError::DivisionByZero("daily return".to_string()))?;
                Ok(ratio - Decimal::ONE)
            })
            .collect()
    }

    /// Scales the mean and sample standard deviation of daily returns to a year.
    ///
    /// `mean * N` and `std_dev * sqrt(N)` with `N` trading days per year.
    pub fn annualize(&self, returns: &[Decimal]) -> Result<Annualized, AnalyticsError> {
        if returns.is_empty() {
            return Err(AnalyticsError::NotEnoughData(
                "annualize requires at least one return".to_string(),
            ));
        }
        let mean_return = mean(returns)
            .ok_or_else(|| AnalyticsError::Calculation("mean return overflow".to_string()))?;

        let periods = Decimal::from(self.settings.trading_days_per_year);
        let sqrt_periods = periods.sqrt().ok_or_else(|| {
            AnalyticsError::Calculation("Failed to calculate square root of trading days".to_string())
        })?;

        let annual_volatility = match sample_std_dev(returns) {
            Some(std_dev) => Some(
                std_dev
                    .checked_mul(sqrt_periods)
                    .ok_or_else(|| AnalyticsError::Calculation("volatility overflow".to_string()))?,
            ),
            None => None,
        };

        let mean_annual_return = mean_return
            .checked_mul(periods)
            .ok_or_else(|| AnalyticsError::Calculation("annual return overflow".to_string()))?;

        Ok(Annualized {
            mean_annual_return,
            annual_volatility,
        })
    }

    /// Historical Value-at-Risk at the configured confidence.
    ///
    /// Returns the `(1 - confidence)` percentile of the returns, interpolating
    /// linearly between order statistics. `None` with fewer than two returns.
    pub fn value_at_risk(&self, returns: &[Decimal]) -> Option<Decimal> {
        historical_var(returns, self.settings.var_confidence)
    }

    /// Per-period Sharpe ratio against the configured risk-free rate.
    ///
    /// `None` when the standard deviation is zero or cannot be computed.
    pub fn sharpe_ratio(&self, returns: &[Decimal]) -> Option<Decimal> {
        let std_dev = sample_std_dev(returns)?;
        if std_dev.is_zero() {
            return None;
        }
        let excess = mean(returns)? - self.settings.risk_free_rate;
        excess.checked_div(std_dev)
    }
}

/// `principal * (1 + annual_rate) ^ years`.
///
/// Whole years use an exact integer power; fractional years compound
/// fractionally. Rates below -1 and negative horizons are rejected.
pub fn compound_growth(
    principal: Decimal,
    annual_rate: Decimal,
    years: Decimal,
) -> Result<Decimal, AnalyticsError> {
    if years.is_sign_negative() && !years.is_zero() {
        return Err(AnalyticsError::InvalidInput(
            "years".to_string(),
            format!("cannot be negative, got {}", years),
        ));
    }
    if annual_rate < Decimal::NEGATIVE_ONE {
        return Err(AnalyticsError::InvalidInput(
            "annual_rate".to_string(),
            format!("cannot be below -1, got {}", annual_rate),
        ));
    }

    let base = Decimal::ONE + annual_rate;
    let factor = if years.is_zero() {
        Some(Decimal::ONE)
    } else if base.is_zero() {
        Some(Decimal::ZERO)
    } else if years.fract().is_zero() {
        years.to_i64().and_then(|exp| base.checked_powi(exp))
    } else {
        base.checked_powd(years)
    }
    .ok_or_else(|| {
        AnalyticsError::Calculation(format!(
            "compounding {} over {} years overflowed",
            annual_rate, years
        ))
    })?;

    principal
        .checked_mul(factor)
        .ok_or_else(|| AnalyticsError::Calculation("projected growth overflow".to_string()))
}

/// The `(1 - confidence)` empirical percentile of `returns`.
pub fn historical_var(returns: &[Decimal], confidence: Decimal) -> Option<Decimal> {
    if returns.len() < 2 {
        return None;
    }
    let mut sorted = returns.to_vec();
    sorted.sort();
    percentile(&sorted, Decimal::ONE - confidence)
}
