use async_trait::async_trait;
use chrono::{DateTime, Months, Utc};
use configuration::ProviderConfig;
use core_types::{PricePoint, PriceSeries};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

pub mod error;
pub mod responses;

// --- Public API ---
pub use error::ApiError;
pub use responses::{ChartError, ChartResponse};

/// The generic, abstract interface for a price-history provider.
/// This trait is the contract the simulator uses, allowing the underlying
/// implementation (live or fixture) to be swapped out.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches the daily closing prices of `symbol` for the last `horizon_years`.
    ///
    /// An unknown or delisted symbol is not an error: it yields an empty series.
    async fn fetch_price_series(
        &self,
        symbol: &str,
        horizon_years: u32,
    ) -> Result<PriceSeries, ApiError>;
}

/// A concrete implementation of the `PriceProvider` for the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
    interval: String,
    use_adjusted_close: bool,
}

impl YahooClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            interval: config.interval.clone(),
            use_adjusted_close: config.use_adjusted_close,
        })
    }
}

#[async_trait]
impl PriceProvider for YahooClient {
    async fn fetch_price_series(
        &self,
        symbol: &str,
        horizon_years: u32,
    ) -> Result<PriceSeries, ApiError> {
        let (start_time, end_time) = history_window(Utc::now(), horizon_years)?;
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        tracing::debug!(%symbol, %start_time, %end_time, "Requesting price history.");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", start_time.timestamp().to_string()),
                ("period2", end_time.timestamp().to_string()),
                ("interval", self.interval.clone()),
                ("events", "history".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        // The chart API wraps most failures (including 404s) in a JSON body.
        match parse_chart(symbol, &text, self.use_adjusted_close) {
            Ok(series) => Ok(series),
            Err(ApiError::Deserialization(e)) if !status.is_success() => Err(ApiError::Provider(
                format!("HTTP {} for {}: {}", status, symbol, e),
            )),
            Err(e) => Err(e),
        }
    }
}

/// The `[now - years, now]` window requested from the provider.
pub fn history_window(
    now: DateTime<Utc>,
    horizon_years: u32,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    let start = horizon_years
        .checked_mul(12)
        .and_then(|months| now.checked_sub_months(Months::new(months)))
        .ok_or_else(|| ApiError::InvalidData(format!("Invalid horizon: {} years", horizon_years)))?;
    Ok((start, now))
}

/// Decodes a chart payload into a `PriceSeries`.
///
/// Null and non-positive closes are skipped. A "Not Found" chart error
/// becomes an empty series.
pub fn parse_chart(
    symbol: &str,
    body: &str,
    use_adjusted_close: bool,
) -> Result<PriceSeries, ApiError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;

    if let Some(error) = response.chart.error {
        if error.is_not_found() {
            tracing::warn!(%symbol, description = %error.description, "Provider has no data for symbol.");
            return Ok(PriceSeries::empty(symbol));
        }
        return Err(ApiError::Provider(format!("{}: {}", error.code, error.description)));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty(symbol));
    };

    let adjusted = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .filter(|a| use_adjusted_close && !a.is_empty());
    let closes = match adjusted {
        Some(adjclose) => adjclose,
        None => result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default(),
    };

    if !closes.is_empty() && closes.len() != result.timestamp.len() {
        return Err(ApiError::InvalidData(format!(
            "{} timestamps but {} closes for {}",
            result.timestamp.len(),
            closes.len(),
            symbol
        )));
    }

    let mut skipped = 0usize;
    let mut points = Vec::with_capacity(closes.len());
    for (timestamp, close) in result.timestamp.iter().zip(closes) {
        let Some(close) = close
            .filter(|c| c.is_finite() && *c > 0.0)
            .and_then(Decimal::from_f64)
        else {
            skipped += 1;
            continue;
        };
        let date = DateTime::from_timestamp(timestamp + result.meta.gmtoffset, 0)
            .ok_or_else(|| ApiError::InvalidData(format!("Invalid timestamp: {}", timestamp)))?
            .date_naive();
        points.push(PricePoint { date, close });
    }

    if skipped > 0 {
        tracing::debug!(%symbol, skipped, "Skipped empty or invalid closes.");
    }

    Ok(PriceSeries::new(symbol, points))
}
