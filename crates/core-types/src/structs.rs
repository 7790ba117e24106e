use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily closing price for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// The closing-price history of one instrument.
///
/// Points are always in chronological order with at most one point per date.
/// An empty series is valid: it is how a provider reports "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from points in any order.
    ///
    /// Points are sorted by date; when a date appears more than once the last
    /// observation supplied for it wins.
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        // Stable sort keeps supplied order among equal dates, so the last one is the newest.
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            symbol: symbol.into(),
            points: deduped,
        }
    }

    /// An empty series for `symbol`.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// The closing prices in chronological order.
    pub fn closes(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.close)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// The investment parameters chosen for one comparison run.
///
/// Built once per run and passed by value into the simulator; nothing reads
/// these from ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub initial_amount: Decimal,
    pub horizon_years: u32,
    pub symbols: Vec<String>,
}

impl RunParameters {
    /// Validates and constructs a new set of run parameters.
    ///
    /// Symbols are upper-cased and de-duplicated while keeping the order in
    /// which they were selected.
    pub fn new(
        initial_amount: Decimal,
        horizon_years: u32,
        max_horizon_years: u32,
        symbols: Vec<String>,
    ) -> Result<Self, CoreError> {
        if initial_amount <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "initial_amount".to_string(),
                format!("must be greater than zero, got {}", initial_amount),
            ));
        }
        if horizon_years < 1 || horizon_years > max_horizon_years {
            return Err(CoreError::InvalidInput(
                "horizon_years".to_string(),
                format!(
                    "must be between 1 and {}, got {}",
                    max_horizon_years, horizon_years
                ),
            ));
        }

        let mut unique: Vec<String> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let symbol = symbol.trim().to_uppercase();
            if symbol.is_empty() || unique.contains(&symbol) {
                continue;
            }
            unique.push(symbol);
        }

        Ok(Self {
            initial_amount,
            horizon_years,
            symbols: unique,
        })
    }
}

/// Identification the user must provide before any simulation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub terms_accepted: bool,
}

impl ContactDetails {
    /// Checks that the name and email are present and the terms were accepted.
    ///
    /// Deliverability of the address is not checked.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "name".to_string(),
                "a full name is required".to_string(),
            ));
        }
        if self.email.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "email".to_string(),
                "an email address is required".to_string(),
            ));
        }
        if !self.terms_accepted {
            return Err(CoreError::TermsNotAccepted);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(day: u32, close: Decimal) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            close,
        }
    }

    #[test]
    fn series_is_sorted_and_deduplicated() {
        let series = PriceSeries::new(
            "SPY",
            vec![
                point(4, dec!(103)),
                point(1, dec!(100)),
                point(2, dec!(101)),
                point(2, dec!(102)),
            ],
        );

        let closes: Vec<Decimal> = series.closes().collect();
        assert_eq!(closes, vec![dec!(100), dec!(102), dec!(103)]);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 3, 4));
    }

    #[test]
    fn run_parameters_reject_non_positive_amount() {
        let err = RunParameters::new(dec!(0), 5, 10, vec!["SPY".into()]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "initial_amount"));
    }

    #[test]
    fn run_parameters_reject_out_of_range_horizon() {
        assert!(RunParameters::new(dec!(10000), 0, 10, vec![]).is_err());
        assert!(RunParameters::new(dec!(10000), 11, 10, vec![]).is_err());
        assert!(RunParameters::new(dec!(10000), 10, 10, vec![]).is_ok());
    }

    #[test]
    fn run_parameters_normalise_symbols() {
        let params = RunParameters::new(
            dec!(10000),
            5,
            10,
            vec!["spy".into(), " QQQ ".into(), "SPY".into(), "".into()],
        )
        .unwrap();
        assert_eq!(params.symbols, vec!["SPY".to_string(), "QQQ".to_string()]);
    }

    #[test]
    fn contact_details_gate() {
        let mut contact = ContactDetails {
            name: "Ana Pérez".into(),
            email: "ana@example.com".into(),
            terms_accepted: true,
        };
        assert!(contact.validate().is_ok());

        contact.terms_accepted = false;
        assert!(matches!(contact.validate(), Err(CoreError::TermsNotAccepted)));

        contact.terms_accepted = true;
        contact.email = "   ".into();
        assert!(contact.validate().is_err());
    }
}
