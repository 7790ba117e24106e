use crate::engine::compound_growth;
use crate::error::AnalyticsError;
use crate::report::{
    Comparison, ComparisonRow, GrowthTrajectory, InstrumentResult, ReferenceResult, RowKind,
    Verdict,
};
use rust_decimal::Decimal;

/// Ranks the instruments and the reference by annualized return, highest first.
///
/// A row outperforms only when its annualized return is strictly above the
/// reference rate; the reference row therefore underperforms. On an exact tie
/// the reference ranks first.
pub fn compare_to_reference(
    results: &[InstrumentResult],
    reference: &ReferenceResult,
) -> Comparison {
    let verdict = |annual_return: Decimal| {
        if annual_return > reference.annual_rate {
            Verdict::Outperforms
        } else {
            Verdict::Underperforms
        }
    };

    let mut rows = Vec::with_capacity(results.len() + 1);
    rows.push(ComparisonRow {
        label: reference.name.clone(),
        annual_return: reference.annual_rate,
        projected_growth: Some(reference.projected_growth),
        verdict: verdict(reference.annual_rate),
        kind: RowKind::Reference,
    });

    for result in results {
        rows.push(ComparisonRow {
            label: result.name.clone(),
            annual_return: result.annualized_return,
            projected_growth: result.projected_growth,
            verdict: verdict(result.annualized_return),
            kind: RowKind::Instrument {
                symbol: result.symbol.clone(),
            },
        });
    }

    // Stable sort, so equal returns keep insertion order (reference first).
    rows.sort_by(|a, b| b.annual_return.cmp(&a.annual_return));

    Comparison { rows }
}

/// The compounded amount at the end of each year from 1 to `horizon_years`.
pub fn growth_trajectory(
    label: &str,
    principal: Decimal,
    annual_rate: Decimal,
    horizon_years: u32,
) -> Result<GrowthTrajectory, AnalyticsError> {
    let points = (1..=horizon_years)
        .map(|year| {
            compound_growth(principal, annual_rate, Decimal::from(year)).map(|amount| (year, amount))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GrowthTrajectory {
        label: label.to_string(),
        annual_rate,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn instrument(symbol: &str, annualized_return: Decimal) -> InstrumentResult {
        InstrumentResult {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            annualized_return,
            annualized_volatility: Some(dec!(0.2)),
            projected_growth: Some(dec!(10000)),
            value_at_risk_95: Some(dec!(-0.02)),
            sharpe_ratio: Some(dec!(0.05)),
            observations: 100,
        }
    }

    fn cetes() -> ReferenceResult {
        ReferenceResult {
            name: "CETES".to_string(),
            annual_rate: dec!(0.1020),
            projected_growth: dec!(16252.04),
        }
    }

    #[test]
    fn ranking_places_reference_between_instruments() {
        let results = vec![instrument("LOW", dec!(0.08)), instrument("HIGH", dec!(0.12))];
        let comparison = compare_to_reference(&results, &cetes());

        let labels: Vec<&str> = comparison.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["HIGH", "CETES", "LOW"]);

        let verdicts: Vec<Verdict> = comparison.rows.iter().map(|r| r.verdict).collect();
        assert_eq!(
            verdicts,
            vec![Verdict::Outperforms, Verdict::Underperforms, Verdict::Underperforms]
        );
        assert!(comparison.rows[1].is_reference());
        assert_eq!(comparison.verdict_for("HIGH"), Some(Verdict::Outperforms));
        assert_eq!(comparison.verdict_for("LOW"), Some(Verdict::Underperforms));
    }

    #[test]
    fn equal_return_does_not_outperform() {
        let results = vec![instrument("TIE", dec!(0.1020))];
        let comparison = compare_to_reference(&results, &cetes());

        assert!(comparison.rows[0].is_reference());
        assert_eq!(comparison.verdict_for("TIE"), Some(Verdict::Underperforms));
    }

    #[test]
    fn reference_alone_is_a_single_row() {
        let comparison = compare_to_reference(&[], &cetes());
        assert_eq!(comparison.rows.len(), 1);
        assert!(comparison.rows[0].is_reference());
        assert_eq!(comparison.rows[0].verdict, Verdict::Underperforms);
    }

    #[test]
    fn trajectory_covers_each_year_of_the_horizon() {
        let trajectory = growth_trajectory("CETES", dec!(10000), dec!(0.1020), 5).unwrap();

        let years: Vec<u32> = trajectory.points.iter().map(|(y, _)| *y).collect();
        assert_eq!(years, vec![1, 2, 3, 4, 5]);
        assert_eq!(trajectory.points[0].1, dec!(11020));
        assert_eq!(trajectory.points[4].1.round_dp(2), dec!(16252.04));
        assert!(trajectory.points.windows(2).all(|w| w[1].1 > w[0].1));
    }
}
