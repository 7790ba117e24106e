//! Small descriptive-statistics helpers over `Decimal` slices.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, MathematicalOps};

/// Arithmetic mean, `None` for an empty slice or when the sum overflows.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(values.len()))
}

/// Sample (n - 1) standard deviation.
///
/// `None` with fewer than two values, or when the squared deviations do not
/// fit in a `Decimal`.
pub fn sample_std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_of_squares = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        let deviation = v.checked_sub(mean)?;
        acc.checked_add(deviation.checked_mul(deviation)?)
    })?;
    let variance = sum_of_squares.checked_div(Decimal::from(values.len() - 1))?;

    if variance.is_zero() {
        return Some(Decimal::ZERO);
    }
    variance.sqrt()
}

/// Linearly interpolated percentile of an ascending slice.
///
/// `p` is a fraction in `[0, 1]`; the position is `p * (n - 1)`.
pub fn percentile(sorted: &[Decimal], p: Decimal) -> Option<Decimal> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(Decimal::ZERO, Decimal::ONE);
    let pos = p * Decimal::from(sorted.len() - 1);
    let idx = pos.floor().to_usize()?;
    let frac = pos - pos.floor();

    if idx + 1 >= sorted.len() {
        Some(sorted[idx])
    } else {
        let lower = sorted[idx];
        let upper = sorted[idx + 1];
        upper
            .checked_sub(lower)?
            .checked_mul(frac)?
            .checked_add(lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[dec!(1), dec!(2), dec!(6)]), Some(dec!(3)));
    }

    #[test]
    fn sample_deviation_divides_by_n_minus_one() {
        // deviations -2, 0, 2 => sum of squares 8, / 2 = 4, sqrt = 2
        assert_eq!(sample_std_dev(&[dec!(1), dec!(3), dec!(5)]), Some(dec!(2)));
        assert_eq!(sample_std_dev(&[dec!(4), dec!(4)]), Some(Decimal::ZERO));
        assert_eq!(sample_std_dev(&[dec!(4)]), None);
    }

    #[test]
    fn percentile_bounds() {
        let sorted = [dec!(-3), dec!(-1), dec!(2)];
        assert_eq!(percentile(&sorted, Decimal::ZERO), Some(dec!(-3)));
        assert_eq!(percentile(&sorted, Decimal::ONE), Some(dec!(2)));
        assert_eq!(percentile(&sorted, dec!(0.25)), Some(dec!(-2)));
        assert_eq!(percentile(&[], dec!(0.5)), None);
    }

    #[test]
    fn overflowing_inputs_yield_none() {
        let huge = [Decimal::MAX, Decimal::MAX];
        assert_eq!(mean(&huge), None);

        // the mean fits, but the squared deviations do not
        let spread = [Decimal::from(1_000_000_000_000_000_i64), Decimal::ZERO];
        assert_eq!(mean(&spread), Some(Decimal::from(500_000_000_000_000_i64)));
        assert_eq!(sample_std_dev(&spread), None);
    }
}
