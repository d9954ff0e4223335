//! Error measures comparing an expected output with a predicted one.

use crate::error::{Error, Result};

/// A measure of how far a prediction is from its label.
///
/// Implementations are pure: the value is non-negative and zero exactly when both vectors are
/// equal. Vectors of different lengths are rejected instead of truncated.
pub trait ErrorMeasure {
    /// Compute the error of `actual` with respect to `expected`.
    fn value(&self, expected: &[f64], actual: &[f64]) -> Result<f64>;
}

/// Half the sum of squared differences.
#[derive(Debug, Default, Clone, Copy)]
pub struct SumOfSquaresError;

impl ErrorMeasure for SumOfSquaresError {
    fn value(&self, expected: &[f64], actual: &[f64]) -> Result<f64> {
        Error::check_dimension(expected.len(), actual.len())?;
        let sum: f64 = expected
            .iter()
            .zip(actual)
            .map(|(e, a)| (e - a) * (e - a))
            .sum();
        Ok(0.5 * sum)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn sum_of_squares() {
        let e = SumOfSquaresError.value(&[1.0, 2.0], &[0.0, 4.0]).unwrap();
        assert_eq!(e, 2.5);
    }

    #[test]
    fn mismatched_lengths() {
        let err = SumOfSquaresError
            .value(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                found: 4
            }
        ));
    }

    proptest! {
        #[test]
        fn zero_on_identical_vectors(x in prop::collection::vec(-1e6f64..1e6, 0..32)) {
            prop_assert_eq!(SumOfSquaresError.value(&x, &x).unwrap(), 0.0);
        }

        #[test]
        fn positive_on_different_vectors(
            x in prop::collection::vec(-1e3f64..1e3, 1..16),
            i in any::<prop::sample::Index>(),
        ) {
            let mut y = x.clone();
            let i = i.index(y.len());
            y[i] += 1.0;
            prop_assert!(SumOfSquaresError.value(&x, &y).unwrap() > 0.0);
        }
    }
}
