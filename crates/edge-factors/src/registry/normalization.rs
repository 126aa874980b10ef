//! Weight normalization to a unit sum.

use edge_core::errors::RegistryError;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationOutcome {
    /// Each weight divided by the original total.
    Scaled,
    /// The total was zero so every factor got `1/N`.
    EqualSplit,
}

/// Normalize in place so the weights sum to 1.0.
///
/// An all-zero input becomes an equal split. Fails when the result misses
/// 1.0 by more than `tolerance` or when the slice is empty.
pub fn normalize_weights(
    weights: &mut [f64],
    tolerance: f64,
) -> Result<NormalizationOutcome, RegistryError> {
    if weights.is_empty() {
        return Err(RegistryError::EmptyRegistry);
    }
    let total: f64 = weights.iter().sum();

    let outcome = if total == 0.0 {
        warn!(
            factor_count = weights.len(),
            "all factor weights are zero, distributing equally"
        );
        let equal = 1.0 / weights.len() as f64;
        weights.iter_mut().for_each(|w| *w = equal);
        NormalizationOutcome::EqualSplit
    } else {
        weights.iter_mut().for_each(|w| *w /= total);
        NormalizationOutcome::Scaled
    };

    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || (sum - 1.0).abs() > tolerance {
        return Err(RegistryError::WeightNormalization {
            total: sum,
            tolerance,
        });
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_weights_keep_proportions() {
        let mut w = [0.2, 0.6, 0.2];
        assert_eq!(normalize_weights(&mut w, 1e-3), Ok(NormalizationOutcome::Scaled));
        assert!((w[1] - 0.6 / 1.0).abs() < 1e-12);

        let mut w = [1.0, 3.0];
        normalize_weights(&mut w, 1e-3).unwrap();
        assert_eq!(w, [0.25, 0.75]);
    }

    #[test]
    fn test_all_zero_becomes_equal_split() {
        let mut w = [0.0; 4];
        assert_eq!(normalize_weights(&mut w, 1e-3), Ok(NormalizationOutcome::EqualSplit));
        assert_eq!(w, [0.25; 4]);
    }

    #[test]
    fn test_empty_and_non_finite_are_rejected() {
        assert_eq!(normalize_weights(&mut [], 1e-3), Err(RegistryError::EmptyRegistry));
        let mut w = [f64::INFINITY, 1.0];
        assert!(matches!(
            normalize_weights(&mut w, 1e-3),
            Err(RegistryError::WeightNormalization { .. })
        ));
    }
}
