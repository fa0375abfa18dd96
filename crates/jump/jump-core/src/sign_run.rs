//! Sign-run test.
//!
//! A nonparametric test over the signs of consecutive price differences.
//! It is a different test from the BNS variation test and is used by jump
//! localization to score candidate windows.

use jump_api::validate_significance;
use jump_spi::{JumpError, Result, SignRunResult};

use crate::normal::normal_cdf;
use crate::variation::ensure_finite;

/// Up/down move counts of a price window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SignCounts {
    pub up: usize,
    pub down: usize,
    /// Number of prices in the window.
    pub len: usize,
}

impl SignCounts {
    pub fn of(prices: &[f64]) -> Self {
        let (up, down) = prices.windows(2).fold((0, 0), |(up, down), w| {
            if w[1] > w[0] {
                (up + 1, down)
            } else if w[1] < w[0] {
                (up, down + 1)
            } else {
                (up, down)
            }
        });
        Self {
            up,
            down,
            len: prices.len(),
        }
    }
}

/// Evaluate the sign-run statistic for precomputed counts.
///
/// The significance level must already be validated.
pub(crate) fn evaluate(counts: SignCounts, significance_level: f64) -> Result<SignRunResult> {
    if counts.len < 2 {
        return Err(JumpError::InsufficientData {
            required: 2,
            got: counts.len,
        });
    }
    if counts.up + counts.down == 0 {
        return Err(JumpError::degenerate("window has no price moves"));
    }

    // One-sided run: the standard error vanishes and |z| is unbounded.
    if counts.up == 0 || counts.down == 0 {
        return Ok(SignRunResult::new(counts.up, counts.down, 0.0, 0.0, true));
    }

    // Both counts are non-zero, so there are at least 3 prices.
    let n = counts.len as f64;
    let s1 = counts.up as f64;
    let s2 = counts.down as f64;
    let numerator = s1 * s2 * (n - s1) * (n - s2);
    let denominator = (n - 1.0) * (n - 2.0);
    let variance = 2.0 * n * numerator / denominator;
    let standard_error = variance.sqrt() / n.sqrt();

    let z = (s1 - s2) / standard_error;
    let p_value = (2.0 * (1.0 - normal_cdf(z.abs()))).max(0.0);

    Ok(SignRunResult::new(
        counts.up,
        counts.down,
        standard_error,
        p_value,
        p_value < significance_level,
    ))
}

/// Run the sign-run test over a price window.
///
/// With `s1` up moves, `s2` down moves and `n` prices:
/// `b = s1 - s2`, `se = sqrt(2n * s1*s2*(n-s1)*(n-s2) / ((n-1)(n-2))) / sqrt(n)`,
/// and the two-sided p-value of `b / se` is compared with
/// `significance_level`.
///
/// Fails with `InsufficientData` for fewer than 2 prices and with
/// `DegenerateInput` when no price moves. A one-sided window rejects with
/// a zero standard error.
pub fn sign_run_test(prices: &[f64], significance_level: f64) -> Result<SignRunResult> {
    validate_significance("significance_level", significance_level)?;
    ensure_finite("prices", prices)?;
    evaluate(SignCounts::of(prices), significance_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let counts = SignCounts::of(&[1.0, 2.0, 2.0, 1.5, 3.0]);
        assert_eq!(
            counts,
            SignCounts {
                up: 2,
                down: 1,
                len: 5
            }
        );
    }

    #[test]
    fn test_hand_computed_statistic() {
        // 5 up moves and 1 down move over 7 prices:
        // numerator = 5*1*2*6 = 60, denominator = 6*5 = 30,
        // v = 2*7*60/30 = 28, se = sqrt(28)/sqrt(7) = 2, z = 4/2 = 2.
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 5.5];
        let result = sign_run_test(&prices, 0.05).unwrap();

        assert_eq!(result.up_moves(), 5);
        assert_eq!(result.down_moves(), 1);
        assert_eq!(result.statistic(), 4);
        assert!((result.standard_error() - 2.0).abs() < 1e-12);
        assert!((result.z_score().unwrap() - 2.0).abs() < 1e-12);
        assert!((result.p_value() - 0.0455).abs() < 1e-3);
        assert!(result.rejected());

        let strict = sign_run_test(&prices, 0.01).unwrap();
        assert!(!strict.rejected());
    }

    #[test]
    fn test_balanced_window_does_not_reject() {
        let prices = [1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0];
        let result = sign_run_test(&prices, 0.05).unwrap();
        assert_eq!(result.statistic(), 0);
        assert_eq!(result.z_score(), Some(0.0));
        assert!(!result.rejected());
    }

    #[test]
    fn test_one_sided_window_rejects() {
        let result = sign_run_test(&[100.0, 100.0, 200.0], 0.05).unwrap();
        assert!(result.is_one_sided());
        assert_eq!(result.statistic(), 1);
        assert_eq!(result.standard_error(), 0.0);
        assert_eq!(result.p_value(), 0.0);
        assert!(result.rejected());
    }

    #[test]
    fn test_two_point_window() {
        let result = sign_run_test(&[100.0, 90.0], 0.05).unwrap();
        assert_eq!(result.statistic(), -1);
        assert!(result.rejected());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            sign_run_test(&[1.0], 0.05),
            Err(JumpError::InsufficientData { required: 2, got: 1 })
        ));
        assert!(matches!(
            sign_run_test(&[1.0, 1.0, 1.0], 0.05),
            Err(JumpError::DegenerateInput(_))
        ));
        assert!(matches!(
            sign_run_test(&[1.0, 2.0, 1.0], 0.0),
            Err(JumpError::InvalidParameter { .. })
        ));
        assert!(matches!(
            sign_run_test(&[1.0, f64::INFINITY, 1.0], 0.05),
            Err(JumpError::InvalidParameter { .. })
        ));
    }
}
