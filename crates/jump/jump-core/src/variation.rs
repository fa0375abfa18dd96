//! Realized-variation estimators.
//!
//! All estimators are pure functions over log-prices or log-returns and fail
//! fast instead of producing NaN/Inf values.

use jump_api::BipowerConfig;
use jump_spi::{JumpError, Result, VariationStatistics};

/// Reject a sequence holding NaN or infinite values.
pub(crate) fn ensure_finite(name: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(JumpError::invalid(
            name,
            format!("value at index {} is not finite", index),
        )),
        None => Ok(()),
    }
}

pub(crate) fn ensure_len(values: &[f64], required: usize) -> Result<()> {
    if values.len() < required {
        return Err(JumpError::InsufficientData {
            required,
            got: values.len(),
        });
    }
    Ok(())
}

/// Consecutive differences of log-prices.
pub(crate) fn log_returns(log_prices: &[f64]) -> Vec<f64> {
    log_prices.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Reject a sum that overflowed.
fn ensure_finite_sum(name: &str, sum: f64) -> Result<f64> {
    if !sum.is_finite() {
        return Err(JumpError::degenerate(format!(
            "{} is not finite; returns are too large",
            name
        )));
    }
    Ok(sum)
}

fn validate_threshold(threshold: f64) -> Result<()> {
    // NaN fails the comparison as well.
    if !(threshold > 0.0) {
        return Err(JumpError::invalid(
            "threshold",
            format!("must be positive, got {}", threshold),
        ));
    }
    Ok(())
}

/// Realized quadratic variation: the sum of squared log-returns.
///
/// Requires at least 2 log-prices.
pub fn quadratic_variation(log_prices: &[f64]) -> Result<f64> {
    ensure_len(log_prices, 2)?;
    ensure_finite("log_prices", log_prices)?;
    let qv: f64 = log_prices
        .windows(2)
        .map(|w| (w[1] - w[0]).powi(2))
        .sum();
    ensure_finite_sum("quadratic variation", qv)
}

/// Realized bipower variation `sum |r_i|^p * |r_{i+1}|^p`.
///
/// With [`BipowerScaling::Raw`](jump_api::BipowerScaling::Raw) the raw sum is
/// returned; with `Normalized` it is multiplied by `mu_1^-2 = pi / 2`.
/// Requires at least 3 log-prices.
pub fn bipower_variation(log_prices: &[f64], config: &BipowerConfig) -> Result<f64> {
    config.validate()?;
    ensure_len(log_prices, 3)?;
    ensure_finite("log_prices", log_prices)?;

    let returns = log_returns(log_prices);
    let sum: f64 = returns
        .windows(2)
        .map(|w| w[0].abs().powf(config.power) * w[1].abs().powf(config.power))
        .sum();
    ensure_finite_sum("bipower variation", sum * config.scaling.factor())
}

/// Sum of `min(|r_i|, t) * min(|r_{i+1}|, t)` over consecutive return pairs.
///
/// With `t = +inf` no return is clipped and this is the raw power-1 bipower
/// sum. Requires at least 2 returns.
pub fn clipped_bipower_sum(log_returns: &[f64], threshold: f64) -> Result<f64> {
    validate_threshold(threshold)?;
    ensure_len(log_returns, 2)?;
    ensure_finite("log_returns", log_returns)?;

    let sum: f64 = log_returns
        .windows(2)
        .map(|w| w[0].abs().min(threshold) * w[1].abs().min(threshold))
        .sum();
    ensure_finite_sum("clipped bipower sum", sum)
}

/// Threshold bipower variation `(n - 1) * t^2 - clipped_bipower_sum`.
///
/// `n` is the number of returns. Fails with `InvalidParameter` for
/// `t <= 0` and with `DegenerateInput` when the result is not finite
/// (for instance `t = +inf`).
pub fn threshold_bipower_variation(log_returns: &[f64], threshold: f64) -> Result<f64> {
    let clipped = clipped_bipower_sum(log_returns, threshold)?;
    let pairs = (log_returns.len() - 1) as f64;
    let tbv = pairs * threshold * threshold - clipped;
    if !tbv.is_finite() {
        return Err(JumpError::degenerate(format!(
            "threshold bipower variation is not finite for threshold {}",
            threshold
        )));
    }
    Ok(tbv)
}

/// Compute all three estimators over one log-price series.
///
/// A threshold estimator above quadratic variation is reported through
/// [`VariationStatistics::threshold_exceeds_quadratic`], never clamped.
pub fn variation_statistics(
    log_prices: &[f64],
    threshold: f64,
    config: &BipowerConfig,
) -> Result<VariationStatistics> {
    let qv = quadratic_variation(log_prices)?;
    let bv = bipower_variation(log_prices, config)?;
    let tbv = threshold_bipower_variation(&log_returns(log_prices), threshold)?;

    let stats = VariationStatistics::new(qv, bv, tbv);
    if stats.threshold_exceeds_quadratic() {
        tracing::debug!(
            quadratic_variation = qv,
            threshold_bipower_variation = tbv,
            threshold,
            "threshold bipower variation exceeds quadratic variation"
        );
    }
    Ok(stats)
}
