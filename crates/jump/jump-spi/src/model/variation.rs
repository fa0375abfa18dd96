//! Realized-variation statistics bundle.

use serde::{Deserialize, Serialize};

use crate::error::{JumpError, Result};

/// Realized-variation statistics computed over one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariationStatistics {
    pub quadratic_variation: f64,
    pub bipower_variation: f64,
    pub threshold_bipower_variation: f64,
}

impl VariationStatistics {
    /// Create a statistics bundle.
    pub fn new(
        quadratic_variation: f64,
        bipower_variation: f64,
        threshold_bipower_variation: f64,
    ) -> Self {
        Self {
            quadratic_variation,
            bipower_variation,
            threshold_bipower_variation,
        }
    }

    /// True when the threshold estimator exceeds quadratic variation.
    ///
    /// This happens for degenerate or very short series, and whenever the
    /// clipping threshold is large relative to typical returns.
    pub fn threshold_exceeds_quadratic(&self) -> bool {
        self.threshold_bipower_variation > self.quadratic_variation
    }

    /// Report a `threshold_bipower_variation > quadratic_variation` violation
    /// as an error. Values are never clamped.
    pub fn ensure_consistent(&self) -> Result<()> {
        if self.threshold_exceeds_quadratic() {
            return Err(JumpError::degenerate(format!(
                "threshold bipower variation {} exceeds quadratic variation {}",
                self.threshold_bipower_variation, self.quadratic_variation
            )));
        }
        Ok(())
    }
}
