//! Sign-run test result.

use serde::{Deserialize, Serialize};

/// Outcome of the sign-run test over the signs of consecutive price moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignRunResult {
    up_moves: usize,
    down_moves: usize,
    standard_error: f64,
    p_value: f64,
    rejected: bool,
}

impl SignRunResult {
    /// Create a sign-run result.
    ///
    /// A `standard_error` of zero marks a one-sided run, for which the
    /// z-score is unbounded.
    pub fn new(
        up_moves: usize,
        down_moves: usize,
        standard_error: f64,
        p_value: f64,
        rejected: bool,
    ) -> Self {
        Self {
            up_moves,
            down_moves,
            standard_error,
            p_value,
            rejected,
        }
    }

    /// Number of upward moves.
    pub fn up_moves(&self) -> usize {
        self.up_moves
    }

    /// Number of downward moves.
    pub fn down_moves(&self) -> usize {
        self.down_moves
    }

    /// Signed statistic `b = up - down`.
    pub fn statistic(&self) -> i64 {
        self.up_moves as i64 - self.down_moves as i64
    }

    /// Standard error of `b`.
    pub fn standard_error(&self) -> f64 {
        self.standard_error
    }

    /// Two-sided p-value.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Whether the test rejected the no-jump hypothesis.
    pub fn rejected(&self) -> bool {
        self.rejected
    }

    /// True when every move had the same sign.
    pub fn is_one_sided(&self) -> bool {
        self.up_moves == 0 || self.down_moves == 0
    }

    /// `b / se`, or `None` for a one-sided run.
    pub fn z_score(&self) -> Option<f64> {
        if self.standard_error > 0.0 {
            Some(self.statistic() as f64 / self.standard_error)
        } else {
            None
        }
    }
}
