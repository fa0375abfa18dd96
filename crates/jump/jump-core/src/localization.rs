//! Recursive jump localization.
//!
//! Attributes jumps to specific indices of a price series by re-running the
//! sign-run test over every window that ends at a candidate index and starts
//! at an earlier, not yet flagged index.

use jump_api::LocalizationConfig;
use jump_spi::{JumpError, JumpFlags, JumpLocalization, Result};

use crate::sign_run::{evaluate, sign_run_test, SignCounts};
use crate::variation::{ensure_finite, ensure_len};

/// Minimum number of prices accepted by localization.
pub const MIN_LOCALIZATION_LEN: usize = 3;

/// Prefix counts of up and down moves: `up[k]` is the number of upward moves
/// among the first `k` moves.
struct MoveIndex {
    up: Vec<usize>,
    down: Vec<usize>,
}

impl MoveIndex {
    fn new(prices: &[f64]) -> Self {
        let mut up = Vec::with_capacity(prices.len());
        let mut down = Vec::with_capacity(prices.len());
        up.push(0);
        down.push(0);
        for w in prices.windows(2) {
            let (u, d) = (up[up.len() - 1], down[down.len() - 1]);
            up.push(u + usize::from(w[1] > w[0]));
            down.push(d + usize::from(w[1] < w[0]));
        }
        Self { up, down }
    }

    /// Counts of the window `prices[start..=end]`.
    fn window(&self, start: usize, end: usize) -> SignCounts {
        SignCounts {
            up: self.up[end] - self.up[start],
            down: self.down[end] - self.down[start],
            len: end - start + 1,
        }
    }
}

/// Localize jumps with the default sign-run significance level.
///
/// Without `jump_threshold`, the threshold is twice the standard error of
/// the sign-run test over the whole series.
pub fn localize_jumps(prices: &[f64], jump_threshold: Option<f64>) -> Result<JumpLocalization> {
    localize_jumps_with(prices, &LocalizationConfig::new(jump_threshold))
}

/// Localize jumps in a price series.
///
/// Index 0 is always flagged. Indices are visited in increasing order; for
/// index `i`, every unflagged `j < i` contributes the window `prices[j..=i]`.
/// Among the windows whose sign-run test rejects, the one with the largest
/// `|b|` is kept, and `i` is flagged when that `|b|` reaches the threshold.
/// Windows that are flat never reject.
///
/// Window counts come from prefix sums, so the pass is O(n^2).
pub fn localize_jumps_with(
    prices: &[f64],
    config: &LocalizationConfig,
) -> Result<JumpLocalization> {
    config.validate()?;
    ensure_len(prices, MIN_LOCALIZATION_LEN)?;
    ensure_finite("prices", prices)?;

    let alpha = config.significance_level;
    let threshold = match config.threshold {
        Some(t) => t,
        None => 2.0 * sign_run_test(prices, alpha)?.standard_error(),
    };

    let index = MoveIndex::new(prices);
    let mut flags = vec![false; prices.len()];
    flags[0] = true;

    for i in 1..prices.len() {
        let mut best: Option<(usize, i64)> = None;

        for j in 0..i {
            if flags[j] {
                continue;
            }
            match evaluate(index.window(j, i), alpha) {
                Ok(result) if result.rejected() => {
                    let b = result.statistic();
                    if best.map_or(true, |(_, best_b)| b.abs() > best_b.abs()) {
                        best = Some((j, b));
                    }
                }
                Ok(_) | Err(JumpError::DegenerateInput(_)) => {}
                Err(e) => return Err(e),
            }
        }

        if let Some((split, b)) = best {
            if b.unsigned_abs() as f64 >= threshold {
                flags[i] = true;
                tracing::trace!(index = i, split, statistic = b, threshold, "jump flagged");
            }
        }
    }

    let flags = JumpFlags::from(flags);
    tracing::debug!(
        len = prices.len(),
        jumps = flags.jump_count() - 1,
        threshold,
        "jump localization finished"
    );
    Ok(JumpLocalization::new(flags, threshold))
}
