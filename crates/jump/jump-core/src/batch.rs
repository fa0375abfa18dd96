//! Parallel detection over independent series.

use jump_api::JumpConfig;
use jump_spi::{CombinedTestResult, PriceSeries, Result};
use rayon::prelude::*;

use crate::combined::JumpDetector;

/// Run the combined rule over many independent series in parallel.
///
/// The outer error reports an invalid configuration. Each series gets its
/// own inner result, in input order, so one degenerate series does not
/// abort the batch.
///
/// # Example
///
/// ```rust,ignore
/// let results = detect_batch(&sessions, &JumpConfig::default())?;
/// let jumps = results.iter().filter(|r| matches!(r, Ok(c) if c.jump_detected())).count();
/// ```
pub fn detect_batch(
    series: &[PriceSeries],
    config: &JumpConfig,
) -> Result<Vec<Result<CombinedTestResult>>> {
    let detector = JumpDetector::new(*config)?;

    let results: Vec<Result<CombinedTestResult>> = series
        .par_iter()
        .map(|s| detector.detect_series(s))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::debug!(series = series.len(), failed, "batch jump detection finished");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jump_spi::JumpError;

    fn sessions() -> Vec<PriceSeries> {
        vec![
            PriceSeries::new(vec![100.0, 100.5, 99.8, 100.2, 100.1, 100.4]).unwrap(),
            PriceSeries::new(vec![50.0; 6]).unwrap(),
            PriceSeries::new(vec![20.0, 20.1, 19.9, 20.2, 31.0, 30.8, 31.1]).unwrap(),
        ]
    }

    #[test]
    fn test_batch_matches_sequential_in_order() {
        let series = sessions();
        let config = JumpConfig::default();
        let detector = JumpDetector::new(config).unwrap();

        let batch = detect_batch(&series, &config).unwrap();
        assert_eq!(batch.len(), series.len());
        for (s, result) in series.iter().zip(batch) {
            assert_eq!(result, detector.detect_series(s));
        }
    }

    #[test]
    fn test_batch_keeps_per_series_errors() {
        let batch = detect_batch(&sessions(), &JumpConfig::default()).unwrap();
        assert!(batch[0].is_ok());
        assert!(matches!(batch[1], Err(JumpError::DegenerateInput(_))));
        assert!(batch[2].is_ok());
    }

    #[test]
    fn test_batch_rejects_invalid_config() {
        assert!(detect_batch(&sessions(), &JumpConfig::new(1.5)).is_err());
    }

    #[test]
    fn test_empty_batch() {
        assert!(detect_batch(&[], &JumpConfig::default()).unwrap().is_empty());
    }
}
