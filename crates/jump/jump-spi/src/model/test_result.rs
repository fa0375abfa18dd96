//! Hypothesis test results.

use serde::{Deserialize, Serialize};

/// Outcome of a single jump test.
///
/// Produced fresh by every test invocation and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    jump_detected: bool,
    test_statistic: f64,
    critical_value: f64,
}

impl TestResult {
    /// Create a test result.
    pub fn new(jump_detected: bool, test_statistic: f64, critical_value: f64) -> Self {
        Self {
            jump_detected,
            test_statistic,
            critical_value,
        }
    }

    /// Whether the null hypothesis (no jump) was rejected.
    pub fn jump_detected(&self) -> bool {
        self.jump_detected
    }

    /// Value of the test statistic.
    pub fn test_statistic(&self) -> f64 {
        self.test_statistic
    }

    /// Critical value the statistic was compared against.
    pub fn critical_value(&self) -> f64 {
        self.critical_value
    }

    /// Distance of the statistic above the critical value (negative when
    /// no jump was detected).
    pub fn margin(&self) -> f64 {
        self.test_statistic - self.critical_value
    }
}

/// Outcome of the combined decision rule.
///
/// A jump is reported only when both component tests detect one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedTestResult {
    jump_detected: bool,
    bns: TestResult,
    threshold: TestResult,
    threshold_value: f64,
}

impl CombinedTestResult {
    /// Combine two component results; the verdict is their conjunction.
    pub fn new(bns: TestResult, threshold: TestResult, threshold_value: f64) -> Self {
        Self {
            jump_detected: bns.jump_detected() && threshold.jump_detected(),
            bns,
            threshold,
            threshold_value,
        }
    }

    /// Whether both tests detected a jump.
    pub fn jump_detected(&self) -> bool {
        self.jump_detected
    }

    /// Result of the BNS test.
    pub fn bns(&self) -> &TestResult {
        &self.bns
    }

    /// Result of the threshold test.
    pub fn threshold(&self) -> &TestResult {
        &self.threshold
    }

    /// Return-clipping threshold used by the threshold test.
    pub fn threshold_value(&self) -> f64 {
        self.threshold_value
    }
}
