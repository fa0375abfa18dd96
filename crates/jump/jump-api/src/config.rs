//! Jump detection configuration types.
//!
//! Every knob of a detection call lives in one of these values and is passed
//! explicitly; nothing is read from process-wide state.

use jump_spi::{JumpError, Result};
use serde::{Deserialize, Serialize};

/// Default significance level of the BNS and threshold tests.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.01;

/// Default significance level of the sign-run sub-tests used by localization.
pub const DEFAULT_SIGN_RUN_SIGNIFICANCE: f64 = 0.05;

/// Default significance level of the mean-drift test.
pub const DEFAULT_DRIFT_SIGNIFICANCE: f64 = 0.001;

/// Default percentile of absolute log-returns used as clipping threshold.
pub const DEFAULT_THRESHOLD_PERCENTILE: f64 = 0.95;

/// Default exponent applied to each absolute return in bipower variation.
pub const DEFAULT_BIPOWER_POWER: f64 = 0.5;

/// Check that a significance level lies strictly inside (0, 1).
pub fn validate_significance(name: &str, level: f64) -> Result<()> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(JumpError::invalid(
            name,
            format!("must lie in (0, 1), got {}", level),
        ))
    }
}

// ============================================================================
// Bipower Configuration
// ============================================================================

/// Which bipower estimator to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BipowerScaling {
    /// Unnormalized sum of `|r_i|^p * |r_{i+1}|^p`.
    #[default]
    Raw,
    /// Raw sum multiplied by `mu_1^-2 = pi / 2`, where `mu_1 = E|Z|`.
    Normalized,
}

impl BipowerScaling {
    /// Multiplier applied to the raw sum.
    pub fn factor(&self) -> f64 {
        match self {
            BipowerScaling::Raw => 1.0,
            BipowerScaling::Normalized => std::f64::consts::FRAC_PI_2,
        }
    }
}

/// Bipower variation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BipowerConfig {
    /// Exponent applied to each absolute return (default: 0.5).
    pub power: f64,
    /// Normalization of the returned estimator (default: raw).
    pub scaling: BipowerScaling,
}

impl BipowerConfig {
    pub fn new(power: f64, scaling: BipowerScaling) -> Self {
        Self { power, scaling }
    }

    /// Raw sum with the default power.
    pub fn raw() -> Self {
        Self::default()
    }

    /// `mu_1^-2`-normalized estimator with the default power.
    pub fn normalized() -> Self {
        Self {
            power: DEFAULT_BIPOWER_POWER,
            scaling: BipowerScaling::Normalized,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.power.is_finite() || self.power <= 0.0 {
            return Err(JumpError::invalid(
                "power",
                format!("must be finite and positive, got {}", self.power),
            ));
        }
        Ok(())
    }
}

impl Default for BipowerConfig {
    fn default() -> Self {
        Self {
            power: DEFAULT_BIPOWER_POWER,
            scaling: BipowerScaling::Raw,
        }
    }
}

// ============================================================================
// Threshold Configuration
// ============================================================================

/// How the return-clipping threshold of the threshold test is chosen.
///
/// The rule is resolved once per series and held fixed for the whole call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum ThresholdRule {
    /// A caller-supplied threshold.
    Fixed(f64),
    /// Percentile (in `(0, 1]`) of absolute log-returns.
    AbsReturnPercentile(f64),
    /// Multiple of the population standard deviation of log-returns.
    StdDevMultiple(f64),
}

impl ThresholdRule {
    pub fn validate(&self) -> Result<()> {
        match *self {
            ThresholdRule::Fixed(t) if !(t > 0.0) => Err(JumpError::invalid(
                "threshold",
                format!("must be positive, got {}", t),
            )),
            ThresholdRule::AbsReturnPercentile(q) if !(q > 0.0 && q <= 1.0) => {
                Err(JumpError::invalid(
                    "percentile",
                    format!("must lie in (0, 1], got {}", q),
                ))
            }
            ThresholdRule::StdDevMultiple(k) if !(k.is_finite() && k > 0.0) => {
                Err(JumpError::invalid(
                    "multiple",
                    format!("must be finite and positive, got {}", k),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl Default for ThresholdRule {
    fn default() -> Self {
        ThresholdRule::AbsReturnPercentile(DEFAULT_THRESHOLD_PERCENTILE)
    }
}

// ============================================================================
// Detection Configuration
// ============================================================================

/// Configuration of the combined jump detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Significance level of both tests (default: 0.01).
    pub significance_level: f64,
    /// Bipower variation settings.
    pub bipower: BipowerConfig,
    /// Threshold selection rule for the threshold test.
    pub threshold: ThresholdRule,
}

impl JumpConfig {
    pub fn new(significance_level: f64) -> Self {
        Self {
            significance_level,
            ..Self::default()
        }
    }

    /// Use a fixed clipping threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = ThresholdRule::Fixed(threshold);
        self
    }

    /// Use a different threshold rule.
    pub fn with_threshold_rule(mut self, rule: ThresholdRule) -> Self {
        self.threshold = rule;
        self
    }

    /// Use different bipower settings.
    pub fn with_bipower(mut self, bipower: BipowerConfig) -> Self {
        self.bipower = bipower;
        self
    }

    /// Parse a configuration from JSON; omitted fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| JumpError::invalid("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_significance("significance_level", self.significance_level)?;
        self.bipower.validate()?;
        self.threshold.validate()
    }
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            bipower: BipowerConfig::default(),
            threshold: ThresholdRule::default(),
        }
    }
}

// ============================================================================
// Localization Configuration
// ============================================================================

/// Configuration of jump localization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Significance level of each sign-run sub-test (default: 0.05).
    pub significance_level: f64,
    /// Minimum `|b|` for flagging; derived from the series when absent.
    pub threshold: Option<f64>,
}

impl LocalizationConfig {
    pub fn new(threshold: Option<f64>) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn with_significance(mut self, significance_level: f64) -> Self {
        self.significance_level = significance_level;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_significance("significance_level", self.significance_level)?;
        match self.threshold {
            Some(t) if !(t.is_finite() && t >= 0.0) => Err(JumpError::invalid(
                "jump_threshold",
                format!("must be finite and non-negative, got {}", t),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_SIGN_RUN_SIGNIFICANCE,
            threshold: None,
        }
    }
}
