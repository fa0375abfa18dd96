//! Jump detection error types.

use thiserror::Error;

/// Jump detection errors.
///
/// Every statistical operation fails with one of these instead of returning
/// a NaN/Inf statistic or a default verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JumpError {
    /// The series is too short for the requested estimator or test.
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    /// A test statistic has a zero or non-finite denominator.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A caller-supplied parameter is out of range.
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl JumpError {
    /// Shorthand for [`JumpError::InvalidParameter`].
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        JumpError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`JumpError::DegenerateInput`].
    pub fn degenerate(reason: impl Into<String>) -> Self {
        JumpError::DegenerateInput(reason.into())
    }
}

/// Result type for jump detection operations.
pub type Result<T> = std::result::Result<T, JumpError>;
