//! Jump flags produced by localization.

use serde::{Deserialize, Serialize};

/// One flag per index of a price series; `true` marks a jump point.
///
/// Index 0 is always flagged as the reference point of the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpFlags {
    flags: Vec<bool>,
}

impl JumpFlags {
    /// Whether index `i` is flagged. Out-of-range indices are not.
    pub fn is_jump(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Indices of all flagged points, including the seeded index 0.
    pub fn jump_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &flagged)| if flagged { Some(i) } else { None })
            .collect()
    }

    /// Number of flagged points, including the seeded index 0.
    pub fn jump_count(&self) -> usize {
        self.flags.iter().filter(|&&x| x).count()
    }

    /// Flags as a slice.
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }

    /// Number of flags (equals the series length).
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// True for an empty flag array.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl From<Vec<bool>> for JumpFlags {
    /// Wrap a flag vector, seeding index 0.
    fn from(mut flags: Vec<bool>) -> Self {
        if let Some(first) = flags.first_mut() {
            *first = true;
        }
        Self { flags }
    }
}

/// Result of jump localization: the flags and the threshold they were
/// decided against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpLocalization {
    pub flags: JumpFlags,
    pub threshold: f64,
}

impl JumpLocalization {
    /// Create a localization result.
    pub fn new(flags: JumpFlags, threshold: f64) -> Self {
        Self { flags, threshold }
    }

    /// Split into `(flags, effective threshold)`.
    pub fn into_parts(self) -> (JumpFlags, f64) {
        (self.flags, self.threshold)
    }
}
