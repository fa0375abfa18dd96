//! Error types for jump detection.
//!
//! This module contains the error enum and the Result alias.

mod jump_error;

pub use jump_error::{JumpError, Result};
