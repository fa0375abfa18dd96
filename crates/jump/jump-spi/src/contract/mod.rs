//! Contract definitions for jump detection.
//!
//! This module contains trait definitions that test implementations provide.


pub use jump_test::JumpTest;
