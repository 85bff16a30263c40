//! Test support utilities for the pairflip backend.
//!
//! Shared by unit and integration tests: one-time logging setup, unique
//! identifiers for test isolation, and problem+json response assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
