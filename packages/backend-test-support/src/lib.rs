//! Backend test support utilities
//!
//! Shared by the backend's integration test binaries: logging initialization,
//! unique test data and Problem Details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
