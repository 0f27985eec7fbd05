//! Utility modules
//!
//! Logging setup and timing helpers.

pub mod logger;
pub mod timer;
