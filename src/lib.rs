//! xfixture - xunit-style test fixtures
//!
//! A fixture bundles setup, teardown and a set of named cases, runs each case
//! bracketed by setup and teardown, contains panics raised in any of them, and
//! reports a line-oriented narration to a host test runner that only knows how
//! to fail, skip and log.
//!
//! ## Features
//!
//! - Synchronous, callback-completed and tokio task cases
//! - Focused and skipped cases
//! - Panic isolation per case and per phase
//! - `so` / `skip_so` assertion recording with source locations
//!
//! ## Output
//!
//! ```text
//! Bowling Game Score
//!  -> "After rolling all gutter balls"
//!     + No points will be earned
//!  -> (skipped) "Spare earns bonus"
//! ```

pub mod assertions;
pub mod config;
pub mod error;
pub mod fixture;
pub mod host;
pub mod models;
pub mod output;
pub mod utils;

pub use config::{CaseOrder, FixtureConfig};
pub use error::FixtureError;
pub use fixture::{Done, Fixture, Recorder};
pub use host::{ConsoleHost, Host, SpyHost};
pub use models::{CaseKind, Selection, Verdict};
