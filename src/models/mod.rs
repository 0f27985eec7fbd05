//! Data models for fixture execution
//!
//! Case selection, case kinds and host verdicts.

mod case;
mod verdict;

pub use case::{CaseKind, Selection};
pub use verdict::Verdict;
