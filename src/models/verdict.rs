//! Verdict model
//!
//! The overall state a host ends up in after running a fixture.

use std::fmt;

/// Overall verdict reported to a host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
    Skipped,
}

impl Verdict {
    /// Failure dominates skip; a host told both reports failure.
    pub fn from_flags(failed: bool, skipped: bool) -> Self {
        if failed {
            Verdict::Failed
        } else if skipped {
            Verdict::Skipped
        } else {
            Verdict::Passed
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Verdict::Passed => "✓",
            Verdict::Failed => "✗",
            Verdict::Skipped => "○",
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Verdict::Failed)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Passed => write!(f, "PASS"),
            Verdict::Failed => write!(f, "FAIL"),
            Verdict::Skipped => write!(f, "SKIP"),
        }
    }
}
