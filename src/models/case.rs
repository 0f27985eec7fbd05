//! Case classification models
//!
//! Defines how a registered case is selected at run time and what kind of
//! body it carries.

use std::fmt;

/// Run-time selection of a registered case.
///
/// Derived from the fixture's focused and skipped name sets; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selection {
    Focused,
    Skipped,
    Normal,
}

impl Selection {
    /// Classify a case by name membership and whether it has a body.
    pub fn classify(focused: bool, skipped: bool, has_body: bool) -> Self {
        if focused {
            Selection::Focused
        } else if skipped || !has_body {
            Selection::Skipped
        } else {
            Selection::Normal
        }
    }

    /// Whether the case executes, given whether any focus marker is present.
    ///
    /// A focused case without a body is still only reported as skipped.
    pub fn executes(&self, focus_present: bool, has_body: bool) -> bool {
        match self {
            Selection::Focused => has_body,
            Selection::Normal => !focus_present,
            Selection::Skipped => false,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Focused => write!(f, "focused"),
            Selection::Skipped => write!(f, "skipped"),
            Selection::Normal => write!(f, "normal"),
        }
    }
}

/// Kind of body a registered case carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseKind {
    /// Runs to completion before returning
    Sync,
    /// Signals completion through a `Done` handle, possibly from another thread
    Async,
    /// A future spawned on the fixture's tokio runtime
    Task,
    /// Registered for display only
    NotExecuted,
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseKind::Sync => write!(f, "sync"),
            CaseKind::Async => write!(f, "async"),
            CaseKind::Task => write!(f, "task"),
            CaseKind::NotExecuted => write!(f, "not-executed"),
        }
    }
}
