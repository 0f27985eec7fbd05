//! Host test-runner capabilities
//!
//! A fixture never talks to a concrete test runner. It is handed a [`Host`]
//! and only ever calls `fail`, `skip_now` and `log` on it.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::models::Verdict;

/// The capability set a fixture needs from the enclosing test runner.
///
/// Implementations must be shareable across threads: asynchronous cases
/// record assertion failures from their worker threads.
pub trait Host: Send + Sync {
    /// Mark the enclosing unit of work failed without aborting it.
    fn fail(&self);

    /// Abort the enclosing unit of work as skipped.
    ///
    /// A host may diverge here (for example by unwinding). The fixture log is
    /// still flushed when it does.
    fn skip_now(&self);

    /// Append `text` to the runner's own report.
    fn log(&self, text: &str);
}

/// Host that prints the fixture log to stdout and remembers the verdict.
///
/// Under libtest the output is captured per test and shown on failure.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    failed: AtomicBool,
    skipped: AtomicBool,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_flags(
            self.failed.load(Ordering::SeqCst),
            self.skipped.load(Ordering::SeqCst),
        )
    }
}

impl Host for ConsoleHost {
    fn fail(&self) {
        self.failed.store(true, Ordering::SeqCst);
    }

    fn skip_now(&self) {
        self.skipped.store(true, Ordering::SeqCst);
    }

    fn log(&self, text: &str) {
        println!("{text}");
    }
}

/// In-memory host that records every call, for verifying fixture behavior.
#[derive(Debug, Default)]
pub struct SpyHost {
    failures: AtomicUsize,
    skips: AtomicUsize,
    logs: Mutex<Vec<String>>,
}

impl SpyHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failed(&self) -> bool {
        self.failures() > 0
    }

    /// Number of `fail` calls received
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn skipped(&self) -> bool {
        self.skips.load(Ordering::SeqCst) > 0
    }

    /// Number of `skip_now` calls received
    pub fn skips(&self) -> usize {
        self.skips.load(Ordering::SeqCst)
    }

    /// Every text passed to `log`, in call order
    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().clone()
    }

    /// The most recent text passed to `log`
    pub fn last_log(&self) -> Option<String> {
        self.logs.lock().last().cloned()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_flags(self.failed(), self.skipped())
    }
}

impl Host for SpyHost {
    fn fail(&self) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    fn skip_now(&self) {
        self.skips.fetch_add(1, Ordering::SeqCst);
    }

    fn log(&self, text: &str) {
        self.logs.lock().push(text.to_string());
    }
}
