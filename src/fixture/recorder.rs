//! Fixture log and assertion recording
//!
//! A [`Recorder`] is the handle case bodies use to reach the fixture's
//! append-only log and its host. It is cheap to clone and may be moved into
//! worker threads; appends are serialized through a mutex.

use parking_lot::Mutex;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, trace};

use super::recover::Caught;
use crate::assertions::Outcome;
use crate::host::Host;
use crate::output;

struct Shared {
    host: Arc<dyn Host>,
    log: Mutex<String>,
    trace_log: AtomicBool,
}

#[derive(Clone)]
pub struct Recorder {
    shared: Arc<Shared>,
}

impl Recorder {
    pub(crate) fn new(description: &str, host: Arc<dyn Host>) -> Self {
        Self {
            shared: Arc::new(Shared {
                host,
                log: Mutex::new(format!("{description}\n")),
                trace_log: AtomicBool::new(false),
            }),
        }
    }

    /// Mirror every appended line into `tracing` at TRACE level.
    pub(crate) fn set_trace_log(&self, enabled: bool) {
        self.shared.trace_log.store(enabled, Ordering::Relaxed);
    }

    /// Append raw text to the log.
    pub fn log(&self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if self.shared.trace_log.load(Ordering::Relaxed) {
            trace!(target: "xfixture::log", "{}", text.trim_end());
        }
        self.shared.log.lock().push_str(text);
    }

    /// Snapshot of everything logged so far
    pub fn contents(&self) -> String {
        self.shared.log.lock().clone()
    }

    /// Mark the host run failed.
    pub fn fail(&self) {
        self.shared.host.fail();
    }

    pub(crate) fn host(&self) -> &dyn Host {
        self.shared.host.as_ref()
    }

    /// Hand the whole log to the host.
    pub(crate) fn flush(&self) {
        let contents = self.contents();
        self.shared.host.log(&contents);
    }

    pub(crate) fn report_panic(&self, caught: &Caught) {
        error!(message = %caught.message, location = %caught.location, "recovered panic");
        self.fail();
        self.log(output::format_panic(&caught.message, &caught.location));
    }

    /// Evaluate `predicate` against `actual` and `expected` and record it.
    ///
    /// A failing predicate marks the host failed and appends a failure block
    /// pointing at the caller. The case body keeps running either way.
    #[track_caller]
    pub fn so<A, E, P>(&self, description: &str, actual: A, predicate: P, expected: &[E]) -> bool
    where
        P: FnOnce(&A, &[E]) -> Outcome,
    {
        let caller = Location::caller();
        let outcome = predicate(&actual, expected);

        self.log(output::assertion_line(description));
        if !outcome.passed {
            self.fail();
            let location = format!("{}:{}", caller.file(), caller.line());
            self.log(output::format_failure(description, &outcome.message, &location));
        }
        outcome.passed
    }

    /// Record `description` as skipped without evaluating `predicate`.
    pub fn skip_so<A, E, P>(&self, description: &str, _actual: A, _predicate: P, _expected: &[E])
    where
        P: FnOnce(&A, &[E]) -> Outcome,
    {
        self.log(output::skipped_assertion_line(description));
    }
}
