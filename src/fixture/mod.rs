//! xunit-style test fixture
//!
//! A [`Fixture`] collects named cases plus optional setup and teardown while
//! it is open, then freezes and runs them on [`Fixture::run`]. Every case is
//! bracketed by setup and teardown, isolated from panics in any of the three,
//! and narrated into a log that is handed to the [`Host`] once at the end.
//!
//! Registration methods return the fixture so calls can be chained.
//!
//! ```no_run
//! use std::cell::Cell;
//! use std::sync::Arc;
//! use xfixture::assertions::should_equal;
//! use xfixture::{ConsoleHost, Fixture};
//!
//! let total = Cell::new(0);
//! let mut fixture = Fixture::new("Addition", Arc::new(ConsoleHost::new()));
//! fixture
//!     .setup(|| total.set(0))
//!     .test("adds two", |rec| {
//!         total.set(total.get() + 2);
//!         rec.so("the total is two", total.get(), should_equal, &[2]);
//!     });
//! fixture.run();
//! ```

mod done;
mod engine;
mod recorder;
pub(crate) mod recover;

pub use done::Done;
pub use recorder::Recorder;

use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::warn;

use crate::assertions::Outcome;
use crate::config::FixtureConfig;
use crate::error::FixtureError;
use crate::host::Host;
use crate::models::{CaseKind, Selection};

type Hook<'a> = Box<dyn FnMut() + 'a>;

/// Executable unit of a registered case
pub(crate) enum Body<'a> {
    Sync(Box<dyn FnOnce(&Recorder) + 'a>),
    Async(Box<dyn FnOnce(Recorder, Done) + 'a>),
    Task(Box<dyn FnOnce(Recorder) -> BoxFuture<'static, ()> + 'a>),
}

impl Body<'_> {
    pub fn kind(&self) -> CaseKind {
        match self {
            Body::Sync(_) => CaseKind::Sync,
            Body::Async(_) => CaseKind::Async,
            Body::Task(_) => CaseKind::Task,
        }
    }
}

/// A registered case; `body` is `None` for cases that are only displayed
pub(crate) struct Case<'a> {
    pub name: String,
    pub body: Option<Body<'a>>,
}

impl Case<'_> {
    pub fn kind(&self) -> CaseKind {
        self.body.as_ref().map_or(CaseKind::NotExecuted, Body::kind)
    }
}

/// A simple xunit-style test fixture.
///
/// Case bodies may borrow from the enclosing scope for `'a`; only task case
/// futures must be `'static`.
pub struct Fixture<'a> {
    recorder: Recorder,
    config: FixtureConfig,

    /// Prevents setup, teardown and cases from being registered
    frozen: bool,
    /// Marks the whole fixture as failed
    spoiled: bool,

    setup: Hook<'a>,
    teardown: Hook<'a>,

    cases: Vec<Case<'a>>,
    names: HashSet<String>,
    focused: HashSet<String>,
    skipped: HashSet<String>,

    runtime: Option<Runtime>,
}

impl<'a> Fixture<'a> {
    /// Create an open fixture reporting to `host`.
    ///
    /// A blank description spoils the fixture immediately.
    pub fn new(description: impl Into<String>, host: Arc<dyn Host>) -> Self {
        let description = description.into();
        let blank = description.is_empty();
        if blank {
            warn!("{}", FixtureError::BlankDescription);
        }

        Self {
            recorder: Recorder::new(&description, host),
            config: FixtureConfig::default(),
            frozen: false,
            spoiled: blank,
            setup: Box::new(|| {}),
            teardown: Box::new(|| {}),
            cases: Vec::new(),
            names: HashSet::new(),
            focused: HashSet::new(),
            skipped: HashSet::new(),
            runtime: None,
        }
    }

    /// Create a fixture that is frozen from the start.
    ///
    /// Every registration is ignored and [`Fixture::run`] reports a skip.
    pub fn skipped(description: impl Into<String>, host: Arc<dyn Host>) -> Self {
        let mut fixture = Self::new(description, host);
        fixture.frozen = true;
        fixture
    }

    pub fn with_config(mut self, config: FixtureConfig) -> Self {
        self.recorder.set_trace_log(config.trace_log);
        self.config = config;
        self
    }

    /// Handle to this fixture's log, for use inside case bodies.
    pub fn recorder(&self) -> Recorder {
        self.recorder.clone()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_spoiled(&self) -> bool {
        self.spoiled
    }

    /// Number of registered cases, skipped ones included
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Snapshot of the fixture log
    pub fn output(&self) -> String {
        self.recorder.contents()
    }

    /// Selection of a registered case, if `name` is registered
    pub fn selection(&self, name: &str) -> Option<Selection> {
        let case = self.cases.iter().find(|c| c.name == name)?;
        Some(Selection::classify(
            self.focused.contains(name),
            self.skipped.contains(name),
            case.body.is_some(),
        ))
    }

    /// Record an assertion in this fixture's log. See [`Recorder::so`].
    #[track_caller]
    pub fn so<A, E, P>(&self, description: &str, actual: A, predicate: P, expected: &[E]) -> bool
    where
        P: FnOnce(&A, &[E]) -> Outcome,
    {
        self.recorder.so(description, actual, predicate, expected)
    }

    pub fn skip_so<A, E, P>(&self, description: &str, actual: A, predicate: P, expected: &[E])
    where
        P: FnOnce(&A, &[E]) -> Outcome,
    {
        self.recorder.skip_so(description, actual, predicate, expected);
    }

    /// Kind of a registered case, if `name` is registered
    pub fn kind(&self, name: &str) -> Option<CaseKind> {
        self.cases.iter().find(|c| c.name == name).map(Case::kind)
    }

    /// Register a function to run before every case.
    ///
    /// A later call replaces the earlier function.
    pub fn setup(&mut self, action: impl FnMut() + 'a) -> &mut Self {
        if !self.frozen {
            self.setup = Box::new(action);
        }
        self
    }

    /// Register a function to run after every case, even when it panics.
    ///
    /// A later call replaces the earlier function.
    pub fn teardown(&mut self, action: impl FnMut() + 'a) -> &mut Self {
        if !self.frozen {
            self.teardown = Box::new(action);
        }
        self
    }

    /// Register a synchronous case.
    pub fn test(
        &mut self,
        name: impl Into<String>,
        action: impl FnOnce(&Recorder) + 'a,
    ) -> &mut Self {
        self.register(name.into(), Body::Sync(Box::new(action)), false)
    }

    /// Register a case that is shown in the output but never executed.
    pub fn skip_test(
        &mut self,
        name: impl Into<String>,
        action: impl FnOnce(&Recorder) + 'a,
    ) -> &mut Self {
        drop(action);
        self.register_skipped(name.into())
    }

    /// Register a case to run instead of every case not registered as focused.
    pub fn focus_test(
        &mut self,
        name: impl Into<String>,
        action: impl FnOnce(&Recorder) + 'a,
    ) -> &mut Self {
        self.register(name.into(), Body::Sync(Box::new(action)), true)
    }

    /// Register a case that hands its work to another thread.
    ///
    /// The case is finished when the [`Done`] passed to `action` is finished
    /// or dropped. Teardown and later cases wait for it.
    pub fn async_test(
        &mut self,
        name: impl Into<String>,
        action: impl FnOnce(Recorder, Done) + 'a,
    ) -> &mut Self {
        self.register(name.into(), Body::Async(Box::new(action)), false)
    }

    pub fn skip_async_test(
        &mut self,
        name: impl Into<String>,
        action: impl FnOnce(Recorder, Done) + 'a,
    ) -> &mut Self {
        drop(action);
        self.register_skipped(name.into())
    }

    pub fn focus_async_test(
        &mut self,
        name: impl Into<String>,
        action: impl FnOnce(Recorder, Done) + 'a,
    ) -> &mut Self {
        self.register(name.into(), Body::Async(Box::new(action)), true)
    }

    /// Register a case whose body is a future run on the fixture's tokio
    /// runtime.
    pub fn task_test<F, Fut>(&mut self, name: impl Into<String>, action: F) -> &mut Self
    where
        F: FnOnce(Recorder) -> Fut + 'a,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.register(name.into(), task_body(action), false)
    }

    pub fn skip_task_test<F, Fut>(&mut self, name: impl Into<String>, action: F) -> &mut Self
    where
        F: FnOnce(Recorder) -> Fut + 'a,
        Fut: Future<Output = ()> + Send + 'static,
    {
        drop(action);
        self.register_skipped(name.into())
    }

    pub fn focus_task_test<F, Fut>(&mut self, name: impl Into<String>, action: F) -> &mut Self
    where
        F: FnOnce(Recorder) -> Fut + 'a,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.register(name.into(), task_body(action), true)
    }

    fn register(&mut self, name: String, body: Body<'a>, focus: bool) -> &mut Self {
        if self.frozen {
            return self;
        }
        let valid = self.validate(&name);
        if focus && !name.is_empty() {
            self.focused.insert(name.clone());
        }
        if valid {
            self.names.insert(name.clone());
            self.cases.push(Case {
                name,
                body: Some(body),
            });
        }
        self
    }

    fn register_skipped(&mut self, name: String) -> &mut Self {
        if self.frozen || !self.validate(&name) {
            return self;
        }
        self.names.insert(name.clone());
        self.skipped.insert(name.clone());
        self.cases.push(Case { name, body: None });
        self
    }

    /// Reject blank and duplicate names, spoiling the fixture.
    fn validate(&mut self, name: &str) -> bool {
        let violation = if name.is_empty() {
            FixtureError::BlankCaseName
        } else if self.names.contains(name) {
            FixtureError::DuplicateCaseName(name.to_string())
        } else {
            return true;
        };

        warn!(case = name, "{violation}");
        self.spoiled = true;
        self.recorder.log(format!("{violation}\n"));
        false
    }
}

fn task_body<'a, F, Fut>(action: F) -> Body<'a>
where
    F: FnOnce(Recorder) -> Fut + 'a,
    Fut: Future<Output = ()> + Send + 'static,
{
    Body::Task(Box::new(move |recorder| action(recorder).boxed()))
}
