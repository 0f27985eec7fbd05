//! Fixture execution engine
//!
//! Runs the registered cases one after another. Each executed case goes
//! through three independent recovery layers:
//!
//! ```text
//! teardown guard {
//!     setup guard { setup; log case line; body guard { body }; wait for done }
//!     teardown
//! }
//! ```
//!
//! A panic caught at any layer fails the host and is reported in the log;
//! the remaining cases still run.

use futures::future::BoxFuture;
use std::thread;
use tokio::runtime::{Builder, Handle};
use tracing::{debug, info};

use super::done::{self, Completion, Done};
use super::recover::{self, Caught};
use super::{Body, Case, Fixture, Recorder};
use crate::config::CaseOrder;
use crate::error::FixtureError;
use crate::models::Selection;
use crate::output::{self, FOCUSED_PREFIX, NORMAL_PREFIX};
use crate::utils::timer::Timer;

/// Flushes the fixture log to the host when dropped, whichever way `run`
/// exits.
struct FlushOnDrop(Recorder);

impl Drop for FlushOnDrop {
    fn drop(&mut self) {
        self.0.flush();
    }
}

impl Fixture<'_> {
    /// Run every registered case:
    ///
    /// - If registered, run the setup function.
    /// - Run the case.
    /// - If registered, run the teardown function.
    ///
    /// A frozen fixture, or a clean one with nothing registered, is reported
    /// to the host as skipped. A spoiled fixture is reported as failed without
    /// running anything, even when no case made it into the table. The log is flushed to the host in every case.
    pub fn run(&mut self) {
        let _flush = FlushOnDrop(self.recorder.clone());

        if self.frozen || (self.cases.is_empty() && !self.spoiled) {
            debug!(frozen = self.frozen, "nothing to run, skipping fixture");
            self.recorder.host().skip_now();
        } else if self.spoiled {
            info!("fixture spoiled during registration, failing");
            self.recorder.fail();
        } else {
            self.run_all();
        }
    }

    fn run_all(&mut self) {
        self.frozen = true;

        let mut cases = std::mem::take(&mut self.cases);
        if self.config.order == CaseOrder::Alphabetical {
            cases.sort_by(|a, b| a.name.cmp(&b.name));
        }

        info!(
            cases = cases.len(),
            focused = self.focused.len(),
            "running fixture"
        );

        for case in cases {
            self.run_one(case);
        }

        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }

    fn run_one(&mut self, case: Case<'_>) {
        let kind = case.kind();
        let Case { name, body } = case;
        let selection = Selection::classify(
            self.focused.contains(&name),
            self.skipped.contains(&name),
            body.is_some(),
        );
        let focus_present = !self.focused.is_empty();

        match body {
            Some(body) if selection.executes(focus_present, true) => {
                let prefix = if selection == Selection::Focused {
                    FOCUSED_PREFIX
                } else {
                    NORMAL_PREFIX
                };
                self.execute(prefix, &name, body);
            }
            _ => {
                debug!(case = %name, %selection, %kind, "skipping case");
                self.recorder.log(output::skipped_case_line(&name));
            }
        }
    }

    fn execute(&mut self, prefix: &str, name: &str, body: Body<'_>) {
        let timer = Timer::start(format!("case \"{name}\" ({})", body.kind()));
        let tasks = match body {
            Body::Task(_) => Some(self.task_handle()),
            _ => None,
        };

        let recorder = self.recorder.clone();
        let setup = &mut self.setup;
        let guarded_case = recover::guarded(|| {
            setup();
            recorder.log(output::case_line(prefix, name));
            run_body(&recorder, body, tasks);
        });
        if let Err(caught) = guarded_case {
            recorder.report_panic(&caught);
        }

        let teardown = &mut self.teardown;
        if let Err(caught) = recover::guarded(teardown) {
            recorder.report_panic(&caught);
        }

        timer.stop();
    }

    /// Handle to the runtime driving task cases, built on first use
    fn task_handle(&mut self) -> Result<Handle, FixtureError> {
        if let Some(runtime) = &self.runtime {
            return Ok(runtime.handle().clone());
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(self.config.task_workers.max(1))
            .thread_name("xfixture-task")
            .enable_all()
            .build()?;
        debug!(workers = self.config.task_workers, "started task runtime");

        let handle = runtime.handle().clone();
        self.runtime = Some(runtime);
        Ok(handle)
    }
}

/// Invoke the body and block until its completion signal fires.
fn run_body(recorder: &Recorder, body: Body<'_>, tasks: Option<Result<Handle, FixtureError>>) {
    let (done, waiter) = done::pair();

    let invoked = recover::guarded(|| match body {
        Body::Sync(action) => {
            action(recorder);
            done.finish();
        }
        Body::Async(action) => action(recorder.clone(), done),
        Body::Task(action) => match tasks {
            Some(Ok(handle)) => spawn_task(&handle, action(recorder.clone()), done),
            Some(Err(err)) => done.panicked(Caught::here(err.to_string())),
            None => done.finish(),
        },
    });

    let body_panicked = match invoked {
        Ok(()) => false,
        Err(caught) => {
            recorder.report_panic(&caught);
            true
        }
    };

    match waiter.wait() {
        Completion::Finished => {}
        Completion::Panicked(caught) => recorder.report_panic(&caught),
        // already reported by the body guard above
        Completion::Unwound { thread, .. }
            if body_panicked && thread == thread::current().id() => {}
        Completion::Unwound { caught, .. } => recorder.report_panic(&caught),
    }
}

fn spawn_task(handle: &Handle, task: BoxFuture<'static, ()>, done: Done) {
    handle.spawn(async move {
        match recover::guarded_future(task).await {
            Ok(()) => done.finish(),
            Err(caught) => done.panicked(caught),
        }
    });
}
