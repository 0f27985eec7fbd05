//! Completion signal for asynchronous cases
//!
//! Each executed case owns one [`Done`]/[`Waiter`] pair. The engine blocks on
//! the waiter, with no timeout, until the handle is finished or dropped.

use futures::channel::oneshot;
use std::thread::{self, ThreadId};

use super::recover::{self, Caught};

/// How a case signalled its completion
#[derive(Debug)]
pub(crate) enum Completion {
    Finished,
    /// Work passed to `finish_with` (or a task body) panicked
    Panicked(Caught),
    /// The handle was dropped while its holder thread was unwinding
    Unwound { caught: Caught, thread: ThreadId },
}

/// One-shot completion handle given to asynchronous case bodies.
///
/// Move it into the worker that finishes the case and call [`Done::finish`]
/// or [`Done::finish_with`] there. Dropping an unfinished handle completes
/// the case as well; if the drop happens during a panic, the case is reported
/// as panicked.
#[derive(Debug)]
pub struct Done {
    tx: Option<oneshot::Sender<Completion>>,
}

pub(crate) struct Waiter {
    rx: oneshot::Receiver<Completion>,
}

pub(crate) fn pair() -> (Done, Waiter) {
    let (tx, rx) = oneshot::channel();
    (Done { tx: Some(tx) }, Waiter { rx })
}

impl Done {
    /// Signal that the case has finished.
    pub fn finish(mut self) {
        self.complete(Completion::Finished);
    }

    /// Run the case's remaining `work`, then signal completion.
    ///
    /// A panic inside `work` is recovered here, on the worker's thread, and
    /// attributed to the case.
    pub fn finish_with<F: FnOnce()>(mut self, work: F) {
        let completion = match recover::guarded(work) {
            Ok(()) => Completion::Finished,
            Err(caught) => Completion::Panicked(caught),
        };
        self.complete(completion);
    }

    pub(crate) fn panicked(mut self, caught: Caught) {
        self.complete(Completion::Panicked(caught));
    }

    fn complete(&mut self, completion: Completion) {
        if let Some(tx) = self.tx.take() {
            // the engine may have stopped listening after a body panic
            let _ = tx.send(completion);
        }
    }
}

impl Drop for Done {
    fn drop(&mut self) {
        if self.tx.is_none() {
            return;
        }
        let completion = if thread::panicking() {
            Completion::Unwound {
                caught: recover::last_panic(),
                thread: thread::current().id(),
            }
        } else {
            Completion::Finished
        };
        self.complete(completion);
    }
}

impl Waiter {
    /// Block until the paired [`Done`] fires.
    pub fn wait(self) -> Completion {
        futures::executor::block_on(self.rx).unwrap_or(Completion::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_finish_from_another_thread() {
        let (done, waiter) = pair();
        let flag = Arc::new(AtomicBool::new(false));
        let worker_flag = flag.clone();

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            worker_flag.store(true, Ordering::SeqCst);
            done.finish();
        });

        assert!(matches!(waiter.wait(), Completion::Finished));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_finish_with_recovers_panic() {
        let (done, waiter) = pair();
        thread::spawn(move || done.finish_with(|| panic!("worker gophers")));

        match waiter.wait() {
            Completion::Panicked(caught) => assert_eq!(caught.message, "worker gophers"),
            other => panic!("unexpected completion: {other:?}"),
        }
    }

    #[test]
    fn test_plain_drop_finishes() {
        let (done, waiter) = pair();
        drop(done);
        assert!(matches!(waiter.wait(), Completion::Finished));
    }

    #[test]
    fn test_drop_during_unwind_is_reported() {
        let (done, waiter) = pair();
        let _ = recover::guarded(move || {
            let _held = done;
            panic!("unwinding gophers");
        });

        match waiter.wait() {
            Completion::Unwound { caught, thread } => {
                assert_eq!(caught.message, "unwinding gophers");
                assert_eq!(thread, thread::current().id());
            }
            other => panic!("unexpected completion: {other:?}"),
        }
    }
}
