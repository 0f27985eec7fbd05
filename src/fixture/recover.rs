//! Panic containment
//!
//! Every execution layer of a case (setup, body, teardown, completion) runs
//! through [`guarded`]. A process-wide panic hook remembers the message and
//! source location of the most recent panic on each thread so the report can
//! point at the panic site. Panics raised inside a guard are kept off stderr;
//! all others are forwarded to the previously installed hook.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Once;
use std::task::Poll;

const UNKNOWN_LOCATION: &str = "<unknown>:0";

static INSTALL_HOOK: Once = Once::new();

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC: RefCell<Option<Caught>> = const { RefCell::new(None) };
}

/// A recovered panic: its message and the `file:line` it was raised at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Caught {
    pub message: String,
    pub location: String,
}

impl Caught {
    /// A failure that did not come from an unwinding panic, attributed to the
    /// caller's location.
    #[track_caller]
    pub fn here(message: impl Into<String>) -> Self {
        let location = panic::Location::caller();
        Self {
            message: message.into(),
            location: format!("{}:{}", location.file(), location.line()),
        }
    }

    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        LAST_PANIC
            .take()
            .unwrap_or_else(|| Self {
                message: payload_message(payload.as_ref()),
                location: UNKNOWN_LOCATION.to_string(),
            })
    }
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let caught = Caught {
                message: payload_message(info.payload()),
                location: info
                    .location()
                    .map(|l| format!("{}:{}", l.file(), l.line()))
                    .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            };
            LAST_PANIC.set(Some(caught));

            if GUARD_DEPTH.get() == 0 {
                previous(info);
            }
        }));
    });
}

/// Run `action`, converting a panic into a [`Caught`] report.
pub(crate) fn guarded<R>(action: impl FnOnce() -> R) -> Result<R, Caught> {
    install_hook();
    GUARD_DEPTH.set(GUARD_DEPTH.get() + 1);
    let result = panic::catch_unwind(AssertUnwindSafe(action));
    GUARD_DEPTH.set(GUARD_DEPTH.get() - 1);
    result.map_err(Caught::from_payload)
}

/// Drive `future` to completion, guarding every poll.
///
/// The future is never polled again once it has panicked.
pub(crate) async fn guarded_future(
    future: Pin<Box<dyn Future<Output = ()> + Send>>,
) -> Result<(), Caught> {
    let mut future = future;
    futures::future::poll_fn(move |cx| match guarded(|| future.as_mut().poll(cx)) {
        Ok(Poll::Ready(())) => Poll::Ready(Ok(())),
        Ok(Poll::Pending) => Poll::Pending,
        Err(caught) => Poll::Ready(Err(caught)),
    })
    .await
}

/// The most recent panic observed on this thread, if the hook saw one.
pub(crate) fn last_panic() -> Caught {
    LAST_PANIC
        .with_borrow(|last| last.clone())
        .unwrap_or_else(|| Caught {
            message: "completion handle dropped while panicking".to_string(),
            location: UNKNOWN_LOCATION.to_string(),
        })
}
