//! Case execution, selection and panic recovery

use std::cell::Cell;
use std::sync::Arc;
use std::thread;

use xfixture::assertions::{should_be_true, should_equal, Outcome, NOTHING};
use xfixture::{CaseOrder, Fixture, FixtureConfig, SpyHost, Verdict};

fn spy() -> Arc<SpyHost> {
    Arc::new(SpyHost::new())
}

fn log_of(spy: &SpyHost) -> String {
    spy.last_log().unwrap_or_default()
}

#[test]
fn passing_case_passes() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.test("B", |rec| {
        rec.so("1 == 1", 1, should_equal, &[1]);
    });
    fixture.run();

    assert_eq!(spy.verdict(), Verdict::Passed);
    assert_eq!(log_of(&spy), "A\n -> \"B\"\n    + 1 == 1\n");
}

#[test]
fn failing_assertion_fails_and_keeps_running() {
    let spy = spy();
    let after = Cell::new(false);
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.test("B", |rec| {
        rec.so("1 == 2", 1, should_equal, &[2]);
        after.set(true);
    });
    fixture.run();

    assert!(spy.failed());
    assert!(after.get());

    let log = log_of(&spy);
    assert!(log.starts_with("A\n -> \"B\"\n    + 1 == 2\n"));
    assert!(log.contains("    FAILED: \"1 == 2\"\n"));
    assert!(log.contains("    Expected: '2'\n    Actual:   '1'\n"));
    assert!(log.contains("execution.rs:"));
}

#[test]
fn passing_async_case_passes() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.async_test("B", |rec, done| {
        thread::spawn(move || {
            done.finish_with(|| {
                rec.so("1 == 1", 1, should_equal, &[1]);
            })
        });
    });
    fixture.run();

    assert_eq!(spy.verdict(), Verdict::Passed);
    assert_eq!(log_of(&spy), "A\n -> \"B\"\n    + 1 == 1\n");
}

#[test]
fn failing_async_case_fails() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.async_test("B", |rec, done| {
        thread::spawn(move || {
            rec.so("1 == 2", 1, should_equal, &[2]);
            done.finish();
        });
    });
    fixture.run();

    assert!(spy.failed());
    assert!(log_of(&spy).contains("FAILED: \"1 == 2\""));
}

#[test]
fn panicking_case_is_reported() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.test("B", |_| panic!("GOPHERS!"));
    fixture.run();

    assert!(spy.failed());
    let log = log_of(&spy);
    assert!(log.starts_with("A\n -> \"B\"\n\n\n  *"));
    assert!(log.contains("\n\n  PANIC: [GOPHERS!]\n\n  tests/execution.rs:"));
}

#[test]
fn panic_after_assertion_keeps_assertion_line() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.test("B", |rec| {
        rec.so("first", true, should_be_true, NOTHING);
        panic!("GOPHERS!");
    });
    fixture.run();

    assert!(spy.failed());
    let log = log_of(&spy);
    assert!(log.starts_with("A\n -> \"B\"\n    + first\n\n\n  *"));
    assert!(log.contains("PANIC: [GOPHERS!]"));
}

#[test]
fn skipped_cases_never_run() {
    let spy = spy();
    let ran = Cell::new(false);
    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .test("B1", |_| {})
        .skip_test("B2", |_| ran.set(true))
        .skip_async_test("B3", |_, done| {
            ran.set(true);
            done.finish();
        });
    fixture.run();

    assert!(!ran.get());
    assert_eq!(spy.verdict(), Verdict::Passed);
    assert_eq!(
        log_of(&spy),
        "A\n -> \"B1\"\n -> (skipped) \"B2\"\n -> (skipped) \"B3\"\n"
    );
}

#[test]
fn focused_cases_run_instead_of_others() {
    let spy = spy();
    let normal = Cell::new(false);
    let focused = Cell::new(0);
    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .test("B1", |_| normal.set(true))
        .focus_test("B2", |_| focused.set(focused.get() + 1))
        .skip_test("B3", |_| {})
        .focus_async_test("B4", |_, done| {
            focused.set(focused.get() + 1);
            done.finish();
        });
    fixture.run();

    assert!(!normal.get());
    assert_eq!(focused.get(), 2);
    assert_eq!(spy.verdict(), Verdict::Passed);
    assert_eq!(
        log_of(&spy),
        "A\n -> (skipped) \"B1\"\n -> <FOCUSED> \"B2\"\n -> (skipped) \"B3\"\n -> <FOCUSED> \"B4\"\n"
    );
}

#[test]
fn skip_so_never_evaluates() {
    let spy = spy();
    let evaluated = Cell::new(false);
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.test("B", |rec| {
        rec.skip_so("not yet", 1, |_: &i32, _: &[i32]| -> Outcome {
            evaluated.set(true);
            Outcome::fail("never")
        }, &[2]);
    });
    fixture.run();

    assert!(!evaluated.get());
    assert_eq!(spy.verdict(), Verdict::Passed);
    assert_eq!(log_of(&spy), "A\n -> \"B\"\n    + (skipped) not yet\n");
}

#[test]
fn setup_and_teardown_bracket_every_executed_case() {
    let spy = spy();
    let setups = Cell::new(0);
    let teardowns = Cell::new(0);
    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .setup(|| setups.set(setups.get() + 1))
        .teardown(|| teardowns.set(teardowns.get() + 1))
        .test("B1", |_| {})
        .test("B2", |_| panic!("body"))
        .test("B3", |rec| {
            rec.so("fails", false, should_be_true, NOTHING);
        })
        .skip_test("B4", |_| {})
        .async_test("B5", |_, done| done.finish_with(|| panic!("worker")));
    fixture.run();

    assert_eq!(setups.get(), 4);
    assert_eq!(teardowns.get(), 4);
    assert!(spy.failed());

    let log = log_of(&spy);
    assert!(log.contains("PANIC: [body]"));
    assert!(log.contains("PANIC: [worker]"));
    assert!(log.contains(" -> \"B5\"\n"));
}

#[test]
fn setup_panic_skips_body_but_runs_teardown() {
    let spy = spy();
    let body = Cell::new(false);
    let teardowns = Cell::new(0);
    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .setup(|| panic!("setup exploded"))
        .teardown(|| teardowns.set(teardowns.get() + 1))
        .test("B1", |_| body.set(true))
        .test("B2", |_| body.set(true));
    fixture.run();

    assert!(!body.get());
    assert_eq!(teardowns.get(), 2);
    assert_eq!(spy.failures(), 2);

    let log = log_of(&spy);
    assert!(!log.contains(" -> \"B1\""));
    assert_eq!(log.matches("PANIC: [setup exploded]").count(), 2);
}

#[test]
fn teardown_panic_is_reported_after_case() {
    let spy = spy();
    let second = Cell::new(false);
    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .teardown(|| panic!("teardown exploded"))
        .test("B1", |rec| {
            rec.so("ok", true, should_be_true, NOTHING);
        })
        .test("B2", |_| second.set(true));
    fixture.run();

    assert!(second.get());
    assert!(spy.failed());

    let log = log_of(&spy);
    assert!(log.starts_with("A\n -> \"B1\"\n    + ok\n\n\n  *"));
    assert_eq!(log.matches("PANIC: [teardown exploded]").count(), 2);
}

#[test]
fn panic_in_one_case_does_not_stop_the_next() {
    let spy = spy();
    let last = Cell::new(false);
    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .test("B1", |_| panic!("first"))
        .test("B2", |_| last.set(true));
    fixture.run();

    assert!(last.get());
    assert_eq!(spy.failures(), 1);
    assert!(log_of(&spy).ends_with(" -> \"B2\"\n"));
}

#[test]
fn alphabetical_order_sorts_cases() {
    let spy = spy();
    let config = FixtureConfig {
        order: CaseOrder::Alphabetical,
        ..Default::default()
    };
    let mut fixture = Fixture::new("A", spy.clone()).with_config(config);
    fixture
        .test("zeta", |_| {})
        .skip_test("mid", |_| {})
        .test("alpha", |_| {});
    fixture.run();

    assert_eq!(
        log_of(&spy),
        "A\n -> \"alpha\"\n -> (skipped) \"mid\"\n -> \"zeta\"\n"
    );
}

#[test]
fn registration_order_is_the_default() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.test("zeta", |_| {}).test("alpha", |_| {});
    fixture.run();

    assert_eq!(log_of(&spy), "A\n -> \"zeta\"\n -> \"alpha\"\n");
}

#[test]
fn log_is_flushed_once_per_run() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.test("B1", |_| {}).test("B2", |_| {});
    fixture.run();

    assert_eq!(spy.logs().len(), 1);
    assert_eq!(fixture.output(), log_of(&spy));
}
