//! Completion-handle and tokio task cases

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use xfixture::assertions::{should_be_true, should_equal, NOTHING};
use xfixture::{Fixture, FixtureConfig, SpyHost, Verdict};

fn spy() -> Arc<SpyHost> {
    Arc::new(SpyHost::new())
}

#[test]
fn teardown_waits_for_worker() {
    let spy = spy();
    let counter = Arc::new(AtomicI64::new(0));
    let seen_by_teardown = AtomicI64::new(-1);

    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .async_test("B", |rec, done| {
            let counter = counter.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(30));
                counter.store(42, Ordering::SeqCst);
                rec.so("stored", counter.load(Ordering::SeqCst), should_equal, &[42]);
                done.finish();
            });
        })
        .teardown(|| seen_by_teardown.store(counter.load(Ordering::SeqCst), Ordering::SeqCst));
    fixture.run();

    assert_eq!(seen_by_teardown.load(Ordering::SeqCst), 42);
    assert_eq!(spy.verdict(), Verdict::Passed);
}

#[test]
fn cases_do_not_overlap() {
    let spy = spy();
    let active = Arc::new(AtomicUsize::new(0));
    let overlap = Arc::new(AtomicUsize::new(0));

    let mut fixture = Fixture::new("A", spy.clone());
    for name in ["B1", "B2", "B3"] {
        let active = active.clone();
        let overlap = overlap.clone();
        fixture.async_test(name, move |_, done| {
            if active.fetch_add(1, Ordering::SeqCst) > 0 {
                overlap.fetch_add(1, Ordering::SeqCst);
            }
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(10));
                active.fetch_sub(1, Ordering::SeqCst);
                done.finish();
            });
        });
    }
    fixture.run();

    assert_eq!(overlap.load(Ordering::SeqCst), 0);
    assert_eq!(spy.verdict(), Verdict::Passed);
}

#[test]
fn panic_inside_finish_with_is_reported() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .async_test("B1", |_, done| {
            thread::spawn(move || done.finish_with(|| panic!("GOPHERS!")));
        })
        .test("B2", |rec| {
            rec.so("still runs", true, should_be_true, NOTHING);
        });
    fixture.run();

    assert_eq!(spy.failures(), 1);
    let log = spy.last_log().unwrap_or_default();
    assert!(log.contains("PANIC: [GOPHERS!]"));
    assert!(log.contains("async_cases.rs:"));
    assert!(log.ends_with(" -> \"B2\"\n    + still runs\n"));
}

#[test]
fn worker_panicking_without_finishing_is_reported() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.async_test("B", |_, done| {
        thread::spawn(move || {
            let _done = done;
            panic!("worker died");
        });
    });
    fixture.run();

    assert_eq!(spy.failures(), 1);
    assert!(spy
        .last_log()
        .unwrap_or_default()
        .contains("PANIC: [worker died]"));
}

#[test]
fn dropped_handle_completes_case() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .async_test("B1", |_, done| drop(done))
        .async_test("B2", |_, done| {
            thread::spawn(move || drop(done));
        });
    fixture.run();

    assert_eq!(spy.verdict(), Verdict::Passed);
    assert_eq!(
        spy.last_log().as_deref(),
        Some("A\n -> \"B1\"\n -> \"B2\"\n")
    );
}

#[test]
fn body_panic_before_handing_off_is_reported_once() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.async_test("B", |_, _done| panic!("GOPHERS!"));
    fixture.run();

    assert_eq!(spy.failures(), 1);
    let log = spy.last_log().unwrap_or_default();
    assert_eq!(log.matches("PANIC: [GOPHERS!]").count(), 1);
}

#[test]
fn task_case_passes() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture.task_test("B", |rec| async move {
        let value = tokio::spawn(async { 20 + 22 }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        rec.so("the answer", value, should_equal, &[42]);
    });
    fixture.run();

    assert_eq!(spy.verdict(), Verdict::Passed);
    assert_eq!(
        spy.last_log().as_deref(),
        Some("A\n -> \"B\"\n    + the answer\n")
    );
}

#[test]
fn task_case_panic_is_reported() {
    let spy = spy();
    let config = FixtureConfig {
        task_workers: 1,
        ..Default::default()
    };
    let mut fixture = Fixture::new("A", spy.clone()).with_config(config);
    fixture
        .task_test("B1", |_| async {
            tokio::task::yield_now().await;
            panic!("task exploded");
        })
        .task_test("B2", |rec| async move {
            rec.so("next task runs", true, should_be_true, NOTHING);
        });
    fixture.run();

    assert_eq!(spy.failures(), 1);
    let log = spy.last_log().unwrap_or_default();
    assert!(log.contains("PANIC: [task exploded]"));
    assert!(log.ends_with(" -> \"B2\"\n    + next task runs\n"));
}

#[test]
fn skipped_task_case_is_listed() {
    let spy = spy();
    let mut fixture = Fixture::new("A", spy.clone());
    fixture
        .skip_task_test("B1", |_| async { panic!("never"); })
        .focus_task_test("B2", |_| async {});
    fixture.run();

    assert_eq!(spy.verdict(), Verdict::Passed);
    assert_eq!(
        spy.last_log().as_deref(),
        Some("A\n -> (skipped) \"B1\"\n -> <FOCUSED> \"B2\"\n")
    );
}
