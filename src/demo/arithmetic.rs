//! Counter arithmetic demo with asynchronous cases

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::thread;

use xfixture::assertions::should_equal;
use xfixture::{Fixture, FixtureConfig, Host};

pub fn run(host: Arc<dyn Host>, config: &FixtureConfig) {
    let counter = Arc::new(AtomicI64::new(0));

    let mut fixture =
        Fixture::new("Addition and subtraction", host).with_config(config.clone());
    fixture
        .setup(|| counter.store(0, Ordering::SeqCst))
        .async_test("Addition should work", |rec, done| {
            let counter = counter.clone();
            thread::spawn(move || {
                done.finish_with(|| {
                    let value = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    rec.so("The number should increment", value, should_equal, &[1]);
                })
            });
        })
        .task_test("Doubling should work", |rec| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(2, Ordering::SeqCst);
                tokio::task::yield_now().await;
                let value = counter.fetch_add(2, Ordering::SeqCst) + 2;
                rec.so("The number should be doubled", value, should_equal, &[4]);
            }
        })
        .test("Subtraction should work", |rec| {
            let value = counter.fetch_sub(1, Ordering::SeqCst) - 1;
            rec.so("The number should be decremented", value, should_equal, &[-1]);
        })
        .teardown(|| counter.store(0, Ordering::SeqCst));
    fixture.run();
}
