//! Table-driven demo

use std::sync::Arc;

use xfixture::assertions::should_equal;
use xfixture::{Fixture, FixtureConfig, Host};

pub fn run(host: Arc<dyn Host>, config: &FixtureConfig) {
    let mut fixture = Fixture::new("Table-driven testing!", host).with_config(config.clone());

    for (index, value) in [0, 1, 2, 3, 4, 5].into_iter().enumerate() {
        fixture.test(format!("TestCase #{index}"), move |rec| {
            rec.so("The index and value should match", index, should_equal, &[value]);
        });
    }
    fixture.run();
}
