//! Demo fixtures
//!
//! Small fixtures exercising the engine end to end: a bowling scorer,
//! counter arithmetic with asynchronous cases, and table-driven cases.

mod arithmetic;
mod bowling;
mod table;

use std::sync::Arc;

use xfixture::{FixtureConfig, Host};

/// A runnable demo fixture
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub run: fn(Arc<dyn Host>, &FixtureConfig),
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "bowling",
        description: "Bowling game scoring with a skipped case",
        run: bowling::run,
    },
    Demo {
        name: "arithmetic",
        description: "Counter arithmetic with thread and task cases",
        run: arithmetic::run,
    },
    Demo {
        name: "table",
        description: "Table-driven cases registered in a loop",
        run: table::run,
    },
];

/// Look up a demo by name
pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.name.eq_ignore_ascii_case(name))
}
