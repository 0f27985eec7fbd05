//! Assertion predicates
//!
//! Each predicate has the shape `(actual, expected) -> Outcome` and is handed
//! to [`Recorder::so`](crate::fixture::Recorder::so) as an opaque function.
//! Predicates that take no comparison values expect [`NOTHING`].

use std::fmt::Debug;

use crate::fixture::recover;

/// Empty comparison list for predicates that take no expected values
pub const NOTHING: &[()] = &[];

/// Result of evaluating a predicate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub passed: bool,
    pub message: String,
}

impl Outcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

fn arity(expected: usize, provided: usize) -> Outcome {
    Outcome::fail(format!(
        "This assertion requires exactly {expected} comparison values (you provided {provided})."
    ))
}

fn unexpected_values(provided: usize) -> Outcome {
    Outcome::fail(format!(
        "This assertion requires exactly 0 comparison values (you provided {provided})."
    ))
}

pub fn should_equal<T: PartialEq + Debug>(actual: &T, expected: &[T]) -> Outcome {
    let [expected] = expected else {
        return arity(1, expected.len());
    };
    if actual == expected {
        Outcome::pass()
    } else {
        Outcome::fail(format!(
            "Expected: '{expected:?}'\nActual:   '{actual:?}'\n(Should be equal)"
        ))
    }
}

pub fn should_not_equal<T: PartialEq + Debug>(actual: &T, expected: &[T]) -> Outcome {
    let [expected] = expected else {
        return arity(1, expected.len());
    };
    if actual != expected {
        Outcome::pass()
    } else {
        Outcome::fail(format!(
            "Expected '{actual:?}'\nto NOT equal '{expected:?}'\n(but it did)!"
        ))
    }
}

pub fn should_be_true(actual: &bool, expected: &[()]) -> Outcome {
    if !expected.is_empty() {
        return unexpected_values(expected.len());
    }
    if *actual {
        Outcome::pass()
    } else {
        Outcome::fail("Expected: true\nActual:   false")
    }
}

pub fn should_be_false(actual: &bool, expected: &[()]) -> Outcome {
    if !expected.is_empty() {
        return unexpected_values(expected.len());
    }
    if *actual {
        Outcome::fail("Expected: false\nActual:   true")
    } else {
        Outcome::pass()
    }
}

pub fn should_be_greater_than<T: PartialOrd + Debug>(actual: &T, expected: &[T]) -> Outcome {
    let [expected] = expected else {
        return arity(1, expected.len());
    };
    if actual > expected {
        Outcome::pass()
    } else {
        Outcome::fail(format!(
            "Expected '{actual:?}' to be greater than '{expected:?}' (but it wasn't)!"
        ))
    }
}

pub fn should_be_less_than<T: PartialOrd + Debug>(actual: &T, expected: &[T]) -> Outcome {
    let [expected] = expected else {
        return arity(1, expected.len());
    };
    if actual < expected {
        Outcome::pass()
    } else {
        Outcome::fail(format!(
            "Expected '{actual:?}' to be less than '{expected:?}' (but it wasn't)!"
        ))
    }
}

/// Exclusive on both bounds; the bounds may be given in either order.
pub fn should_be_between<T: PartialOrd + Debug>(actual: &T, expected: &[T]) -> Outcome {
    let [a, b] = expected else {
        return arity(2, expected.len());
    };
    let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
    if actual > lower && actual < upper {
        Outcome::pass()
    } else {
        Outcome::fail(format!(
            "Expected '{actual:?}' to be between '{lower:?}' and '{upper:?}' (but it wasn't)!"
        ))
    }
}

pub fn should_contain<T: PartialEq + Debug>(actual: &Vec<T>, expected: &[T]) -> Outcome {
    let [expected] = expected else {
        return arity(1, expected.len());
    };
    if actual.contains(expected) {
        Outcome::pass()
    } else {
        Outcome::fail(format!(
            "Expected the container ({actual:?}) to contain: '{expected:?}' (but it didn't)!"
        ))
    }
}

pub fn should_not_contain<T: PartialEq + Debug>(actual: &Vec<T>, expected: &[T]) -> Outcome {
    let [expected] = expected else {
        return arity(1, expected.len());
    };
    if actual.contains(expected) {
        Outcome::fail(format!(
            "Expected the container ({actual:?}) NOT to contain: '{expected:?}' (but it did)!"
        ))
    } else {
        Outcome::pass()
    }
}

pub fn should_be_empty<T: Debug>(actual: &Vec<T>, expected: &[()]) -> Outcome {
    if !expected.is_empty() {
        return unexpected_values(expected.len());
    }
    if actual.is_empty() {
        Outcome::pass()
    } else {
        Outcome::fail(format!("Expected {actual:?} to be empty (but it wasn't)!"))
    }
}

pub fn should_not_be_empty<T: Debug>(actual: &Vec<T>, expected: &[()]) -> Outcome {
    if !expected.is_empty() {
        return unexpected_values(expected.len());
    }
    if actual.is_empty() {
        Outcome::fail("Expected the container to NOT be empty (but it was)!")
    } else {
        Outcome::pass()
    }
}

pub fn should_start_with<S: AsRef<str>>(actual: &S, expected: &[&str]) -> Outcome {
    let [prefix] = expected else {
        return arity(1, expected.len());
    };
    let actual = actual.as_ref();
    if actual.starts_with(prefix) {
        Outcome::pass()
    } else {
        Outcome::fail(format!(
            "Expected '{actual}'\nto start with '{prefix}'\n(but it didn't)!"
        ))
    }
}

pub fn should_end_with<S: AsRef<str>>(actual: &S, expected: &[&str]) -> Outcome {
    let [suffix] = expected else {
        return arity(1, expected.len());
    };
    let actual = actual.as_ref();
    if actual.ends_with(suffix) {
        Outcome::pass()
    } else {
        Outcome::fail(format!(
            "Expected '{actual}'\nto end with '{suffix}'\n(but it didn't)!"
        ))
    }
}

pub fn should_contain_substring<S: AsRef<str>>(actual: &S, expected: &[&str]) -> Outcome {
    let [needle] = expected else {
        return arity(1, expected.len());
    };
    let actual = actual.as_ref();
    if actual.contains(needle) {
        Outcome::pass()
    } else {
        Outcome::fail(format!(
            "Expected '{actual}' to contain substring '{needle}' (but it didn't)!"
        ))
    }
}

/// The closure is run inside a guard, so its panic is never reported as a
/// panic of the enclosing case.
pub fn should_panic<F: Fn()>(actual: &F, expected: &[()]) -> Outcome {
    if !expected.is_empty() {
        return unexpected_values(expected.len());
    }
    match recover::guarded(actual) {
        Ok(()) => Outcome::fail("Expected func() to panic (but it didn't)!"),
        Err(_) => Outcome::pass(),
    }
}

pub fn should_not_panic<F: Fn()>(actual: &F, expected: &[()]) -> Outcome {
    if !expected.is_empty() {
        return unexpected_values(expected.len());
    }
    match recover::guarded(actual) {
        Ok(()) => Outcome::pass(),
        Err(caught) => Outcome::fail(format!(
            "Expected func() NOT to panic (error: '{}')!",
            caught.message
        )),
    }
}
