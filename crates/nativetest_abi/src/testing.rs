//! Assertion helpers for test bodies.
//!
//! They panic on failure; [`run_test`](crate::run_test) turns the panic into a failing status.

use std::fmt::Debug;

/// Assert that a condition is true.
///
/// # Panics
///
/// Panics if `condition` is false.
#[track_caller]
pub fn assert_true(condition: bool) {
    if !condition {
        panic!("assertion failed");
    }
}

/// Assert that a condition is false.
///
/// # Panics
///
/// Panics if `condition` is true.
#[track_caller]
pub fn assert_false(condition: bool) {
    if condition {
        panic!("assertion failed: expected false");
    }
}

/// Assert that two values are equal.
///
/// # Panics
///
/// Panics if `left != right`.
#[track_caller]
pub fn assert_eq<T: PartialEq + Debug>(left: T, right: T) {
    if left != right {
        panic!(
            "assertion failed: left != right\n  left:  {:?}\n  right: {:?}",
            left, right
        );
    }
}

/// Assert that two values are not equal.
///
/// # Panics
///
/// Panics if `left == right`.
#[track_caller]
pub fn assert_ne<T: PartialEq + Debug>(left: T, right: T) {
    if left == right {
        panic!(
            "assertion failed: left == right\n  left:  {:?}\n  right: {:?}",
            left, right
        );
    }
}

/// Explicitly fail a test with a message.
///
/// # Panics
///
/// Always panics with the provided `msg`.
#[track_caller]
pub fn fail(msg: &str) -> ! {
    panic!("{}", msg);
}
