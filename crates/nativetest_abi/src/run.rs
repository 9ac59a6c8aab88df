//! Running a Rust test body behind a C entry point.
//!
//! A panic must never unwind across `extern "C"`, so [`run_test`] catches it and turns it into a status code.

use std::any::Any;
use std::ffi::c_int;
use std::fmt::Display;
use std::panic::{self, UnwindSafe};

/// The test returned normally.
pub const STATUS_PASSED: c_int = 0;
/// The test returned an `Err`.
pub const STATUS_FAILED: c_int = 1;
/// The test panicked.
pub const STATUS_PANICKED: c_int = 101;

/// Return types accepted from a test body.
pub trait TestReturn {
    /// `Ok` on success, otherwise the failure text.
    fn into_outcome(self) -> Result<(), String>;
}

impl TestReturn for () {
    fn into_outcome(self) -> Result<(), String> {
        Ok(())
    }
}

impl<E: Display> TestReturn for Result<(), E> {
    fn into_outcome(self) -> Result<(), String> {
        self.map_err(|e| e.to_string())
    }
}

/// Run `body`, print any failure to stderr under `name`, and return the status for the harness.
pub fn run_test<F, R>(name: &str, body: F) -> c_int
where
    F: FnOnce() -> R + UnwindSafe,
    R: TestReturn,
{
    match panic::catch_unwind(body) {
        Ok(ret) => match ret.into_outcome() {
            Ok(()) => STATUS_PASSED,
            Err(msg) => {
                eprintln!("{name}: {msg}");
                STATUS_FAILED
            }
        },
        Err(payload) => {
            eprintln!("{name}: panicked: {}", panic_message(payload.as_ref()));
            STATUS_PANICKED
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
