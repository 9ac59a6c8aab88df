//! Test executor - one pass over the discovered tests.

use std::io::Write;

use super::interfaces::TestCase;
use crate::error::{HarnessError, HarnessResult};

/// Call every test in order. The first non-zero status aborts the pass with [`HarnessError::TestFailed`].
///
/// In verbose mode `name()` is written and flushed before each call, so the transcript shows which test was
/// running if the call takes the process down.
pub fn run_tests(tests: &[TestCase], verbose: bool, out: &mut dyn Write) -> HarnessResult<()> {
    for test in tests {
        if verbose {
            writeln!(out, "{}()", test.name)?;
            out.flush()?;
        }

        let status = test.call();
        if status != 0 {
            return Err(HarnessError::TestFailed {
                name: test.name.clone(),
                status,
            });
        }
    }
    Ok(())
}
