//! Test runner: discovery, execution and the leak-check wrapper.
//!
//! ## Flow
//!
//! 1. Decide the leak-check mode once, from the module's capability
//! 2. Discover the tests (`discovery`)
//! 3. Run the battery once (`executor`), or repeatedly under `leak::check_refleak`
//! 4. Print the summary line (`report`)
//!
//! The runner writes its transcript to a caller-supplied writer; the CLI passes stdout.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod discovery;
pub mod executor;
pub mod interfaces;
pub mod leak;
pub mod report;

use std::io::Write;

use crate::config::LeakPolicy;
use crate::error::HarnessResult;
use crate::version::RUNTIME_VERSION;

pub use discovery::discover_tests;
pub use executor::run_tests;
pub use interfaces::{LiveObjectCounter, ModuleExport, TestCallable, TestCase, TestModule};
pub use leak::check_refleak;
pub use report::{BuildFlavor, RunSummary};

/// Discover and run the tests of `module`, leak-checking them when the module supports it.
///
/// Returns the summary that was printed as the last line of the transcript.
pub fn run_test_suite(
    module: &dyn TestModule,
    policy: &LeakPolicy,
    verbose: bool,
    out: &mut dyn Write,
) -> HarnessResult<RunSummary> {
    report::display_title(out, "Run tests", verbose)?;

    let counter = module.live_object_counter();
    let tests = discover_tests(module)?;

    match counter {
        Some(counter) => check_refleak(counter, policy, verbose, out, |out| run_tests(&tests, verbose, out))?,
        None => run_tests(&tests, verbose, out)?,
    }

    if verbose {
        writeln!(out)?;
    }

    let summary = RunSummary {
        runtime: RUNTIME_VERSION,
        flavor: BuildFlavor::from_leak_capability(counter.is_some()),
        test_count: tests.len(),
        leak_checked: counter.is_some(),
    };
    writeln!(out, "{summary}")?;
    out.flush()?;

    Ok(summary)
}
