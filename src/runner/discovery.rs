//! Test discovery over a module's exports.

use super::interfaces::{TestCase, TestModule};
use crate::error::{HarnessError, HarnessResult};

/// Name prefix that marks an export as a test.
pub const TEST_PREFIX: &str = "test";

/// Collect every export whose name starts with [`TEST_PREFIX`], in the module's order.
///
/// An export that matches the prefix but has nothing to call fails discovery with
/// [`HarnessError::NotCallable`] before any test runs.
#[tracing::instrument(skip_all, fields(module = module.name()))]
pub fn discover_tests(module: &dyn TestModule) -> HarnessResult<Vec<TestCase>> {
    let tests = module
        .exports()
        .into_iter()
        .filter(|export| export.name.starts_with(TEST_PREFIX))
        .map(|export| match export.callable {
            Some(callable) => Ok(TestCase::new(export.name, callable)),
            None => Err(HarnessError::NotCallable { name: export.name }),
        })
        .collect::<HarnessResult<Vec<_>>>()?;

    tracing::debug!(count = tests.len(), "discovered tests");
    Ok(tests)
}
