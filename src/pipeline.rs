//! End-to-end harness pipeline: build → locate → import → run.

use std::io::Write;

use crate::build::{build_extension, locate_artifact_dir};
use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::module::{ModuleSearchPath, import_module};
use crate::runner::{RunSummary, run_test_suite};

/// Build the extension described by `config`, import it and run its tests.
///
/// The transcript (titles, test names, captured build output on failure, summary line) goes to `out`.
pub fn run_pipeline(config: &HarnessConfig, out: &mut dyn Write) -> HarnessResult<RunSummary> {
    build_extension(config, out)?;

    let mut search_path = ModuleSearchPath::new();
    let build_dir = config.build_output_dir();
    match locate_artifact_dir(&build_dir, &config.artifact_marker)? {
        Some(dir) => search_path.push(dir),
        None => tracing::warn!(
            build_dir = %build_dir.display(),
            marker = %config.artifact_marker,
            "no build output entry matches the artifact marker"
        ),
    }

    let module = import_module(&search_path, &config.module_name)?;
    run_test_suite(&module, &config.leak_policy, config.verbose, out)
}
