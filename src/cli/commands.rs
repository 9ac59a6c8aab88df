//! CLI command implementations
//!
//! Command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, Write};

use crate::config::HarnessConfig;
use crate::pipeline::run_pipeline;

use super::{CliResult, ExitCode};

/// Build, import and test the extension module described by `config`, writing the transcript to stdout.
pub fn run_suite(config: &HarnessConfig) -> CliResult<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = run_pipeline(config, &mut out);
    // Flush before `run()` writes the diagnostic to stderr, so the two streams stay in order.
    let _ = out.flush();

    let summary = result?;
    tracing::debug!(tests = summary.test_count, leak_checked = summary.leak_checked, "suite passed");
    Ok(ExitCode::SUCCESS)
}
