//! CLI module for the nativetest harness
//!
//! ```text
//! nativetest [-v|--verbose] [DIR] [--module NAME]
//! ```
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use miette::Diagnostic;

use crate::config::{DEFAULT_MODULE, HarnessConfig};
use crate::error::HarnessError;
use crate::version::NATIVETEST_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display); empty when already shown
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create an error with a custom exit code.
    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        let code = err.exit_code();
        if err.is_reported() {
            return CliError::with_code("", code);
        }

        let mut message = format!("Error: {err}");
        if let Some(help) = err.help() {
            message.push_str(&format!("\nhelp: {help}"));
        }
        if code == ExitCode::FAILURE.0 {
            CliError::failure(message)
        } else {
            CliError::with_code(message, code)
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Build a native extension module and run its tests with leak detection
#[derive(Parser, Debug)]
#[command(name = "nativetest")]
#[command(version = NATIVETEST_VERSION)]
#[command(about = "Build a native extension module and run its tests with leak detection", long_about = None)]
pub struct Cli {
    /// Show section titles, the live build output, leak-check repetitions and test names
    #[arg(short, long)]
    pub verbose: bool,

    /// Source directory of the extension module
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Module to import once the build succeeds
    #[arg(long = "module", value_name = "NAME", default_value = DEFAULT_MODULE)]
    pub module: String,
}

impl Cli {
    /// Harness configuration for these arguments.
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig::new()
            .with_source_dir(&self.dir)
            .with_module_name(&self.module)
            .with_verbose(self.verbose)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    tracing::debug!(?cli, "parsed arguments");
    commands::run_suite(&cli.config())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::try_parse_from(["nativetest"]).unwrap();
        assert!(!cli.verbose);
        assert_eq!(cli.dir, Path::new("."));
        assert_eq!(cli.module, "test_module");
    }

    #[test]
    fn test_cli_parse_verbose_anywhere() {
        let cli = Cli::try_parse_from(["nativetest", "ext", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.dir, Path::new("ext"));

        let cli = Cli::try_parse_from(["nativetest", "--verbose", "--module", "my_ext"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.module, "my_ext");
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["nativetest", "--bogus"]).is_err());
    }

    #[test]
    fn test_cli_config() {
        let cli = Cli::try_parse_from(["nativetest", "-v", "ext", "--module", "my_ext"]).unwrap();
        let config = cli.config();
        assert!(config.verbose);
        assert_eq!(config.source_dir, Path::new("ext"));
        assert_eq!(config.module_name, "my_ext");
        assert_eq!(config.build_output_dir(), Path::new("ext").join("build"));
    }

    #[test]
    fn test_build_error_maps_to_silent_exit_with_tool_code() {
        let err = CliError::from(HarnessError::Build { code: 2 });
        assert!(err.message.is_empty());
        assert_eq!(err.exit_code, ExitCode(2));
    }

    #[test]
    fn test_harness_error_message_includes_help() {
        let err = CliError::from(HarnessError::MissingRegistry {
            name: "test_module".to_string(),
        });
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.starts_with("Error: module `test_module` does not export a test registry"));
        assert!(err.message.contains("\nhelp: "));
    }

    #[test]
    fn test_leak_error_message() {
        let err = CliError::from(HarnessError::RefLeak { run: 4, diff: 1 });
        assert_eq!(err.message, "Error: refcnt leak, diff: 1");
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
