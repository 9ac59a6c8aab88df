//! Harness error taxonomy.
//!
//! Every stage (build, locate, import, discover, execute, leak check) returns [`HarnessResult`] and nothing
//! recovers locally: the first error ends the invocation. The CLI maps each error to a process exit code via
//! [`HarnessError::exit_code`].

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that end a harness invocation.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    /// The build tool exited unsuccessfully. Its output has already been shown.
    #[error("build tool exited with status {code}")]
    #[diagnostic(code(nativetest::build::failed))]
    Build { code: i32 },

    #[error("failed to run build tool `{program}`: {source}")]
    #[diagnostic(
        code(nativetest::build::spawn),
        help("check that the build tool is installed and on PATH")
    )]
    BuildSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("module `{name}` not found in search path [{searched}]")]
    #[diagnostic(
        code(nativetest::import::not_found),
        help("the build directory has no entry matching the artifact marker, or the module name is wrong")
    )]
    ModuleNotFound { name: String, searched: String },

    #[error("failed to load {}: {reason}", path.display())]
    #[diagnostic(code(nativetest::import::load))]
    Load { path: PathBuf, reason: String },

    #[error("module `{name}` does not export a test registry")]
    #[diagnostic(
        code(nativetest::import::registry),
        help("list the module's tests with `nativetest_abi::export_tests!`")
    )]
    MissingRegistry { name: String },

    #[error("module `{name}` uses registry ABI version {found}, expected {expected}")]
    #[diagnostic(
        code(nativetest::import::abi),
        help("rebuild the module against the same nativetest_abi version as the harness")
    )]
    AbiMismatch { name: String, expected: u32, found: u32 },

    #[error("`{name}` is registered as a test but is not callable")]
    #[diagnostic(code(nativetest::discover::not_callable))]
    NotCallable { name: String },

    #[error("{name}() failed with status {status}")]
    #[diagnostic(code(nativetest::test::failed))]
    TestFailed { name: String, status: i32 },

    /// Live-object drift after the warm-up repetitions.
    #[error("refcnt leak, diff: {diff}")]
    #[diagnostic(code(nativetest::leak))]
    RefLeak { run: u32, diff: i64 },

    #[error(transparent)]
    #[diagnostic(code(nativetest::io))]
    Io(#[from] io::Error),
}

impl HarnessError {
    /// Process exit code for this error.
    ///
    /// Build failures propagate the build tool's own code; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::Build { code } => *code,
            _ => 1,
        }
    }

    /// Whether the diagnostic text was already written while the error happened.
    pub fn is_reported(&self) -> bool {
        matches!(self, HarnessError::Build { .. })
    }
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_propagates_exit_code() {
        let err = HarnessError::Build { code: 2 };
        assert_eq!(err.exit_code(), 2);
        assert!(err.is_reported());
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let err = HarnessError::RefLeak { run: 4, diff: 3 };
        assert_eq!(err.exit_code(), 1);
        assert!(!err.is_reported());
        assert_eq!(err.to_string(), "refcnt leak, diff: 3");
    }

    #[test]
    fn test_diagnostic_help_is_available() {
        let err = HarnessError::MissingRegistry {
            name: "test_module".to_string(),
        };
        assert!(err.help().is_some());
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("nativetest::import::registry")
        );
    }
}
