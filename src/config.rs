//! Harness configuration.
//!
//! Defaults reproduce the conventional layout: a cargo-built `cdylib` in the current directory, built into
//! `build/` with the sibling header tree one level up on the include path.

use std::path::{Path, PathBuf};

/// Default name of the module imported after the build.
pub const DEFAULT_MODULE: &str = "test_module";

/// Repetition policy of the leak detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeakPolicy {
    /// Number of full passes over the test battery.
    pub runs: u32,
    /// Leading passes whose drift is never inspected.
    pub warmup: u32,
}

impl LeakPolicy {
    pub const DEFAULT: LeakPolicy = LeakPolicy { runs: 6, warmup: 3 };
}

impl Default for LeakPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Harness configuration, fixed once the CLI has been parsed.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Source directory of the extension module; the build tool runs here
    pub source_dir: PathBuf,
    /// Build output directory, relative to `source_dir`
    pub build_dir: PathBuf,
    /// Build tool program
    pub build_program: String,
    /// Build tool arguments
    pub build_args: Vec<String>,
    /// Environment values set on the build tool only
    pub build_env: Vec<(String, String)>,
    /// Name prefix of the build output entry that holds the library
    pub artifact_marker: String,
    /// Module to import from the located directory
    pub module_name: String,
    pub leak_policy: LeakPolicy,
    pub verbose: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            build_dir: PathBuf::from("build"),
            build_program: "cargo".to_string(),
            build_args: ["build", "--release", "--target-dir", "build"]
                .into_iter()
                .map(String::from)
                .collect(),
            build_env: vec![("CFLAGS".to_string(), "-I ..".to_string())],
            artifact_marker: "release".to_string(),
            module_name: DEFAULT_MODULE.to_string(),
            leak_policy: LeakPolicy::DEFAULT,
            verbose: false,
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source directory
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Set the build output directory (relative to the source directory)
    pub fn with_build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    /// Replace the build command
    pub fn with_build_command<I, S>(mut self, program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_program = program.to_string();
        self.build_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set an environment value on the build tool, replacing any previous value for `key`
    pub fn with_build_env(mut self, key: &str, value: &str) -> Self {
        self.build_env.retain(|(k, _)| k != key);
        self.build_env.push((key.to_string(), value.to_string()));
        self
    }

    /// Set the artifact marker
    pub fn with_artifact_marker(mut self, marker: &str) -> Self {
        self.artifact_marker = marker.to_string();
        self
    }

    /// Set the module name
    pub fn with_module_name(mut self, name: &str) -> Self {
        self.module_name = name.to_string();
        self
    }

    pub fn with_leak_policy(mut self, policy: LeakPolicy) -> Self {
        self.leak_policy = policy;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build output directory resolved against the source directory.
    pub fn build_output_dir(&self) -> PathBuf {
        resolve(&self.source_dir, &self.build_dir)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build_command() {
        let config = HarnessConfig::default();
        assert_eq!(config.build_program, "cargo");
        assert_eq!(config.build_args, vec!["build", "--release", "--target-dir", "build"]);
    }

    #[test]
    fn test_default_build_env_points_one_level_up() {
        let config = HarnessConfig::default();
        assert_eq!(config.build_env, vec![("CFLAGS".to_string(), "-I ..".to_string())]);
    }

    #[test]
    fn test_default_leak_policy() {
        let config = HarnessConfig::default();
        assert_eq!(config.leak_policy, LeakPolicy { runs: 6, warmup: 3 });
        assert!(!config.verbose);
    }

    #[test]
    fn test_new_equals_default() {
        let new_config = HarnessConfig::new();
        let default_config = HarnessConfig::default();
        assert_eq!(new_config.module_name, default_config.module_name);
        assert_eq!(new_config.artifact_marker, default_config.artifact_marker);
    }

    #[test]
    fn test_with_build_env_replaces_existing_key() {
        let config = HarnessConfig::new().with_build_env("CFLAGS", "-I include");
        assert_eq!(config.build_env, vec![("CFLAGS".to_string(), "-I include".to_string())]);
    }

    #[test]
    fn test_build_output_dir_is_relative_to_source() {
        let config = HarnessConfig::new().with_source_dir("ext");
        assert_eq!(config.build_output_dir(), Path::new("ext").join("build"));

        let absolute = std::env::temp_dir().join("nativetest_out");
        let config = config.with_build_dir(&absolute);
        assert_eq!(config.build_output_dir(), absolute);
    }
}
