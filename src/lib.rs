#![deny(unsafe_code)]
//! nativetest - build a native extension module, run its tests and check them for leaks.
//!
//! The harness builds the module with an external build tool, finds the build output directory, loads the
//! resulting shared library and calls every exported `test*` entry point. When the module exposes a live
//! allocation counter the whole battery is repeated and any drift after the warm-up passes fails the run.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `build`, `cli`,
//!   `module` and `runner` modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Unsafe code**: Only the shared-library loader (`module::native`) may use `unsafe`.

pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod module;
pub mod pipeline;
pub mod runner;
pub mod version;

pub use config::{HarnessConfig, LeakPolicy};
pub use error::{HarnessError, HarnessResult};
pub use pipeline::run_pipeline;
pub use runner::{RunSummary, run_test_suite};
