//! End-to-end runs against `demos/sample_ext`, built with cargo.
//!
//! These compile a real extension module, so they are ignored by default:
//!
//! ```text
//! cargo test --test end_to_end -- --ignored
//! ```

use std::path::PathBuf;

use nativetest::runner::BuildFlavor;
use nativetest::{HarnessConfig, HarnessError, run_pipeline};

fn sample_ext() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join("sample_ext")
}

fn cargo_build(target_dir: &str, features: &[&str]) -> HarnessConfig {
    let mut args = vec!["build", "--release", "--target-dir", target_dir];
    args.extend_from_slice(features);
    HarnessConfig::new()
        .with_source_dir(sample_ext())
        .with_build_dir(target_dir)
        .with_build_command("cargo", args)
}

#[test]
#[ignore = "builds demos/sample_ext with cargo"]
fn sample_extension_passes_with_leak_check() {
    let config = cargo_build("build-e2e", &[]);

    let mut out = Vec::new();
    let summary = run_pipeline(&config, &mut out).unwrap();

    assert_eq!(summary.test_count, 2);
    assert_eq!(summary.flavor, BuildFlavor::Debug);
    assert!(summary.leak_checked);
    assert!(String::from_utf8(out).unwrap().ends_with("(no reference leak detected)\n"));
}

#[test]
#[ignore = "builds demos/sample_ext with cargo"]
fn sample_extension_without_counter_runs_once() {
    let config = cargo_build("build-e2e-release", &["--no-default-features"]);

    let mut out = Vec::new();
    let summary = run_pipeline(&config, &mut out).unwrap();

    assert_eq!(summary.test_count, 2);
    assert_eq!(summary.flavor, BuildFlavor::Release);
    assert!(!summary.leak_checked);
}

#[test]
#[ignore = "builds demos/sample_ext with cargo"]
fn leaking_sample_extension_is_caught() {
    let config = cargo_build("build-e2e-leak", &["--features", "leak"]);

    let mut out = Vec::new();
    let err = run_pipeline(&config, &mut out).unwrap_err();

    assert!(matches!(err, HarnessError::RefLeak { run: 4, diff: 1 }), "got {err:?}");
}
