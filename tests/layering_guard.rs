//! Layering guardrails for the workspace crates.
//!
//! - The harness (`nativetest` crate) loads modules through the C ABI only; it must not depend on the
//!   `nativetest_derive` proc-macro that module authors use.
//! - `nativetest_abi` is linked into every test module, so its only dependencies are optional ones.

/// Lines of the `[dependencies]` table of `manifest`, comments stripped.
fn dependency_lines(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut lines = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if !line_no_comment.is_empty() {
            lines.push(line_no_comment.to_string());
        }
    }
    lines
}

#[test]
fn harness_does_not_depend_on_derive_macro() {
    let manifest = include_str!("../Cargo.toml");
    for line in dependency_lines(manifest) {
        if line.starts_with("nativetest_derive") {
            panic!("`nativetest_derive` must not appear in the harness [dependencies]");
        }
    }
}

#[test]
fn abi_crate_has_only_optional_dependencies() {
    let manifest = include_str!("../crates/nativetest_abi/Cargo.toml");
    for line in dependency_lines(manifest) {
        assert!(
            line.contains("optional = true"),
            "`nativetest_abi` dependency must be optional: {line}"
        );
    }
}
