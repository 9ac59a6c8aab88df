//! Summary line and verbose section titles.

use std::fmt;
use std::io::{self, Write};

use crate::version::RuntimeVersion;

/// Build flavor, inferred from whether the module exposes a live-object counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildFlavor {
    Debug,
    Release,
}

impl BuildFlavor {
    pub fn from_leak_capability(has_counter: bool) -> Self {
        if has_counter { BuildFlavor::Debug } else { BuildFlavor::Release }
    }
}

impl fmt::Display for BuildFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildFlavor::Debug => f.write_str("debug"),
            BuildFlavor::Release => f.write_str("release"),
        }
    }
}

/// Outcome of a successful run; its `Display` is the one-line summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub runtime: RuntimeVersion,
    pub flavor: BuildFlavor,
    pub test_count: usize,
    pub leak_checked: bool,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nativetest {} ({} build): {} tests succeeded!",
            self.runtime, self.flavor, self.test_count
        )?;
        if self.leak_checked {
            f.write_str(" (no reference leak detected)")?;
        }
        Ok(())
    }
}

/// Print an underlined section title followed by a blank line. Does nothing unless `verbose`.
pub fn display_title(out: &mut dyn Write, title: &str, verbose: bool) -> io::Result<()> {
    if !verbose {
        return Ok(());
    }
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.len()))?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(flavor: BuildFlavor, leak_checked: bool) -> RunSummary {
        RunSummary {
            runtime: RuntimeVersion { major: 0, minor: 1 },
            flavor,
            test_count: 2,
            leak_checked,
        }
    }

    #[test]
    fn test_release_summary_has_no_leak_suffix() {
        let line = summary(BuildFlavor::Release, false).to_string();
        assert_eq!(line, "nativetest 0.1 (release build): 2 tests succeeded!");
    }

    #[test]
    fn test_debug_summary_has_leak_suffix() {
        let line = summary(BuildFlavor::Debug, true).to_string();
        assert_eq!(
            line,
            "nativetest 0.1 (debug build): 2 tests succeeded! (no reference leak detected)"
        );
    }

    #[test]
    fn test_flavor_follows_capability() {
        assert_eq!(BuildFlavor::from_leak_capability(true), BuildFlavor::Debug);
        assert_eq!(BuildFlavor::from_leak_capability(false), BuildFlavor::Release);
    }

    #[test]
    fn test_display_title() {
        let mut out = Vec::new();
        display_title(&mut out, "Run tests", true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Run tests\n=========\n\n");

        let mut quiet = Vec::new();
        display_title(&mut quiet, "Run tests", false).unwrap();
        assert!(quiet.is_empty());
    }
}
