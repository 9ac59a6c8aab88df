//! Harness version information.
//!
//! This module exposes the harness version so the CLI and the summary line agree on the same value.
//!
//! ## Notes
//!
//! - The values are taken from Cargo metadata (`CARGO_PKG_VERSION*`) at compile time.
//! - The summary line only reports `major.minor`, see [`RUNTIME_VERSION`].

use std::fmt;

/// The full harness version string (for example, `0.1.0`).
pub const NATIVETEST_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The harness runtime version reported in the summary line.
pub const RUNTIME_VERSION: RuntimeVersion = RuntimeVersion {
    major: parse_component(env!("CARGO_PKG_VERSION_MAJOR")),
    minor: parse_component(env!("CARGO_PKG_VERSION_MINOR")),
};

/// A `major.minor` version pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parse a decimal version component. Cargo guarantees digits only.
const fn parse_component(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut value = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        value = value * 10 + (bytes[i] - b'0') as u32;
        i += 1;
    }
    value
}
