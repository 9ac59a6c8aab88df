//! C ABI shared by the `nativetest` harness and the extension modules it loads.
//!
//! An extension module is a `cdylib` that links this crate and exports:
//!
//! - `nativetest_registry`: the table of test entry points, via [`export_tests!`]
//! - `nativetest_total_refcount` (optional): the live allocation count, via [`export_live_count!`]
//!
//! The harness only relies on the `#[repr(C)]` types and symbol names in [`registry`]; everything else here is
//! convenience for module authors.
//!
//! ```ignore
//! use nativetest_abi::{assert_eq, export_tests, native_test};
//!
//! nativetest_abi::export_live_count!();
//!
//! #[native_test]
//! fn test_sum() {
//!     assert_eq((1..=3).sum::<i32>(), 6);
//! }
//!
//! export_tests!(test_sum);
//! ```

#![deny(clippy::unwrap_used)]

pub mod alloc;
pub mod registry;
pub mod run;
pub mod testing;

pub use alloc::CountingAllocator;
pub use registry::{
    ABI_VERSION, LIVE_COUNT_SYMBOL, LiveCountFn, REGISTRY_SYMBOL, RegistryFn, TestEntry, TestFn, TestRegistry,
};
pub use run::{STATUS_FAILED, STATUS_PANICKED, STATUS_PASSED, TestReturn, run_test};

#[cfg(feature = "derive")]
pub use nativetest_derive::native_test;

// Assertion helpers (always available)
pub use testing::{assert_eq, assert_false, assert_ne, assert_true, fail};
