//! Registry layout and symbol names.
//!
//! The layout is versioned by [`ABI_VERSION`]; bump it whenever a `#[repr(C)]` type in this module changes.

use core::ffi::{c_char, c_int};

/// Version of the registry layout. The harness refuses modules built against another version.
pub const ABI_VERSION: u32 = 1;

/// Symbol of the exported [`RegistryFn`].
pub const REGISTRY_SYMBOL: &[u8] = b"nativetest_registry\0";

/// Symbol of the exported [`LiveCountFn`]. Absent on modules without allocation tracking.
pub const LIVE_COUNT_SYMBOL: &[u8] = b"nativetest_total_refcount\0";

/// A zero-argument test entry point. Returns `0` on success.
pub type TestFn = unsafe extern "C" fn() -> c_int;

/// Returns the number of live tracked allocations in the module.
pub type LiveCountFn = unsafe extern "C" fn() -> i64;

/// Returns a pointer to the module's static registry.
pub type RegistryFn = unsafe extern "C" fn() -> *const TestRegistry;

/// One named export of a module.
///
/// `name` points to a NUL-terminated string with static lifetime. `func` is `None` for exports that carry a
/// name but cannot be called.
#[repr(C)]
pub struct TestEntry {
    pub name: *const c_char,
    pub func: Option<TestFn>,
}

// Entries only ever point at static, immutable data.
unsafe impl Sync for TestEntry {}

/// The table returned by [`RegistryFn`].
#[repr(C)]
pub struct TestRegistry {
    pub abi_version: u32,
    pub len: usize,
    pub entries: *const TestEntry,
}

unsafe impl Sync for TestRegistry {}

impl TestRegistry {
    /// Build a registry over a static entry table.
    pub const fn new(entries: &'static [TestEntry]) -> Self {
        Self {
            abi_version: ABI_VERSION,
            len: entries.len(),
            entries: entries.as_ptr(),
        }
    }
}

/// Export `nativetest_registry` listing the given entry points, in order.
///
/// Each item must be an `extern "C" fn() -> c_int` in scope, usually produced by `#[native_test]`. Only items
/// whose name starts with `test` are run by the harness; others are listed but skipped.
#[macro_export]
macro_rules! export_tests {
    ($($test:ident),* $(,)?) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn nativetest_registry() -> *const $crate::TestRegistry {
            static ENTRIES: &[$crate::TestEntry] = &[
                $($crate::TestEntry {
                    name: concat!(stringify!($test), "\0").as_ptr().cast(),
                    func: Some($test),
                }),*
            ];
            static REGISTRY: $crate::TestRegistry = $crate::TestRegistry::new(ENTRIES);
            &REGISTRY
        }
    };
}

/// Install [`CountingAllocator`](crate::CountingAllocator) as the module's global allocator and export
/// `nativetest_total_refcount`.
///
/// Modules that invoke this macro are leak-checked by the harness and reported as debug builds.
#[macro_export]
macro_rules! export_live_count {
    () => {
        #[global_allocator]
        static NATIVETEST_ALLOCATOR: $crate::CountingAllocator<::std::alloc::System> =
            $crate::CountingAllocator::new(::std::alloc::System);

        #[unsafe(no_mangle)]
        pub extern "C" fn nativetest_total_refcount() -> i64 {
            NATIVETEST_ALLOCATOR.live_count()
        }
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    extern "C" fn test_one() -> c_int {
        0
    }

    extern "C" fn helper() -> c_int {
        7
    }

    crate::export_tests!(test_one, helper);

    #[test]
    fn test_symbols_are_nul_terminated() {
        assert_eq!(REGISTRY_SYMBOL.last(), Some(&0));
        assert_eq!(LIVE_COUNT_SYMBOL.last(), Some(&0));
    }

    #[test]
    fn test_export_tests_preserves_listing_order() {
        let registry = unsafe { &*nativetest_registry() };
        assert_eq!(registry.abi_version, ABI_VERSION);
        assert_eq!(registry.len, 2);

        let entries = unsafe { std::slice::from_raw_parts(registry.entries, registry.len) };
        let names: Vec<_> = entries
            .iter()
            .map(|e| unsafe { core::ffi::CStr::from_ptr(e.name) }.to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["test_one", "helper"]);

        let status = unsafe { (entries[1].func.unwrap())() };
        assert_eq!(status, 7);
    }
}
