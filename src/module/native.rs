//! Shared-library backed test module.

use std::ffi::CStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::slice;

use libloading::Library;
use nativetest_abi::{ABI_VERSION, LIVE_COUNT_SYMBOL, LiveCountFn, REGISTRY_SYMBOL, RegistryFn, TestEntry};

use crate::error::{HarnessError, HarnessResult};
use crate::runner::interfaces::{LiveObjectCounter, ModuleExport, TestModule};

/// A loaded extension module.
///
/// The registry is read once at load time; every callable and the counter hold a reference to the library,
/// so it stays mapped while any of them is alive.
pub struct NativeModule {
    name: String,
    path: PathBuf,
    exports: Vec<ModuleExport>,
    counter: Option<NativeCounter>,
    _library: Rc<Library>,
}

struct NativeCounter {
    func: LiveCountFn,
    _library: Rc<Library>,
}

impl LiveObjectCounter for NativeCounter {
    fn count_live_objects(&self) -> i64 {
        // SAFETY: the symbol was resolved with the `LiveCountFn` signature and the library is still loaded.
        unsafe { (self.func)() }
    }
}

impl NativeModule {
    pub(super) fn load(name: &str, path: &Path) -> HarnessResult<Self> {
        // SAFETY: loading runs the library's initialisers; the module is the build output we just produced.
        let library = unsafe { Library::new(path) }.map_err(|e| HarnessError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let library = Rc::new(library);

        // SAFETY: `nativetest_registry` is declared by `export_tests!` with the `RegistryFn` signature.
        let registry_fn: RegistryFn = match unsafe { library.get::<RegistryFn>(REGISTRY_SYMBOL) } {
            Ok(symbol) => *symbol,
            Err(e) => {
                tracing::debug!(error = %e, "registry symbol lookup failed");
                return Err(HarnessError::MissingRegistry { name: name.to_string() });
            }
        };

        // SAFETY: the registry is a static inside the loaded library.
        let registry = unsafe { registry_fn().as_ref() }
            .ok_or_else(|| HarnessError::MissingRegistry { name: name.to_string() })?;

        if registry.abi_version != ABI_VERSION {
            return Err(HarnessError::AbiMismatch {
                name: name.to_string(),
                expected: ABI_VERSION,
                found: registry.abi_version,
            });
        }

        let entries: &[TestEntry] = if registry.len == 0 {
            &[]
        } else if registry.entries.is_null() {
            return Err(HarnessError::Load {
                path: path.to_path_buf(),
                reason: format!("registry lists {} entries but has no entry table", registry.len),
            });
        } else {
            // SAFETY: `export_tests!` builds `entries`/`len` from one static slice.
            unsafe { slice::from_raw_parts(registry.entries, registry.len) }
        };

        let exports = entries.iter().map(|entry| export_for(entry, &library)).collect();

        // SAFETY: `nativetest_total_refcount` is declared by `export_live_count!` with the `LiveCountFn` signature.
        let counter = unsafe { library.get::<LiveCountFn>(LIVE_COUNT_SYMBOL) }
            .ok()
            .map(|symbol| NativeCounter {
                func: *symbol,
                _library: Rc::clone(&library),
            });

        tracing::debug!(
            entries = entries.len(),
            live_count = counter.is_some(),
            "module registry read"
        );

        Ok(Self {
            name: name.to_string(),
            path: path.to_path_buf(),
            exports,
            counter,
            _library: library,
        })
    }

    /// File the module was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn export_for(entry: &TestEntry, library: &Rc<Library>) -> ModuleExport {
    let name = if entry.name.is_null() {
        String::new()
    } else {
        // SAFETY: registry names are NUL-terminated statics of the loaded library.
        unsafe { CStr::from_ptr(entry.name) }.to_string_lossy().into_owned()
    };

    match entry.func {
        Some(func) => {
            let library = Rc::clone(library);
            ModuleExport::new(
                name,
                Rc::new(move || {
                    let _library = &library;
                    // SAFETY: `func` points into the library kept alive by the captured handle.
                    unsafe { func() }
                }),
            )
        }
        None => ModuleExport::uncallable(name),
    }
}

impl TestModule for NativeModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn exports(&self) -> Vec<ModuleExport> {
        self.exports.clone()
    }

    fn live_object_counter(&self) -> Option<&dyn LiveObjectCounter> {
        self.counter.as_ref().map(|c| c as &dyn LiveObjectCounter)
    }
}

impl fmt::Debug for NativeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeModule")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("exports", &self.exports.len())
            .field("live_count", &self.counter.is_some())
            .finish()
    }
}
