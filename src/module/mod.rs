//! Module import - resolving and loading a compiled test module.
//!
//! A module named `name` is the platform shared library `{DLL_PREFIX}{name}{DLL_SUFFIX}` (for example
//! `libtest_module.so`) found in the first directory of the [`ModuleSearchPath`] that holds it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

#[allow(unsafe_code)]
mod native;

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::PathBuf;

use crate::error::{HarnessError, HarnessResult};

pub use native::NativeModule;

/// Ordered directories searched by [`import_module`].
#[derive(Debug, Clone, Default)]
pub struct ModuleSearchPath {
    dirs: Vec<PathBuf>,
}

impl ModuleSearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directory; it is searched after the ones already present.
    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Path of the first library file for `name` in the search path.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let file_name = library_file_name(name);
        self.dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
    }
}

/// Platform file name of the shared library for module `name`.
pub fn library_file_name(name: &str) -> String {
    format!("{DLL_PREFIX}{name}{DLL_SUFFIX}")
}

/// Import module `name` from `search_path`.
#[tracing::instrument(skip_all, fields(module = name))]
pub fn import_module(search_path: &ModuleSearchPath, name: &str) -> HarnessResult<NativeModule> {
    let Some(path) = search_path.find(name) else {
        return Err(HarnessError::ModuleNotFound {
            name: name.to_string(),
            searched: describe(search_path.dirs()),
        });
    };

    tracing::debug!(path = %path.display(), "loading module");
    NativeModule::load(name, &path)
}

fn describe(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
