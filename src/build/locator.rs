//! Artifact locator - finds the build output entry that holds the compiled module

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Find the entry of `build_dir` whose name starts with `marker`.
///
/// Returns `Ok(None)` when nothing matches or `build_dir` does not exist; callers add whatever is found to
/// the module search path and let a missing artifact surface as an import failure. When several entries
/// match, the lexicographically last one wins.
#[tracing::instrument(skip_all, fields(build_dir = %build_dir.display(), marker = %marker))]
pub fn locate_artifact_dir(build_dir: &Path, marker: &str) -> io::Result<Option<PathBuf>> {
    let entries = match fs::read_dir(build_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("build output directory does not exist");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(marker) {
            matches.push(entry.path());
        }
    }
    matches.sort();

    if matches.len() > 1 {
        tracing::warn!(count = matches.len(), "several build entries match the artifact marker; using the last");
    }

    let found = matches.pop();
    tracing::debug!(found = ?found, "artifact lookup finished");
    Ok(found)
}
