//! Directory listing shared by the batch drivers.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// All files in `dir` with the given extension, sorted by path so runs are
/// deterministic regardless of directory order.
pub fn documents_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("cannot read {}: {}", dir.display(), e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("cannot read {}: {}", dir.display(), e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| format!("cannot read {}: {}", dir.display(), e))?;
        if !file_type.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(OsStr::to_str) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name for messages, tolerating non-UTF-8 paths.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
