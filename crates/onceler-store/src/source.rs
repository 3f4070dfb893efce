//! Loading migrations from `.sql` files
//!
//! A migration's name is its file stem and its script is the file's exact
//! contents. Directory listings run in file-name order.

use std::path::{Path, PathBuf};

use onceler_core::errors::{io_error, MigrationError};
use onceler_core::Migration;

use crate::errors::Result;

const SCRIPT_EXTENSION: &str = "sql";

/// Load every `*.sql` file directly inside `dir`, sorted by file name.
///
/// Subdirectories and other extensions are ignored.
pub fn load_dir(dir: &Path) -> Result<Vec<Migration>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_error("load_migrations", e))? {
        let path = entry.map_err(|e| io_error("load_migrations", e))?.path();
        let is_script = path
            .extension()
            .map(|ext| ext == SCRIPT_EXTENSION)
            .unwrap_or(false);
        if is_script && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "found migration files");

    files.iter().map(PathBuf::as_path).map(load_file).collect()
}

/// Load a single migration file
pub fn load_file(path: &Path) -> Result<Migration> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| invalid(path, "file name is not valid UTF-8"))?;

    let bytes = std::fs::read(path).map_err(|e| io_error("load_migrations", e))?;
    let script = String::from_utf8(bytes).map_err(|_| invalid(path, "contents are not valid UTF-8"))?;

    Ok(Migration::new(name, script))
}

fn invalid(path: &Path, reason: &str) -> MigrationError {
    MigrationError::InvalidSource {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
