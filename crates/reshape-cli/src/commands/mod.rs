pub mod classify;
pub mod matching;
pub mod rename;
pub mod version;

use miette::{IntoDiagnostic, Result};
use reshape_core::Document;
use std::path::{Path, PathBuf};

/// Resolve a user-supplied path against the configured working directory.
pub fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

pub fn load_document(cwd: &Path, path: &Path) -> Result<Document> {
    Document::load(&resolve(cwd, path)).into_diagnostic()
}
