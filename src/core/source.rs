//! The canonical component source.

use std::path::{Path, PathBuf};

use crate::error::SyncError;

/// A component source file, read once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceComponent {
    pub path: PathBuf,
    pub text: String,
}

impl SourceComponent {
    /// Read the component source.
    ///
    /// Any failure to read is reported as a missing source: the run cannot
    /// do anything without it.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = std::fs::read_to_string(path).map_err(|source| SyncError::MissingSource {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(SourceComponent {
            path: path.to_path_buf(),
            text,
        })
    }
}

/// An import statement and the module it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    /// The statement text as written, from `import` to the closing quote.
    pub statement: String,
    /// The module specifier (`react`, `@/components/ui/button`, `./x`).
    pub specifier: String,
}
