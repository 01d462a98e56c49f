//! Per-file errors and input validation.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A file that could not produce a record at all.
#[derive(Debug, Error)]
pub enum IntrospectError {
    /// The file could not be read for hashing.
    #[error("failed to hash {}: {source}", path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IntrospectError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Hash { path, .. } => path,
        }
    }
}

/// An input path rejected before introspection starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
}

/// Check that `path` names an existing regular file (symlinks followed).
pub fn validate_input(path: &Path) -> Result<PathBuf, ValidationError> {
    match path.metadata() {
        Ok(meta) if meta.is_file() => Ok(path.to_path_buf()),
        Ok(_) => Err(ValidationError::NotAFile(path.to_path_buf())),
        Err(_) => Err(ValidationError::NotFound(path.to_path_buf())),
    }
}
