//! Error and warning types shared across the analysis pipeline.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort an analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("modules root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("modules root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// A non-fatal problem with a single source file.
///
/// The file's contribution to its module's import set is absent; the rest of
/// the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReadWarning {
    /// Path of the file that could not be read
    pub path: PathBuf,
    /// Module the file belongs to, once known
    pub module: Option<String>,
    /// Human-readable cause (I/O error, invalid UTF-8, ...)
    pub message: String,
}

impl FileReadWarning {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            module: None,
            message: message.into(),
        }
    }

    /// Returns the warning attributed to `module`.
    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

impl fmt::Display for FileReadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "{}: ", module)?;
        }
        write!(f, "could not read {}: {}", self.path.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_not_found_message() {
        let err = AnalysisError::RootNotFound(PathBuf::from("/nope/SubModules"));
        assert_eq!(err.to_string(), "modules root not found: /nope/SubModules");
    }

    #[test]
    fn test_warning_display() {
        let warning = FileReadWarning::new("Core/a.swift", "stream did not contain valid UTF-8");
        assert_eq!(
            warning.to_string(),
            "could not read Core/a.swift: stream did not contain valid UTF-8"
        );
        assert_eq!(warning.module, None);
    }

    #[test]
    fn test_warning_in_module() {
        let warning = FileReadWarning::new("Core/a.swift", "permission denied").in_module("Core");
        assert_eq!(warning.module.as_deref(), Some("Core"));
        assert_eq!(warning.to_string(), "Core: could not read Core/a.swift: permission denied");
    }

    #[test]
    fn test_read_dir_message() {
        let err = AnalysisError::ReadDir {
            path: PathBuf::from("/m"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read directory /m: denied");
    }
}
