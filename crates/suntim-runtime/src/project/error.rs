//! Project file error types.

use std::path::PathBuf;
use suntim_types::ErrorCode;
use thiserror::Error;

/// Errors from saving or loading project documents.
///
/// # Error Code Convention
///
/// | Error | Code | Recoverable |
/// |-------|------|-------------|
/// | [`NotFound`](ProjectError::NotFound) | `PROJECT_NOT_FOUND` | Yes |
/// | [`Io`](ProjectError::Io) | `PROJECT_IO` | Yes |
/// | [`Serialization`](ProjectError::Serialization) | `PROJECT_SERIALIZATION` | No |
/// | [`DirectoryCreation`](ProjectError::DirectoryCreation) | `PROJECT_DIRECTORY_CREATION` | No |
/// | [`VersionIncompatible`](ProjectError::VersionIncompatible) | `PROJECT_VERSION_INCOMPATIBLE` | No |
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a well-formed project document.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to create project directory: {}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("version incompatible: file version {file_version}, supported {supported_version}")]
    VersionIncompatible {
        file_version: String,
        supported_version: &'static str,
    },
}

impl ProjectError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn directory_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.into(),
            source,
        }
    }
}

impl ErrorCode for ProjectError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "PROJECT_NOT_FOUND",
            Self::Io(_) => "PROJECT_IO",
            Self::Serialization(_) => "PROJECT_SERIALIZATION",
            Self::DirectoryCreation { .. } => "PROJECT_DIRECTORY_CREATION",
            Self::VersionIncompatible { .. } => "PROJECT_VERSION_INCOMPATIBLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Io(_))
    }
}
