//! Custom error types for better error handling and user feedback.
//!
//! This module defines the crate's error type. Variants carry the vault path
//! or the offending value so host plugins can surface clear messages.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type with specific variants for different failure scenarios.
#[derive(Error, Debug)]
pub enum AppError {
    /// File system operation errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create folder '{path}': {source}")]
    FolderCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File not found: '{0}'")]
    FileNotFound(PathBuf),

    #[error("Invalid file path: '{0}'")]
    InvalidPath(String),

    /// Download errors
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("No download directory available")]
    DownloadDirUnavailable,

    /// Image processing errors
    #[error("Unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error("SVG export failed for '{path}': {reason}")]
    SvgExport { path: String, reason: String },

    /// Settings errors
    #[error("Failed to load settings: {0}")]
    SettingsLoad(String),

    #[error("Failed to save settings: {0}")]
    SettingsSave(String),

    /// Serialization errors
    #[error("JSON serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Convert AppError to a short message suitable for a host notice.
    pub fn to_user_message(&self) -> String {
        match self {
            AppError::FileNotFound(path) => {
                format!("File not found: {}", path.display())
            }
            AppError::InvalidPath(path) => {
                format!("Invalid file path: {}", path)
            }
            AppError::FolderCreate { path, .. } => {
                format!("Could not create folder: {}", path.display())
            }
            AppError::UnsupportedImageFormat(format) => {
                format!("Unsupported image format: {}", format)
            }
            AppError::SvgExport { path, .. } => {
                format!("Could not export drawing: {}", path)
            }
            AppError::DownloadDirUnavailable => {
                "No download folder found. Set one in the plugin settings.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// File operation an IO error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    Read,
    Write,
    CreateDir,
}

/// Helper trait for adding context to Results
pub trait ResultExt<T> {
    /// Add file path context to an IO error
    fn with_file_context(self, path: impl Into<PathBuf>, operation: FileOp) -> AppResult<T>;
}

impl<T> ResultExt<T> for Result<T, io::Error> {
    fn with_file_context(self, path: impl Into<PathBuf>, operation: FileOp) -> AppResult<T> {
        self.map_err(|source| {
            let path = path.into();
            match operation {
                FileOp::Read if source.kind() == io::ErrorKind::NotFound => {
                    AppError::FileNotFound(path)
                }
                FileOp::Read => AppError::FileRead { path, source },
                FileOp::Write => AppError::FileWrite { path, source },
                FileOp::CreateDir => AppError::FolderCreate { path, source },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_on_read_becomes_not_found() {
        let result: Result<(), io::Error> = Err(io::Error::from(io::ErrorKind::NotFound));
        let err = result.with_file_context("a/b.md", FileOp::Read).unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(ref p) if p == &PathBuf::from("a/b.md")));
    }

    #[test]
    fn write_errors_keep_their_path() {
        let result: Result<(), io::Error> =
            Err(io::Error::from(io::ErrorKind::PermissionDenied));
        let err = result.with_file_context("out.png", FileOp::Write).unwrap_err();
        assert!(err.to_string().starts_with("Failed to write file 'out.png'"));
    }

    #[test]
    fn folder_errors_are_folder_create() {
        let result: Result<(), io::Error> = Err(io::Error::from(io::ErrorKind::AlreadyExists));
        let err = result.with_file_context("taken", FileOp::CreateDir).unwrap_err();
        assert!(matches!(err, AppError::FolderCreate { .. }));
        assert_eq!(err.to_user_message(), "Could not create folder: taken");
    }

    #[test]
    fn user_message_is_short() {
        let err = AppError::SvgExport {
            path: "Drawing.md".into(),
            reason: "renderer crashed".into(),
        };
        assert_eq!(err.to_user_message(), "Could not export drawing: Drawing.md");
    }
}
