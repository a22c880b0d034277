//! Application layer errors.
//!
//! These errors represent failures in loading, resolving and writing, not
//! definition rules. Definition and schema errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during resolution, transformation and output.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Caller passed a path that is not an existing directory.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A referenced input document does not exist.
    #[error("Document not found: {path}")]
    NotFound { path: PathBuf },

    /// An input document is not well-formed markup.
    #[error("Failed to parse '{document}': {reason}")]
    Parse { document: String, reason: String },

    /// Source or destination directory unusable.
    #[error("{role} directory {path} is unusable: {reason}")]
    Directory {
        role: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// An output directory path exists but is not a directory.
    #[error("Path {path} exists, but it is not a directory")]
    OutputPathConflict { path: PathBuf },

    /// Template missing or not compilable.
    #[error("Unable to prepare template '{template}': {reason}")]
    TemplateConfiguration { template: String, reason: String },

    /// Template compiled but failed while rendering.
    #[error("Template '{template}' failed: {reason}")]
    TemplateExecution { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Failed to {operation} {path}")]
    FilesystemError {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Shared state of an adapter is poisoned.
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidArgument { .. } => vec![
                "Pass the directory that contains log.xml".into(),
                "Try: logdoc check --input <dir>".into(),
            ],
            Self::NotFound { path } => vec![
                format!("Create {}", path.display()),
                "Every <translation-bundle locale=\"xx\"/> needs a translation-bundle-xx.xml file"
                    .into(),
            ],
            Self::Parse { document, .. } => vec![
                format!("{document} is not well-formed XML"),
                "Check for unclosed tags and unescaped '&' or '<'".into(),
            ],
            Self::Directory { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the directory exists and you have the right permissions".into(),
            ],
            Self::OutputPathConflict { path } => vec![
                format!("Remove or rename the file at {}", path.display()),
                "Or choose a different output directory with --out".into(),
            ],
            Self::TemplateConfiguration { .. } => vec![
                "Check the template name and its syntax".into(),
                "Try: logdoc templates to see the available templates".into(),
            ],
            Self::TemplateExecution { .. } => vec![
                "The template could not be applied to this definition".into(),
                "Run with -vv for template diagnostics".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::StoreLockError => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::InvalidArgument,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Parse { .. } => ErrorCategory::Validation,
            Self::Directory { .. }
            | Self::OutputPathConflict { .. }
            | Self::FilesystemError { .. } => ErrorCategory::Filesystem,
            Self::TemplateConfiguration { .. } => ErrorCategory::Configuration,
            Self::TemplateExecution { .. } => ErrorCategory::Template,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }

    /// Wrap an I/O failure, keeping it as the error source.
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
        Self::FilesystemError {
            path: path.into(),
            operation,
            source: Arc::new(source),
        }
    }
}
