//! Unified error handling for Logdoc Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Logdoc Core operations.
///
/// This enum wraps all possible errors that can occur when using logdoc-core,
/// providing a unified interface for error handling. Errors are never
/// retried inside the core: every failure reaches the caller.
#[derive(Debug, Error, Clone)]
pub enum LogdocError {
    /// Errors from the domain layer (definition and schema rules).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (resolution, templates, output).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Schema or template infrastructure missing. Fatal at start-up.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl LogdocError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check the schemas.dir and templates.dir settings".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Logdoc".into(),
                "Please report this issue at: https://github.com/znerd/logdoc-rs/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::InvalidArgument => ErrorCategory::InvalidArgument,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    InvalidArgument,
    NotFound,
    Filesystem,
    Template,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type LogdocResult<T> = Result<T, LogdocError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn categories_distinguish_loading_from_output_failures() {
        let not_found: LogdocError = ApplicationError::NotFound {
            path: PathBuf::from("translation-bundle-en_US.xml"),
        }
        .into();
        let conflict: LogdocError = ApplicationError::OutputPathConflict {
            path: PathBuf::from("out/org"),
        }
        .into();
        let config: LogdocError = ApplicationError::TemplateConfiguration {
            template: "templates/x.jinja".into(),
            reason: "missing".into(),
        }
        .into();

        assert_eq!(not_found.category(), ErrorCategory::NotFound);
        assert_eq!(conflict.category(), ErrorCategory::Filesystem);
        assert_eq!(config.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn io_source_is_preserved() {
        use std::error::Error as _;

        let err: LogdocError = ApplicationError::io(
            "out/Log.java",
            "write file",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();
        assert!(err.to_string().contains("out/Log.java"));
        assert_eq!(err.source().map(|s| s.to_string()), Some("denied".into()));
    }
}
