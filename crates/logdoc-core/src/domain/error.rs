// ============================================================================
// domain/error.rs - DEFINITION AND SCHEMA ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports can be kept after the run)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Schema validation
    // ========================================================================
    #[error("'{document}' does not conform to the '{schema}' schema ({} violation(s))", violations.len())]
    SchemaViolation {
        schema: String,
        document: String,
        violations: Vec<String>,
    },

    // ========================================================================
    // Definition constraints (checked in every mode)
    // ========================================================================
    #[error("Invalid domain name '{name}': {reason}")]
    InvalidDomainName { name: String, reason: String },

    #[error("Invalid locale '{locale}': {reason}")]
    InvalidLocale { locale: String, reason: String },

    #[error("Locale '{locale}' is declared more than once in '{document}'")]
    DuplicateLocale { locale: String, document: String },

    #[error("Invalid reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("Invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("Unexpected root element <{found}> in '{document}', expected <{expected}>")]
    UnexpectedRoot {
        document: String,
        expected: String,
        found: String,
    },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required attribute missing: {element}/@{attribute}")]
    MissingAttribute { element: String, attribute: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SchemaViolation {
                document,
                violations,
                ..
            } => {
                let mut out = vec![format!("Fix the following problems in {document}:")];
                out.extend(violations.iter().map(|v| format!("  • {v}")));
                out
            }
            Self::InvalidDomainName { .. } => vec![
                "Use a dotted namespace such as 'com.example.app'".into(),
                "Each segment must start with a letter or '_'".into(),
            ],
            Self::InvalidLocale { .. } => vec![
                "Locales look like 'en' or 'en_US'".into(),
                "Only letters, digits and '_' are allowed".into(),
            ],
            Self::DuplicateLocale { locale, .. } => vec![
                format!("Remove the second <translation-bundle locale=\"{locale}\"/> declaration"),
            ],
            Self::InvalidTarget { .. } => vec![
                "Targets are simple names such as 'slf4j'".into(),
                "Try: logdoc templates to see the available template sets".into(),
            ],
            Self::InvalidReference { .. } => vec![
                "References are relative to the definition directory".into(),
                "Use '/' separators and no '..' segments".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SchemaViolation { .. }
            | Self::InvalidDomainName { .. }
            | Self::InvalidLocale { .. }
            | Self::DuplicateLocale { .. }
            | Self::UnexpectedRoot { .. }
            | Self::MissingAttribute { .. } => ErrorCategory::Validation,
            Self::InvalidTarget { .. } | Self::InvalidReference { .. } => {
                ErrorCategory::InvalidArgument
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    InvalidArgument,
}
