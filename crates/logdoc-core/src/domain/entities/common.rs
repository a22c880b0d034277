use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// A `/`-separated reference that stays inside the directory it is resolved
/// against.
///
/// Input documents and template includes are both addressed this way, so
/// the same guard applies to both: no absolute paths, no `..`, no empty or
/// `.` segments, no backslashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeRef(String);

impl RelativeRef {
    pub fn parse(reference: impl Into<String>) -> Result<Self, DomainError> {
        let reference = reference.into();
        let reason = if reference.is_empty() {
            Some("reference is empty")
        } else if reference.starts_with('/') || Path::new(&reference).is_absolute() {
            Some("absolute references are not allowed")
        } else if reference.contains('\\') {
            Some("use '/' as the separator")
        } else if reference
            .split('/')
            .any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            Some("references must not contain empty, '.' or '..' segments")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidReference {
                reference,
                reason: reason.into(),
            }),
            None => Ok(Self(reference)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against `base`, one path component per segment.
    pub fn to_path(&self, base: &Path) -> PathBuf {
        let mut path = base.to_path_buf();
        path.extend(self.0.split('/'));
        path
    }
}

impl AsRef<str> for RelativeRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
