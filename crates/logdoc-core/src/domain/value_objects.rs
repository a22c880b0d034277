//! Domain value objects: DomainName, AccessLevel, Locale, Target.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Each
//! one guards the invariant that lets it flow into a filesystem path or a
//! template parameter without further checks, so construction is always
//! fallible and goes through `parse` / `FromStr`.

use crate::domain::error::DomainError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ── DomainName ────────────────────────────────────────────────────────────────

/// The dotted namespace a log definition generates into, e.g. `org.znerd`.
///
/// The empty name is representable: it maps to the destination root. Whether
/// an empty `domain` attribute is acceptable is decided by the schema (the
/// strict `namespace` type rejects it).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Ok(Self(name));
        }

        for segment in name.split('.') {
            let reason = if segment.is_empty() {
                Some("empty segment")
            } else if segment.contains(['/', '\\']) {
                Some("path separators are not allowed")
            } else if segment.chars().any(char::is_whitespace) {
                Some("whitespace is not allowed")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(DomainError::InvalidDomainName {
                    name,
                    reason: reason.into(),
                });
            }
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// Relative directory for generated sources: `org.znerd` → `org/znerd`.
    pub fn to_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── AccessLevel ───────────────────────────────────────────────────────────────

/// Visibility of generated classes, bound to the `accesslevel` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    #[default]
    Protected,
}

impl AccessLevel {
    /// Interpret the `public` attribute. Only the literal `true` makes the
    /// definition public; any other value, or none, is protected.
    pub fn from_public_attribute(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("true") => Self::Public,
            _ => Self::Protected,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
        }
    }

    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Locale ────────────────────────────────────────────────────────────────────

/// A translation locale key such as `en_US`.
///
/// Locales end up in file names (`translation-bundle-en_US.xml`,
/// `TranslationBundle_en_US.java`), so only ASCII letters, digits and `_`
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the companion translation bundle document.
    pub fn bundle_file_name(&self) -> String {
        format!("translation-bundle-{}.xml", self.0)
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidLocale {
            locale: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("locale is empty"));
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("only ASCII letters, digits and '_' are allowed"));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Target ────────────────────────────────────────────────────────────────────

/// Selects an alternative template set, e.g. `slf4j`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Target {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(DomainError::InvalidTarget {
                target: s.to_string(),
                reason: "use ASCII letters, digits, '-' or '_'".into(),
            })
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn domain_name_maps_to_nested_directories() {
        let name = DomainName::parse("com.example").unwrap();
        assert_eq!(name.to_path(), Path::new("com").join("example"));
    }

    #[test]
    fn empty_domain_name_maps_to_root() {
        let name = DomainName::parse("").unwrap();
        assert!(name.is_empty());
        assert_eq!(name.to_path(), PathBuf::new());
    }

    #[test]
    fn domain_name_rejects_traversal_and_separators() {
        assert!(DomainName::parse("org..znerd").is_err());
        assert!(DomainName::parse("org/znerd").is_err());
        assert!(DomainName::parse(".hidden").is_err());
        assert!(DomainName::parse("org. znerd").is_err());
    }

    #[test]
    fn public_attribute_parses_like_a_boolean() {
        assert_eq!(
            AccessLevel::from_public_attribute(Some("true")),
            AccessLevel::Public
        );
        assert_eq!(
            AccessLevel::from_public_attribute(Some("TRUE")),
            AccessLevel::Public
        );
        assert_eq!(
            AccessLevel::from_public_attribute(Some("yes")),
            AccessLevel::Protected
        );
        assert_eq!(
            AccessLevel::from_public_attribute(None),
            AccessLevel::Protected
        );
    }

    #[test]
    fn locale_must_be_filesystem_safe() {
        assert_eq!(
            "en_US".parse::<Locale>().unwrap().bundle_file_name(),
            "translation-bundle-en_US.xml"
        );
        assert!("".parse::<Locale>().is_err());
        assert!("../x".parse::<Locale>().is_err());
        assert!("en-US".parse::<Locale>().is_err());
    }

    #[test]
    fn target_is_normalized_to_lowercase() {
        assert_eq!("SLF4J".parse::<Target>().unwrap().as_str(), "slf4j");
        assert!("a/b".parse::<Target>().is_err());
    }
}
