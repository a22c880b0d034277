// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Logdoc.
//!
//! This module contains pure logic with no I/O. Reading files, parsing
//! markup and rendering templates are handled via ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde
//! - **Immutable entities**: A `LogDef` is never mutated once assembled
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    artifact::{Artifact, ArtifactKind, TEMPLATE_ROOT, TemplateParams, template_path},
    common::RelativeRef,
    document::{XmlDocument, XmlElement, XmlNode},
    log_def::{Entry, Group, LogDef},
    schema::{
        AttributeRule, AttributeType, ChildRule, ElementRule, LOG_SCHEMA, Schema, SchemaSet,
        TRANSLATION_BUNDLE_SCHEMA,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{AccessLevel, DomainName, Locale, Target};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn access_level_renders_template_keyword() {
        assert_eq!(AccessLevel::Public.to_string(), "public");
        assert_eq!(AccessLevel::Protected.to_string(), "protected");
        assert_eq!(AccessLevel::default(), AccessLevel::Protected);
    }

    #[test]
    fn domain_name_segments() {
        let name = DomainName::parse("org.znerd.logdoc").unwrap();
        assert_eq!(name.segments().collect::<Vec<_>>(), ["org", "znerd", "logdoc"]);
    }

    // ========================================================================
    // Validator Tests
    // ========================================================================

    #[test]
    fn validator_checks_root_name() {
        let doc = XmlDocument::new("log.xml", XmlElement::new("logs"));
        let err = DomainValidator::validate_root(&doc, "log").unwrap_err();
        assert!(matches!(err, DomainError::UnexpectedRoot { .. }));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn schema_violation_suggestions_list_every_problem() {
        let err = DomainError::SchemaViolation {
            schema: "log".into(),
            document: "log.xml".into(),
            violations: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.suggestions().len(), 3);
    }

    // ========================================================================
    // Definition Model Tests
    // ========================================================================

    #[test]
    fn public_definition_binds_public_access_level_everywhere() {
        let root = XmlElement::new("log")
            .with_attribute("domain", "org.znerd")
            .with_attribute("public", "true")
            .with_child(XmlElement::new("translation-bundle").with_attribute("locale", "en_US"));
        let mut bundles = BTreeMap::new();
        bundles.insert(
            "en_US".parse::<Locale>().unwrap(),
            XmlDocument::new("translation-bundle-en_US.xml", XmlElement::new("translation-bundle")),
        );

        let def = LogDef::assemble(XmlDocument::new("log.xml", root), bundles).unwrap();
        let plan = def.plan_artifacts(None);

        assert_eq!(plan.len(), 3);
        for artifact in &plan {
            assert_eq!(artifact.params().get("accesslevel"), Some("public"));
            assert_eq!(artifact.params().get("package_name"), Some("org.znerd"));
        }
    }

    #[test]
    fn invalid_domain_fails_assembly() {
        let root = XmlElement::new("log").with_attribute("domain", "org/../etc");
        let err = LogDef::assemble(XmlDocument::new("log.xml", root), BTreeMap::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDomainName { .. }));
    }
}
